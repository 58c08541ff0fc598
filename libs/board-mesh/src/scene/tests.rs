//! Tests for scene description parsing and assembly.

use super::*;
use crate::pose::{PlacementMode, Rotation};
use crate::source::BufferSource;
use crate::trace::TraceStyle;
use approx::assert_abs_diff_eq;
use config::constants::{DEFAULT_CAMERA_FOV, DEFAULT_POINT_LIGHT_POSITIONS};

/// Unit cube corners spanning `0..1` on every axis.
fn cube_source(path: &str) -> BufferSource {
    let mut positions = Vec::new();
    for i in 0..8 {
        positions.extend_from_slice(&[(i & 1) as f32, ((i >> 1) & 1) as f32, ((i >> 2) & 1) as f32]);
    }
    BufferSource::new(path, positions, Some(vec![0, 1, 3, 4, 7, 5])).unwrap()
}

// =============================================================================
// DESCRIPTION
// =============================================================================

#[test]
fn test_empty_description_uses_viewer_defaults() {
    let description = SceneDescription::from_json("{}").unwrap();

    assert_eq!(description.board.width, 40.0);
    assert_eq!(description.board.depth, 0.6);
    assert!(description.board.underlay);
    assert_eq!(description.camera.fov, DEFAULT_CAMERA_FOV);
    assert_eq!(description.lights.point_positions.len(), DEFAULT_POINT_LIGHT_POSITIONS.len());
    assert!(description.models.is_empty());
}

#[test]
fn test_full_description() {
    let json = r#"{
        "board": {"width": 20, "height": 10, "depth": 0.5, "underlay": false,
                  "holes": [{"x": 1, "y": 1, "radius": 0.3, "segments": 24}]},
        "models": [{"path": "/models/led.wrl", "position": {"x": 0, "y": 6},
                    "rotation": {"x": -0.5}, "mode": "center_on_surface"}],
        "traces": [{"points": [[0, 0], [1, 0]], "thickness": 0.1, "style": {"tube": {"segments": 6}}}],
        "labels": [{"text": "R1", "position": {"x": 2, "y": 3}, "rotation": 0.5}]
    }"#;
    let description = SceneDescription::from_json(json).unwrap();

    assert_eq!(description.board.holes[0].segments, 24);
    assert!(!description.board.underlay);
    assert_eq!(description.models[0].rotation, Rotation::new(-0.5, 0.0, 0.0));
    assert_eq!(description.models[0].mode, PlacementMode::CenterOnSurface);
    assert_eq!(description.traces[0].style, TraceStyle::Tube { segments: 6 });
    assert_eq!(description.labels[0].size, 1.0);
}

#[test]
fn test_trace_thickness_default() {
    let description = SceneDescription::from_json(r#"{"traces": [{"points": [[0, 0], [1, 1]]}]}"#).unwrap();
    assert_eq!(description.traces[0].thickness, 0.2);
    assert_eq!(description.traces[0].style, TraceStyle::Ribbon);
}

#[test]
fn test_malformed_json_is_scene_error() {
    let err = SceneDescription::from_json(r#"{"board": {"width": "wide"}}"#).unwrap_err();
    assert!(matches!(err, MeshError::Scene { .. }));
}

#[test]
fn test_json_round_trip() {
    let description = SceneDescription::from_json(r#"{"labels": [{"text": "U1"}]}"#).unwrap();
    let again = SceneDescription::from_json(&description.to_json().unwrap()).unwrap();
    assert_eq!(description, again);
}

// =============================================================================
// ASSEMBLY
// =============================================================================

#[test]
fn test_assemble_default_scene() {
    let scene = SceneAssembler::from_json("{}").unwrap().assemble().unwrap();

    assert_eq!(scene.board.vertex_count(), 8);
    assert!(scene.board.colors().is_some());
    let underlay = scene.underlay.unwrap();
    assert!(underlay.bounding_box().unwrap().max.y <= scene.board.bounding_box().unwrap().min.y + 1e-12);
    assert!(scene.traces.is_empty());
    assert!(scene.failures.is_empty());
}

#[test]
fn test_bad_board_aborts() {
    let result = SceneAssembler::from_json(r#"{"board": {"width": -1}}"#).unwrap().assemble();
    assert!(result.unwrap_err().is_invalid_geometry());
}

#[test]
fn test_failed_trace_is_omitted() {
    let assembler = SceneAssembler::from_json(
        r#"{"traces": [
            {"points": [[0, 0], [2, 0]]},
            {"points": [[1, 1], [1, 1]]},
            {"points": [[0, 0]]},
            {"points": [[-3, 0], [-3, 4], [0, 4]], "style": {"tube": {"segments": 8}}}
        ]}"#,
    )
    .unwrap();
    let scene = assembler.assemble().unwrap();

    let built: Vec<usize> = scene.traces.iter().map(|(i, _)| *i).collect();
    assert_eq!(built, vec![0, 3]);
    assert_eq!(scene.failures.len(), 2);
    assert_eq!(scene.failures[0].kind, ElementKind::Trace);
    assert_eq!(scene.failures[0].index, 1);
    assert!(scene.failures[0].error.is_degenerate());
    assert!(scene.failures[1].error.is_invalid_geometry());
}

#[test]
fn test_traces_sit_above_board() {
    let scene = SceneAssembler::from_json(r#"{"traces": [{"points": [[0, 0], [5, 5]]}]}"#)
        .unwrap()
        .assemble()
        .unwrap();
    let (_, trace) = &scene.traces[0];
    assert!(trace.vertices().iter().all(|v| v.y > 0.0));
}

#[test]
fn test_build_traces_keeps_order() {
    let assembler = SceneAssembler::from_json(
        r#"{"traces": [
            {"points": [[0, 0], [1, 0]]},
            {"points": [[0, 0], [1, 0], [1, 1]]},
            {"points": [[0, 0], [1, 0], [1, 1], [0, 1]]}
        ]}"#,
    )
    .unwrap();
    let counts: Vec<usize> = assembler
        .build_traces()
        .into_iter()
        .map(|r| r.unwrap().triangle_count())
        .collect();
    assert_eq!(counts, vec![2, 4, 6]);
}

#[test]
fn test_labels_lie_flat() {
    let scene = SceneAssembler::from_json(r#"{"labels": [{"text": "C3", "position": {"x": 4, "y": -2}, "rotation": 0.5}]}"#)
        .unwrap()
        .assemble()
        .unwrap();
    let label = &scene.labels[0];

    assert_eq!(label.text, "C3");
    assert_eq!(label.position.x, 4.0);
    assert_eq!(label.position.z, -2.0);
    assert!(label.position.y > 0.0);
    assert_abs_diff_eq!(label.rotation.x, -FRAC_PI_2);
    assert_abs_diff_eq!(label.rotation.z, FRAC_PI_2);
}

// =============================================================================
// MODELS
// =============================================================================

#[test]
fn test_place_model_rests_on_board() {
    let assembler = SceneAssembler::from_json(
        r#"{"models": [{"path": "part.stl", "position": {"x": 3, "y": 4}, "rotation": {"x": 0.5}}]}"#,
    )
    .unwrap();
    let placed = assembler.place_model(0, &cube_source("part.stl")).unwrap();

    assert_eq!(placed.format, AssetFormat::Stl);
    let bounds = placed.mesh.bounding_box().unwrap();
    assert_abs_diff_eq!(bounds.min.y, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(placed.pose.position.x, 3.0);
    assert_abs_diff_eq!(placed.pose.position.z, 4.0);
    assert!(placed.mesh.colors().is_some());
}

#[test]
fn test_place_model_center_mode() {
    let assembler = SceneAssembler::from_json(
        r#"{"models": [{"path": "chip.glb", "mode": "center_on_surface"}]}"#,
    )
    .unwrap();
    let placed = assembler.place_model(0, &cube_source("chip.glb")).unwrap();
    let bounds = placed.mesh.bounding_box().unwrap();
    assert_abs_diff_eq!(bounds.center().y, 0.0, epsilon = 1e-9);
}

#[test]
fn test_place_model_errors() {
    let assembler = SceneAssembler::from_json(
        r#"{"models": [{"path": "part.fbx"}, {"path": "empty.obj"}]}"#,
    )
    .unwrap();

    let err = assembler.place_model(0, &cube_source("part.stl")).unwrap_err();
    assert_eq!(err, MeshError::unsupported_format("fbx"));

    let empty = BufferSource::new("empty.obj", Vec::new(), None).unwrap();
    assert!(assembler.place_model(1, &empty).unwrap_err().is_degenerate());

    assert!(matches!(
        assembler.place_model(7, &empty).unwrap_err(),
        MeshError::Scene { .. }
    ));
}

#[test]
fn test_assemble_with_models() {
    let assembler = SceneAssembler::from_json(
        r#"{"models": [{"path": "a.stl"}, {"path": "b.obj"}]}"#,
    )
    .unwrap();
    let a = cube_source("a.stl");
    let b = BufferSource::new("b.obj", Vec::new(), None).unwrap();

    let scene = assembler.assemble_with_models(&[&a, &b]).unwrap();
    assert_eq!(scene.models.len(), 1);
    assert_eq!(scene.models[0].index, 0);
    assert_eq!(scene.failures.len(), 1);
    assert_eq!(scene.failures[0].kind, ElementKind::Model);

    assert!(assembler.assemble_with_models(&[&a]).is_err());
}

#[test]
fn test_assemble_is_deterministic() {
    let json = r#"{
        "board": {"holes": [{"x": 2, "y": 2, "radius": 0.4}, {"x": -2, "y": 2, "radius": 0.4}]},
        "traces": [{"points": [[0, 0], [3, 1], [6, 0]]}, {"points": [[1, 1], [1, 5]], "style": {"tube": {"segments": 5}}}]
    }"#;
    let assembler = SceneAssembler::from_json(json).unwrap();
    assert_eq!(assembler.assemble().unwrap(), assembler.assemble().unwrap());
}
