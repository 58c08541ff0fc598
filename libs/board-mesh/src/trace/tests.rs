//! Tests for wire trace extrusion.

use super::*;
use approx::{assert_abs_diff_eq, assert_relative_eq};

// =============================================================================
// RIBBON
// =============================================================================

#[test]
fn test_straight_segment_corners() {
    let mesh = extrude_trace(&[DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)], 0.2, 0.01).unwrap();

    let expected = [
        DVec3::new(0.0, 0.01, 0.1),
        DVec3::new(0.0, 0.01, -0.1),
        DVec3::new(10.0, 0.01, -0.1),
        DVec3::new(10.0, 0.01, 0.1),
    ];
    assert_eq!(mesh.vertices(), &expected);
    assert_eq!(mesh.triangle_count(), 2);
}

#[test]
fn test_ribbon_faces_up() {
    let points = [DVec2::new(0.0, 0.0), DVec2::new(3.0, 4.0), DVec2::new(-2.0, 7.0)];
    let mesh = extrude_trace(&points, 0.5, 0.0).unwrap();

    for i in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle_positions(i);
        assert!((b - a).cross(c - a).y > 0.0);
    }
}

#[test]
fn test_ribbon_width_equals_thickness() {
    let points = [DVec2::new(1.0, 1.0), DVec2::new(4.0, 5.0)];
    let mesh = extrude_trace(&points, 0.3, 0.0).unwrap();
    let v = mesh.vertices();

    assert_relative_eq!(v[0].distance(v[1]), 0.3, epsilon = 1e-12);
    assert_relative_eq!(v[3].distance(v[2]), 0.3, epsilon = 1e-12);
    assert_relative_eq!(v[1].distance(v[2]), 5.0, epsilon = 1e-12);
}

#[test]
fn test_segments_are_independent() {
    // Right-angle bend: no shared vertices, no join geometry
    let points = [DVec2::new(0.0, 0.0), DVec2::new(5.0, 0.0), DVec2::new(5.0, 5.0)];
    let mesh = extrude_trace(&points, 1.0, 0.0).unwrap();

    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 4);
    assert_eq!(mesh.vertex(2), DVec3::new(5.0, 0.0, -0.5));
    assert_eq!(mesh.vertex(4), DVec3::new(4.5, 0.0, 0.0));
}

#[test]
fn test_surface_height_is_applied() {
    let mesh = WireTraceExtruder::new(0.61)
        .extrude(&[DVec2::ZERO, DVec2::new(0.0, 2.0)], 0.1)
        .unwrap();
    assert!(mesh.vertices().iter().all(|v| v.y == 0.61));
}

// =============================================================================
// TUBE
// =============================================================================

#[test]
fn test_tube_rests_on_surface() {
    let extruder = WireTraceExtruder::new(0.5).with_style(TraceStyle::Tube { segments: 16 });
    let mesh = extruder.extrude(&[DVec2::new(-2.0, 1.0), DVec2::new(6.0, 1.0)], 0.4).unwrap();

    assert_eq!(mesh.vertex_count(), 2 * 16 + 2);
    assert!(mesh.is_watertight());

    let bounds = mesh.bounding_box().unwrap();
    assert_abs_diff_eq!(bounds.min.y, 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(bounds.max.y, 0.9, epsilon = 1e-9);
    assert_abs_diff_eq!(bounds.min.x, -2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bounds.max.x, 6.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bounds.center().z, 1.0, epsilon = 1e-9);
}

#[test]
fn test_tube_per_segment() {
    let extruder = WireTraceExtruder::new(0.0).with_style(TraceStyle::tube());
    let points = [DVec2::ZERO, DVec2::new(1.0, 0.0), DVec2::new(1.0, 3.0), DVec2::new(-2.0, 3.0)];
    let mesh = extruder.extrude(&points, 0.1).unwrap();

    let per_segment = 2 * DEFAULT_TUBE_SEGMENTS as usize + 2;
    assert_eq!(mesh.vertex_count(), 3 * per_segment);
    assert!(mesh.is_watertight());
    assert!(mesh.signed_volume() > 0.0);
    assert!(mesh.vertices().iter().all(|v| v.y > -1e-9));
}

#[test]
fn test_tube_rejects_too_few_segments() {
    let extruder = WireTraceExtruder::new(0.0).with_style(TraceStyle::Tube { segments: 2 });
    assert!(extruder
        .extrude(&[DVec2::ZERO, DVec2::X], 0.1)
        .unwrap_err()
        .is_invalid_geometry());
}

// =============================================================================
// ERRORS
// =============================================================================

#[test]
fn test_duplicate_point_is_degenerate() {
    let err = extrude_trace(&[DVec2::ZERO, DVec2::ZERO], 0.2, 0.0).unwrap_err();
    assert!(err.is_degenerate());
}

#[test]
fn test_duplicate_interior_point_is_degenerate() {
    let points = [DVec2::ZERO, DVec2::X, DVec2::X, DVec2::new(2.0, 0.0)];
    let err = extrude_trace(&points, 0.2, 0.0).unwrap_err();
    assert!(err.is_degenerate());
    assert!(err.to_string().contains("segment 1"));
}

#[test]
fn test_invalid_inputs() {
    assert!(extrude_trace(&[DVec2::ZERO], 0.2, 0.0).unwrap_err().is_invalid_geometry());
    assert!(extrude_trace(&[], 0.2, 0.0).unwrap_err().is_invalid_geometry());
    assert!(extrude_trace(&[DVec2::ZERO, DVec2::X], 0.0, 0.0).unwrap_err().is_invalid_geometry());
    assert!(extrude_trace(&[DVec2::ZERO, DVec2::X], -1.0, 0.0).unwrap_err().is_invalid_geometry());
    assert!(extrude_trace(&[DVec2::ZERO, DVec2::new(f64::NAN, 0.0)], 0.2, 0.0)
        .unwrap_err()
        .is_invalid_geometry());
}

#[test]
fn test_extrude_is_deterministic() {
    let points = [DVec2::new(0.3, 0.1), DVec2::new(2.7, -1.4), DVec2::new(5.0, 2.2)];
    for style in [TraceStyle::Ribbon, TraceStyle::tube()] {
        let extruder = WireTraceExtruder::new(0.01).with_style(style);
        assert_eq!(extruder.extrude(&points, 0.2).unwrap(), extruder.extrude(&points, 0.2).unwrap());
    }
}

#[test]
fn test_style_serde() {
    let style: TraceStyle = serde_json::from_str(r#"{"tube": {"segments": 8}}"#).unwrap();
    assert_eq!(style, TraceStyle::Tube { segments: 8 });
    let style: TraceStyle = serde_json::from_str("\"ribbon\"").unwrap();
    assert_eq!(style, TraceStyle::Ribbon);
}
