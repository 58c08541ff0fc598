//! Tests for asset pose normalization.

use super::*;
use approx::{assert_abs_diff_eq, assert_relative_eq};

/// Box spanning `min..max`, as a loader would deliver it.
fn box_mesh(min: DVec3, max: DVec3) -> Mesh {
    let mut mesh = Mesh::new();
    for i in 0..8 {
        mesh.add_vertex(DVec3::new(
            if i & 1 == 0 { min.x } else { max.x },
            if i & 2 == 0 { min.y } else { max.y },
            if i & 4 == 0 { min.z } else { max.z },
        ));
    }
    mesh.add_triangle(0, 1, 3);
    mesh.add_triangle(4, 7, 5);
    mesh
}

fn lowest_point(mesh: &Mesh) -> f64 {
    mesh.bounding_box().unwrap().min.y
}

#[test]
fn test_identity_rests_on_surface() {
    let mesh = box_mesh(DVec3::new(-1.0, -2.0, -1.0), DVec3::new(1.0, 5.0, 1.0));
    let pose = AssetPoseNormalizer::new(0.0)
        .normalize(&mesh, Rotation::IDENTITY, DVec2::new(3.0, -4.0))
        .unwrap();

    assert_eq!(pose.position, DVec3::new(3.0, 2.0, -4.0));
    assert_eq!(pose.rotation, DVec3::ZERO);
    assert_relative_eq!(lowest_point(&pose.apply(&mesh)), 0.0);
}

#[test]
fn test_rotation_applied_before_bounds() {
    // Tall thin asset laid on its side: the rotated extent along Y is the
    // original X extent, not the original Y extent.
    let mesh = box_mesh(DVec3::new(-0.5, 0.0, -0.5), DVec3::new(0.5, 10.0, 0.5));
    let pose = AssetPoseNormalizer::new(0.0)
        .normalize(&mesh, Rotation::new(0.0, 0.0, 0.5), DVec2::ZERO)
        .unwrap();

    let placed = pose.apply(&mesh);
    let bounds = placed.bounding_box().unwrap();
    assert_abs_diff_eq!(bounds.min.y, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bounds.size().y, 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(pose.position.y, 0.5, epsilon = 1e-9);
}

#[test]
fn test_any_rotation_touches_surface() {
    let mesh = box_mesh(DVec3::new(-1.0, -0.3, -2.0), DVec3::new(2.5, 1.0, 0.7));
    let normalizer = AssetPoseNormalizer::new(0.6);

    for &(x, y, z) in &[
        (0.5, 0.0, 0.0),
        (-0.5, 0.25, 1.0),
        (1.0, 1.0, 1.0),
        (0.13, -0.77, 0.41),
        (2.0, 0.5, -1.5),
    ] {
        let pose = normalizer.normalize(&mesh, Rotation::new(x, y, z), DVec2::new(1.0, 2.0)).unwrap();
        assert_abs_diff_eq!(lowest_point(&pose.apply(&mesh)), 0.6, epsilon = 1e-9);
        assert_eq!(pose.position.x, 1.0);
        assert_eq!(pose.position.z, 2.0);
    }
}

#[test]
fn test_center_mode() {
    let mesh = box_mesh(DVec3::new(-1.0, 2.0, -1.0), DVec3::new(1.0, 6.0, 1.0));
    let pose = AssetPoseNormalizer::new(1.0)
        .with_mode(PlacementMode::CenterOnSurface)
        .normalize(&mesh, Rotation::IDENTITY, DVec2::ZERO)
        .unwrap();

    assert_eq!(pose.position.y, 1.0 - 4.0);
    let bounds = pose.apply(&mesh).bounding_box().unwrap();
    assert_relative_eq!(bounds.center().y, 1.0);
}

#[test]
fn test_mode_is_never_inferred() {
    let normalizer = AssetPoseNormalizer::new(0.0);
    assert_eq!(normalizer.mode(), PlacementMode::RestOnSurface);
    assert_eq!(normalizer.surface_height(), 0.0);
}

#[test]
fn test_empty_mesh_is_degenerate() {
    let err = AssetPoseNormalizer::new(0.0)
        .normalize(&Mesh::new(), Rotation::IDENTITY, DVec2::ZERO)
        .unwrap_err();
    assert!(err.is_degenerate());
}

#[test]
fn test_single_point_mesh_is_degenerate() {
    let mut mesh = Mesh::new();
    mesh.add_vertex(DVec3::new(1.0, 1.0, 1.0));
    mesh.add_vertex(DVec3::new(1.0, 1.0, 1.0));

    let err = AssetPoseNormalizer::new(0.0)
        .normalize(&mesh, Rotation::new(0.3, 0.0, 0.0), DVec2::ZERO)
        .unwrap_err();
    assert!(err.is_degenerate());
}

#[test]
fn test_non_finite_input_is_invalid() {
    let mesh = box_mesh(DVec3::ZERO, DVec3::ONE);
    let normalizer = AssetPoseNormalizer::new(0.0);

    assert!(normalizer
        .normalize(&mesh, Rotation::new(f64::NAN, 0.0, 0.0), DVec2::ZERO)
        .unwrap_err()
        .is_invalid_geometry());
    assert!(normalizer
        .normalize(&mesh, Rotation::IDENTITY, DVec2::new(f64::INFINITY, 0.0))
        .unwrap_err()
        .is_invalid_geometry());
}

#[test]
fn test_mesh_is_not_modified() {
    let mesh = box_mesh(DVec3::ZERO, DVec3::ONE);
    let before = mesh.clone();
    let _ = AssetPoseNormalizer::new(0.0).normalize(&mesh, Rotation::new(0.5, 0.5, 0.0), DVec2::ONE);
    assert_eq!(mesh, before);
}

#[test]
fn test_rotation_matches_axis_product() {
    let rotation = Rotation::new(0.2, -0.4, 0.7);
    let r = rotation.to_radians();
    let expected = DMat3::from_rotation_x(r.x) * DMat3::from_rotation_y(r.y) * DMat3::from_rotation_z(r.z);

    let actual = rotation.matrix();
    for (a, e) in actual.to_cols_array().iter().zip(expected.to_cols_array()) {
        assert_abs_diff_eq!(*a, e, epsilon = 1e-12);
    }

    let from_quat = DMat3::from_quat(rotation.quaternion());
    for (a, e) in from_quat.to_cols_array().iter().zip(expected.to_cols_array()) {
        assert_abs_diff_eq!(*a, e, epsilon = 1e-12);
    }
}

#[test]
fn test_pose_matrix_and_quaternion_agree() {
    let mesh = box_mesh(DVec3::ZERO, DVec3::new(1.0, 2.0, 3.0));
    let rotation = Rotation::new(0.25, 0.5, 0.0);
    let pose = AssetPoseNormalizer::new(0.0).normalize(&mesh, rotation, DVec2::ZERO).unwrap();

    let p = DVec3::new(1.0, 2.0, 3.0);
    let via_matrix = pose.matrix().transform_point3(p);
    let via_parts = rotation.matrix() * p + pose.position;
    assert_abs_diff_eq!(via_matrix.x, via_parts.x, epsilon = 1e-12);
    assert_abs_diff_eq!(via_matrix.y, via_parts.y, epsilon = 1e-12);
    assert_abs_diff_eq!(via_matrix.z, via_parts.z, epsilon = 1e-12);
}

#[test]
fn test_normalize_is_deterministic() {
    let mesh = box_mesh(DVec3::new(-1.0, 0.0, 0.0), DVec3::new(1.0, 1.0, 4.0));
    let normalizer = AssetPoseNormalizer::new(0.0);
    let rotation = Rotation::new(0.1, 0.2, 0.3);
    assert_eq!(
        normalizer.normalize(&mesh, rotation, DVec2::ONE).unwrap(),
        normalizer.normalize(&mesh, rotation, DVec2::ONE).unwrap()
    );
}

#[test]
fn test_placement_mode_serde_names() {
    let mode: PlacementMode = serde_json::from_str("\"center_on_surface\"").unwrap();
    assert_eq!(mode, PlacementMode::CenterOnSurface);
    let rotation: Rotation = serde_json::from_str(r#"{"z": 0.5}"#).unwrap();
    assert_eq!(rotation, Rotation::new(0.0, 0.0, 0.5));
}
