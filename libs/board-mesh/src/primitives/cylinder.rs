//! # Cylinder Primitive
//!
//! Capped cylinder along the world Y axis, centered at the origin. Trace
//! tubes are built from it by rotating the axis onto each segment.

use crate::error::{require_positive, MeshError, MeshResult};
use crate::mesh::Mesh;
use crate::ops::extrude::lift;
use crate::polygon::circle_contour;
use glam::{DVec2, DVec3};

/// Creates a capped cylinder mesh.
///
/// # Arguments
///
/// * `height` - Length along the Y axis (spans `-height/2..height/2`)
/// * `radius` - Cylinder radius
/// * `segments` - Number of segments around the circumference
///
/// # Example
///
/// ```rust
/// use board_mesh::primitives::create_cylinder;
///
/// let mesh = create_cylinder(10.0, 0.5, 12).unwrap();
/// assert_eq!(mesh.vertex_count(), 26);
/// assert_eq!(mesh.triangle_count(), 48);
/// assert!(mesh.is_watertight());
/// ```
pub fn create_cylinder(height: f64, radius: f64, segments: u32) -> MeshResult<Mesh> {
    require_positive("Cylinder height", height)?;
    require_positive("Cylinder radius", radius)?;

    if segments < 3 {
        return Err(MeshError::invalid_geometry(format!(
            "Cylinder segments must be at least 3: {}",
            segments
        )));
    }

    let ring = circle_contour(DVec2::ZERO, radius, segments);
    let (y_bottom, y_top) = (-height / 2.0, height / 2.0);
    let s = segments;

    let mut mesh = Mesh::with_capacity(2 * s as usize + 2, 4 * s as usize);

    // Bottom ring [0, s), top ring [s, 2s)
    for y in [y_bottom, y_top] {
        for point in &ring {
            mesh.add_vertex(lift(*point, y));
        }
    }
    let bottom_center = mesh.add_vertex(DVec3::new(0.0, y_bottom, 0.0));
    let top_center = mesh.add_vertex(DVec3::new(0.0, y_top, 0.0));

    for i in 0..s {
        let j = (i + 1) % s;

        // Side
        mesh.add_quad(i, i + s, j + s, j);

        // Caps
        mesh.add_triangle(bottom_center, i, j);
        mesh.add_triangle(top_center, j + s, i + s);
    }

    Ok(mesh)
}
