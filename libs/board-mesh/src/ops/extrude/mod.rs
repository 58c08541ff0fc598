//! # Vertical Extrusion
//!
//! Extrudes a polygon in the board plane along the world Y axis. The board
//! plane maps onto the world as `(x, y) -> (x, height, y)`.
//!
//! ## Vertex Layout
//!
//! Every contour point is emitted once on the bottom ring and once on the
//! top ring. Caps and side walls share those vertices, so a simple polygon
//! extrudes to a closed, watertight solid:
//!
//! ```text
//! [0, n)    bottom ring, all contours concatenated (outer first)
//! [n, 2n)   top ring, same order
//! ```


use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use crate::polygon::{signed_area, Polygon2D};
use config::constants::AREA_EPSILON;
use glam::{DVec2, DVec3};

/// Heights of the two caps of a vertical extrusion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudeParams {
    /// World Y of the bottom cap
    pub bottom: f64,
    /// World Y of the top cap
    pub top: f64,
}

impl ExtrudeParams {
    /// Extrusion hanging below `top` by `depth`.
    pub fn below(top: f64, depth: f64) -> Self {
        Self {
            bottom: top - depth,
            top,
        }
    }

    /// Distance between the caps.
    pub fn depth(&self) -> f64 {
        self.top - self.bottom
    }
}

impl Default for ExtrudeParams {
    fn default() -> Self {
        Self {
            bottom: 0.0,
            top: 1.0,
        }
    }
}

/// Extrudes a polygon with holes into a closed solid.
///
/// Contours are normalized first (outer counter-clockwise, holes
/// clockwise), so the bottom cap faces -Y, the top cap faces +Y and side
/// walls face away from the material, including inside holes.
///
/// # Errors
///
/// - `InvalidGeometry` when the caps are not ordered (`top <= bottom`)
/// - `DegenerateInput` when the outer boundary has fewer than 3 points or
///   encloses no area
///
/// # Example
///
/// ```rust
/// use board_mesh::ops::{extrude_polygon, ExtrudeParams};
/// use board_mesh::polygon::Polygon2D;
///
/// let slab = extrude_polygon(&Polygon2D::rectangle(4.0, 2.0), &ExtrudeParams::below(0.0, 1.0)).unwrap();
/// assert_eq!(slab.vertex_count(), 8);
/// assert_eq!(slab.triangle_count(), 12);
/// assert!(slab.is_watertight());
/// ```
pub fn extrude_polygon(polygon: &Polygon2D, params: &ExtrudeParams) -> MeshResult<Mesh> {
    validate_params(params)?;

    if polygon.outer.len() < 3 {
        return Err(MeshError::degenerate(format!(
            "Polygon must have at least 3 vertices, got {}",
            polygon.outer.len()
        )));
    }
    if signed_area(&polygon.outer).abs() < AREA_EPSILON {
        return Err(MeshError::degenerate("Polygon outer boundary encloses no area"));
    }

    let polygon = polygon.normalized();
    let cap = polygon.triangulate();
    let n = polygon.vertex_count() as u32;

    let mut mesh = Mesh::with_capacity(2 * n as usize, 2 * cap.len() + 2 * n as usize);

    // ===== RINGS =====
    for height in [params.bottom, params.top] {
        for point in polygon.contours().flatten() {
            mesh.add_vertex(lift(*point, height));
        }
    }

    // ===== CAPS =====
    for &[a, b, c] in &cap {
        mesh.add_triangle(a, b, c);
        mesh.add_triangle(a + n, c + n, b + n);
    }

    // ===== SIDE WALLS =====
    let mut start = 0;
    for contour in polygon.contours() {
        add_ring_walls(&mut mesh, start, contour.len() as u32, n);
        start += contour.len() as u32;
    }

    Ok(mesh)
}

/// Extrudes only the side walls of a closed contour, leaving both ends open.
///
/// `outward` selects which side the walls face: away from the enclosed
/// area (a pillar) or towards it (the bore of a hole).
///
/// # Errors
///
/// Same as [`extrude_polygon`].
pub fn extrude_walls(contour: &[DVec2], params: &ExtrudeParams, outward: bool) -> MeshResult<Mesh> {
    validate_params(params)?;

    if contour.len() < 3 {
        return Err(MeshError::degenerate(format!(
            "Contour must have at least 3 vertices, got {}",
            contour.len()
        )));
    }

    let mut points = contour.to_vec();
    if (signed_area(&points) > 0.0) != outward {
        points.reverse();
    }

    let n = points.len() as u32;
    let mut mesh = Mesh::with_capacity(2 * n as usize, 2 * n as usize);
    for height in [params.bottom, params.top] {
        for point in &points {
            mesh.add_vertex(lift(*point, height));
        }
    }
    add_ring_walls(&mut mesh, 0, n, n);

    Ok(mesh)
}

/// Maps a board-plane point onto the world plane at `height`.
#[inline]
pub fn lift(point: DVec2, height: f64) -> DVec3 {
    DVec3::new(point.x, height, point.y)
}

fn validate_params(params: &ExtrudeParams) -> MeshResult<()> {
    if !params.bottom.is_finite() || !params.top.is_finite() || params.top <= params.bottom {
        return Err(MeshError::invalid_geometry(format!(
            "Extrusion top ({}) must be above bottom ({})",
            params.top, params.bottom
        )));
    }
    Ok(())
}

/// Adds the wall quads of one ring occupying `[start, start + len)` on the
/// bottom ring and `[start + top_offset, ...)` on the top ring.
fn add_ring_walls(mesh: &mut Mesh, start: u32, len: u32, top_offset: u32) {
    for i in 0..len {
        let j = (i + 1) % len;
        let (bi, bj) = (start + i, start + j);
        mesh.add_quad(bi, bi + top_offset, bj + top_offset, bj);
    }
}
