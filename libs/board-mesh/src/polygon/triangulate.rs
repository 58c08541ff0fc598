//! # Cap Triangulation
//!
//! Thin wrapper over `earcutr`, which does ear clipping with hole bridging
//! and z-order hashing. Contours are flattened into earcut's
//! `(coordinates, hole start indices)` layout and the resulting index triples
//! are re-oriented counter-clockwise with the exact `robust::orient2d`
//! predicate, since cap winding decides which way the extruded faces point.

use glam::DVec2;
use robust::{orient2d, Coord};

/// Triangulates an outer contour with hole contours.
///
/// Contours may be given in either winding. Output indices refer to the
/// concatenation `outer ++ holes[0] ++ holes[1] ++ ...` and every triangle
/// is counter-clockwise. Degenerate input (fewer than three vertices, all
/// collinear) yields no triangles.
///
/// # Example
///
/// ```rust
/// use board_mesh::polygon::triangulate;
/// use glam::DVec2;
///
/// let square = [
///     DVec2::new(0.0, 0.0),
///     DVec2::new(1.0, 0.0),
///     DVec2::new(1.0, 1.0),
///     DVec2::new(0.0, 1.0),
/// ];
/// assert_eq!(triangulate(&square, &[]).len(), 2);
/// ```
pub fn triangulate(outer: &[DVec2], holes: &[Vec<DVec2>]) -> Vec<[u32; 3]> {
    if outer.len() < 3 {
        return Vec::new();
    }

    let (data, hole_indices) = flatten(outer, holes);
    let indices = match earcutr::earcut(&data, &hole_indices, 2) {
        Ok(indices) => indices,
        Err(err) => {
            log::warn!("Cap triangulation failed: {:?}", err);
            return Vec::new();
        }
    };

    let point = |i: usize| Coord {
        x: data[2 * i],
        y: data[2 * i + 1],
    };

    indices
        .chunks_exact(3)
        .map(|t| {
            let (a, b, c) = (t[0], t[1], t[2]);
            if orient2d(point(a), point(b), point(c)) < 0.0 {
                [a as u32, c as u32, b as u32]
            } else {
                [a as u32, b as u32, c as u32]
            }
        })
        .collect()
}

/// Flat `[x0, y0, x1, y1, ...]` coordinates plus the vertex index at which
/// each hole starts.
fn flatten(outer: &[DVec2], holes: &[Vec<DVec2>]) -> (Vec<f64>, Vec<usize>) {
    let total = outer.len() + holes.iter().map(Vec::len).sum::<usize>();
    let mut data = Vec::with_capacity(2 * total);
    let mut hole_indices = Vec::with_capacity(holes.len());

    data.extend(outer.iter().flat_map(|p| [p.x, p.y]));
    for hole in holes {
        hole_indices.push(data.len() / 2);
        data.extend(hole.iter().flat_map(|p| [p.x, p.y]));
    }

    (data, hole_indices)
}
