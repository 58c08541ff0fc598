//! # 2D Polygons
//!
//! Polygon-with-holes in the board plane, plus the triangulation that turns
//! it into cap faces for extrusion.
//!
//! Winding convention: the outer boundary runs counter-clockwise and holes
//! run clockwise, so the material is always on the left of every edge.

mod triangulate;


pub use triangulate::triangulate;

use glam::DVec2;
use std::f64::consts::TAU;

/// A 2D polygon with optional holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon2D {
    /// Outer boundary vertices
    pub outer: Vec<DVec2>,
    /// Hole contours
    pub holes: Vec<Vec<DVec2>>,
}

impl Polygon2D {
    /// Creates a new polygon from outer boundary vertices.
    pub fn new(outer: Vec<DVec2>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Creates a polygon with holes.
    pub fn with_holes(outer: Vec<DVec2>, holes: Vec<Vec<DVec2>>) -> Self {
        Self { outer, holes }
    }

    /// Creates a rectangle of the given size centered at the origin.
    ///
    /// # Example
    ///
    /// ```rust
    /// use board_mesh::polygon::Polygon2D;
    ///
    /// let rect = Polygon2D::rectangle(4.0, 2.0);
    /// assert_eq!(rect.outer.len(), 4);
    /// assert_eq!(rect.area(), 8.0);
    /// ```
    pub fn rectangle(width: f64, height: f64) -> Self {
        Self::new(rectangle_contour(width, height))
    }

    /// Creates a regular polygon approximating a circle.
    ///
    /// # Arguments
    ///
    /// * `center` - Circle center
    /// * `radius` - Circle radius
    /// * `segments` - Number of segments (at least 3)
    pub fn circle(center: DVec2, radius: f64, segments: u32) -> Self {
        Self::new(circle_contour(center, radius, segments))
    }

    /// Adds a hole contour.
    pub fn add_hole(&mut self, hole: Vec<DVec2>) {
        self.holes.push(hole);
    }

    /// Total number of vertices over all contours.
    pub fn vertex_count(&self) -> usize {
        self.outer.len() + self.holes.iter().map(Vec::len).sum::<usize>()
    }

    /// Returns true if the polygon has holes.
    pub fn has_holes(&self) -> bool {
        !self.holes.is_empty()
    }

    /// Iterates over all contours, outer first.
    pub fn contours(&self) -> impl Iterator<Item = &[DVec2]> {
        std::iter::once(self.outer.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
    }

    /// Area of the outer boundary minus the hole areas.
    ///
    /// Overlapping holes are subtracted twice; the result is only exact for
    /// disjoint holes inside the boundary.
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| signed_area(h).abs()).sum();
        signed_area(&self.outer).abs() - holes
    }

    /// Returns a copy with the outer boundary counter-clockwise and every
    /// hole clockwise.
    pub fn normalized(&self) -> Self {
        let mut outer = self.outer.clone();
        if signed_area(&outer) < 0.0 {
            outer.reverse();
        }

        let holes = self
            .holes
            .iter()
            .map(|hole| {
                let mut hole = hole.clone();
                if signed_area(&hole) > 0.0 {
                    hole.reverse();
                }
                hole
            })
            .collect();

        Self { outer, holes }
    }

    /// True when `point` is inside the outer boundary and outside every hole.
    pub fn contains_point(&self, point: DVec2) -> bool {
        point_in_contour(&self.outer, point)
            && !self.holes.iter().any(|hole| point_in_contour(hole, point))
    }

    /// Triangulates the polygon.
    ///
    /// Indices refer to the concatenation of all contours, outer first,
    /// then holes in order. Triangles are counter-clockwise whatever the
    /// input winding; [`Polygon2D::normalized`] is only needed for walls.
    pub fn triangulate(&self) -> Vec<[u32; 3]> {
        triangulate(&self.outer, &self.holes)
    }
}

/// Counter-clockwise rectangle contour centered at the origin.
pub fn rectangle_contour(width: f64, height: f64) -> Vec<DVec2> {
    let (x, y) = (width / 2.0, height / 2.0);
    vec![
        DVec2::new(-x, -y),
        DVec2::new(x, -y),
        DVec2::new(x, y),
        DVec2::new(-x, y),
    ]
}

/// Counter-clockwise regular polygon around `center`.
pub fn circle_contour(center: DVec2, radius: f64, segments: u32) -> Vec<DVec2> {
    let segments = segments.max(3);
    let step = TAU / segments as f64;
    (0..segments)
        .map(|i| {
            let (sin, cos) = (i as f64 * step).sin_cos();
            center + DVec2::new(cos * radius, sin * radius)
        })
        .collect()
}

/// Shoelace signed area; positive for counter-clockwise contours.
pub fn signed_area(contour: &[DVec2]) -> f64 {
    let n = contour.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| contour[i].perp_dot(contour[(i + 1) % n]))
        .sum::<f64>()
        / 2.0
}

/// Even-odd point-in-polygon test.
pub fn point_in_contour(contour: &[DVec2], point: DVec2) -> bool {
    let n = contour.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let (a, b) = (contour[i], contour[j]);
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}
