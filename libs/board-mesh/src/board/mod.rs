//! # Drilled Board
//!
//! Builds the baseboard solid: a rectangular slab with circular through-holes,
//! triangulated as one polygon-with-holes and extruded downward from the
//! board surface.
//!
//! ## Layout
//!
//! The board is centered on the origin of the board plane. Its top face lies
//! at world `y = 0` and the slab hangs down to `y = -depth`, so the bounding
//! box size is `(width, depth, height)`.
//!
//! ## Tolerated input
//!
//! Holes that overlap each other or cross the board edge are triangulated
//! anyway; the result may have missing or overlapping cap triangles. Holes
//! entirely outside the board become open tubes merged into the mesh.
//! Both cases are logged as warnings.


use crate::bounds::Rect2;
use crate::error::{require_finite, require_positive, MeshError, MeshResult};
use crate::mesh::Mesh;
use crate::ops::extrude::{extrude_polygon, extrude_walls, ExtrudeParams};
use crate::polygon::{circle_contour, rectangle_contour, Polygon2D};
use config::constants::{
    hole_segments, DEFAULT_BOARD_DEPTH, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, MAX_HOLES,
};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A circular through-hole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    /// Center X in the board plane
    pub x: f64,
    /// Center Y in the board plane
    pub y: f64,
    /// Hole radius
    pub radius: f64,
    /// Contour segment count, `0` picks one from the radius
    #[serde(default)]
    pub segments: u32,
}

impl Hole {
    /// Creates a hole with an automatic segment count.
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self {
            x,
            y,
            radius,
            segments: 0,
        }
    }

    /// Overrides the contour segment count.
    pub fn with_segments(mut self, segments: u32) -> Self {
        self.segments = segments;
        self
    }

    /// Center in the board plane.
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Number of contour segments actually used.
    pub fn segment_count(&self) -> u32 {
        hole_segments(self.radius, self.segments)
    }

    /// Counter-clockwise polygon approximating the hole boundary.
    pub fn contour(&self) -> Vec<DVec2> {
        circle_contour(self.center(), self.radius, self.segment_count())
    }

    /// True when the two holes' discs share interior area.
    pub fn overlaps(&self, other: &Hole) -> bool {
        self.center().distance(other.center()) < self.radius + other.radius
    }

    fn validate(&self, index: usize) -> MeshResult<()> {
        require_finite(&format!("Hole {} x", index), self.x)?;
        require_finite(&format!("Hole {} y", index), self.y)?;
        require_positive(&format!("Hole {} radius", index), self.radius)
    }
}

/// Board dimensions and hole layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Board {
    /// Extent along world X
    pub width: f64,
    /// Extent along world Z (the board plane's Y)
    pub height: f64,
    /// Thickness along world Y
    pub depth: f64,
    /// Through-holes, in insertion order
    pub holes: Vec<Hole>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_DEPTH)
    }
}

impl Board {
    /// Creates a board without holes.
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
            holes: Vec::new(),
        }
    }

    /// World Y of the top face, where assets and traces rest.
    pub fn top_surface(&self) -> f64 {
        0.0
    }

    /// World Y of the bottom face.
    pub fn bottom_surface(&self) -> f64 {
        self.top_surface() - self.depth
    }

    /// Board outline in the board plane.
    pub fn footprint(&self) -> Rect2 {
        Rect2::centered(self.width, self.height)
    }

    /// Checks dimensions and every hole.
    ///
    /// # Errors
    ///
    /// `InvalidGeometry` for non-positive or non-finite dimensions, a
    /// non-positive hole radius, or more than `MAX_HOLES` holes.
    pub fn validate(&self) -> MeshResult<()> {
        require_positive("Board width", self.width)?;
        require_positive("Board height", self.height)?;
        require_positive("Board depth", self.depth)?;

        if self.holes.len() > MAX_HOLES {
            return Err(MeshError::invalid_geometry(format!(
                "Board has {} holes, maximum is {}",
                self.holes.len(),
                MAX_HOLES
            )));
        }

        for (index, hole) in self.holes.iter().enumerate() {
            hole.validate(index)?;
        }
        Ok(())
    }
}

/// Builder for the drilled board solid.
///
/// # Example
///
/// ```rust
/// use board_mesh::HoleBoardBuilder;
///
/// let mesh = HoleBoardBuilder::new(40.0, 40.0, 0.6)
///     .hole(5.0, 5.0, 0.4)
///     .hole(-5.0, 5.0, 0.4)
///     .build()
///     .unwrap();
/// assert!(mesh.is_watertight());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HoleBoardBuilder {
    board: Board,
}

impl HoleBoardBuilder {
    /// Starts a board of the given size.
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            board: Board::new(width, height, depth),
        }
    }

    /// Starts from an existing board description.
    pub fn from_board(board: Board) -> Self {
        Self { board }
    }

    /// Adds a hole with an automatic segment count.
    pub fn hole(mut self, x: f64, y: f64, radius: f64) -> Self {
        self.board.holes.push(Hole::new(x, y, radius));
        self
    }

    /// Adds several holes.
    pub fn holes(mut self, holes: impl IntoIterator<Item = Hole>) -> Self {
        self.board.holes.extend(holes);
        self
    }

    /// The board being built.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Builds the board mesh.
    ///
    /// The result carries area-weighted vertex normals.
    ///
    /// # Errors
    ///
    /// `InvalidGeometry` when [`Board::validate`] fails.
    pub fn build(&self) -> MeshResult<Mesh> {
        let board = &self.board;
        board.validate()?;

        let footprint = board.footprint();
        let (inside, outside): (Vec<&Hole>, Vec<&Hole>) = board
            .holes
            .iter()
            .partition(|h| footprint.intersects_disc(h.center(), h.radius));

        report_suspicious_holes(board, &inside, &outside);

        let outline = rectangle_contour(board.width, board.height);
        let contours: Vec<Vec<DVec2>> = inside.iter().map(|h| h.contour()).collect();
        let polygon = Polygon2D::with_holes(outline, contours);
        let params = ExtrudeParams::below(board.top_surface(), board.depth);

        let mut mesh = extrude_polygon(&polygon, &params)?;

        // Each cap of a simple polygon with h holes has n + 2h - 2 triangles
        let contour_points = polygon.vertex_count();
        let cap_triangles = (mesh.triangle_count() - 2 * contour_points) / 2;
        let expected = contour_points + 2 * polygon.holes.len() - 2;
        if cap_triangles < expected {
            log::warn!(
                "Board cap triangulation incomplete: {} of {} triangles",
                cap_triangles,
                expected
            );
        }

        for hole in &outside {
            mesh.merge(&extrude_walls(&hole.contour(), &params, false)?);
        }

        mesh.compute_normals();

        log::debug!(
            "Built board {}x{}x{} with {} holes: {} vertices, {} triangles",
            board.width,
            board.height,
            board.depth,
            board.holes.len(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        Ok(mesh)
    }
}

/// Builds a drilled board of the given size.
///
/// Deterministic: identical input, including hole order, produces identical
/// output.
///
/// # Errors
///
/// `InvalidGeometry` for non-positive dimensions or hole radii.
pub fn build_board(width: f64, height: f64, depth: f64, holes: &[Hole]) -> MeshResult<Mesh> {
    HoleBoardBuilder::new(width, height, depth)
        .holes(holes.iter().copied())
        .build()
}

/// Builds the plain slab drawn beneath the board.
///
/// Same footprint and thickness as the board, centered `offset` plus one
/// board depth below the board surface.
///
/// # Errors
///
/// `InvalidGeometry` for invalid board dimensions or a negative offset.
pub fn build_underlay(board: &Board, offset: f64) -> MeshResult<Mesh> {
    require_positive("Board width", board.width)?;
    require_positive("Board height", board.height)?;
    require_positive("Board depth", board.depth)?;
    require_finite("Underlay offset", offset)?;
    if offset < 0.0 {
        return Err(MeshError::invalid_geometry(format!(
            "Underlay offset must not be negative, got {}",
            offset
        )));
    }

    let center = board.top_surface() - (board.depth + offset);
    let params = ExtrudeParams {
        bottom: center - board.depth / 2.0,
        top: center + board.depth / 2.0,
    };

    let mut mesh = extrude_polygon(&Polygon2D::rectangle(board.width, board.height), &params)?;
    mesh.compute_normals();
    Ok(mesh)
}

fn report_suspicious_holes(board: &Board, inside: &[&Hole], outside: &[&Hole]) {
    if !log::log_enabled!(log::Level::Warn) {
        return;
    }

    if !outside.is_empty() {
        log::warn!(
            "{} hole(s) lie entirely outside the {}x{} board",
            outside.len(),
            board.width,
            board.height
        );
    }

    let footprint = board.footprint();
    let crossing = inside
        .iter()
        .filter(|h| !footprint.contains_disc(h.center(), h.radius))
        .count();
    if crossing > 0 {
        log::warn!("{} hole(s) cross the board edge", crossing);
    }

    let overlapping = inside
        .iter()
        .enumerate()
        .filter(|(i, a)| inside[i + 1..].iter().any(|b| a.overlaps(b)))
        .count();
    if overlapping > 0 {
        log::warn!("{} hole(s) overlap a later hole", overlapping);
    }
}
