//! # Wire Trace Extrusion
//!
//! Turns a 2D polyline with a thickness into a renderable mesh lying on the
//! board surface.
//!
//! Each segment `(p[i], p[i+1])` becomes its own piece of geometry with no
//! miter or round join at interior points. At sharp bends adjacent pieces
//! overlap on one side and leave a wedge gap on the other.
//!
//! Two styles are available and one is used for the whole trace:
//!
//! - [`TraceStyle::Ribbon`]: a flat quad per segment, facing +Y
//! - [`TraceStyle::Tube`]: a capped cylinder per segment, resting on the surface

#[cfg(test)]
mod tests;

use crate::error::{require_finite, require_positive, MeshError, MeshResult};
use crate::mesh::Mesh;
use crate::ops::extrude::lift;
use crate::primitives::create_cylinder;
use config::constants::{DEFAULT_TUBE_SEGMENTS, MAX_TRACE_POINTS, MIN_TUBE_SEGMENTS, VERTEX_MERGE_EPSILON};
use glam::{DMat4, DQuat, DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Geometry emitted for each trace segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStyle {
    /// Flat quad, `thickness` wide.
    Ribbon,
    /// Cylinder of diameter `thickness` around the segment.
    Tube { segments: u32 },
}

impl Default for TraceStyle {
    fn default() -> Self {
        Self::Ribbon
    }
}

impl TraceStyle {
    /// Tube style with the default segment count.
    pub fn tube() -> Self {
        Self::Tube {
            segments: DEFAULT_TUBE_SEGMENTS,
        }
    }
}

/// Extrudes wire traces at a fixed surface height.
///
/// # Example
///
/// ```rust
/// use board_mesh::WireTraceExtruder;
/// use glam::DVec2;
///
/// let mesh = WireTraceExtruder::new(0.01)
///     .extrude(&[DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)], 0.2)
///     .unwrap();
/// assert_eq!(mesh.vertex_count(), 4);
/// assert_eq!(mesh.triangle_count(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireTraceExtruder {
    surface_height: f64,
    style: TraceStyle,
}

impl Default for WireTraceExtruder {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl WireTraceExtruder {
    /// Ribbon extruder placing traces at world `y = surface_height`.
    pub fn new(surface_height: f64) -> Self {
        Self {
            surface_height,
            style: TraceStyle::Ribbon,
        }
    }

    /// Selects the trace style.
    pub fn with_style(mut self, style: TraceStyle) -> Self {
        self.style = style;
        self
    }

    pub fn surface_height(&self) -> f64 {
        self.surface_height
    }

    pub fn style(&self) -> TraceStyle {
        self.style
    }

    /// Extrudes `points` into one mesh.
    ///
    /// # Errors
    ///
    /// - `InvalidGeometry` for fewer than 2 points, more than
    ///   `MAX_TRACE_POINTS`, non-finite coordinates, a non-positive
    ///   thickness, or a tube with fewer than `MIN_TUBE_SEGMENTS` segments
    /// - `DegenerateInput` when two consecutive points coincide
    pub fn extrude(&self, points: &[DVec2], thickness: f64) -> MeshResult<Mesh> {
        self.validate(points, thickness)?;

        let segment_count = points.len() - 1;
        let mut mesh = match self.style {
            TraceStyle::Ribbon => Mesh::with_capacity(4 * segment_count, 2 * segment_count),
            TraceStyle::Tube { segments } => {
                let s = segments as usize;
                Mesh::with_capacity((2 * s + 2) * segment_count, 4 * s * segment_count)
            }
        };

        for (index, pair) in points.windows(2).enumerate() {
            let (start, end) = (pair[0], pair[1]);
            let direction = end - start;
            let length = direction.length();
            if length < VERTEX_MERGE_EPSILON {
                return Err(MeshError::degenerate(format!(
                    "Trace segment {} has zero length at ({}, {})",
                    index, start.x, start.y
                )));
            }

            match self.style {
                TraceStyle::Ribbon => self.add_ribbon(&mut mesh, start, end, direction / length, thickness),
                TraceStyle::Tube { segments } => {
                    mesh.merge(&self.tube_segment(start, end, length, thickness, segments)?)
                }
            }
        }

        log::debug!(
            "Extruded trace with {} segments: {} vertices, {} triangles",
            segment_count,
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        Ok(mesh)
    }

    fn validate(&self, points: &[DVec2], thickness: f64) -> MeshResult<()> {
        if points.len() < 2 {
            return Err(MeshError::invalid_geometry(format!(
                "Trace needs at least 2 points, got {}",
                points.len()
            )));
        }
        if points.len() > MAX_TRACE_POINTS {
            return Err(MeshError::invalid_geometry(format!(
                "Trace has {} points, maximum is {}",
                points.len(),
                MAX_TRACE_POINTS
            )));
        }
        if let Some(bad) = points.iter().position(|p| !p.is_finite()) {
            return Err(MeshError::invalid_geometry(format!(
                "Trace point {} is not finite",
                bad
            )));
        }

        require_positive("Trace thickness", thickness)?;
        require_finite("Trace surface height", self.surface_height)?;

        if let TraceStyle::Tube { segments } = self.style {
            if segments < MIN_TUBE_SEGMENTS {
                return Err(MeshError::invalid_geometry(format!(
                    "Tube traces need at least {} segments, got {}",
                    MIN_TUBE_SEGMENTS, segments
                )));
            }
        }
        Ok(())
    }

    /// Appends the flat quad for one segment.
    ///
    /// Corners, with `n` the left-hand unit normal and `h = thickness / 2`:
    /// `c0 = start + n*h`, `c1 = start - n*h`, `c2 = end - n*h`, `c3 = end + n*h`.
    fn add_ribbon(&self, mesh: &mut Mesh, start: DVec2, end: DVec2, unit: DVec2, thickness: f64) {
        let offset = unit.perp() * (thickness / 2.0);
        let corners = [start + offset, start - offset, end - offset, end + offset];

        let base = mesh.vertex_count() as u32;
        for corner in corners {
            mesh.add_vertex(lift(corner, self.surface_height));
        }

        // Both triangles face +Y
        mesh.add_triangle(base, base + 2, base + 1);
        mesh.add_triangle(base, base + 3, base + 2);
    }

    /// Cylinder along one segment, its lowest line on the surface.
    fn tube_segment(&self, start: DVec2, end: DVec2, length: f64, thickness: f64, segments: u32) -> MeshResult<Mesh> {
        let radius = thickness / 2.0;
        let cylinder = create_cylinder(length, radius, segments)?;

        let axis = lift(end - start, 0.0) / length;
        let rotation = DQuat::from_rotation_arc(DVec3::Y, axis);
        let midpoint = (start + end) / 2.0;
        let center = lift(midpoint, self.surface_height + radius);

        Ok(cylinder.transformed(&DMat4::from_rotation_translation(rotation, center)))
    }
}

/// Extrudes a ribbon trace at `surface_height`.
///
/// Shorthand for `WireTraceExtruder::new(surface_height).extrude(points, thickness)`.
pub fn extrude_trace(points: &[DVec2], thickness: f64, surface_height: f64) -> MeshResult<Mesh> {
    WireTraceExtruder::new(surface_height).extrude(points, thickness)
}
