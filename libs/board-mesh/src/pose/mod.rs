//! # Asset Pose Normalization
//!
//! Computes the rigid transform that rests a loaded asset on the board.
//!
//! Order matters: the rotation is applied first and the bounding box is
//! measured on the rotated vertices. The vertical offset is then derived
//! from that rotated box, so an asset rotated onto its side still touches
//! the surface with its new lowest point.
//!
//! The asset mesh is never modified; callers apply the returned [`Pose`].

#[cfg(test)]
mod tests;

use crate::bounds::BoundingBox;
use crate::error::{require_finite, MeshError, MeshResult};
use crate::mesh::Mesh;
use glam::{DMat3, DMat4, DQuat, DVec2, DVec3, EulerRot};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Euler rotation in multiples of π radians, applied in XYZ order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rotation {
    /// Rotation about X in multiples of π
    pub x: f64,
    /// Rotation about Y in multiples of π
    pub y: f64,
    /// Rotation about Z in multiples of π
    pub z: f64,
}

impl Rotation {
    /// No rotation.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Creates a rotation from multiples of π.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Angles in radians.
    pub fn to_radians(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z) * PI
    }

    /// Rotation matrix, `Rx * Ry * Rz`.
    pub fn matrix(&self) -> DMat3 {
        let r = self.to_radians();
        DMat3::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
    }

    /// Equivalent quaternion.
    pub fn quaternion(&self) -> DQuat {
        let r = self.to_radians();
        DQuat::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
    }

    fn validate(&self) -> MeshResult<()> {
        require_finite("Rotation x", self.x)?;
        require_finite("Rotation y", self.y)?;
        require_finite("Rotation z", self.z)
    }
}

/// How the asset's vertical extent is aligned with the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMode {
    /// Lowest point touches the surface.
    #[default]
    RestOnSurface,
    /// Vertical center lies on the surface.
    CenterOnSurface,
}

/// Final rigid transform of an asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World translation
    pub position: DVec3,
    /// Euler angles in radians (XYZ order)
    pub rotation: DVec3,
    /// Same rotation as a quaternion
    pub quaternion: DQuat,
}

impl Pose {
    /// Rotation followed by translation, as a 4x4 matrix.
    pub fn matrix(&self) -> DMat4 {
        DMat4::from_rotation_translation(self.quaternion, self.position)
    }

    /// Returns a copy of `mesh` moved into this pose.
    pub fn apply(&self, mesh: &Mesh) -> Mesh {
        mesh.transformed(&self.matrix())
    }
}

/// Bounds of `mesh` after rotating it about its local origin.
///
/// # Errors
///
/// `DegenerateInput` when the mesh is empty, has non-finite vertices, or
/// collapses to a single point.
pub fn rotated_bounds(mesh: &Mesh, rotation: &DMat3) -> MeshResult<BoundingBox> {
    let bounds = BoundingBox::from_point_iter(mesh.vertices().iter().map(|v| *rotation * *v))
        .ok_or_else(|| {
            MeshError::degenerate(format!(
                "Asset mesh has no usable vertices ({} vertices)",
                mesh.vertex_count()
            ))
        })?;

    if bounds.is_point() {
        return Err(MeshError::degenerate("Asset mesh bounding box is a single point"));
    }
    Ok(bounds)
}

/// Rests rotated assets on a horizontal surface.
///
/// # Example
///
/// ```rust
/// use board_mesh::{AssetPoseNormalizer, Mesh, Rotation};
/// use glam::{DVec2, DVec3};
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, -3.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 2.0, 1.0));
///
/// let pose = AssetPoseNormalizer::new(0.0)
///     .normalize(&mesh, Rotation::IDENTITY, DVec2::new(4.0, 5.0))
///     .unwrap();
/// assert_eq!(pose.position, DVec3::new(4.0, 3.0, 5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetPoseNormalizer {
    surface_height: f64,
    mode: PlacementMode,
}

impl Default for AssetPoseNormalizer {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl AssetPoseNormalizer {
    /// Normalizer resting assets on a surface at world `y = surface_height`.
    pub fn new(surface_height: f64) -> Self {
        Self {
            surface_height,
            mode: PlacementMode::RestOnSurface,
        }
    }

    /// Selects the placement mode.
    pub fn with_mode(mut self, mode: PlacementMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn surface_height(&self) -> f64 {
        self.surface_height
    }

    pub fn mode(&self) -> PlacementMode {
        self.mode
    }

    /// Computes the pose for `mesh` rotated by `rotation` and moved to
    /// `target` in the board plane.
    ///
    /// # Errors
    ///
    /// - `InvalidGeometry` for non-finite rotation, target or surface height
    /// - `DegenerateInput` for an empty or single-point mesh
    pub fn normalize(&self, mesh: &Mesh, rotation: Rotation, target: DVec2) -> MeshResult<Pose> {
        rotation.validate()?;
        require_finite("Target x", target.x)?;
        require_finite("Target y", target.y)?;
        require_finite("Surface height", self.surface_height)?;

        let matrix = rotation.matrix();
        let bounds = rotated_bounds(mesh, &matrix)?;

        let anchor = match self.mode {
            PlacementMode::RestOnSurface => bounds.min.y,
            PlacementMode::CenterOnSurface => bounds.center().y,
        };

        let position = DVec3::new(target.x, self.surface_height - anchor, target.y);

        log::debug!(
            "Placed asset ({} vertices) at {:?}, rotated bounds {:?}..{:?}",
            mesh.vertex_count(),
            position,
            bounds.min,
            bounds.max
        );

        Ok(Pose {
            position,
            rotation: rotation.to_radians(),
            quaternion: DQuat::from_mat3(&matrix),
        })
    }
}
