//! # Mesh Sources
//!
//! Loaded assets reach the geometry layer through [`MeshSource`]. Each asset
//! format (glTF, STL, OBJ, VRML) is decoded by the renderer's loaders; this
//! module only dispatches on the file extension and turns the decoded
//! buffers into a [`Mesh`].

use crate::bounds::BoundingBox;
use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Supported asset file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetFormat {
    /// `.gltf` / `.glb`
    Gltf,
    /// `.stl`
    Stl,
    /// `.obj`
    Obj,
    /// `.wrl`
    Vrml,
}

impl AssetFormat {
    /// Resolves a format from a file extension, ignoring case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use board_mesh::AssetFormat;
    ///
    /// assert_eq!(AssetFormat::from_extension("GLB").unwrap(), AssetFormat::Gltf);
    /// assert!(AssetFormat::from_extension("fbx").is_err());
    /// ```
    pub fn from_extension(extension: &str) -> MeshResult<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "gltf" | "glb" => Ok(Self::Gltf),
            "stl" => Ok(Self::Stl),
            "obj" => Ok(Self::Obj),
            "wrl" => Ok(Self::Vrml),
            _ => Err(MeshError::unsupported_format(extension)),
        }
    }

    /// Resolves a format from a path's extension.
    pub fn from_path(path: impl AsRef<Path>) -> MeshResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| MeshError::unsupported_format(path.display().to_string()))?;
        Self::from_extension(extension)
    }

    /// Canonical extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Gltf => "gltf",
            Self::Stl => "stl",
            Self::Obj => "obj",
            Self::Vrml => "wrl",
        }
    }
}

impl fmt::Display for AssetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Anything that can produce the raw mesh of a loaded asset.
///
/// Decoding GLTF, STL and OBJ files stays with the renderer's loaders, which
/// all hand over the same flat position/index buffers. A single
/// [`BufferSource`] therefore serves every format, carrying the
/// [`AssetFormat`] as a tag instead of one implementation per format.
pub trait MeshSource {
    /// Format the mesh was decoded from.
    fn format(&self) -> AssetFormat;

    /// Builds the asset's mesh in its own local coordinates.
    ///
    /// An empty mesh is a valid result; pose normalization rejects it.
    fn to_mesh(&self) -> MeshResult<Mesh>;

    /// Local bounds of the mesh, `None` when it has no vertices.
    fn bounding_box(&self) -> MeshResult<Option<BoundingBox>> {
        Ok(self.to_mesh()?.bounding_box())
    }
}

/// Mesh source over flat buffers as produced by a format loader.
///
/// `positions` holds `[x, y, z, ...]`. Without `indices` every three
/// consecutive vertices form a triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferSource {
    format: AssetFormat,
    positions: Vec<f32>,
    indices: Option<Vec<u32>>,
}

impl BufferSource {
    /// Creates a source for `path`, resolving the format from its extension.
    ///
    /// # Errors
    ///
    /// `UnsupportedAssetFormat` when the extension is not recognized.
    pub fn new(path: impl AsRef<Path>, positions: Vec<f32>, indices: Option<Vec<u32>>) -> MeshResult<Self> {
        Ok(Self::with_format(AssetFormat::from_path(path)?, positions, indices))
    }

    /// Creates a source with an explicit format.
    pub fn with_format(format: AssetFormat, positions: Vec<f32>, indices: Option<Vec<u32>>) -> Self {
        Self {
            format,
            positions,
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

impl MeshSource for BufferSource {
    fn format(&self) -> AssetFormat {
        self.format
    }

    fn to_mesh(&self) -> MeshResult<Mesh> {
        if self.positions.len() % 3 != 0 {
            return Err(MeshError::invalid_geometry(format!(
                "Position buffer length {} is not a multiple of 3",
                self.positions.len()
            )));
        }

        let vertices: Vec<DVec3> = self
            .positions
            .chunks_exact(3)
            .map(|c| DVec3::new(c[0] as f64, c[1] as f64, c[2] as f64))
            .collect();
        let vertex_count = vertices.len() as u32;

        let triangles: Vec<[u32; 3]> = match &self.indices {
            Some(indices) => {
                if indices.len() % 3 != 0 {
                    return Err(MeshError::invalid_geometry(format!(
                        "Index buffer length {} is not a multiple of 3",
                        indices.len()
                    )));
                }
                if let Some(&bad) = indices.iter().find(|&&i| i >= vertex_count) {
                    return Err(MeshError::invalid_geometry(format!(
                        "Index {} out of range for {} vertices",
                        bad, vertex_count
                    )));
                }
                indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect()
            }
            None => (0..vertex_count / 3).map(|t| [3 * t, 3 * t + 1, 3 * t + 2]).collect(),
        };

        Ok(Mesh::from_parts(vertices, triangles))
    }
}
