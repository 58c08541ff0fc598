//! # Mesh Handle
//!
//! WASM-friendly wrappers for mesh and pose data transferred to JavaScript.

use board_mesh::{Mesh, Pose};
use wasm_bindgen::prelude::*;

/// A handle to mesh data that can be accessed from JavaScript.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const mesh = build_board(40, 40, 0.6, new Float64Array([5, 5, 0.4]));
///
/// const geometry = new THREE.BufferGeometry();
/// geometry.setAttribute('position', new THREE.BufferAttribute(mesh.vertices(), 3));
/// geometry.setIndex(new THREE.BufferAttribute(mesh.indices(), 1));
/// if (mesh.has_normals()) {
///   geometry.setAttribute('normal', new THREE.BufferAttribute(mesh.normals(), 3));
/// }
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct MeshHandle {
    /// Vertex positions as [x, y, z, x, y, z, ...]
    vertices: Vec<f32>,
    /// Triangle indices as [i0, i1, i2, i0, i1, i2, ...]
    indices: Vec<u32>,
    /// Optional vertex normals as [nx, ny, nz, ...]
    normals: Option<Vec<f32>>,
    /// Optional vertex colors as [r, g, b, a, ...]
    colors: Option<Vec<f32>>,
    vertex_count: u32,
    triangle_count: u32,
}

#[wasm_bindgen]
impl MeshHandle {
    /// Returns the number of vertices.
    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Returns the number of triangles.
    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> u32 {
        self.triangle_count
    }

    /// Returns the vertex positions as a Float32Array.
    ///
    /// Length: vertex_count * 3
    #[wasm_bindgen]
    pub fn vertices(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.vertices[..])
    }

    /// Returns the triangle indices as a Uint32Array.
    ///
    /// Length: triangle_count * 3
    #[wasm_bindgen]
    pub fn indices(&self) -> js_sys::Uint32Array {
        js_sys::Uint32Array::from(&self.indices[..])
    }

    /// Returns the vertex normals as a Float32Array, if available.
    #[wasm_bindgen]
    pub fn normals(&self) -> Option<js_sys::Float32Array> {
        self.normals
            .as_ref()
            .map(|n| js_sys::Float32Array::from(&n[..]))
    }

    /// Returns the vertex colors as a Float32Array, if available.
    #[wasm_bindgen]
    pub fn colors(&self) -> Option<js_sys::Float32Array> {
        self.colors
            .as_ref()
            .map(|c| js_sys::Float32Array::from(&c[..]))
    }

    #[wasm_bindgen]
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    #[wasm_bindgen]
    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }

    #[wasm_bindgen]
    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }
}

impl MeshHandle {
    /// Creates a MeshHandle from a Mesh.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            vertices: mesh.vertices_f32(),
            indices: mesh.indices_u32(),
            normals: mesh.normals_f32(),
            colors: mesh.colors_f32(),
            vertex_count: mesh.vertex_count() as u32,
            triangle_count: mesh.triangle_count() as u32,
        }
    }

    /// Vertex buffer without crossing into JavaScript.
    pub fn vertex_buffer(&self) -> &[f32] {
        &self.vertices
    }

    /// Index buffer without crossing into JavaScript.
    pub fn index_buffer(&self) -> &[u32] {
        &self.indices
    }

    pub fn normal_buffer(&self) -> Option<&[f32]> {
        self.normals.as_deref()
    }

    pub fn color_buffer(&self) -> Option<&[f32]> {
        self.colors.as_deref()
    }
}

/// Asset pose for a Three.js `Object3D`.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const pose = normalize_pose("led.glb", positions, -0.5, 0, 0, 4, 6, 0, false);
/// object.position.fromArray(pose.position());
/// object.quaternion.fromArray(pose.quaternion());
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseHandle {
    pose: Pose,
}

#[wasm_bindgen]
impl PoseHandle {
    /// World translation as [x, y, z].
    #[wasm_bindgen]
    pub fn position(&self) -> Vec<f64> {
        self.pose.position.to_array().to_vec()
    }

    /// Euler angles in radians as [x, y, z], XYZ order.
    #[wasm_bindgen]
    pub fn rotation(&self) -> Vec<f64> {
        self.pose.rotation.to_array().to_vec()
    }

    /// Rotation quaternion as [x, y, z, w].
    #[wasm_bindgen]
    pub fn quaternion(&self) -> Vec<f64> {
        self.pose.quaternion.to_array().to_vec()
    }

    /// Column-major 4x4 transform, as `Matrix4.fromArray` expects.
    #[wasm_bindgen]
    pub fn matrix(&self) -> Vec<f64> {
        self.pose.matrix().to_cols_array().to_vec()
    }
}

impl PoseHandle {
    pub fn new(pose: Pose) -> Self {
        Self { pose }
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }
}
