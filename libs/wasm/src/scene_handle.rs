//! # Scene Handle
//!
//! Assembled scene exposed to JavaScript. Meshes are handed out one at a
//! time; labels, camera and lights travel as JSON for the viewer to apply.

use crate::mesh_handle::MeshHandle;
use board_mesh::{AssembledScene, SceneDescription};
use wasm_bindgen::prelude::*;

/// An assembled board scene.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const scene = assemble_scene(JSON.stringify(description));
/// addMesh(scene.board());
/// for (let i = 0; i < scene.trace_count; i++) addMesh(scene.trace(i));
/// for (const label of JSON.parse(scene.labels_json())) addLabel(label);
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct SceneHandle {
    description: SceneDescription,
    scene: AssembledScene,
}

#[wasm_bindgen]
impl SceneHandle {
    #[wasm_bindgen]
    pub fn board(&self) -> MeshHandle {
        MeshHandle::from_mesh(&self.scene.board)
    }

    /// The slab beneath the board, if the description asks for one.
    #[wasm_bindgen]
    pub fn underlay(&self) -> Option<MeshHandle> {
        self.scene.underlay.as_ref().map(MeshHandle::from_mesh)
    }

    /// Number of traces that built successfully.
    #[wasm_bindgen(getter)]
    pub fn trace_count(&self) -> usize {
        self.scene.traces.len()
    }

    /// The `i`-th successfully built trace.
    #[wasm_bindgen]
    pub fn trace(&self, i: usize) -> Option<MeshHandle> {
        self.scene.traces.get(i).map(|(_, mesh)| MeshHandle::from_mesh(mesh))
    }

    /// Description index of the `i`-th built trace.
    #[wasm_bindgen]
    pub fn trace_index(&self, i: usize) -> Option<usize> {
        self.scene.traces.get(i).map(|(index, _)| *index)
    }

    /// Label placements as a JSON array.
    #[wasm_bindgen]
    pub fn labels_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.scene.labels).map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Camera settings as JSON.
    #[wasm_bindgen]
    pub fn camera_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.description.camera)
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Light rig as JSON.
    #[wasm_bindgen]
    pub fn lights_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.description.lights)
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// One line per element left out of the scene.
    #[wasm_bindgen]
    pub fn failures(&self) -> Vec<String> {
        self.scene
            .failures
            .iter()
            .map(|f| format!("{} {}: {}", f.kind, f.index, f.error))
            .collect()
    }
}

impl SceneHandle {
    pub fn new(description: SceneDescription, scene: AssembledScene) -> Self {
        Self { description, scene }
    }

    pub fn scene(&self) -> &AssembledScene {
        &self.scene
    }

    pub fn description(&self) -> &SceneDescription {
        &self.description
    }
}
