//! # Scene Assembly
//!
//! One routine builds every procedural element of a board scene from a
//! [`SceneDescription`]: the drilled board, the underlay slab, the wire
//! traces and the label placements. Loaded component models are placed as
//! their meshes arrive, through [`SceneAssembler::place_model`].
//!
//! A failing board aborts assembly. A failing trace or model is logged,
//! recorded in [`AssembledScene::failures`] and left out; the caller
//! decides whether that is fatal.

mod description;

#[cfg(test)]
mod tests;

pub use description::{
    BoardDescription, CameraDescription, LabelDescription, LightingDescription, ModelDescription,
    PlanePoint, SceneDescription, TraceDescription,
};

use crate::board::{build_underlay, Board, HoleBoardBuilder};
use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use crate::pose::{AssetPoseNormalizer, Pose};
use crate::source::{AssetFormat, MeshSource};
use crate::trace::WireTraceExtruder;
use config::constants::{
    hex_to_rgba, BOARD_COLOR, DEFAULT_ASSET_COLOR, LABEL_SURFACE_OFFSET, TRACE_COLOR,
    TRACE_SURFACE_OFFSET, UNDERLAY_COLOR,
};
use glam::DVec3;
use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Kind of scene element that failed to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Trace,
    Model,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => f.write_str("trace"),
            Self::Model => f.write_str("model"),
        }
    }
}

/// A scene element left out of the assembled scene.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementFailure {
    pub kind: ElementKind,
    /// Index into the description's list for `kind`
    pub index: usize,
    pub error: MeshError,
}

/// Where a text label goes. Glyph meshing belongs to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPlacement {
    pub text: String,
    pub size: f64,
    /// World position of the label origin
    pub position: DVec3,
    /// Euler angles in radians (XYZ order), laying the text flat
    pub rotation: DVec3,
}

/// A loaded model moved into its pose.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedModel {
    pub index: usize,
    pub format: AssetFormat,
    pub pose: Pose,
    /// Model mesh with the pose applied and the default asset color
    pub mesh: Mesh,
}

/// Output of [`SceneAssembler::assemble`].
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledScene {
    pub board: Mesh,
    pub underlay: Option<Mesh>,
    /// Successfully built traces, by description index
    pub traces: Vec<(usize, Mesh)>,
    pub labels: Vec<LabelPlacement>,
    pub models: Vec<PlacedModel>,
    pub failures: Vec<ElementFailure>,
}

impl AssembledScene {
    /// Records a failure and logs it.
    fn fail(&mut self, kind: ElementKind, index: usize, error: MeshError) {
        log::warn!("Omitting {} {} from scene: {}", kind, index, error);
        self.failures.push(ElementFailure { kind, index, error });
    }
}

/// Builds scenes from a description.
///
/// # Example
///
/// ```rust
/// use board_mesh::{SceneAssembler, SceneDescription};
///
/// let description = SceneDescription::from_json(r#"{
///     "board": {"holes": [{"x": 0, "y": 0, "radius": 0.5}]},
///     "traces": [{"points": [[0, 2], [5, 2]]}]
/// }"#).unwrap();
///
/// let scene = SceneAssembler::new(description).assemble().unwrap();
/// assert_eq!(scene.traces.len(), 1);
/// assert!(scene.failures.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct SceneAssembler {
    description: SceneDescription,
    surface_height: f64,
}

impl SceneAssembler {
    pub fn new(description: SceneDescription) -> Self {
        let surface_height = Board::new(
            description.board.width,
            description.board.height,
            description.board.depth,
        )
        .top_surface();

        Self {
            description,
            surface_height,
        }
    }

    /// Parses the description from JSON.
    pub fn from_json(json: &str) -> MeshResult<Self> {
        Ok(Self::new(SceneDescription::from_json(json)?))
    }

    pub fn description(&self) -> &SceneDescription {
        &self.description
    }

    /// World Y of the board top, where assets rest.
    pub fn surface_height(&self) -> f64 {
        self.surface_height
    }

    /// Builds the board, underlay, traces and label placements.
    ///
    /// # Errors
    ///
    /// Fails only when the board or underlay cannot be built.
    pub fn assemble(&self) -> MeshResult<AssembledScene> {
        let board_description = &self.description.board;
        let board = board_description.board();

        let mut board_mesh = HoleBoardBuilder::from_board(board.clone()).build()?;
        board_mesh.set_uniform_color(hex_to_rgba(BOARD_COLOR));

        let underlay = if board_description.underlay {
            let mut mesh = build_underlay(&board, board_description.underlay_offset)?;
            mesh.set_uniform_color(hex_to_rgba(UNDERLAY_COLOR));
            Some(mesh)
        } else {
            None
        };

        let mut scene = AssembledScene {
            board: board_mesh,
            underlay,
            traces: Vec::with_capacity(self.description.traces.len()),
            labels: self.place_labels(),
            models: Vec::new(),
            failures: Vec::new(),
        };

        for (index, result) in self.build_traces().into_iter().enumerate() {
            match result {
                Ok(mesh) => scene.traces.push((index, mesh)),
                Err(error) => scene.fail(ElementKind::Trace, index, error),
            }
        }

        log::info!(
            "Assembled scene: board {} triangles, {} of {} traces, {} labels",
            scene.board.triangle_count(),
            scene.traces.len(),
            self.description.traces.len(),
            scene.labels.len()
        );

        Ok(scene)
    }

    /// Assembles the scene and places one loaded mesh per model.
    ///
    /// `sources[i]` is the loaded mesh of `description.models[i]`.
    ///
    /// # Errors
    ///
    /// `Scene` when the source count differs from the model count, plus
    /// the errors of [`assemble`](Self::assemble).
    pub fn assemble_with_models(&self, sources: &[&dyn MeshSource]) -> MeshResult<AssembledScene> {
        if sources.len() != self.description.models.len() {
            return Err(MeshError::scene(format!(
                "Expected {} model meshes, got {}",
                self.description.models.len(),
                sources.len()
            )));
        }

        let mut scene = self.assemble()?;
        for (index, source) in sources.iter().enumerate() {
            match self.place_model(index, *source) {
                Ok(model) => scene.models.push(model),
                Err(error) => scene.fail(ElementKind::Model, index, error),
            }
        }
        Ok(scene)
    }

    /// Builds every trace, in parallel when the `parallel` feature is on.
    ///
    /// Results are in description order.
    pub fn build_traces(&self) -> Vec<MeshResult<Mesh>> {
        #[cfg(feature = "parallel")]
        let iter = self.description.traces.par_iter();
        #[cfg(not(feature = "parallel"))]
        let iter = self.description.traces.iter();

        iter.map(|trace| self.build_trace(trace)).collect()
    }

    /// Builds one trace just above the board surface.
    pub fn build_trace(&self, trace: &TraceDescription) -> MeshResult<Mesh> {
        let mut mesh = WireTraceExtruder::new(self.surface_height() + TRACE_SURFACE_OFFSET)
            .with_style(trace.style)
            .extrude(&trace.points(), trace.thickness)?;
        mesh.set_uniform_color(hex_to_rgba(TRACE_COLOR));
        Ok(mesh)
    }

    /// Places every label flat on the board, facing up.
    pub fn place_labels(&self) -> Vec<LabelPlacement> {
        let height = self.surface_height() + LABEL_SURFACE_OFFSET;
        self.description
            .labels
            .iter()
            .map(|label| LabelPlacement {
                text: label.text.clone(),
                size: label.size,
                position: DVec3::new(label.position.x, height, label.position.y),
                rotation: DVec3::new(-FRAC_PI_2, 0.0, label.rotation * PI),
            })
            .collect()
    }

    /// Places the loaded mesh of model `index`.
    ///
    /// # Errors
    ///
    /// - `Scene` when `index` is out of range
    /// - `UnsupportedAssetFormat` when the model path has an unknown extension
    /// - `DegenerateInput` when the source mesh is empty
    pub fn place_model(&self, index: usize, source: &dyn MeshSource) -> MeshResult<PlacedModel> {
        let model = self
            .description
            .models
            .get(index)
            .ok_or_else(|| MeshError::scene(format!("No model at index {}", index)))?;

        let format = AssetFormat::from_path(&model.path)?;
        if source.format() != format {
            log::warn!(
                "Model {} path '{}' is {} but its mesh was decoded as {}",
                index,
                model.path,
                format,
                source.format()
            );
        }

        let raw = source.to_mesh()?;
        let pose = AssetPoseNormalizer::new(self.surface_height())
            .with_mode(model.mode)
            .normalize(&raw, model.rotation, model.position.to_dvec2())?;

        let mut mesh = pose.apply(&raw);
        mesh.set_uniform_color(hex_to_rgba(DEFAULT_ASSET_COLOR));

        Ok(PlacedModel {
            index,
            format,
            pose,
            mesh,
        })
    }
}
