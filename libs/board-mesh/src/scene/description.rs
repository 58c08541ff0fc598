//! # Scene Description
//!
//! Declarative input for [`SceneAssembler`](super::SceneAssembler). Every
//! field has a default matching the stock viewer, so `{}` is a valid scene:
//! a bare 40 x 40 board under the default camera and light rig.

use crate::board::{Board, Hole};
use crate::error::MeshResult;
use crate::pose::{PlacementMode, Rotation};
use crate::trace::TraceStyle;
use config::constants::{
    DEFAULT_AMBIENT_COLOR, DEFAULT_AMBIENT_INTENSITY, DEFAULT_AXES_LENGTH, DEFAULT_BOARD_DEPTH,
    DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_CAMERA_FAR, DEFAULT_CAMERA_FOV,
    DEFAULT_CAMERA_NEAR, DEFAULT_CAMERA_POSITION, DEFAULT_CAMERA_TARGET, DEFAULT_LABEL_SIZE,
    DEFAULT_POINT_LIGHT_COLOR, DEFAULT_POINT_LIGHT_INTENSITY, DEFAULT_POINT_LIGHT_POSITIONS,
    DEFAULT_TRACE_THICKNESS, DEFAULT_UNDERLAY_OFFSET,
};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A point in the board plane, written `{ "x": .., "y": .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanePoint {
    pub x: f64,
    pub y: f64,
}

impl PlanePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// Complete scene input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub board: BoardDescription,
    pub models: Vec<ModelDescription>,
    pub traces: Vec<TraceDescription>,
    pub labels: Vec<LabelDescription>,
    pub camera: CameraDescription,
    pub lights: LightingDescription,
}

impl SceneDescription {
    /// Parses a scene from JSON.
    ///
    /// # Errors
    ///
    /// `Scene` when the JSON is malformed or has wrongly typed fields.
    ///
    /// # Example
    ///
    /// ```rust
    /// use board_mesh::SceneDescription;
    ///
    /// let scene = SceneDescription::from_json(r#"{"board": {"width": 20}}"#).unwrap();
    /// assert_eq!(scene.board.width, 20.0);
    /// assert_eq!(scene.board.height, 40.0);
    /// ```
    pub fn from_json(json: &str) -> MeshResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the scene to JSON.
    pub fn to_json(&self) -> MeshResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Board dimensions, holes and the optional underlay slab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardDescription {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub holes: Vec<Hole>,
    /// Draw the grey slab beneath the board
    pub underlay: bool,
    /// Underlay center lies `depth + underlay_offset` below the board surface
    pub underlay_offset: f64,
}

impl Default for BoardDescription {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            depth: DEFAULT_BOARD_DEPTH,
            holes: Vec::new(),
            underlay: true,
            underlay_offset: DEFAULT_UNDERLAY_OFFSET,
        }
    }
}

impl BoardDescription {
    /// The board to build.
    pub fn board(&self) -> Board {
        Board {
            width: self.width,
            height: self.height,
            depth: self.depth,
            holes: self.holes.clone(),
        }
    }
}

/// An externally loaded component model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescription {
    /// Asset path; its extension selects the loader
    pub path: String,
    /// Target position in the board plane
    #[serde(default)]
    pub position: PlanePoint,
    /// Rotation in multiples of π
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default)]
    pub mode: PlacementMode,
}

/// A wire trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceDescription {
    /// Polyline points `[x, y]` in the board plane
    pub points: Vec<[f64; 2]>,
    #[serde(default = "default_trace_thickness")]
    pub thickness: f64,
    #[serde(default)]
    pub style: TraceStyle,
}

impl TraceDescription {
    pub fn points(&self) -> Vec<DVec2> {
        self.points.iter().map(|&[x, y]| DVec2::new(x, y)).collect()
    }
}

fn default_trace_thickness() -> f64 {
    DEFAULT_TRACE_THICKNESS
}

/// A text label printed flat on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelDescription {
    pub text: String,
    #[serde(default)]
    pub position: PlanePoint,
    #[serde(default = "default_label_size")]
    pub size: f64,
    /// Rotation about the vertical axis in multiples of π
    #[serde(default)]
    pub rotation: f64,
}

fn default_label_size() -> f64 {
    DEFAULT_LABEL_SIZE
}

/// Perspective camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDescription {
    pub position: [f64; 3],
    pub target: [f64; 3],
    /// Vertical field of view in degrees
    pub fov: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            position: DEFAULT_CAMERA_POSITION,
            target: DEFAULT_CAMERA_TARGET,
            fov: DEFAULT_CAMERA_FOV,
            near: DEFAULT_CAMERA_NEAR,
            far: DEFAULT_CAMERA_FAR,
        }
    }
}

/// Ambient light, point lights and the axes helper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingDescription {
    pub ambient_color: u32,
    pub ambient_intensity: f64,
    pub point_color: u32,
    pub point_intensity: f64,
    pub point_positions: Vec<[f64; 3]>,
    /// Length of the axes helper, `0` hides it
    pub axes_length: f64,
}

impl Default for LightingDescription {
    fn default() -> Self {
        Self {
            ambient_color: DEFAULT_AMBIENT_COLOR,
            ambient_intensity: DEFAULT_AMBIENT_INTENSITY,
            point_color: DEFAULT_POINT_LIGHT_COLOR,
            point_intensity: DEFAULT_POINT_LIGHT_INTENSITY,
            point_positions: DEFAULT_POINT_LIGHT_POSITIONS.to_vec(),
            axes_length: DEFAULT_AXES_LENGTH,
        }
    }
}
