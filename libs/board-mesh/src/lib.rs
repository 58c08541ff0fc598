//! # Board Mesh
//!
//! Procedural geometry for a populated circuit-board viewer.
//! Produces triangle meshes for the drilled baseboard, places loaded
//! component models on its surface and extrudes wire traces along it.
//!
//! ## Architecture
//!
//! ```text
//! SceneDescription → SceneAssembler → board / underlay / traces / labels
//!                                   ↘ MeshSource → AssetPoseNormalizer → placed models
//! ```
//!
//! ## Coordinates
//!
//! World space is Y-up. A board-plane point `(x, y)` maps to the world
//! point `(x, h, y)` at height `h`. The board top lies at `y = 0` and the
//! board extends downward by its depth.
//!
//! ## Algorithms
//!
//! All algorithms are browser-safe (pure Rust, no native dependencies):
//! - **Triangulation**: Ear clipping with hole bridging
//! - **Extrusion**: Linear extrusion of polygons with holes
//! - **Pose**: Euler rotation followed by bounds-based surface snapping
//! - **Traces**: Per-segment ribbons or cylinders
//!
//! ## Usage
//!
//! ```rust
//! use board_mesh::HoleBoardBuilder;
//!
//! let board = HoleBoardBuilder::new(40.0, 30.0, 0.6)
//!     .hole(5.0, 5.0, 0.4)
//!     .build()
//!     .unwrap();
//! assert!(board.is_watertight());
//! ```

pub mod board;
pub mod bounds;
pub mod error;
pub mod mesh;
pub mod ops;
pub mod polygon;
pub mod pose;
pub mod primitives;
pub mod scene;
pub mod source;
pub mod trace;

pub use board::{build_board, build_underlay, Board, Hole, HoleBoardBuilder};
pub use bounds::{BoundingBox, Rect2};
pub use error::{MeshError, MeshResult};
pub use mesh::Mesh;
pub use pose::{AssetPoseNormalizer, PlacementMode, Pose, Rotation};
pub use scene::{
    AssembledScene, ElementFailure, ElementKind, LabelPlacement, PlacedModel, SceneAssembler,
    SceneDescription,
};
pub use source::{AssetFormat, BufferSource, MeshSource};
pub use trace::{extrude_trace, TraceStyle, WireTraceExtruder};
