//! # Mesh Operations
//!
//! Operations that turn 2D outlines into solids.

pub mod extrude;

pub use extrude::{extrude_polygon, extrude_walls, ExtrudeParams};
