//! # Primitives
//!
//! Closed primitive solids used by the scene builders.

pub mod cylinder;

pub use cylinder::create_cylinder;
