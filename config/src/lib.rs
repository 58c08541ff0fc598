//! # Config Crate
//!
//! Centralized configuration constants for the board scene pipeline.
//! Magic numbers and tunable parameters live here so the geometry core and
//! the browser bridge agree on tessellation, offsets and scene defaults.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{hole_segments, MIN_HOLE_SEGMENTS, TRACE_SURFACE_OFFSET};
//!
//! let segments = hole_segments(0.4, 0);
//! assert!(segments >= MIN_HOLE_SEGMENTS);
//!
//! let trace_height = 0.0 + TRACE_SURFACE_OFFSET;
//! assert!(trace_height > 0.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Browser-Safe**: No platform-specific values
//! - **Viewer Compatible**: Scene defaults match the Three.js viewer

pub mod constants;
