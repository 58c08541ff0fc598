//! WASM-facing entry points for the board scene geometry.
//!
//! This crate is compiled to a `cdylib` and consumed from JavaScript via
//! `wasm-bindgen`. Every exported function has an `_internal` twin that
//! returns Rust error types, so native tests never need a JS host.
//!
//! ```
//! let mesh = board_wasm::build_board_internal(40.0, 40.0, 0.6, &[5.0, 5.0, 0.4]).unwrap();
//! assert!(mesh.vertex_count() > 8);
//! ```

use board_mesh::{
    AssetPoseNormalizer, BufferSource, Hole, HoleBoardBuilder, MeshError, MeshResult, MeshSource,
    PlacementMode, Rotation, SceneAssembler, TraceStyle, WireTraceExtruder,
};
use config::constants::hole_segments;
use glam::DVec2;
use wasm_bindgen::prelude::*;

mod mesh_handle;
mod scene_handle;

pub use mesh_handle::{MeshHandle, PoseHandle};
pub use scene_handle::SceneHandle;

fn to_js(err: MeshError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Installs a panic hook that forwards Rust panics to the browser console.
///
/// # Examples
/// ```no_run
/// // In JavaScript: import and call once at startup.
/// // import { init_panic_hook } from "board-wasm";
/// // init_panic_hook();
/// ```
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Routes `log` output to the browser console at `level`
/// (`"error"`, `"warn"`, `"info"`, `"debug"` or `"trace"`).
///
/// Unknown levels fall back to `warn`. Calling it twice keeps the first
/// logger.
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    let level = level.parse::<log::Level>().unwrap_or(log::Level::Warn);

    #[cfg(target_family = "wasm")]
    {
        if console_log::init_with_level(level).is_err() {
            log::debug!("Logger already installed");
        }
    }

    #[cfg(not(target_family = "wasm"))]
    log::set_max_level(level.to_level_filter());
}

/// Segment count used for a hole of `radius` when none is requested.
///
/// # Examples
/// ```
/// let segments = board_wasm::default_hole_segments(0.4);
/// assert!(segments >= 3);
/// ```
#[wasm_bindgen]
pub fn default_hole_segments(radius: f64) -> u32 {
    hole_segments(radius, 0)
}

// =============================================================================
// BOARD
// =============================================================================

/// Builds a drilled board.
///
/// `holes` is a flat `[x, y, radius, x, y, radius, ...]` array.
///
/// # Errors
/// Returns a JavaScript error with a human-readable message for invalid
/// dimensions or a malformed hole array.
#[wasm_bindgen]
pub fn build_board(width: f64, height: f64, depth: f64, holes: &[f64]) -> Result<MeshHandle, JsValue> {
    build_board_internal(width, height, depth, holes).map_err(to_js)
}

/// Internal implementation of [`build_board`].
pub fn build_board_internal(width: f64, height: f64, depth: f64, holes: &[f64]) -> MeshResult<MeshHandle> {
    if holes.len() % 3 != 0 {
        return Err(MeshError::invalid_geometry(format!(
            "Hole array length {} is not a multiple of 3",
            holes.len()
        )));
    }

    let holes = holes.chunks_exact(3).map(|h| Hole::new(h[0], h[1], h[2]));
    let mesh = HoleBoardBuilder::new(width, height, depth).holes(holes).build()?;
    Ok(MeshHandle::from_mesh(&mesh))
}

// =============================================================================
// TRACES
// =============================================================================

/// Extrudes a wire trace.
///
/// `points` is a flat `[x, y, x, y, ...]` polyline in the board plane.
/// `tube_segments == 0` selects the flat ribbon style.
///
/// # Errors
/// Returns a JavaScript error for invalid or degenerate traces.
#[wasm_bindgen]
pub fn build_trace(
    points: &[f64],
    thickness: f64,
    surface_height: f64,
    tube_segments: u32,
) -> Result<MeshHandle, JsValue> {
    build_trace_internal(points, thickness, surface_height, tube_segments).map_err(to_js)
}

/// Internal implementation of [`build_trace`].
pub fn build_trace_internal(
    points: &[f64],
    thickness: f64,
    surface_height: f64,
    tube_segments: u32,
) -> MeshResult<MeshHandle> {
    if points.len() % 2 != 0 {
        return Err(MeshError::invalid_geometry(format!(
            "Point array length {} is not a multiple of 2",
            points.len()
        )));
    }

    let style = match tube_segments {
        0 => TraceStyle::Ribbon,
        segments => TraceStyle::Tube { segments },
    };
    let points: Vec<DVec2> = points.chunks_exact(2).map(|p| DVec2::new(p[0], p[1])).collect();
    let mesh = WireTraceExtruder::new(surface_height)
        .with_style(style)
        .extrude(&points, thickness)?;
    Ok(MeshHandle::from_mesh(&mesh))
}

// =============================================================================
// ASSETS
// =============================================================================

/// Computes the pose that rests a loaded asset on the board.
///
/// `path` selects the format by extension, `positions` is the asset's flat
/// position buffer and the rotation is in multiples of π. With `center`
/// the asset's vertical center sits on the surface instead of its base.
///
/// # Errors
/// Returns a JavaScript error for unsupported formats and empty meshes.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn normalize_pose(
    path: &str,
    positions: Vec<f32>,
    rotation_x: f64,
    rotation_y: f64,
    rotation_z: f64,
    x: f64,
    y: f64,
    surface_height: f64,
    center: bool,
) -> Result<PoseHandle, JsValue> {
    normalize_pose_internal(
        path,
        positions,
        Rotation::new(rotation_x, rotation_y, rotation_z),
        DVec2::new(x, y),
        surface_height,
        center,
    )
    .map_err(to_js)
}

/// Internal implementation of [`normalize_pose`].
pub fn normalize_pose_internal(
    path: &str,
    positions: Vec<f32>,
    rotation: Rotation,
    target: DVec2,
    surface_height: f64,
    center: bool,
) -> MeshResult<PoseHandle> {
    let source = BufferSource::new(path, positions, None)?;
    let mode = if center {
        PlacementMode::CenterOnSurface
    } else {
        PlacementMode::RestOnSurface
    };

    let pose = AssetPoseNormalizer::new(surface_height)
        .with_mode(mode)
        .normalize(&source.to_mesh()?, rotation, target)?;
    Ok(PoseHandle::new(pose))
}

// =============================================================================
// SCENE
// =============================================================================

/// Assembles the procedural parts of a scene from its JSON description.
///
/// Failing traces are left out and reported by [`SceneHandle::failures`].
///
/// # Errors
/// Returns a JavaScript error for malformed JSON or an invalid board.
#[wasm_bindgen]
pub fn assemble_scene(json: &str) -> Result<SceneHandle, JsValue> {
    assemble_scene_internal(json).map_err(to_js)
}

/// Internal implementation of [`assemble_scene`].
pub fn assemble_scene_internal(json: &str) -> MeshResult<SceneHandle> {
    let assembler = SceneAssembler::from_json(json)?;
    let scene = assembler.assemble()?;
    Ok(SceneHandle::new(assembler.description().clone(), scene))
}
