//! # Configuration Constants
//!
//! Centralized constants for the board scene pipeline. All tessellation
//! parameters, precision values, scene defaults and colors are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Tessellation**: Segment counts for hole contours and trace tubes
//! - **Surfaces**: Offsets that keep overlays above the board top
//! - **Scene**: Board, camera and lighting defaults of the viewer
//! - **Limits**: Maximum values for safety bounds
//! - **Colors**: Default material colors

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Epsilon for vertex coincidence.
///
/// Two vertices closer than this are treated as the same point, e.g. when
/// detecting duplicate consecutive trace points or zero-area triangles.
pub const VERTEX_MERGE_EPSILON: f64 = 1e-8;

/// Area below which a 2D contour is considered degenerate.
///
/// Extrusion rejects outer boundaries enclosing less than this.
pub const AREA_EPSILON: f64 = 1e-12;

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Minimum number of segments used to approximate a drilled hole.
///
/// Below this count holes look visibly faceted at board scale.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_HOLE_SEGMENTS;
///
/// assert!(MIN_HOLE_SEGMENTS >= 16);
/// ```
pub const MIN_HOLE_SEGMENTS: u32 = 16;

/// Maximum number of segments for a hole contour.
pub const MAX_HOLE_SEGMENTS: u32 = 256;

/// Minimum angle in degrees between consecutive hole segments.
/// Caps the count for large holes.
pub const HOLE_SEGMENT_ANGLE: f64 = 10.0;

/// Minimum length of a hole segment edge.
/// Reduces the count for tiny holes.
pub const HOLE_SEGMENT_SIZE: f64 = 0.1;

/// Default number of radial segments for a tube-style trace.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_TUBE_SEGMENTS, MIN_TUBE_SEGMENTS};
///
/// assert!(DEFAULT_TUBE_SEGMENTS >= MIN_TUBE_SEGMENTS);
/// ```
pub const DEFAULT_TUBE_SEGMENTS: u32 = 12;

/// Minimum number of radial segments for a tube-style trace.
pub const MIN_TUBE_SEGMENTS: u32 = 3;

// =============================================================================
// SURFACE CONSTANTS
// =============================================================================

/// Height of trace geometry above the board top surface.
///
/// Keeps the copper ribbon from z-fighting with the board face.
pub const TRACE_SURFACE_OFFSET: f64 = 0.01;

/// Height of printed labels above the board top surface.
pub const LABEL_SURFACE_OFFSET: f64 = 0.02;

/// Trace width used when a scene omits it.
pub const DEFAULT_TRACE_THICKNESS: f64 = 0.2;

// =============================================================================
// SCENE CONSTANTS
// =============================================================================

/// Default board width (X extent).
pub const DEFAULT_BOARD_WIDTH: f64 = 40.0;

/// Default board height (Z extent in world space, Y in the board plane).
pub const DEFAULT_BOARD_HEIGHT: f64 = 40.0;

/// Default board thickness (vertical extent).
pub const DEFAULT_BOARD_DEPTH: f64 = 0.6;

/// Vertical gap between the board bottom and the grey underlay slab.
pub const DEFAULT_UNDERLAY_OFFSET: f64 = 0.3;

/// Default camera position.
pub const DEFAULT_CAMERA_POSITION: [f64; 3] = [10.0, 10.0, 10.0];

/// Default camera look-at target.
pub const DEFAULT_CAMERA_TARGET: [f64; 3] = [0.0, 0.0, 0.0];

/// Default vertical field of view in degrees.
pub const DEFAULT_CAMERA_FOV: f64 = 75.0;

/// Default camera near clipping plane.
pub const DEFAULT_CAMERA_NEAR: f64 = 1.0;

/// Default camera far clipping plane.
pub const DEFAULT_CAMERA_FAR: f64 = 1000.0;

/// Default ambient light color (0xRRGGBB).
pub const DEFAULT_AMBIENT_COLOR: u32 = 0x404040;

/// Default ambient light intensity.
pub const DEFAULT_AMBIENT_INTENSITY: f64 = 10.0;

/// Default point light color (0xRRGGBB).
pub const DEFAULT_POINT_LIGHT_COLOR: u32 = 0xffffff;

/// Default point light intensity.
pub const DEFAULT_POINT_LIGHT_INTENSITY: f64 = 50.0;

/// Fixed point light positions of the default lighting rig.
///
/// Eight lights on the corners of a 20-unit cube plus one at the origin.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_POINT_LIGHT_POSITIONS;
///
/// assert_eq!(DEFAULT_POINT_LIGHT_POSITIONS.len(), 9);
/// ```
pub const DEFAULT_POINT_LIGHT_POSITIONS: [[f64; 3]; 9] = [
    [10.0, 10.0, 10.0],
    [-10.0, 10.0, 10.0],
    [10.0, -10.0, 10.0],
    [10.0, 10.0, -10.0],
    [10.0, -10.0, -10.0],
    [-10.0, 10.0, -10.0],
    [-10.0, -10.0, 10.0],
    [-10.0, -10.0, -10.0],
    [0.0, 0.0, 0.0],
];

/// Length of the axes helper drawn at the origin.
pub const DEFAULT_AXES_LENGTH: f64 = 50.0;

/// Default label glyph height.
pub const DEFAULT_LABEL_SIZE: f64 = 1.0;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of holes on a single board.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_HOLES;
///
/// let hole_count = 200;
/// assert!(hole_count < MAX_HOLES);
/// ```
pub const MAX_HOLES: usize = 10_000;

/// Maximum number of points in a single trace.
pub const MAX_TRACE_POINTS: usize = 100_000;

// =============================================================================
// COLOR CONSTANTS
// =============================================================================

/// Solder-mask green of the board (0xRRGGBB).
pub const BOARD_COLOR: u32 = 0x40573e;

/// Grey of the underlay slab (0xRRGGBB).
pub const UNDERLAY_COLOR: u32 = 0xa9a9a9;

/// Copper color for traces (0xRRGGBB).
pub const TRACE_COLOR: u32 = 0xb87333;

/// Default color for loaded assets without their own material (0xRRGGBB).
pub const DEFAULT_ASSET_COLOR: u32 = 0xaaaaaa;

/// Default vertex color when none is specified (light gray).
///
/// RGBA values in range [0.0, 1.0].
pub const DEFAULT_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Computes the number of segments for a hole contour.
///
/// - If `requested > 0`: use it, clamped to `MIN_HOLE_SEGMENTS..=MAX_HOLE_SEGMENTS`
/// - Otherwise: `ceil(min(360 / HOLE_SEGMENT_ANGLE, 2*PI*r / HOLE_SEGMENT_SIZE))`,
///   clamped the same way
///
/// # Example
///
/// ```rust
/// use config::constants::{hole_segments, MIN_HOLE_SEGMENTS};
///
/// assert_eq!(hole_segments(1.0, 48), 48);
/// assert_eq!(hole_segments(0.01, 0), MIN_HOLE_SEGMENTS);
/// assert_eq!(hole_segments(100.0, 0), 36);
/// ```
pub fn hole_segments(radius: f64, requested: u32) -> u32 {
    let segments = if requested > 0 {
        requested
    } else {
        let from_angle = 360.0 / HOLE_SEGMENT_ANGLE;
        let from_size = (2.0 * std::f64::consts::PI * radius.abs()) / HOLE_SEGMENT_SIZE;
        from_angle.min(from_size).ceil() as u32
    };

    segments.clamp(MIN_HOLE_SEGMENTS, MAX_HOLE_SEGMENTS)
}

/// Converts a 0xRRGGBB color to RGBA floats in [0, 1].
///
/// # Example
///
/// ```rust
/// use config::constants::hex_to_rgba;
///
/// assert_eq!(hex_to_rgba(0xff0000), [1.0, 0.0, 0.0, 1.0]);
/// ```
pub fn hex_to_rgba(hex: u32) -> [f32; 4] {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    [r, g, b, 1.0]
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
