//! # Mesh Errors
//!
//! Error types for board, pose and trace generation.

use thiserror::Error;

/// Errors that can occur during mesh generation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// Parameters that can never describe valid geometry
    /// (non-positive sizes, too few trace points, non-finite values).
    #[error("Invalid geometry: {message}")]
    InvalidGeometry { message: String },

    /// Input that is well-formed but degenerate
    /// (zero-length trace segment, empty asset mesh).
    #[error("Degenerate input: {message}")]
    DegenerateInput { message: String },

    /// Asset file extension without a registered mesh source.
    #[error("Unsupported asset format: '{extension}'")]
    UnsupportedAssetFormat { extension: String },

    /// Malformed scene description.
    #[error("Scene description error: {message}")]
    Scene { message: String },
}

impl MeshError {
    /// Creates an invalid geometry error.
    pub fn invalid_geometry(message: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            message: message.into(),
        }
    }

    /// Creates a degenerate input error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateInput {
            message: message.into(),
        }
    }

    /// Creates an unsupported asset format error.
    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        Self::UnsupportedAssetFormat {
            extension: extension.into(),
        }
    }

    /// Creates a scene description error.
    pub fn scene(message: impl Into<String>) -> Self {
        Self::Scene {
            message: message.into(),
        }
    }

    /// Returns true for `DegenerateInput` errors.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateInput { .. })
    }

    /// Returns true for `InvalidGeometry` errors.
    pub fn is_invalid_geometry(&self) -> bool {
        matches!(self, Self::InvalidGeometry { .. })
    }
}

impl From<serde_json::Error> for MeshError {
    fn from(err: serde_json::Error) -> Self {
        Self::scene(err.to_string())
    }
}

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Rejects non-finite or non-positive values.
pub(crate) fn require_positive(name: &str, value: f64) -> MeshResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MeshError::invalid_geometry(format!(
            "{} must be positive and finite, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Rejects non-finite values.
pub(crate) fn require_finite(name: &str, value: f64) -> MeshResult<()> {
    if !value.is_finite() {
        return Err(MeshError::invalid_geometry(format!(
            "{} must be finite, got {}",
            name, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::degenerate("segment 0 has zero length");
        assert!(err.to_string().contains("Degenerate input"));
        assert!(err.to_string().contains("segment 0"));

        let err = MeshError::unsupported_format("fbx");
        assert_eq!(err.to_string(), "Unsupported asset format: 'fbx'");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MeshError>();
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("width", 1.0).is_ok());
        assert!(require_positive("width", 0.0).unwrap_err().is_invalid_geometry());
        assert!(require_positive("width", -2.0).is_err());
        assert!(require_positive("width", f64::NAN).is_err());
        assert!(require_positive("width", f64::INFINITY).is_err());
    }

    #[test]
    fn test_json_error_converts_to_scene_error() {
        let err: MeshError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, MeshError::Scene { .. }));
    }
}
