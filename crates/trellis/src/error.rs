//! Error types for Trellis operations.
//!
//! This module provides the main error type [`TrellisError`]. Drawing
//! failures raised by `trellis-core` are converted into it, so every public
//! operation of the library reports through a single type.

use std::io;

use thiserror::Error;

use trellis_core::draw::DrawError;

/// The main error type for Trellis operations.
///
/// Every variant is fatal for the render that raised it: the composer stops
/// at the first error and no output file is written.
#[derive(Debug, Error)]
pub enum TrellisError {
    #[error("Invalid dimensions: {width}x{height}, both must be strictly positive")]
    InvalidDimensions { width: f32, height: f32 },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Unsupported shape `{0}`, valid values: rect, oval, diamond")]
    UnsupportedShape(String),

    #[error("Unknown diagram `{0}`")]
    UnknownDiagram(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<DrawError> for TrellisError {
    fn from(error: DrawError) -> Self {
        match error {
            DrawError::InvalidDimensions { width, height } => {
                Self::InvalidDimensions { width, height }
            }
            DrawError::InvalidGeometry(msg) => Self::InvalidGeometry(msg),
            DrawError::UnsupportedShape(name) => Self::UnsupportedShape(name),
            DrawError::UnknownColor(name) => {
                Self::Config(format!("unknown palette color `{name}`"))
            }
            DrawError::Io(err) => Self::Io(err),
            DrawError::Encode(msg) => Self::Encode(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_errors_keep_their_kind() {
        let err = TrellisError::from(DrawError::InvalidDimensions {
            width: 0.0,
            height: 10.0,
        });
        assert!(matches!(
            err,
            TrellisError::InvalidDimensions { width, height } if width == 0.0 && height == 10.0
        ));

        let err = TrellisError::from(DrawError::UnsupportedShape("hexagon".to_string()));
        assert_eq!(
            err.to_string(),
            "Unsupported shape `hexagon`, valid values: rect, oval, diamond"
        );

        let err = TrellisError::from(DrawError::Io(io::Error::other("disk full")));
        assert!(matches!(err, TrellisError::Io(_)));
    }

    #[test]
    fn test_unknown_color_is_config_error() {
        let err = TrellisError::from(DrawError::UnknownColor("mauve".to_string()));
        assert!(matches!(err, TrellisError::Config(msg) if msg.contains("mauve")));
    }
}
