//! # Error Handling for the Fan-Out Pipeline
//!
//! This module provides the error type shared by the whole run: one enum,
//! one variant per failure class, each constructed through a helper so call
//! sites never spell out struct fields.
//!
//! ## Error Classification
//!
//! Failure classes split along one axis that drives control flow:
//!
//! - **Run-fatal**: the whole comparison is pointless without the input.
//!   `InvalidSpec` (a variant request that can never be produced) and
//!   `CodecRead` (the one shared source could not be decoded).
//! - **Task-local**: one derived output is lost, the rest of the batch keeps
//!   going. `CodecWrite` (encode or filesystem trouble for one target) and
//!   `DegenerateDimensions` (scaling collapsed a dimension below one pixel).
//!
//! The [`classify`] module holds the predicates. Inside the crate the
//! split is structural: run-fatal errors surface through `?` before any
//! task is dispatched, and task-local ones are swallowed at the task
//! boundary. The predicates let callers sort a finished run's failures
//! without matching on variants.

use std::{error::Error as StdError, fmt};

use fanout_scale::SpecError;

/// Base error type for the image fan-out library.
#[derive(Debug)]
pub enum FanoutError {
    /// A variant specification failed validation.
    InvalidSpec { spec: String, reason: String },
    /// The source image could not be read or decoded.
    CodecRead {
        path: String,
        source: Box<dyn StdError + Send + Sync>,
    },
    /// One derived output could not be produced or written.
    CodecWrite {
        format: String,
        target: Option<String>,
        source: Box<dyn StdError + Send + Sync>,
    },
    /// Scaling collapsed a target dimension below one pixel.
    DegenerateDimensions {
        format: String,
        scale: f64,
        width: u32,
        height: u32,
    },
}

impl FanoutError {
    /// Create an invalid-spec error.
    pub fn invalid_spec(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            spec: spec.into(),
            reason: reason.into(),
        }
    }

    /// Create a codec-read error for the source image.
    pub fn codec_read(
        path: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::CodecRead {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Create a codec-write error for one derived output.
    pub fn codec_write(
        format: impl Into<String>,
        target: Option<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::CodecWrite {
            format: format.into(),
            target,
            source: Box::new(source),
        }
    }

    /// Create a codec-write error for a format identifier no codec matches.
    pub fn unknown_format(format: impl Into<String>) -> Self {
        let format = format.into();
        let source = std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            format!(
                "no image codec matches extension '{}'",
                format.to_lowercase()
            ),
        );
        Self::CodecWrite {
            format,
            target: None,
            source: Box::new(source),
        }
    }

    /// Create a degenerate-dimensions error.
    pub fn degenerate_dimensions(
        format: impl Into<String>,
        scale: f64,
        width: u32,
        height: u32,
    ) -> Self {
        Self::DegenerateDimensions {
            format: format.into(),
            scale,
            width,
            height,
        }
    }

    /// Get the error category as a string.
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidSpec { .. } => "invalid_spec",
            Self::CodecRead { .. } => "codec_read",
            Self::CodecWrite { .. } => "codec_write",
            Self::DegenerateDimensions { .. } => "degenerate_dimensions",
        }
    }
}

impl fmt::Display for FanoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FanoutError::InvalidSpec { spec, reason } => {
                write!(f, "Invalid variant spec '{}': {}", spec, reason)
            }
            FanoutError::CodecRead { path, source } => {
                write!(f, "Could not read source image '{}': {}", path, source)
            }
            FanoutError::CodecWrite {
                format,
                target,
                source,
            } => {
                if let Some(target) = target {
                    write!(
                        f,
                        "Could not write {} variant to '{}': {}",
                        format, target, source
                    )
                } else {
                    write!(f, "Could not produce {} variant: {}", format, source)
                }
            }
            FanoutError::DegenerateDimensions {
                format,
                scale,
                width,
                height,
            } => {
                write!(
                    f,
                    "Variant {}:{} scales to {}x{}, below the one-pixel minimum",
                    format, scale, width, height
                )
            }
        }
    }
}

impl StdError for FanoutError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::CodecRead { source, .. } => Some(source.as_ref()),
            Self::CodecWrite { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<SpecError> for FanoutError {
    fn from(error: SpecError) -> Self {
        let spec = match &error {
            SpecError::Unparseable(raw) => raw.clone(),
            _ => String::new(),
        };
        Self::invalid_spec(spec, error.to_string())
    }
}

/// Result type alias using our custom error type.
pub type FanoutResult<T> = Result<T, FanoutError>;

/// Error classification utilities.
pub mod classify {
    use super::*;

    /// Check if an error invalidates the whole run.
    pub fn is_run_fatal(error: &FanoutError) -> bool {
        matches!(
            error,
            FanoutError::InvalidSpec { .. } | FanoutError::CodecRead { .. }
        )
    }

    /// Check if an error costs only the one task that raised it.
    pub fn is_task_local(error: &FanoutError) -> bool {
        !is_run_fatal(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = FanoutError::invalid_spec("GIF:0", "scale must be positive");
        assert_eq!(error.category(), "invalid_spec");
        assert!(classify::is_run_fatal(&error));
    }

    #[test]
    fn test_task_local_classification() {
        let error = FanoutError::degenerate_dimensions("GIF", 0.001, 1, 0);
        assert!(classify::is_task_local(&error));
        assert!(!classify::is_run_fatal(&error));

        let error = FanoutError::unknown_format("BOGUS");
        assert!(classify::is_task_local(&error));
        assert_eq!(error.category(), "codec_write");
    }

    #[test]
    fn test_read_failures_are_run_fatal() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = FanoutError::codec_read("/tmp/nope.png", io);
        assert!(classify::is_run_fatal(&error));
    }

    #[test]
    fn test_spec_errors_convert() {
        let spec_err = fanout_scale::VariantSpec::new("", 1.0).unwrap_err();
        let error: FanoutError = spec_err.into();
        assert_eq!(error.category(), "invalid_spec");
    }

    #[test]
    fn test_display_includes_variant_identity() {
        let error = FanoutError::degenerate_dimensions("JPEG", 0.25, 0, 75);
        let text = error.to_string();
        assert!(text.contains("JPEG:0.25"));
        assert!(text.contains("0x75"));
    }
}
