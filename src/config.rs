//! # Configuration Module
//!
//! This module provides the configuration structure and validation for a
//! fan-out run. It is the common interface between the CLI binary and the
//! core library: the CLI fills a [`FanoutConfig`] with raw strings, the
//! config validates them, and [`FanoutConfig::to_options`] produces the
//! typed [`FanoutOptions`](crate::FanoutOptions) the session consumes.
//!
//! ## Configuration Parameters
//!
//! | Parameter | Type | Constraint | Description |
//! |-----------|------|------------|-------------|
//! | `source` | `String` | non-empty, has a file stem | Path of the image to fan out |
//! | `variants` | `Vec<String>` | at least one, each `FORMAT:SCALE` | Derived outputs to produce |
//!
//! ## Variant Syntax
//!
//! Each variant is written `FORMAT:SCALE`, e.g. `JPEG:0.5` or `GIF:1.5`.
//! The format part names the output encoding and becomes the (lowercased)
//! file extension; the scale part is a positive factor applied to both
//! source dimensions. Scales above 1 upscale, below 1 downscale.
//!
//! ## Examples
//!
//! ```rust
//! use image_fanout::config::FanoutConfig;
//!
//! // The stock batch: one GIF upscale, two JPEG downscales.
//! let config = FanoutConfig::default();
//! assert!(config.validate().is_ok());
//!
//! // Custom batch
//! let config = FanoutConfig::new(
//!     "shot.png".to_string(),
//!     vec!["PNG:0.25".to_string(), "JPEG:2.0".to_string()],
//! );
//! assert!(config.validate().is_ok());
//! let options = config.to_options().unwrap();
//! assert_eq!(options.variants.len(), 2);
//! ```

use std::path::{Path, PathBuf};

use fanout_scale::VariantSpec;

use crate::error::FanoutResult;

/// The stock variant batch, matching the classic demo: one upscaled GIF
/// and two downscaled JPEGs.
pub const DEFAULT_VARIANTS: [&str; 3] = ["GIF:1.5", "JPEG:0.5", "JPEG:0.25"];

/// Configuration for one comparison run, in CLI-facing raw form.
///
/// Values stay as strings here so the CLI can hand them over untouched;
/// [`validate`](Self::validate) checks them and
/// [`to_options`](Self::to_options) parses them into library types.
pub struct FanoutConfig {
    /// Path of the source image. Derived files are written into the same
    /// directory, named after this file's stem.
    pub source: String,

    /// Variant requests as raw `FORMAT:SCALE` strings, in dispatch order.
    pub variants: Vec<String>,
}

impl Default for FanoutConfig {
    /// Default configuration: the stock batch against `puppy.jpg` in the
    /// current directory.
    fn default() -> Self {
        Self {
            source: "puppy.jpg".to_string(),
            variants: DEFAULT_VARIANTS.iter().map(|v| v.to_string()).collect(),
        }
    }
}

impl FanoutConfig {
    /// Creates a new configuration with the specified parameters.
    pub fn new(source: String, variants: Vec<String>) -> Self {
        Self { source, variants }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.source.trim().is_empty() {
            return Err("Source image path must not be empty".to_string());
        }
        if Path::new(&self.source)
            .file_stem()
            .and_then(|s| s.to_str())
            .is_none()
        {
            return Err(format!(
                "Source path '{}' has no file stem to derive output names from",
                self.source
            ));
        }
        if self.variants.is_empty() {
            return Err("At least one FORMAT:SCALE variant is required".to_string());
        }
        for raw in &self.variants {
            raw.parse::<VariantSpec>().map_err(|e| e.to_string())?;
        }
        Ok(())
    }

    /// Convert to typed [`FanoutOptions`](crate::FanoutOptions) for the
    /// session.
    pub fn to_options(&self) -> FanoutResult<crate::FanoutOptions> {
        let mut variants = Vec::with_capacity(self.variants.len());
        for raw in &self.variants {
            variants.push(raw.parse::<VariantSpec>()?);
        }
        Ok(crate::FanoutOptions {
            source: PathBuf::from(&self.source),
            variants,
        })
    }
}
