// SPDX-License-Identifier: MIT
//! Variant specifications.
//!
//! A [`VariantSpec`] is the immutable description of one desired derived
//! output: which encoding format to produce and how much to scale the
//! source by. Construction is validated; an instance that exists is always
//! usable for planning.

use std::fmt;
use std::str::FromStr;

/// Why a variant specification could not be constructed or parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecError {
    /// The format identifier was empty or all whitespace.
    EmptyFormat,
    /// The scale was zero or negative.
    NonPositiveScale(f64),
    /// The scale was NaN or infinite.
    NonFiniteScale(f64),
    /// The `FORMAT:SCALE` string could not be split or its scale parsed.
    Unparseable(String),
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecError::EmptyFormat => write!(f, "variant format must not be empty"),
            SpecError::NonPositiveScale(s) => {
                write!(f, "variant scale must be strictly positive, got {}", s)
            }
            SpecError::NonFiniteScale(s) => {
                write!(f, "variant scale must be finite, got {}", s)
            }
            SpecError::Unparseable(raw) => {
                write!(f, "expected FORMAT:SCALE (e.g. JPEG:0.5), got '{}'", raw)
            }
        }
    }
}

impl std::error::Error for SpecError {}

/// One desired output: target encoding format name plus a scale multiplier
/// applied to both source dimensions.
///
/// Specs carry no identity beyond value equality; a batch may legitimately
/// contain several specs sharing a format. The format string is kept as
/// given (minus surrounding whitespace); whether the identifier names a
/// real codec is decided at encode time, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantSpec {
    format: String,
    scale: f64,
}

impl VariantSpec {
    /// Build a spec from a format identifier and a scale multiplier.
    ///
    /// Fails when the format is empty or the scale is not a strictly
    /// positive finite number. NaN fails the positivity gate; infinity is
    /// rejected separately because a plan computed from it could only
    /// saturate.
    pub fn new(format: impl Into<String>, scale: f64) -> Result<Self, SpecError> {
        let format = format.into().trim().to_owned();
        if format.is_empty() {
            return Err(SpecError::EmptyFormat);
        }
        if scale.is_nan() || scale <= 0.0 {
            return Err(SpecError::NonPositiveScale(scale));
        }
        if !scale.is_finite() {
            return Err(SpecError::NonFiniteScale(scale));
        }
        Ok(Self { format, scale })
    }

    /// The target encoding format identifier, as given at construction.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// The scale multiplier. Always finite and strictly positive.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl fmt::Display for VariantSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.format, self.scale)
    }
}

impl FromStr for VariantSpec {
    type Err = SpecError;

    /// Parse the CLI shape `FORMAT:SCALE`, e.g. `GIF:1.5` or `jpeg : 0.25`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (format, scale) = s
            .split_once(':')
            .ok_or_else(|| SpecError::Unparseable(s.to_owned()))?;
        let scale: f64 = scale
            .trim()
            .parse()
            .map_err(|_| SpecError::Unparseable(s.to_owned()))?;
        Self::new(format, scale)
    }
}
