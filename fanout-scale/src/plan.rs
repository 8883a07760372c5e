// SPDX-License-Identifier: MIT
//! Resize planning: from (source dimensions, spec) to an exact output shape.
//!
//! Planning is where every numeric decision happens. The resize pass and
//! the writer downstream just execute what the plan says, so all the
//! determinism guarantees live here in plain arithmetic.

use image::ColorType;

use crate::spec::VariantSpec;

/// Source raster dimensions as seen by the planner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

/// Why a plan could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// Scaling collapsed at least one target dimension below one pixel.
    DegenerateDimensions { width: u32, height: u32 },
}

impl std::fmt::Display for PlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanError::DegenerateDimensions { width, height } => write!(
                f,
                "computed target dimensions {}x{} collapse below one pixel",
                width, height
            ),
        }
    }
}

impl std::error::Error for PlanError {}

/// Channel layout of the destination raster.
///
/// The destination keeps the source's layout whenever it is one of the
/// layouts this pipeline knows how to carry through the resampler. Anything
/// else falls back to a fixed 32-bit RGBA layout. The fallback is its own
/// enum arm, a named case rather than a sentinel value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// Destination uses the source's own channel layout.
    Native(ColorType),
    /// Fixed 8-bit-per-channel RGBA fallback.
    Rgba8,
}

impl PixelLayout {
    /// Choose the destination layout for a source color type.
    pub fn for_source(color: ColorType) -> Self {
        match color {
            ColorType::L8
            | ColorType::La8
            | ColorType::Rgb8
            | ColorType::Rgba8
            | ColorType::L16
            | ColorType::La16
            | ColorType::Rgb16
            | ColorType::Rgba16
            | ColorType::Rgb32F
            | ColorType::Rgba32F => PixelLayout::Native(color),
            // ColorType is non-exhaustive; future layouts land here.
            _ => PixelLayout::Rgba8,
        }
    }

    /// The concrete color type the destination raster is allocated with.
    pub fn color_type(self) -> ColorType {
        match self {
            PixelLayout::Native(color) => color,
            PixelLayout::Rgba8 => ColorType::Rgba8,
        }
    }
}

/// Everything the resize pass and the writer need to know about one output.
///
/// For a given source size and spec the plan is fully deterministic:
/// `width = trunc(source.w * scale)` and likewise for height, truncation
/// toward zero. Upscales when scale > 1, downscales when scale < 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizePlan {
    /// Target width in pixels, always >= 1.
    pub width: u32,
    /// Target height in pixels, always >= 1.
    pub height: u32,
    /// Channel layout of the destination raster.
    pub layout: PixelLayout,
}

/// Compute the plan for one variant against a source raster.
///
/// Fails with [`PlanError::DegenerateDimensions`] when either computed
/// dimension truncates to zero. Absurdly large scales saturate at
/// `u32::MAX`; whether such a raster is allocatable is the executing
/// layer's problem, not a planning concern.
pub fn build_plan(
    source: Size,
    color: ColorType,
    spec: &VariantSpec,
) -> Result<ResizePlan, PlanError> {
    // `as u32` truncates toward zero, which is floor for non-negative values.
    let width = (source.w as f64 * spec.scale()) as u32;
    let height = (source.h as f64 * spec.scale()) as u32;
    if width == 0 || height == 0 {
        return Err(PlanError::DegenerateDimensions { width, height });
    }
    Ok(ResizePlan {
        width,
        height,
        layout: PixelLayout::for_source(color),
    })
}

/// Derived output filename: `<stem>_<width>x<height>.<format-lowercased>`.
///
/// The extension position takes the spec's format identifier lowercased and
/// otherwise as given, so `JPEG` yields `.jpeg` (not the codec's canonical
/// `.jpg`).
pub fn derived_file_name(stem: &str, width: u32, height: u32, format: &str) -> String {
    format!(
        "{}_{}x{}.{}",
        stem,
        width,
        height,
        format.to_ascii_lowercase()
    )
}
