// SPDX-License-Identifier: MIT
// Raster resize pass built on fast_image_resize (SIMD-accelerated).
// Decoded image in → freshly allocated image out, shaped by a ResizePlan.

use fast_image_resize as fir;
use fir::{FilterType, ResizeAlg, ResizeOptions, Resizer};
use image::DynamicImage;

use crate::plan::ResizePlan;

#[derive(Debug)]
pub enum ResizeError {
    Fir(fir::ResizeError),
}

impl From<fir::ResizeError> for ResizeError {
    fn from(e: fir::ResizeError) -> Self {
        Self::Fir(e)
    }
}

impl std::fmt::Display for ResizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResizeError::Fir(e) => write!(f, "Fast image resize error: {}", e),
        }
    }
}

impl std::error::Error for ResizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResizeError::Fir(e) => Some(e),
        }
    }
}

/// Resample `src` into a new raster with the plan's dimensions and layout.
///
/// The destination is allocated here rather than written into a caller
/// buffer: every plan in a batch has its own shape, so there is nothing to
/// reuse across calls. Resampling always runs a fixed Lanczos3 convolution;
/// the filter is part of the determinism contract, not a tuning knob.
pub fn resize_raster(src: &DynamicImage, plan: &ResizePlan) -> Result<DynamicImage, ResizeError> {
    let mut dst = DynamicImage::new(plan.width, plan.height, plan.layout.color_type());
    let mut resizer = Resizer::new();
    let opts = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));
    resizer.resize(src, &mut dst, &opts)?;
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{build_plan, Size};
    use crate::spec::VariantSpec;
    use image::{ColorType, Rgb, RgbImage, Rgba, RgbaImage};

    fn rgb_gradient(w: u32, h: u32) -> DynamicImage {
        let img = RgbImage::from_fn(w, h, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        DynamicImage::ImageRgb8(img)
    }

    fn rgba_gradient(w: u32, h: u32) -> DynamicImage {
        let img = RgbaImage::from_fn(w, h, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255])
        });
        DynamicImage::ImageRgba8(img)
    }

    fn plan_for(src: &DynamicImage, format: &str, scale: f64) -> ResizePlan {
        let spec = VariantSpec::new(format, scale).unwrap();
        build_plan(
            Size {
                w: src.width(),
                h: src.height(),
            },
            src.color(),
            &spec,
        )
        .unwrap()
    }

    #[test]
    fn downscale_matches_plan_shape() {
        let src = rgb_gradient(64, 48);
        let plan = plan_for(&src, "JPEG", 0.5);
        let out = resize_raster(&src, &plan).unwrap();
        assert_eq!((out.width(), out.height()), (32, 24));
        assert_eq!(out.color(), ColorType::Rgb8);
    }

    #[test]
    fn upscale_matches_plan_shape() {
        let src = rgb_gradient(16, 16);
        let plan = plan_for(&src, "GIF", 1.5);
        let out = resize_raster(&src, &plan).unwrap();
        assert_eq!((out.width(), out.height()), (24, 24));
    }

    #[test]
    fn alpha_layout_is_carried_through() {
        let src = rgba_gradient(40, 20);
        let plan = plan_for(&src, "PNG", 0.5);
        let out = resize_raster(&src, &plan).unwrap();
        assert_eq!(out.color(), ColorType::Rgba8);
    }

    #[test]
    fn grayscale_layout_is_carried_through() {
        let src = DynamicImage::ImageLuma8(image::GrayImage::from_fn(32, 32, |x, _| {
            image::Luma([(x * 8 % 256) as u8])
        }));
        let plan = plan_for(&src, "PNG", 0.5);
        let out = resize_raster(&src, &plan).unwrap();
        assert_eq!(out.color(), ColorType::L8);
    }

    #[test]
    fn resampling_is_deterministic() {
        let src = rgb_gradient(50, 30);
        let plan = plan_for(&src, "JPEG", 0.25);
        let a = resize_raster(&src, &plan).unwrap();
        let b = resize_raster(&src, &plan).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }
}
