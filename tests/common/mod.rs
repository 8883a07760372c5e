//! Common helpers for the fanout integration tests.
//!
//! Every test works against a real file on disk, so these helpers build
//! small gradient sources inside temp directories and the tests drive the
//! actual decode, resize, and write path.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

use image_fanout::VariantSpec;

/// Create a gradient test image so resized outputs carry real pixel variety.
pub fn create_gradient_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let r = ((x as f32 / width as f32) * 255.0) as u8;
        let g = ((y as f32 / height as f32) * 255.0) as u8;
        Rgb([r, g, 128])
    })
}

/// Save a gradient source under `dir` and return its path.
pub fn write_source(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    create_gradient_image(width, height)
        .save(&path)
        .expect("test source image should save");
    path
}

/// Parse a batch of `FORMAT:SCALE` strings into variant specs.
pub fn parse_batch(raw: &[&str]) -> Vec<VariantSpec> {
    raw.iter()
        .map(|s| s.parse().expect("test variant should parse"))
        .collect()
}

/// Collect the derived file names present in `dir`, excluding `source_name`.
pub fn derived_files_in(dir: &Path, source_name: &str) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("test dir should be readable")
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name != source_name)
        .collect();
    names.sort();
    names
}
