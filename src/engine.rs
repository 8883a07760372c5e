//! # Resize Engine
//!
//! One decoded source in, one derived file out. The engine owns the full
//! per-variant pipeline: plan the target shape, resample, encode into a
//! memory buffer, then land the bytes next to the source with an atomic
//! rename. Strategies call [`ResizeEngine::compute_and_write`] once per
//! variant and never touch pixels or paths themselves.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};
use tempfile::NamedTempFile;

use fanout_scale::{build_plan, derived_file_name, resize_raster, PlanError, Size, VariantSpec};

use crate::error::{FanoutError, FanoutResult};

/// The source image, decoded exactly once per run and shared read-only by
/// every variant task.
#[derive(Debug)]
pub struct SourceImage {
    /// Decoded pixel data.
    pub image: DynamicImage,
    /// Path the source was loaded from.
    pub path: PathBuf,
    /// Filename without its extension; the prefix of every derived name.
    pub stem: String,
    /// Directory derived outputs are written into.
    pub dir: PathBuf,
}

impl SourceImage {
    /// Load and decode a source image from disk.
    ///
    /// Any failure here is run-fatal: without a decoded source there is
    /// nothing to fan out.
    pub fn load(path: impl AsRef<Path>) -> FanoutResult<Self> {
        let path = path.as_ref().to_path_buf();
        let image = image::open(&path)
            .map_err(|e| FanoutError::codec_read(path.display().to_string(), e))?;
        let stem = match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem.to_owned(),
            None => {
                let detail = std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "source path has no file stem to derive output names from",
                );
                return Err(FanoutError::codec_read(path.display().to_string(), detail));
            }
        };
        // A bare filename has an empty parent; derived files then land in
        // the current directory, same as the source itself.
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Self {
            image,
            path,
            stem,
            dir,
        })
    }

    /// Source width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Source height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Descriptor of one derived file after it has been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedOutput {
    /// Where the file landed.
    pub path: PathBuf,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Format identifier from the spec that produced this file.
    pub format: String,
    /// Encoded size of the file on disk.
    pub bytes_written: u64,
}

/// Stateless executor for single variants. Copies are free, so every task
/// can carry its own without sharing machinery.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResizeEngine;

impl ResizeEngine {
    pub fn new() -> Self {
        Self
    }

    /// Produce one derived file for `spec` from the shared source.
    ///
    /// The write is atomic: bytes are encoded into memory, staged in a
    /// temporary file in the destination directory, then renamed into
    /// place. Readers never observe a half-written variant. Two identical
    /// specs in one batch resolve to the same path; the last rename wins
    /// and the file stays whole throughout.
    pub fn compute_and_write(
        &self,
        source: &SourceImage,
        spec: &VariantSpec,
    ) -> FanoutResult<DerivedOutput> {
        let plan = build_plan(
            Size {
                w: source.width(),
                h: source.height(),
            },
            source.image.color(),
            spec,
        )
        .map_err(|e| match e {
            PlanError::DegenerateDimensions { width, height } => {
                FanoutError::degenerate_dimensions(spec.format(), spec.scale(), width, height)
            }
        })?;

        let raster = resize_raster(&source.image, &plan)
            .map_err(|e| FanoutError::codec_write(spec.format(), None, e))?;

        let file_name = derived_file_name(&source.stem, plan.width, plan.height, spec.format());
        let target = source.dir.join(file_name);

        let image_format = ImageFormat::from_extension(spec.format().to_ascii_lowercase())
            .ok_or_else(|| FanoutError::unknown_format(spec.format()))?;

        let mut buf = Cursor::new(Vec::new());
        raster.write_to(&mut buf, image_format).map_err(|e| {
            FanoutError::codec_write(spec.format(), Some(target.display().to_string()), e)
        })?;

        let bytes_written = buf.get_ref().len() as u64;
        self.land(&source.dir, &target, buf.get_ref())
            .map_err(|e| {
                FanoutError::codec_write(spec.format(), Some(target.display().to_string()), e)
            })?;

        Ok(DerivedOutput {
            path: target,
            width: plan.width,
            height: plan.height,
            format: spec.format().to_owned(),
            bytes_written,
        })
    }

    /// Stage encoded bytes in `dir` and rename them onto `target`.
    fn land(&self, dir: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(bytes)?;
        staged.persist(target).map_err(|e| e.error)?;
        Ok(())
    }
}
