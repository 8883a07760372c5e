// SPDX-License-Identifier: MIT
//! # fanout-scale: Variant Planning and Raster Resizing
//!
//! This crate holds the pure, IO-free half of the image fan-out pipeline:
//! given a source raster's dimensions and a variant specification (target
//! encoding format plus scale multiplier), it decides exactly what the
//! derived output should look like and produces the resized raster.
//!
//! ## Architecture Overview
//!
//! The crate is split along the plan/execute boundary:
//!
//! - [`spec`]: [`spec::VariantSpec`], the validated, immutable description
//!   of one desired output (format name + positive finite scale)
//! - [`plan`]: [`plan::ResizePlan`], the deterministic target dimensions,
//!   destination pixel layout, and derived-filename math
//! - [`resize`]: a single full-image scaling pass over a decoded
//!   [`image::DynamicImage`], SIMD-accelerated via `fast_image_resize`
//!
//! ## Determinism
//!
//! Everything in this crate is a pure function of its inputs: the same
//! source dimensions and the same spec always yield the same plan, and the
//! same source raster always yields the same resized pixels. The resampling
//! filter is fixed; callers get no algorithm knob.
//!
//! ## What lives elsewhere
//!
//! Decoding, encoding, and writing derived files are the orchestrating
//! crate's business; nothing here touches the filesystem.

pub mod plan;
pub mod resize;
pub mod spec;

pub use plan::{build_plan, derived_file_name, PixelLayout, PlanError, ResizePlan, Size};
pub use resize::{resize_raster, ResizeError};
pub use spec::{SpecError, VariantSpec};
