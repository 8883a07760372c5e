//! # Image Fan-Out Library
//!
//! Resize one source image into several derived variants and compare two
//! ways of executing the batch: strictly one at a time, or dispatched all
//! at once with no completion barrier. Each run reports the wall-clock
//! cost of both.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//! - `config`: Configuration management and validation
//! - `engine`: Decode-once source handling plus the per-variant
//!   resize/encode/write pipeline
//! - `error`: Error types with run-fatal vs task-local classification
//! - `strategy`: The sequential and concurrent execution policies
//! - `session`: High-level orchestration and the timing report
//!
//! Numeric planning and the resampling pass live in the `fanout-scale`
//! crate so they can be reasoned about (and tested) without any
//! filesystem or runtime in the picture.
//!
//! ## Execution model
//!
//! Variant tasks run on Tokio's blocking pool in both modes; only the
//! waiting differs. The sequential phase measures the full batch, the
//! concurrent phase measures dispatch alone, and dispatched tasks keep
//! running while the caller reads the report. That asymmetry is the
//! entire point of the tool, not an accident.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fanout_scale::VariantSpec;
//! use image_fanout::{run_comparison, FanoutOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = FanoutOptions {
//!     source: "puppy.jpg".into(),
//!     variants: vec![
//!         VariantSpec::new("GIF", 1.5)?,
//!         VariantSpec::new("JPEG", 0.5)?,
//!         VariantSpec::new("JPEG", 0.25)?,
//!     ],
//! };
//!
//! let outcome = run_comparison(options).await?;
//! println!("{}", outcome.report);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

// Internal module imports
pub mod config;
pub mod engine;
pub mod error;
pub mod session;
pub mod strategy;

/// Re-export error types for convenience
pub use error::{classify, FanoutError, FanoutResult};
pub use session::{ComparisonOutcome, FanoutSession, TimingReport};
pub use strategy::{
    ConcurrentStrategy, DispatchedBatch, ExecutionStrategy, SequentialStrategy, StrategyOutcome,
    TaskOutcome,
};

/// Re-export commonly used types from the planning crate
pub use fanout_scale::VariantSpec;

/// Typed options for one comparison run.
///
/// This is the session's input: a source path and the variant batch in
/// dispatch order. Use [`config::FanoutConfig`] to build one from raw
/// CLI-shaped strings.
#[derive(Debug, Clone)]
pub struct FanoutOptions {
    /// Path of the image to fan out. Derived files land in the same
    /// directory, named `<stem>_<width>x<height>.<format>`.
    pub source: PathBuf,

    /// Variants to produce, dispatched in this order by both strategies.
    pub variants: Vec<VariantSpec>,
}

/// Main entry point: run the full comparison for the given options.
///
/// Decodes the source once, runs the batch under the sequential strategy,
/// then dispatches it under the concurrent strategy, and returns the
/// timing report together with both strategies' outcomes. The concurrent
/// outcome may still be producing files when this returns; dropping it
/// leaves those tasks to finish on their own.
pub async fn run_comparison(options: FanoutOptions) -> FanoutResult<ComparisonOutcome> {
    FanoutSession::new(options).run().await
}
