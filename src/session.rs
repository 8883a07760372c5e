//! # Comparison Session Orchestration
//!
//! High-level orchestration for one full comparison run. A session decodes
//! the source exactly once, hands the same read-only pixels to both
//! execution strategies, and times each phase with a wall clock.
//!
//! ## What gets measured
//!
//! Each phase is the time from calling a strategy to its return:
//!
//! - Sequential returns only after the last task finished, so its number
//!   is the full cost of the batch.
//! - Concurrent returns as soon as every task is handed to the runtime,
//!   so its number is dispatch cost only. Nothing in the session waits for
//!   the dispatched batch; it travels out in the [`ComparisonOutcome`] for
//!   callers that want a barrier after the clocks have stopped.
//!
//! The two numbers deliberately measure different things. Putting a
//! completion barrier into the concurrent phase would change its meaning,
//! so the session never does.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use fanout_scale::{build_plan, derived_file_name, Size, VariantSpec};

use crate::engine::{ResizeEngine, SourceImage};
use crate::error::FanoutResult;
use crate::strategy::{
    ConcurrentStrategy, ExecutionStrategy, SequentialStrategy, StrategyOutcome, TaskOutcome,
};
use crate::FanoutOptions;

/// Wall-clock results of one comparison run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingReport {
    /// Source the run fanned out from.
    pub source: PathBuf,
    /// Decoded source width in pixels.
    pub source_width: u32,
    /// Decoded source height in pixels.
    pub source_height: u32,
    /// Number of variants in the batch.
    pub variant_count: usize,
    /// Full batch duration under the sequential strategy.
    pub sequential_ms: u128,
    /// Dispatch-only duration under the concurrent strategy.
    pub concurrent_ms: u128,
}

impl fmt::Display for TimingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Sequential execution time: {} millis",
            self.sequential_ms
        )?;
        write!(
            f,
            "Concurrent execution time: {} millis",
            self.concurrent_ms
        )
    }
}

/// Everything a finished run hands back: the report plus each strategy's
/// outcome. The concurrent outcome still holds live handles; dropping it
/// is the fire-and-forget path, awaiting it is the test path.
#[derive(Debug)]
pub struct ComparisonOutcome {
    pub report: TimingReport,
    pub sequential: Vec<TaskOutcome>,
    pub concurrent: StrategyOutcome,
}

/// One-shot orchestrator: decode once, run both strategies, report.
pub struct FanoutSession {
    options: FanoutOptions,
    engine: ResizeEngine,
    sequential: SequentialStrategy,
    concurrent: ConcurrentStrategy,
}

impl FanoutSession {
    /// Create a session for validated options.
    pub fn new(options: FanoutOptions) -> Self {
        Self {
            options,
            engine: ResizeEngine::new(),
            sequential: SequentialStrategy,
            concurrent: ConcurrentStrategy,
        }
    }

    /// Run the full comparison.
    ///
    /// Decode failures abort the run before any task starts. Task failures
    /// do not: they are recorded in the per-task outcomes and the run
    /// finishes with whatever the batch managed to produce.
    pub async fn run(self) -> FanoutResult<ComparisonOutcome> {
        let source = Arc::new(SourceImage::load(&self.options.source)?);
        info!(
            source = %source.path.display(),
            width = source.width(),
            height = source.height(),
            variants = self.options.variants.len(),
            "source decoded"
        );
        warn_on_colliding_targets(&source, &self.options.variants);

        let started = Instant::now();
        let sequential_outcome = self
            .sequential
            .run(self.engine, Arc::clone(&source), &self.options.variants)
            .await;
        let sequential_ms = started.elapsed().as_millis();
        // Normalization after the clock stopped; sequential policies return
        // Completed, so this never actually waits.
        let sequential = match sequential_outcome {
            StrategyOutcome::Completed(outcomes) => outcomes,
            StrategyOutcome::Dispatched(batch) => batch.await_all().await,
        };
        info!(
            strategy = self.sequential.name(),
            elapsed_ms = sequential_ms as u64,
            produced = sequential.iter().filter(|o| o.is_success()).count(),
            "phase finished"
        );

        let started = Instant::now();
        let concurrent = self
            .concurrent
            .run(self.engine, Arc::clone(&source), &self.options.variants)
            .await;
        let concurrent_ms = started.elapsed().as_millis();
        info!(
            strategy = self.concurrent.name(),
            elapsed_ms = concurrent_ms as u64,
            "phase finished"
        );

        let report = TimingReport {
            source: source.path.clone(),
            source_width: source.width(),
            source_height: source.height(),
            variant_count: self.options.variants.len(),
            sequential_ms,
            concurrent_ms,
        };
        Ok(ComparisonOutcome {
            report,
            sequential,
            concurrent,
        })
    }
}

/// Flag variants that resolve to the same output file. The run still
/// executes all of them; within one strategy the last write wins, across
/// the two phases the concurrent pass rewrites what sequential produced.
fn warn_on_colliding_targets(source: &SourceImage, variants: &[VariantSpec]) {
    let mut first_owner: HashMap<String, String> = HashMap::new();
    for spec in variants {
        let plan = match build_plan(
            Size {
                w: source.width(),
                h: source.height(),
            },
            source.image.color(),
            spec,
        ) {
            Ok(plan) => plan,
            // Degenerate specs never reach the filesystem.
            Err(_) => continue,
        };
        let name = derived_file_name(&source.stem, plan.width, plan.height, spec.format());
        if let Some(earlier) = first_owner.get(&name) {
            warn!(
                file = %name,
                first = %earlier,
                second = %spec,
                "variants collide on one output path; the last write wins"
            );
        } else {
            first_owner.insert(name, spec.to_string());
        }
    }
}
