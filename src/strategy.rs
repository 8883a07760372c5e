//! # Execution Strategies
//!
//! Two policies for running one batch of variant tasks, kept deliberately
//! asymmetric because the asymmetry is the point of the comparison:
//!
//! 1. **Sequential**: one task at a time on the blocking pool, the caller
//!    waits for each before starting the next. Returns only after every
//!    task has finished.
//! 2. **Concurrent**: every task is handed to the blocking pool up front
//!    and the strategy returns as soon as the last handle exists. Nothing
//!    waits for completion; outputs may keep landing after the caller has
//!    moved on.
//!
//! Both strategies run the exact same task body, so success output and
//! failure handling are identical and the measured difference is purely
//! the dispatch policy. A failed task costs its own output and nothing
//! else; the batch never stops early.
//!
//! The concurrent result is a [`DispatchedBatch`] of live handles rather
//! than a bare unit. Callers that need determinism, like tests, can call
//! [`DispatchedBatch::await_all`] as an explicit barrier. The timed path
//! never does; it drops the batch and lets the runtime finish whatever
//! blocking work already started.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use tokio::task::JoinHandle;
use tracing::warn;

use fanout_scale::VariantSpec;

use crate::engine::{DerivedOutput, ResizeEngine, SourceImage};
use crate::error::FanoutResult;

/// What one variant task produced: the spec it ran for and either the
/// written output or the task-local error that cost it.
#[derive(Debug)]
pub struct TaskOutcome {
    pub spec: VariantSpec,
    pub result: FanoutResult<DerivedOutput>,
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Live handles for a batch that was dispatched without a barrier.
///
/// Dropping the batch detaches the tasks: blocking work that already
/// started finishes with no handle watching it. Tasks still queued when
/// the runtime shuts down are lost, which takes a batch larger than the
/// blocking pool's thread cap. Callers that must observe every output
/// hold the batch and call [`await_all`](Self::await_all).
#[derive(Debug)]
pub struct DispatchedBatch {
    handles: Vec<JoinHandle<TaskOutcome>>,
}

impl DispatchedBatch {
    /// Number of tasks handed to the runtime.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Explicit completion barrier: wait for every task and collect the
    /// outcomes. This exists for callers that must observe a finished batch
    /// (tests, mostly) and is never part of a timed phase. Tasks that were
    /// cancelled or panicked are logged and dropped from the result.
    pub async fn await_all(self) -> Vec<TaskOutcome> {
        let mut outcomes = Vec::with_capacity(self.handles.len());
        for joined in join_all(self.handles).await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => warn!(error = %e, "variant task was cancelled or panicked"),
            }
        }
        outcomes
    }
}

/// How a strategy reports its work, mirroring its waiting behavior.
#[derive(Debug)]
pub enum StrategyOutcome {
    /// Every task ran to completion before the strategy returned.
    Completed(Vec<TaskOutcome>),
    /// Tasks were handed to the runtime and left running.
    Dispatched(DispatchedBatch),
}

/// A policy for executing one batch of variant tasks against a shared,
/// already-decoded source.
#[async_trait]
pub trait ExecutionStrategy: Send + Sync {
    /// Name used in the timing report, e.g. `Sequential`.
    fn name(&self) -> &'static str;

    /// Run the batch. Task failures are contained in the outcome; the
    /// strategy itself cannot fail.
    async fn run(
        &self,
        engine: ResizeEngine,
        source: Arc<SourceImage>,
        specs: &[VariantSpec],
    ) -> StrategyOutcome;
}

/// The shared task body: produce one variant, announce the file or log the
/// loss. Failures are swallowed here so neither strategy has to care.
fn execute_task(engine: ResizeEngine, source: &SourceImage, spec: &VariantSpec) -> TaskOutcome {
    let result = engine.compute_and_write(source, spec);
    match &result {
        Ok(output) => {
            println!("File created at {}", output.path.display());
        }
        Err(e) => {
            warn!(spec = %spec, error = %e, "variant task failed");
        }
    }
    TaskOutcome {
        spec: spec.clone(),
        result,
    }
}

/// One task at a time; the caller blocks on each before starting the next.
pub struct SequentialStrategy;

#[async_trait]
impl ExecutionStrategy for SequentialStrategy {
    fn name(&self) -> &'static str {
        "Sequential"
    }

    async fn run(
        &self,
        engine: ResizeEngine,
        source: Arc<SourceImage>,
        specs: &[VariantSpec],
    ) -> StrategyOutcome {
        let mut outcomes = Vec::with_capacity(specs.len());
        for spec in specs {
            let source = Arc::clone(&source);
            let spec = spec.clone();
            // Same pool as the concurrent path, so the comparison measures
            // dispatch policy rather than executor overhead.
            let joined =
                tokio::task::spawn_blocking(move || execute_task(engine, &source, &spec)).await;
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => warn!(error = %e, "variant task was cancelled or panicked"),
            }
        }
        StrategyOutcome::Completed(outcomes)
    }
}

/// Dispatch everything up front, wait for nothing.
pub struct ConcurrentStrategy;

#[async_trait]
impl ExecutionStrategy for ConcurrentStrategy {
    fn name(&self) -> &'static str {
        "Concurrent"
    }

    async fn run(
        &self,
        engine: ResizeEngine,
        source: Arc<SourceImage>,
        specs: &[VariantSpec],
    ) -> StrategyOutcome {
        let handles = specs
            .iter()
            .cloned()
            .map(|spec| {
                let source = Arc::clone(&source);
                tokio::task::spawn_blocking(move || execute_task(engine, &source, &spec))
            })
            .collect();
        StrategyOutcome::Dispatched(DispatchedBatch { handles })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::path::Path;

    fn write_source(dir: &Path, name: &str, w: u32, h: u32) -> SourceImage {
        let path = dir.join(name);
        let img = RgbImage::from_fn(w, h, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        img.save(&path).unwrap();
        SourceImage::load(&path).unwrap()
    }

    fn specs(raw: &[(&str, f64)]) -> Vec<VariantSpec> {
        raw.iter()
            .map(|(f, s)| VariantSpec::new(*f, *s).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn sequential_finishes_every_task_before_returning() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(write_source(dir.path(), "seq.png", 32, 32));
        let specs = specs(&[("PNG", 0.5), ("PNG", 1.5)]);

        let outcome = SequentialStrategy
            .run(ResizeEngine::new(), source, &specs)
            .await;

        let outcomes = match outcome {
            StrategyOutcome::Completed(v) => v,
            StrategyOutcome::Dispatched(_) => panic!("sequential must not dispatch"),
        };
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(TaskOutcome::is_success));
        // The files are on disk by the time run() has returned.
        assert!(dir.path().join("seq_16x16.png").exists());
        assert!(dir.path().join("seq_48x48.png").exists());
    }

    #[tokio::test]
    async fn concurrent_returns_handles_not_results() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(write_source(dir.path(), "con.png", 32, 32));
        let specs = specs(&[("PNG", 0.5), ("PNG", 0.25), ("PNG", 1.5)]);

        let outcome = ConcurrentStrategy
            .run(ResizeEngine::new(), source, &specs)
            .await;

        let batch = match outcome {
            StrategyOutcome::Dispatched(b) => b,
            StrategyOutcome::Completed(_) => panic!("concurrent must not complete inline"),
        };
        assert_eq!(batch.len(), 3);

        // Only the explicit barrier makes completion observable.
        let outcomes = batch.await_all().await;
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(TaskOutcome::is_success));
        assert!(dir.path().join("con_16x16.png").exists());
        assert!(dir.path().join("con_8x8.png").exists());
        assert!(dir.path().join("con_48x48.png").exists());
    }

    #[tokio::test]
    async fn sequential_keeps_going_past_a_failing_task() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(write_source(dir.path(), "iso.png", 32, 32));
        let specs = specs(&[("PNG", 0.5), ("BOGUS", 0.5), ("PNG", 1.5)]);

        let outcome = SequentialStrategy
            .run(ResizeEngine::new(), source, &specs)
            .await;

        match outcome {
            StrategyOutcome::Completed(outcomes) => {
                assert_eq!(outcomes.len(), 3);
                assert!(outcomes[0].is_success());
                assert!(!outcomes[1].is_success());
                assert!(outcomes[2].is_success());
            }
            StrategyOutcome::Dispatched(_) => panic!("sequential must not dispatch"),
        }
        assert!(dir.path().join("iso_16x16.png").exists());
        assert!(dir.path().join("iso_48x48.png").exists());
    }

    #[tokio::test]
    async fn concurrent_tasks_fail_independently() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(write_source(dir.path(), "ind.png", 32, 32));
        let specs = specs(&[("BOGUS", 0.5), ("PNG", 0.5)]);

        let outcome = ConcurrentStrategy
            .run(ResizeEngine::new(), source, &specs)
            .await;

        let outcomes = match outcome {
            StrategyOutcome::Dispatched(b) => b.await_all().await,
            StrategyOutcome::Completed(_) => panic!("concurrent must not complete inline"),
        };
        assert_eq!(outcomes.len(), 2);
        let failed: Vec<_> = outcomes.iter().filter(|o| !o.is_success()).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].spec.format(), "BOGUS");
        assert!(dir.path().join("ind_16x16.png").exists());
    }
}
