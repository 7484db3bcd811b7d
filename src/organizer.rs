//! Run orchestration: scan, dispatch, aggregate.
//!
//! Ties the pipeline together. The scan phase runs to completion on the
//! calling thread before any move starts; the aggregator then drains the
//! outcome stream on its own thread while the worker pool processes the
//! plan. A run with per-item failures still completes; only a root scan
//! failure aborts before dispatch.

use crate::category::CategoryMap;
use crate::progress::{ProgressAggregator, ProgressReporter, Totals};
use crate::scanner::{self, ScanError, ScanSummary};
use crate::worker_pool::WorkerPool;
use std::path::PathBuf;
use std::thread;

/// Fully resolved configuration for one run. Defaults and any mapping
/// overrides are merged by the caller before this is built; the core does
/// no file or environment reads of its own.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory to scan.
    pub source_dir: PathBuf,
    /// Root under which category subdirectories are created.
    pub dest_dir: PathBuf,
    /// If true, plan and report but never touch the filesystem.
    pub dry_run: bool,
    /// If true, descend into subdirectories of the source root.
    pub recursive: bool,
    /// Number of concurrent move workers, clamped to at least 1.
    pub workers: usize,
    /// Extension-to-category mapping, immutable for the whole run.
    pub mappings: CategoryMap,
}

/// What one completed run reports back to the caller.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Counters from the scan phase.
    pub summary: ScanSummary,
    /// Aggregated move results; `moved + errored == summary.total_planned`.
    pub totals: Totals,
}

/// Errors that abort a run before or outside the dispatch phase.
#[derive(Debug)]
pub enum OrganizeError {
    /// The scan could not start; no files were touched.
    Scan(ScanError),
    /// The aggregator thread died, so the final counts are unknown.
    AggregatorFailed,
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scan(err) => write!(f, "{}", err),
            Self::AggregatorFailed => {
                write!(f, "Progress aggregator failed; final counts are unknown")
            }
        }
    }
}

impl std::error::Error for OrganizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Scan(err) => Some(err),
            Self::AggregatorFailed => None,
        }
    }
}

/// Runs the full scan→dispatch→aggregate pipeline.
///
/// Returns once every planned move has produced its outcome and the
/// aggregator has drained the stream. The optional reporter is notified
/// once the plan is ready (so progress bars can size themselves) and then
/// once per outcome.
pub fn organize(
    config: &Config,
    reporter: Option<Box<dyn ProgressReporter + Send>>,
) -> Result<RunReport, OrganizeError> {
    let (summary, planned) = scanner::scan(
        &config.source_dir,
        &config.dest_dir,
        config.recursive,
        config.dry_run,
        &config.mappings,
    )
    .map_err(OrganizeError::Scan)?;

    if let Some(reporter) = &reporter {
        reporter.plan_ready(&summary);
    }

    let (outcome_tx, outcome_rx) = crossbeam_channel::unbounded();
    let aggregator = match reporter {
        Some(reporter) => ProgressAggregator::with_reporter(outcome_rx, reporter),
        None => ProgressAggregator::new(outcome_rx),
    };
    let aggregator_handle = thread::spawn(move || aggregator.drain());

    WorkerPool::new(config.workers).dispatch(planned, outcome_tx);

    let totals = aggregator_handle
        .join()
        .map_err(|_| OrganizeError::AggregatorFailed)?;

    Ok(RunReport { summary, totals })
}
