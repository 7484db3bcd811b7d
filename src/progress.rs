//! Outcome aggregation.
//!
//! Workers never touch shared counters; they emit immutable
//! [`MoveOutcome`] events and a single [`ProgressAggregator`] accumulates
//! the totals, optionally forwarding each event to a reporter (the CLI
//! plugs in a progress bar here).

use crate::mover::MoveOutcome;
use crate::scanner::ScanSummary;
use crossbeam_channel::Receiver;

/// Hook for surfacing progress to an external observer.
///
/// All methods have no-op defaults except [`ProgressReporter::on_outcome`];
/// implementors only override what they display.
pub trait ProgressReporter {
    /// Called once after the scan phase, before any move runs. Lets a
    /// progress bar size itself to the plan.
    fn plan_ready(&self, _summary: &ScanSummary) {}

    /// Called once per processed planned move.
    fn on_outcome(&self, outcome: &MoveOutcome);

    /// Called after the outcome stream is exhausted.
    fn finished(&self, _totals: &Totals) {}
}

/// Final aggregated counts for one dispatch run.
///
/// `moved + errored` always equals the number of planned moves dispatched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub moved: u64,
    pub errored: u64,
}

/// Single consumer of the outcome stream.
pub struct ProgressAggregator {
    rx: Receiver<MoveOutcome>,
    reporter: Option<Box<dyn ProgressReporter + Send>>,
}

impl ProgressAggregator {
    /// Aggregator that only accumulates counts.
    pub fn new(rx: Receiver<MoveOutcome>) -> Self {
        Self { rx, reporter: None }
    }

    /// Aggregator that additionally forwards every outcome to `reporter`.
    pub fn with_reporter(
        rx: Receiver<MoveOutcome>,
        reporter: Box<dyn ProgressReporter + Send>,
    ) -> Self {
        Self {
            rx,
            reporter: Some(reporter),
        }
    }

    /// Drains the stream until the dispatcher closes it, returning the
    /// final totals. No outcome is ever dropped.
    pub fn drain(self) -> Totals {
        let mut totals = Totals::default();
        for outcome in self.rx.iter() {
            totals.moved += outcome.moved;
            totals.errored += outcome.errored;
            if let Some(reporter) = &self.reporter {
                reporter.on_outcome(&outcome);
            }
        }
        if let Some(reporter) = &self.reporter {
            reporter.finished(&totals);
        }
        totals
    }
}
