//! Bounded worker pool for draining the move plan.
//!
//! The dispatcher feeds every planned move into a bounded queue and a fixed
//! set of worker threads drains it. Dropping the queue's sender after the
//! final enqueue is the only shutdown signal the workers need; there is no
//! cancellation for the common path.

use crate::mover::{MoveExecutor, MoveOutcome};
use crate::scanner::PlannedMove;
use crossbeam_channel::{Sender, bounded};
use std::panic::{self, AssertUnwindSafe};
use std::thread;

/// A fixed-size set of concurrent move executors sharing one input queue.
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    /// Creates a pool with `workers` threads, clamped to at least 1.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Number of worker threads this pool will spawn.
    pub fn worker_count(&self) -> usize {
        self.workers
    }

    /// Pushes every planned move through the pool, emitting exactly one
    /// [`MoveOutcome`] per item on `outcome_tx`.
    ///
    /// Blocks until every worker has exited, so by the time this returns
    /// all outcomes have been sent and every clone of `outcome_tx` has
    /// been dropped. The work queue is bounded to a small multiple of the
    /// worker count so the producer can run ahead without unbounded
    /// buffering.
    pub fn dispatch(&self, moves: Vec<PlannedMove>, outcome_tx: Sender<MoveOutcome>) {
        let (work_tx, work_rx) = bounded::<PlannedMove>(self.workers * 2);

        let mut handles = Vec::with_capacity(self.workers);
        for _ in 0..self.workers {
            let work_rx = work_rx.clone();
            let outcome_tx = outcome_tx.clone();
            handles.push(thread::spawn(move || {
                for item in work_rx.iter() {
                    // The executor converts its own failures into errored
                    // outcomes; catch_unwind is the last-resort boundary
                    // for faults it did not anticipate.
                    let outcome =
                        panic::catch_unwind(AssertUnwindSafe(|| MoveExecutor::execute(&item)))
                            .unwrap_or_else(|_| {
                                MoveOutcome::failure(format!(
                                    "internal fault while moving {}",
                                    item.source.display()
                                ))
                            });
                    if outcome_tx.send(outcome).is_err() {
                        // Aggregator gone; nothing left to report to.
                        break;
                    }
                }
            }));
        }
        drop(work_rx);
        drop(outcome_tx);

        for item in moves {
            if work_tx.send(item).is_err() {
                break;
            }
        }
        // Closing the queue is the sole termination signal for workers.
        drop(work_tx);

        for handle in handles {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn plan_for(tmp: &TempDir, names: &[&str], dry_run: bool) -> Vec<PlannedMove> {
        names
            .iter()
            .map(|name| {
                let source = tmp.path().join(name);
                fs::write(&source, b"x").expect("Failed to write test file");
                PlannedMove {
                    source,
                    dest: tmp.path().join("organized").join("Documents").join(name),
                    dry_run,
                }
            })
            .collect()
    }

    #[test]
    fn test_zero_workers_clamps_to_one() {
        assert_eq!(WorkerPool::new(0).worker_count(), 1);
        assert_eq!(WorkerPool::new(4).worker_count(), 4);
    }

    #[test]
    fn test_one_outcome_per_planned_move() {
        let tmp = TempDir::new().expect("Failed to create temp directory");
        let moves = plan_for(&tmp, &["a.txt", "b.txt", "c.txt"], false);

        let (tx, rx) = unbounded();
        WorkerPool::new(2).dispatch(moves, tx);

        let outcomes: Vec<MoveOutcome> = rx.iter().collect();
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|o| o.moved + o.errored == 1));
    }

    #[test]
    fn test_failures_do_not_abort_siblings() {
        let tmp = TempDir::new().expect("Failed to create temp directory");
        let mut moves = plan_for(&tmp, &["ok.txt"], false);
        moves.push(PlannedMove {
            source: PathBuf::from("/nonexistent/sortify-missing.txt"),
            dest: tmp.path().join("organized").join("Documents").join("m.txt"),
            dry_run: false,
        });

        let (tx, rx) = unbounded();
        WorkerPool::new(2).dispatch(moves, tx);

        let outcomes: Vec<MoveOutcome> = rx.iter().collect();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes.iter().map(|o| o.moved).sum::<u64>(), 1);
        assert_eq!(outcomes.iter().map(|o| o.errored).sum::<u64>(), 1);
    }

    #[test]
    fn test_counts_invariant_across_worker_counts() {
        for workers in [1, 4] {
            let tmp = TempDir::new().expect("Failed to create temp directory");
            let moves = plan_for(&tmp, &["a.txt", "b.txt", "c.txt", "d.txt"], true);

            let (tx, rx) = unbounded();
            WorkerPool::new(workers).dispatch(moves, tx);

            let outcomes: Vec<MoveOutcome> = rx.iter().collect();
            assert_eq!(outcomes.iter().map(|o| o.moved).sum::<u64>(), 4);
            assert_eq!(outcomes.iter().map(|o| o.errored).sum::<u64>(), 0);
        }
    }

    #[test]
    fn test_dispatch_closes_outcome_channel() {
        let tmp = TempDir::new().expect("Failed to create temp directory");
        let moves = plan_for(&tmp, &["a.txt"], true);

        let (tx, rx) = unbounded();
        WorkerPool::new(3).dispatch(moves, tx);

        // All sender clones dropped by now: the stream ends after the
        // single outcome instead of blocking.
        assert_eq!(rx.iter().count(), 1);
    }
}
