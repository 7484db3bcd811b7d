//! sortify - organize files into category subdirectories
//!
//! This library scans a source tree, classifies files by extension and
//! relocates them into category subdirectories under a destination root.
//! Moves run on a bounded pool of concurrent workers; collisions are
//! resolved with timestamp-suffixed names, and a dry-run mode exercises
//! the full pipeline without touching the filesystem.

pub mod category;
pub mod cli;
pub mod config;
pub mod mover;
pub mod organizer;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod worker_pool;

pub use category::CategoryMap;
pub use config::{ConfigError, MappingOverrides};
pub use mover::{MoveExecutor, MoveOutcome};
pub use organizer::{Config, OrganizeError, RunReport, organize};
pub use progress::{ProgressAggregator, ProgressReporter, Totals};
pub use scanner::{PlannedMove, ScanError, ScanSummary, scan};
pub use worker_pool::WorkerPool;
