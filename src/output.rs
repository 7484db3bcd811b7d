//! Output formatting and styling module.
//!
//! Centralizes all CLI output: colored status lines, the progress bar fed
//! by the outcome stream, and the end-of-run summary block. Keeping this
//! in one place makes it easy to change formatting globally.

use crate::mover::MoveOutcome;
use crate::progress::{ProgressReporter, Totals};
use crate::scanner::ScanSummary;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages all CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a dry-run notice in yellow.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates the progress bar used while workers drain the plan.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Prints the end-of-run summary block.
    pub fn run_summary(summary: &ScanSummary, totals: &Totals, dry_run: bool, elapsed: Duration) {
        println!("\n{}", "SUMMARY".bold());
        println!("  Entries visited : {}", summary.total_visited);
        println!("  Files planned   : {}", summary.total_planned);
        println!(
            "  Files skipped   : {}",
            if summary.total_skipped > 0 {
                summary.total_skipped.to_string().yellow()
            } else {
                summary.total_skipped.to_string().normal()
            }
        );
        if summary.errored_entries > 0 {
            println!(
                "  Unreadable      : {}",
                summary.errored_entries.to_string().yellow()
            );
        }
        if dry_run {
            println!(
                "  Would move      : {}",
                totals.moved.to_string().green()
            );
        } else {
            println!("  Files moved     : {}", totals.moved.to_string().green());
        }
        if totals.errored > 0 {
            println!("  Errors          : {}", totals.errored.to_string().red());
        } else {
            println!("  Errors          : 0");
        }
        println!("  Elapsed         : {:.2?}", elapsed);

        if let Some(err) = &summary.first_error {
            Self::warning(&format!("Scan completed with errors, first was: {}", err));
        }
    }
}

/// Progress-bar reporter plugged into the aggregator.
///
/// The bar is created with length 0 and sized once the scan phase hands
/// over the plan. Messages are printed through `ProgressBar::suspend` so
/// they do not tear the bar.
pub struct ConsoleReporter {
    bar: ProgressBar,
    quiet: bool,
}

impl ConsoleReporter {
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: OutputFormatter::create_progress_bar(0),
            quiet,
        }
    }
}

impl ProgressReporter for ConsoleReporter {
    fn plan_ready(&self, summary: &ScanSummary) {
        self.bar.set_length(summary.total_planned as u64);
    }

    fn on_outcome(&self, outcome: &MoveOutcome) {
        self.bar.inc(1);
        if let Some(message) = &outcome.message {
            if outcome.errored == 1 {
                self.bar.suspend(|| OutputFormatter::error(message));
            } else if !self.quiet {
                self.bar.suspend(|| OutputFormatter::warning(message));
            }
        }
    }

    fn finished(&self, _totals: &Totals) {
        self.bar.finish_and_clear();
    }
}
