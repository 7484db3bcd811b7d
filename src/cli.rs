//! Command-line interface module.
//!
//! Parses flags, resolves paths, merges mapping overrides and hands a
//! fully resolved [`Config`] to the organizer. All console output goes
//! through [`crate::output`].

use crate::category::CategoryMap;
use crate::config::MappingOverrides;
use crate::organizer::{self, Config, RunReport};
use crate::output::{ConsoleReporter, OutputFormatter};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Organize files into category subdirectories using concurrent workers.
#[derive(Parser, Debug)]
#[command(name = "sortify", version, about)]
pub struct Cli {
    /// Source directory to organize files from.
    #[arg(long, value_name = "DIR")]
    pub source: PathBuf,

    /// Destination directory to move organized files to.
    #[arg(long, value_name = "DIR")]
    pub dest: PathBuf,

    /// Only simulate actions without moving files.
    #[arg(long)]
    pub dry_run: bool,

    /// Scan and organize files in subdirectories as well.
    #[arg(long)]
    pub recursive: bool,

    /// Number of concurrent file operations.
    #[arg(long, default_value_t = 5)]
    pub workers: usize,

    /// Path to a JSON file with custom category mappings.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress per-file output; show only progress and the summary.
    #[arg(long)]
    pub quiet: bool,
}

/// Runs a full organize invocation from parsed flags.
///
/// Returns `Err` only for fatal conditions (unresolvable paths, a broken
/// mapping file, a root scan failure). A run that completes with per-item
/// errors is reported in the summary but is not a failure here.
pub fn run_cli(cli: Cli) -> Result<RunReport, String> {
    let start = Instant::now();

    let source_dir = absolute_path(&cli.source)?;
    let dest_dir = absolute_path(&cli.dest)?;

    let mut mappings = CategoryMap::default();
    if let Some(config_path) = &cli.config {
        OutputFormatter::info(&format!(
            "Loading custom category mappings from {}",
            config_path.display()
        ));
        let overrides = MappingOverrides::load(config_path).map_err(|e| e.to_string())?;
        overrides.apply_to(&mut mappings);
        OutputFormatter::success("Custom mappings loaded and merged.");
    }

    let config = Config {
        source_dir: source_dir.clone(),
        dest_dir: dest_dir.clone(),
        dry_run: cli.dry_run,
        recursive: cli.recursive,
        workers: cli.workers,
        mappings,
    };

    OutputFormatter::info(&format!(
        "Organizing {} into {}",
        source_dir.display(),
        dest_dir.display()
    ));
    if cli.dry_run {
        OutputFormatter::dry_run_notice("No files will be moved or created.");
    }

    let reporter = ConsoleReporter::new(cli.quiet);
    let report =
        organizer::organize(&config, Some(Box::new(reporter))).map_err(|e| e.to_string())?;

    OutputFormatter::run_summary(&report.summary, &report.totals, cli.dry_run, start.elapsed());
    if report.totals.errored > 0 {
        OutputFormatter::warning("Completed with errors; see messages above.");
    } else {
        OutputFormatter::success("Done.");
    }

    Ok(report)
}

/// Resolves a possibly relative path against the current directory
/// without requiring it to exist (the destination usually does not yet).
fn absolute_path(path: &Path) -> Result<PathBuf, String> {
    std::path::absolute(path)
        .map_err(|e| format!("Cannot resolve absolute path for {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["sortify", "--source", "/a", "--dest", "/b"]);
        assert_eq!(cli.workers, 5);
        assert!(!cli.dry_run);
        assert!(!cli.recursive);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_all_flags() {
        let cli = Cli::parse_from([
            "sortify",
            "--source",
            "/a",
            "--dest",
            "/b",
            "--dry-run",
            "--recursive",
            "--workers",
            "8",
            "--config",
            "/tmp/map.json",
            "--quiet",
        ]);
        assert!(cli.dry_run);
        assert!(cli.recursive);
        assert_eq!(cli.workers, 8);
        assert_eq!(cli.config.as_deref(), Some(Path::new("/tmp/map.json")));
        assert!(cli.quiet);
    }

    #[test]
    fn test_source_and_dest_are_required() {
        assert!(Cli::try_parse_from(["sortify", "--source", "/a"]).is_err());
        assert!(Cli::try_parse_from(["sortify", "--dest", "/b"]).is_err());
    }
}
