//! Output formatting and styling module.
//!
//! Centralizes all CLI output: colored status lines, progress bars for
//! rename batches, the sectioned outcome report, and the run log appended
//! to the processed root directory.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::outcome::{OutcomeKind, ResultSet};

/// File name of the run log written into the processed root directory.
pub const RUN_LOG_NAME: &str = "renombra.log";

/// Manages all CLI output with consistent styling and formatting.
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

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates and returns a progress bar for rename batches.
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

    /// Prints the sectioned report for a result set, colored per kind.
    ///
    /// Section order and entries match [`ResultSet::render`]; this variant
    /// only adds console styling on top of the same content.
    pub fn print_report(results: &ResultSet, cap: Option<usize>) {
        Self::header("RENAME REPORT");
        println!("{} operations processed", results.len());

        for kind in OutcomeKind::ALL {
            let total = results.count(kind);
            if total == 0 {
                continue;
            }

            let heading = format!("{} {} ({}):", kind.symbol(), kind.heading(), total);
            match kind {
                OutcomeKind::Success => println!("\n{}", heading.green()),
                OutcomeKind::Error => println!("\n{}", heading.red()),
                OutcomeKind::TooLong => println!("\n{}", heading.yellow()),
                _ => println!("\n{}", heading.normal()),
            }

            let limit = cap.unwrap_or(usize::MAX);
            for (i, outcome) in results.of_kind(kind).enumerate() {
                if i >= limit {
                    println!("  ... and {} more", total - limit);
                    break;
                }
                println!("  {} {}", kind.symbol(), outcome.message);
            }
        }

        println!("\n{}", results.summary_line());
    }

    /// Appends the rendered report to the run log in the root directory.
    ///
    /// Each run is preceded by a separator block with a local timestamp.
    pub fn write_run_log(root: &Path, report: &str) -> std::io::Result<()> {
        let log_path = root.join(RUN_LOG_NAME);
        let mut file = OpenOptions::new().create(true).append(true).open(&log_path)?;

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(file, "{}", "=".repeat(78))?;
        writeln!(file, "renombra run: {}", timestamp)?;
        writeln!(file, "{}", "=".repeat(78))?;
        writeln!(file, "{}", report)?;
        Ok(())
    }
}
