//! Terminal output: conversion progress bar and the end-of-run summary.

use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use crate::converter::ConversionStats;

/// Check if stderr is a terminal (the progress bar draws there).
pub fn is_terminal() -> bool {
    std::io::stderr().is_terminal()
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Warning,
    Error,
    Info,
}

/// Status icons for different outcomes.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Warning => "⚠",
        Status::Error => "✗",
        Status::Info => "ℹ",
    }
}

/// Print a styled status message.
pub fn print_status(status: Status, msg: &str) {
    let icon = status_icon(status);
    match status {
        Status::Success => println!("{} {}", icon.green().bold(), msg),
        Status::Warning => println!("{} {}", icon.yellow().bold(), msg),
        Status::Error => println!("{} {}", icon.red().bold(), msg),
        Status::Info => println!("{} {}", icon.cyan().bold(), msg),
    }
}

/// Progress over the entries of one conversion.
///
/// A hidden bar accepts every call and draws nothing, which is what tests
/// and non-interactive runs use.
#[derive(Debug, Clone)]
pub struct ConversionProgress {
    pb: indicatif::ProgressBar,
}

impl ConversionProgress {
    /// A visible bar on stderr
    pub fn new() -> Self {
        let pb = indicatif::ProgressBar::new(0);
        if let Ok(style) = indicatif::ProgressStyle::with_template(
            "{spinner:.cyan} {bar:40.cyan/blue} {pos}/{len} {wide_msg}",
        ) {
            pb.set_style(style.progress_chars("█▓▒░ "));
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    /// A bar that never draws
    pub fn hidden() -> Self {
        Self {
            pb: indicatif::ProgressBar::hidden(),
        }
    }

    /// Visible only when asked for and attached to a terminal
    pub fn for_terminal(quiet: bool) -> Self {
        if quiet || !is_terminal() {
            Self::hidden()
        } else {
            Self::new()
        }
    }

    pub fn set_length(&self, len: u64) {
        self.pb.set_length(len);
    }

    pub fn set_message(&self, msg: &str) {
        self.pb.set_message(msg.to_string());
    }

    pub fn inc(&self) {
        self.pb.inc(1);
    }

    pub fn position(&self) -> u64 {
        self.pb.position()
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

impl Default for ConversionProgress {
    fn default() -> Self {
        Self::hidden()
    }
}

/// One-line description of a finished conversion
pub fn summary_line(stats: &ConversionStats, output: &Path) -> String {
    format!(
        "Converted {} {} to {} ({} with DOI, {} enriched)",
        stats.entries,
        if stats.entries == 1 { "entry" } else { "entries" },
        output.display(),
        stats.with_doi,
        stats.enriched
    )
}

/// Print the end-of-run summary.
pub fn print_summary(stats: &ConversionStats, output: &Path, elapsed: Duration) {
    print_status(
        Status::Success,
        &format!(
            "{} in {:.1}s",
            summary_line(stats, output),
            elapsed.as_secs_f64()
        ),
    );

    if stats.lookups_failed > 0 {
        print_status(
            Status::Warning,
            &format!(
                "{} DOI lookups failed; those entries keep only their doi field",
                stats.lookups_failed
            ),
        );
    }
    if stats.months_dropped > 0 {
        print_status(
            Status::Warning,
            &format!(
                "{} month values were not numbers between 1 and 12 and were left out",
                stats.months_dropped
            ),
        );
    }
}
