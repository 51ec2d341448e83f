//! Console output formatting.
//!
//! Provides consistent, styled output for run results and status messages,
//! with verbose and quiet modes shared across all subcommands.

use console::style;
use std::time::Duration;

use crate::dispatch::{HookOutcome, HookStatus};

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), message);
        }
    }

    /// Print an error message. Errors are always shown, even in quiet mode.
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✖").red(), message);
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("⚠").yellow(), message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue(), message);
        }
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            println!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    /// Print a header/title
    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Print a list item
    pub fn list_item(&self, item: &str) {
        if !self.quiet {
            println!("  {} {}", style("•").cyan(), item);
        }
    }

    /// Print one hook's result line, lint-staged style.
    pub fn hook_result(&self, outcome: &HookOutcome) {
        let timing = style(format!("({})", format_duration(outcome.duration))).dim();
        match outcome.status {
            HookStatus::Passed => {
                if !self.quiet {
                    println!("{} {} {}", style("✔").green(), outcome.name, timing);
                }
            }
            HookStatus::Failed(code) => {
                eprintln!(
                    "{} {} {} {}",
                    style("✖").red(),
                    outcome.name,
                    style(format!("[exit {code}]")).red(),
                    timing
                );
                for line in outcome.output.lines() {
                    eprintln!("    {line}");
                }
            }
            HookStatus::Skipped => {
                if self.verbose {
                    println!(
                        "{} {} {}",
                        style("-").dim(),
                        style(&outcome.name).dim(),
                        style("(no matching files)").dim()
                    );
                }
            }
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

fn format_duration(d: Duration) -> String {
    if d.as_secs() >= 1 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}ms", d.as_millis())
    }
}
