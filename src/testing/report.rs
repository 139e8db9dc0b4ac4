//! Pass/fail bookkeeping and console reporting

use std::fmt;

use colored::Colorize;

use crate::common::Result;

/// Running count of executed and passed checks
///
/// `passed <= run` always holds: [`Tally::record`] is the only mutator and
/// counts the run before it can count the pass.
#[derive(Debug, Default)]
pub struct Tally {
    run: usize,
    passed: usize,
}

impl Tally {
    /// Fold a check result into the counts and print it
    ///
    /// `detail` describes a successful value for the console line.
    pub fn record<T>(
        &mut self,
        name: &str,
        result: Result<T>,
        detail: impl FnOnce(&T) -> String,
    ) -> Option<T> {
        self.run += 1;
        match result {
            Ok(value) => {
                self.passed += 1;
                let detail = detail(&value);
                if detail.is_empty() {
                    println!("  {} {}", "✓".green(), name);
                } else {
                    println!("  {} {} ({})", "✓".green(), name, detail.dimmed());
                }
                Some(value)
            }
            Err(e) => {
                tracing::debug!(check = name, error = ?e, "check failed");
                println!("  {} {}: {}", "✗".red(), name, e);
                None
            }
        }
    }

    pub fn run(&self) -> usize {
        self.run
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn summary(&self) -> Summary {
        Summary {
            run: self.run,
            passed: self.passed,
        }
    }
}

/// Final outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub run: usize,
    pub passed: usize,
}

impl Summary {
    /// Every executed check passed
    pub fn success(&self) -> bool {
        self.passed == self.run
    }

    /// Process exit status: 0 on success, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.success() {
            0
        } else {
            1
        }
    }

    /// Print the closing summary lines
    pub fn print(&self) {
        println!("\n{} {}", "Tests passed:".bold(), self);
        if self.success() {
            println!("{} {}\n", "✓".green().bold(), "All checks passed".green().bold());
        } else {
            println!("{} {}\n", "✗".red().bold(), "Some checks failed".red().bold());
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.passed, self.run)
    }
}
