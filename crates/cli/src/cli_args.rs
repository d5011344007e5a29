//! Command-line argument parsing for the demo binary.
//!
//! This module defines the command-line interface of `parex` using the
//! `clap` crate. Every option has a sensible default so the demo runs with
//! no arguments at all.

use std::time::Duration;

use clap::Parser;
use parex_core::config::Settings;
use parex_core::error::Result;

const DEFAULT_STEPS: usize = 10;
const DEFAULT_DELAY_MS: u64 = 300;

/// Command-line arguments for the `parex` demo.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use parex_cli::cli_args::Args;
///
/// let args = Args::parse_from(["parex", "--lines", "2"]);
/// assert_eq!(args.lines, Some(2));
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Height of the scrolling monitor region.
    ///
    /// Falls back to `PAREX_MONITOR_LINES`, then to 5.
    #[arg(long, short = 'l')]
    pub lines: Option<usize>,

    /// Upper bound on a single key read in milliseconds.
    ///
    /// Falls back to `PAREX_KEY_TIMEOUT_MS`, then to 200.
    #[arg(long, short = 't')]
    pub key_timeout_ms: Option<u64>,

    /// Number of simulated work steps shown in the monitor.
    #[arg(long, short = 's', default_value_t = DEFAULT_STEPS)]
    pub steps: usize,

    /// Pause between simulated work steps in milliseconds.
    #[arg(long, short = 'd', default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    /// Skip the monitored task.
    #[arg(long, action)]
    pub skip_monitor: bool,
}

impl Args {
    /// Resolves console settings from these arguments and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error for unparsable environment values or a zero monitor
    /// height.
    pub fn settings(&self) -> Result<Settings> {
        Settings::resolve(self.lines, self.key_timeout_ms)
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}
