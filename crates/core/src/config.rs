//! Configuration defaults and resolution for the prompts.
//!
//! Every setting is resolved the same way: an explicit value (usually from a
//! command-line flag) wins, then the matching environment variable, then the
//! built-in default.

use std::env;
use std::time::Duration;

use log::debug;

use crate::error::{Error, Result};

/// Aliases accepted as "yes" by a confirmation prompt
pub const DEFAULT_YES_ALIASES: [&str; 2] = ["y", "yes"];
/// Aliases accepted as "no" by a confirmation prompt
pub const DEFAULT_NO_ALIASES: [&str; 2] = ["n", "no"];

/// Default number of lines reserved by a scrolling monitor
pub const DEFAULT_MONITOR_LINES: usize = 5;
/// Default bound on a single key read
pub const DEFAULT_KEY_TIMEOUT: Duration = Duration::from_millis(200);

const MONITOR_LINES_ENV: &str = "PAREX_MONITOR_LINES";
const KEY_TIMEOUT_ENV: &str = "PAREX_KEY_TIMEOUT_MS";

/// Resolved settings handed to the console facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Height of the region reserved by a scrolling monitor
    pub monitor_lines: usize,
    /// Bound on a single byte read while the terminal is in raw mode
    pub key_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            monitor_lines: DEFAULT_MONITOR_LINES,
            key_timeout: DEFAULT_KEY_TIMEOUT,
        }
    }
}

impl Settings {
    /// Resolves all settings from optional explicit values and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] if an environment variable holds a value
    /// that cannot be parsed, and [`Error::ZeroMonitorHeight`] for a zero height.
    pub fn resolve(monitor_lines: Option<usize>, key_timeout_ms: Option<u64>) -> Result<Self> {
        let settings = Self {
            monitor_lines: get_monitor_lines(monitor_lines)?,
            key_timeout: get_key_timeout(key_timeout_ms)?,
        };
        debug!("Resolved settings: {settings:?}");
        Ok(settings)
    }
}

/// Resolves the monitor height.
///
/// # Examples
///
/// ```
/// use parex_core::config::get_monitor_lines;
///
/// assert_eq!(get_monitor_lines(Some(3)).unwrap(), 3);
/// ```
///
/// # Errors
///
/// Returns an error for an unparsable environment value or a zero height.
pub fn get_monitor_lines(monitor_lines_arg: Option<usize>) -> Result<usize> {
    let lines = match monitor_lines_arg {
        Some(lines) => lines,
        None => match env::var(MONITOR_LINES_ENV) {
            Ok(value) => parse_monitor_lines(&value)?,
            Err(_) => DEFAULT_MONITOR_LINES,
        },
    };

    if lines == 0 {
        return Err(Error::ZeroMonitorHeight);
    }

    Ok(lines)
}

/// Resolves the key read timeout.
///
/// # Errors
///
/// Returns an error for an unparsable environment value.
pub fn get_key_timeout(key_timeout_ms_arg: Option<u64>) -> Result<Duration> {
    let millis = match key_timeout_ms_arg {
        Some(millis) => millis,
        None => match env::var(KEY_TIMEOUT_ENV) {
            Ok(value) => parse_key_timeout_ms(&value)?,
            Err(_) => return Ok(DEFAULT_KEY_TIMEOUT),
        },
    };

    Ok(Duration::from_millis(millis))
}

fn parse_monitor_lines(value: &str) -> Result<usize> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| Error::invalid_setting(MONITOR_LINES_ENV, value))
}

fn parse_key_timeout_ms(value: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| Error::invalid_setting(KEY_TIMEOUT_ENV, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_monitor_lines_with_explicit_value() {
        assert_eq!(get_monitor_lines(Some(7)).unwrap(), 7);
    }

    #[test]
    fn test_get_monitor_lines_rejects_zero() {
        assert!(matches!(
            get_monitor_lines(Some(0)),
            Err(Error::ZeroMonitorHeight)
        ));
    }

    #[test]
    fn test_get_key_timeout_with_explicit_value() {
        assert_eq!(
            get_key_timeout(Some(50)).unwrap(),
            Duration::from_millis(50)
        );
    }

    #[test]
    fn test_parse_monitor_lines() {
        assert_eq!(parse_monitor_lines(" 4 ").unwrap(), 4);
        assert!(matches!(
            parse_monitor_lines("four"),
            Err(Error::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_parse_key_timeout_ms() {
        assert_eq!(parse_key_timeout_ms("120").unwrap(), 120);
        assert!(parse_key_timeout_ms("-1").is_err());
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.monitor_lines, DEFAULT_MONITOR_LINES);
        assert_eq!(settings.key_timeout, DEFAULT_KEY_TIMEOUT);
    }

    #[test]
    fn test_default_aliases() {
        assert_eq!(DEFAULT_YES_ALIASES, ["y", "yes"]);
        assert_eq!(DEFAULT_NO_ALIASES, ["n", "no"]);
    }
}
