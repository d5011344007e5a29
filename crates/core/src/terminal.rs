//! Terminal mode control.
//!
//! The menu and the monitor switch the terminal to non-canonical, non-echoing
//! input while they run. The altered state is process-wide: the original
//! settings live in a single static, and every restoration path (explicit
//! release, guard drop, panic hook, termination signal) goes through
//! [`restore_terminal`], which is idempotent.

use std::io;
use std::panic;
use std::sync::{Mutex, Once, PoisonError};
use std::thread;
use std::time::Duration;

use log::{debug, warn};
use rustix::termios::{self, LocalModes, OptionalActions, SpecialCodeIndex, Termios};
use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use signal_hook::low_level;

use crate::config::DEFAULT_KEY_TIMEOUT;
use crate::error::{Error, Result};

/// Settings of the terminal before it was altered; `Some` while altered.
static ORIGINAL_TERMIOS: Mutex<Option<Termios>> = Mutex::new(None);

static EXIT_HOOKS: Once = Once::new();

const TERMINATING_SIGNALS: [i32; 3] = [SIGINT, SIGTERM, SIGHUP];

/// Capability to switch the controlling terminal in and out of raw input mode.
pub trait TerminalMode {
    /// Switches to non-canonical, non-echoing input. A no-op while already raw.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be switched.
    fn enter_raw(&mut self) -> Result<()>;

    /// Restores the mode that was active before [`TerminalMode::enter_raw`].
    /// A no-op while not raw.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be switched back.
    fn restore(&mut self) -> Result<()>;

    fn is_raw(&self) -> bool;
}

/// Whether the process currently holds the terminal in the altered mode.
#[must_use]
pub fn is_altered() -> bool {
    ORIGINAL_TERMIOS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .is_some()
}

/// Restores the terminal settings saved when raw mode was entered.
///
/// Safe to call any number of times and from any exit path; does nothing when
/// the terminal is not altered. Call it before `std::process::exit`, which
/// skips destructors.
///
/// # Errors
///
/// Returns an error if the saved settings cannot be applied.
pub fn restore_terminal() -> Result<()> {
    let mut original = ORIGINAL_TERMIOS
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    if let Some(settings) = original.take() {
        termios::tcsetattr(io::stdin(), OptionalActions::Now, &settings)
            .map_err(|e| Error::terminal_mode("restore", e))?;
        debug!("Restored terminal mode");
    }

    Ok(())
}

/// Installs the last-resort restoration hooks once per process: a panic hook
/// and a signal thread that restores the terminal before the signal's default
/// action runs.
fn install_exit_hooks() {
    EXIT_HOOKS.call_once(|| {
        let previous_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            previous_hook(info);
        }));

        let mut signals = match Signals::new(TERMINATING_SIGNALS) {
            Ok(signals) => signals,
            Err(e) => {
                warn!("Unable to register terminal restore on signals: {e}");
                return;
            }
        };

        let spawned = thread::Builder::new()
            .name("terminal-restore".to_string())
            .spawn(move || {
                for signal in signals.forever() {
                    let _ = restore_terminal();
                    if let Err(e) = low_level::emulate_default_handler(signal) {
                        warn!("Unable to re-deliver signal {signal}: {e}");
                    }
                }
            });

        if let Err(e) = spawned {
            warn!("Unable to start terminal restore thread: {e}");
        }
    });
}

/// Converts the key timeout to the terminal's `VTIME` unit (tenths of a second).
fn as_vtime(timeout: Duration) -> u8 {
    let tenths = timeout.as_millis().div_ceil(100);
    u8::try_from(tenths.clamp(1, u128::from(u8::MAX))).unwrap_or(u8::MAX)
}

/// The controlling terminal, reached through standard input.
#[derive(Debug, Clone, Copy)]
pub struct PosixTerminal {
    vtime: u8,
}

impl PosixTerminal {
    /// `key_timeout` bounds every single-byte read while the mode is altered.
    #[must_use]
    pub fn new(key_timeout: Duration) -> Self {
        Self {
            vtime: as_vtime(key_timeout),
        }
    }
}

impl Default for PosixTerminal {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_TIMEOUT)
    }
}

impl TerminalMode for PosixTerminal {
    fn enter_raw(&mut self) -> Result<()> {
        let stdin = io::stdin();
        if !termios::isatty(&stdin) {
            return Err(Error::NotATerminal);
        }

        install_exit_hooks();

        let mut original = ORIGINAL_TERMIOS
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if original.is_some() {
            return Ok(());
        }

        let settings =
            termios::tcgetattr(&stdin).map_err(|e| Error::terminal_mode("read", e))?;

        let mut altered = settings.clone();
        altered
            .local_modes
            .remove(LocalModes::ICANON | LocalModes::ECHO);
        // Reads return after at most VTIME tenths of a second, with or without a byte.
        altered.special_codes[SpecialCodeIndex::VMIN] = 0;
        altered.special_codes[SpecialCodeIndex::VTIME] = self.vtime;

        termios::tcsetattr(&stdin, OptionalActions::Now, &altered)
            .map_err(|e| Error::terminal_mode("alter", e))?;

        *original = Some(settings);
        debug!("Entered raw terminal mode (VTIME={})", self.vtime);
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        restore_terminal()
    }

    fn is_raw(&self) -> bool {
        is_altered()
    }
}

/// Stand-in for environments without a terminal. Records mode transitions.
#[derive(Debug, Default, Clone)]
pub struct NoopTerminal {
    raw: bool,
    unsupported: bool,
    enter_count: usize,
    restore_count: usize,
}

impl NoopTerminal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A terminal whose mode can never be changed, as when input is piped.
    #[must_use]
    pub fn unsupported() -> Self {
        Self {
            unsupported: true,
            ..Self::default()
        }
    }

    /// Number of transitions into raw mode.
    #[must_use]
    pub fn enter_count(&self) -> usize {
        self.enter_count
    }

    /// Number of transitions back out of raw mode.
    #[must_use]
    pub fn restore_count(&self) -> usize {
        self.restore_count
    }
}

impl TerminalMode for NoopTerminal {
    fn enter_raw(&mut self) -> Result<()> {
        if self.unsupported {
            return Err(Error::NotATerminal);
        }
        if !self.raw {
            self.raw = true;
            self.enter_count += 1;
        }
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        if self.raw {
            self.raw = false;
            self.restore_count += 1;
        }
        Ok(())
    }

    fn is_raw(&self) -> bool {
        self.raw
    }
}

/// Scoped ownership of the raw terminal mode.
///
/// Engaging never fails: when the mode cannot be changed the guard records why
/// and callers fall back to line-buffered input. Only a guard that actually
/// changed the mode restores it, so engaging while another guard holds the
/// terminal neither stacks nor ends the outer cycle early.
#[derive(Debug)]
pub struct TerminalModeGuard<'a, T: TerminalMode + ?Sized> {
    terminal: &'a mut T,
    owns_mode: bool,
    degraded: Option<String>,
}

impl<'a, T: TerminalMode + ?Sized> TerminalModeGuard<'a, T> {
    pub fn engage(terminal: &'a mut T) -> Self {
        if terminal.is_raw() {
            debug!("Terminal already raw, leaving it to its current owner");
            return Self {
                terminal,
                owns_mode: false,
                degraded: None,
            };
        }

        match terminal.enter_raw() {
            Ok(()) => Self {
                terminal,
                owns_mode: true,
                degraded: None,
            },
            Err(e) => {
                warn!("Raw terminal input unavailable ({e}), falling back to line-buffered input");
                Self {
                    terminal,
                    owns_mode: false,
                    degraded: Some(e.to_string()),
                }
            }
        }
    }

    /// Whether input stays line-buffered because raw mode could not be entered.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }

    #[must_use]
    pub fn degraded_reason(&self) -> Option<&str> {
        self.degraded.as_deref()
    }

    /// Restores the terminal now instead of at drop. Idempotent.
    pub fn release(&mut self) {
        if !self.owns_mode {
            return;
        }
        self.owns_mode = false;

        if let Err(e) = self.terminal.restore() {
            warn!("Failed to restore terminal mode: {e}");
        }
    }
}

impl<T: TerminalMode + ?Sized> Drop for TerminalModeGuard<'_, T> {
    fn drop(&mut self) {
        self.release();
    }
}
