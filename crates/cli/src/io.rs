//! One-stop facade over the console prompts.
//!
//! [`Io`] owns the output writer, the input source and the terminal
//! controller, so callers can ask questions without threading all three
//! through every call.

use std::io::Stdout;
use std::process;

use log::{debug, warn};

use parex_core::ansi::clear_screen;
use parex_core::config::Settings;
use parex_core::error::Result;
use parex_core::input::{ByteSource, LineSource, StdinInput};
use parex_core::terminal::{restore_terminal, PosixTerminal, TerminalMode};
use parex_core::writer::{StreamWriter, Writer};

use crate::console::monitor::{Monitor, MonitorSink};
use crate::console::types::{Choice, OptionSet};
use crate::console::{Confirmation, Question, Selection};

const HEADER_BORDER: char = '*';
const HEADER_LEFT: &str = "* ";
const HEADER_RIGHT: &str = " *";
const HEADER_PADDING: usize = 6;

/// Console I/O for one program.
pub struct Io<W = StreamWriter<Stdout>, I = StdinInput, T = PosixTerminal> {
    writer: W,
    input: I,
    terminal: T,
    settings: Settings,
}

impl Io {
    /// Stdout, stdin and the controlling terminal.
    #[must_use]
    pub fn stdio(settings: Settings) -> Self {
        let terminal = PosixTerminal::new(settings.key_timeout);
        Self::new(StreamWriter::stdout(), StdinInput::new(), terminal, settings)
    }
}

impl<W, I, T> Io<W, I, T>
where
    W: Writer,
    I: LineSource + ByteSource,
    T: TerminalMode,
{
    pub fn new(writer: W, input: I, terminal: T, settings: Settings) -> Self {
        Self {
            writer,
            input,
            terminal,
            settings,
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn into_parts(self) -> (W, I, T) {
        (self.writer, self.input, self.terminal)
    }

    /// Asks a yes/no question.
    ///
    /// # Errors
    ///
    /// Propagates input/output failures.
    pub fn make_confirmation(&mut self, confirmation: &Confirmation) -> Result<bool> {
        confirmation.ask(&mut self.writer, &mut self.input)
    }

    /// Asks a free-text question and leaves an empty line after the answer.
    ///
    /// # Errors
    ///
    /// Propagates input/output failures.
    pub fn make_question(&mut self, question: &Question<'_>) -> Result<String> {
        let answer = question.ask(&mut self.writer, &mut self.input)?;
        self.writer.write_line("")?;
        Ok(answer)
    }

    /// Lets the user pick one option and leaves an empty line after the menu.
    ///
    /// # Errors
    ///
    /// Returns [`parex_core::error::Error::EmptyOptions`] for an empty option
    /// set and propagates input/output failures.
    pub fn make_selection(
        &mut self,
        prompt: &str,
        options: impl Into<OptionSet>,
    ) -> Result<Choice> {
        let choice = Selection::new(prompt, options).select_one(
            &mut self.writer,
            &mut self.input,
            &mut self.terminal,
        )?;
        self.writer.write_line("")?;
        Ok(choice)
    }

    /// Lets the user pick several options; with `required` the menu insists on
    /// at least one.
    ///
    /// # Errors
    ///
    /// Returns [`parex_core::error::Error::EmptyOptions`] for an empty option
    /// set and propagates input/output failures.
    pub fn make_multi_selection(
        &mut self,
        prompt: &str,
        options: impl Into<OptionSet>,
        required: bool,
    ) -> Result<Vec<Choice>> {
        let choices = Selection::new(prompt, options)
            .required(required)
            .select_many(&mut self.writer, &mut self.input, &mut self.terminal)?;
        self.writer.write_line("")?;
        Ok(choices)
    }

    /// Runs `callback` under a scrolling monitor of the configured height.
    ///
    /// # Errors
    ///
    /// Propagates output failures.
    pub fn monitoring<F, R>(&mut self, label: &str, callback: F) -> Result<R>
    where
        F: FnOnce(&mut MonitorSink<'_, W>) -> R,
    {
        let lines = self.settings.monitor_lines;
        self.monitoring_with_lines(label, lines, callback)
    }

    /// Runs `callback` under a scrolling monitor `lines` high.
    ///
    /// # Errors
    ///
    /// Returns [`parex_core::error::Error::ZeroMonitorHeight`] when `lines` is
    /// zero and propagates output failures.
    pub fn monitoring_with_lines<F, R>(
        &mut self,
        label: &str,
        lines: usize,
        callback: F,
    ) -> Result<R>
    where
        F: FnOnce(&mut MonitorSink<'_, W>) -> R,
    {
        Monitor::new(label, lines).run(&mut self.writer, &mut self.terminal, callback)
    }

    /// # Errors
    ///
    /// Propagates output failures.
    pub fn write(&mut self, text: &str) -> Result<()> {
        self.writer.write(text)
    }

    /// # Errors
    ///
    /// Propagates output failures.
    pub fn write_line(&mut self, text: &str) -> Result<()> {
        self.writer.write_line(text)
    }

    /// Writes `content` centered in an asterisk box, followed by an empty line.
    ///
    /// # Errors
    ///
    /// Propagates output failures.
    pub fn write_header(&mut self, content: &str) -> Result<()> {
        for line in header_lines(content) {
            self.writer.write_line(&line)?;
        }
        self.writer.write_line("")
    }

    /// Clears the screen and moves the cursor home.
    ///
    /// # Errors
    ///
    /// Propagates output failures.
    pub fn clear_screen(&mut self) -> Result<()> {
        self.writer.write(&clear_screen())
    }

    /// Restores the terminal and ends the process successfully.
    pub fn exit_success(&mut self) -> ! {
        self.exit_with(0)
    }

    /// Restores the terminal and ends the process with `code`, raised to 1 if
    /// it would otherwise signal success.
    pub fn exit_error(&mut self, code: i32) -> ! {
        self.exit_with(error_exit_code(code))
    }

    /// `process::exit` skips destructors, so no guard would restore the mode.
    fn exit_with(&mut self, code: i32) -> ! {
        if let Err(e) = self.terminal.restore() {
            warn!("Failed to restore terminal mode before exit: {e}");
        }
        if let Err(e) = restore_terminal() {
            warn!("Failed to restore terminal mode before exit: {e}");
        }
        debug!("Exiting with code {code}");
        process::exit(code)
    }
}

/// Exit code for a failed run: never below 1.
///
/// # Examples
///
/// ```
/// use parex_cli::io::error_exit_code;
///
/// assert_eq!(error_exit_code(128), 128);
/// assert_eq!(error_exit_code(0), 1);
/// ```
#[must_use]
pub fn error_exit_code(code: i32) -> i32 {
    code.max(1)
}

/// Lines of the asterisk box around `content`, one per content line.
///
/// # Examples
///
/// ```
/// use parex_cli::io::header_lines;
///
/// assert_eq!(
///     header_lines("Hi"),
///     vec!["************", "*    Hi    *", "************"]
/// );
/// ```
#[must_use]
pub fn header_lines(content: &str) -> Vec<String> {
    let lines: Vec<&str> = content.split('\n').collect();
    let inner = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
        + HEADER_PADDING;
    let border = HEADER_BORDER
        .to_string()
        .repeat(HEADER_LEFT.len() + inner + HEADER_RIGHT.len());

    let mut output = Vec::with_capacity(lines.len() + 2);
    output.push(border.clone());
    output.extend(
        lines
            .iter()
            .map(|line| format!("{HEADER_LEFT}{}{HEADER_RIGHT}", center(line, inner))),
    );
    output.push(border);
    output
}

/// Pads `text` on both sides to `width`; odd padding puts the extra space on
/// the right.
fn center(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.chars().count());
    let left = padding / 2;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(padding - left))
}
