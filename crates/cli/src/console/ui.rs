use log::{debug, trace};

use parex_core::ansi::erase_lines_above;
use parex_core::error::{Error, Result};
use parex_core::input::ByteSource;
use parex_core::key::{read_key, read_line_keys, Key};
use parex_core::terminal::{TerminalMode, TerminalModeGuard};
use parex_core::writer::Writer;

use super::types::{Choice, CycleDirection, MenuState, OptionSet, SelectionMode};

/// Error shown when a required multi-select is confirmed with nothing toggled
pub const SELECT_SOME_OPTION: &str = "Select some option.";

const SINGLE_HINT: &str = "Use the up/down arrow keys to navigate and Enter to select.";
const MULTIPLE_HINT: &str =
    "Use the up/down arrow keys to navigate, space to select, and Enter to confirm.";
const LINE_MODE_NOTICE: &str =
    "Raw key input is unavailable: type the keys, then press Enter to apply them.";

const CURSOR_MARKER: &str = " » ";
const NO_CURSOR_MARKER: &str = "   ";
const CHECKED_MARKER: &str = "[×] ";
const UNCHECKED_MARKER: &str = "[ ] ";
const BULLET_MARKER: &str = "• ";

/// What a keypress did to the menu.
#[derive(Debug, PartialEq, Eq)]
enum KeyOutcome {
    Unchanged,
    Redraw,
    Done(Vec<usize>),
}

/// An arrow-key driven menu over an [`OptionSet`].
#[derive(Clone, Debug)]
pub struct Selection {
    prompt: String,
    options: OptionSet,
    required: bool,
}

impl Selection {
    pub fn new(prompt: impl Into<String>, options: impl Into<OptionSet>) -> Self {
        Self {
            prompt: prompt.into(),
            options: options.into(),
            required: true,
        }
    }

    /// Whether a multi-select must end with at least one option toggled.
    /// Defaults to `true`.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Lets the user pick exactly one option.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyOptions`] for an empty option set, before the
    /// terminal is touched, and propagates input/output failures.
    pub fn select_one<W, I, T>(
        &self,
        writer: &mut W,
        input: &mut I,
        terminal: &mut T,
    ) -> Result<Choice>
    where
        W: Writer + ?Sized,
        I: ByteSource + ?Sized,
        T: TerminalMode + ?Sized,
    {
        let positions = self.run(SelectionMode::Single, writer, input, terminal)?;
        positions
            .first()
            .and_then(|&position| self.options.choice(position))
            .ok_or(Error::EmptyOptions)
    }

    /// Lets the user toggle any number of options; choices come back in
    /// option order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyOptions`] for an empty option set, before the
    /// terminal is touched, and propagates input/output failures.
    pub fn select_many<W, I, T>(
        &self,
        writer: &mut W,
        input: &mut I,
        terminal: &mut T,
    ) -> Result<Vec<Choice>>
    where
        W: Writer + ?Sized,
        I: ByteSource + ?Sized,
        T: TerminalMode + ?Sized,
    {
        let positions = self.run(SelectionMode::Multiple, writer, input, terminal)?;
        Ok(positions
            .into_iter()
            .filter_map(|position| self.options.choice(position))
            .collect())
    }

    fn run<W, I, T>(
        &self,
        mode: SelectionMode,
        writer: &mut W,
        input: &mut I,
        terminal: &mut T,
    ) -> Result<Vec<usize>>
    where
        W: Writer + ?Sized,
        I: ByteSource + ?Sized,
        T: TerminalMode + ?Sized,
    {
        if self.options.is_empty() {
            return Err(Error::EmptyOptions);
        }

        let mut state = MenuState::new(self.options.len(), mode);
        let mut guard = TerminalModeGuard::engage(terminal);
        // Without raw mode keys only arrive once a whole line is typed, and the
        // echoed line sits below the menu.
        let line_mode = guard.is_degraded();
        let notice = line_mode.then_some(LINE_MODE_NOTICE);

        let mut rendered_lines = 0;

        let positions = loop {
            if rendered_lines > 0 {
                writer.write(&erase_lines_above(rendered_lines))?;
            }

            let output = render(&self.prompt, &self.options, &state, notice);
            rendered_lines = count_lines(&output);
            writer.write(&output)?;

            let finished = if line_mode {
                // The typed line is echoed below the menu.
                rendered_lines += 1;
                apply_line(&read_line_keys(input)?, &mut state, self.required)
            } else {
                loop {
                    let Some(key) = read_key(input)? else {
                        continue;
                    };

                    match handle_key(&key, &mut state, self.required) {
                        KeyOutcome::Done(positions) => break Some(positions),
                        KeyOutcome::Redraw => break None,
                        KeyOutcome::Unchanged => {}
                    }
                }
            };

            if let Some(positions) = finished {
                break positions;
            }
        };

        guard.release();
        writer.write(&erase_lines_above(rendered_lines))?;

        debug!("Selection `{}` finished with positions {positions:?}", self.prompt);
        Ok(positions)
    }
}

/// Applies one keypress to the menu state.
fn handle_key(key: &Key, state: &mut MenuState, required: bool) -> KeyOutcome {
    trace!("Menu key {key:?}");

    match key {
        Key::ArrowUp | Key::ArrowDown => {
            let direction = if *key == Key::ArrowUp {
                CycleDirection::Up
            } else {
                CycleDirection::Down
            };
            let previous = state.cursor;
            move_cursor(state, direction);
            if state.cursor == previous {
                KeyOutcome::Unchanged
            } else {
                KeyOutcome::Redraw
            }
        }
        Key::Space => {
            if toggle_selection(state) {
                KeyOutcome::Redraw
            } else {
                KeyOutcome::Unchanged
            }
        }
        Key::Enter => confirm(state, required),
        Key::Unrecognized(_) => KeyOutcome::Unchanged,
    }
}

/// Applies every key of a typed line in order, stopping at the first key that
/// finishes the menu.
fn apply_line(keys: &[Key], state: &mut MenuState, required: bool) -> Option<Vec<usize>> {
    keys.iter().find_map(|key| match handle_key(key, state, required) {
        KeyOutcome::Done(positions) => Some(positions),
        KeyOutcome::Redraw | KeyOutcome::Unchanged => None,
    })
}

/// Move the cursor in the given direction, wrapping at both ends
fn move_cursor(state: &mut MenuState, direction: CycleDirection) {
    if state.option_count == 0 {
        return;
    }

    state.cursor = match direction {
        CycleDirection::Up if state.cursor == 0 => state.option_count - 1,
        CycleDirection::Up => state.cursor - 1,
        CycleDirection::Down => (state.cursor + 1) % state.option_count,
    };
}

/// Toggle the option under the cursor. Returns `false` in single-select mode.
fn toggle_selection(state: &mut MenuState) -> bool {
    if !state.is_multiple() {
        return false;
    }

    if !state.selected.remove(&state.cursor) {
        state.selected.insert(state.cursor);
    }
    state.error = None;
    true
}

fn confirm(state: &mut MenuState, required: bool) -> KeyOutcome {
    match state.mode {
        SelectionMode::Single => KeyOutcome::Done(vec![state.cursor]),
        SelectionMode::Multiple if state.selected.is_empty() && required => {
            if state.error.as_deref() == Some(SELECT_SOME_OPTION) {
                return KeyOutcome::Unchanged;
            }
            state.error = Some(SELECT_SOME_OPTION.to_string());
            KeyOutcome::Redraw
        }
        SelectionMode::Multiple => KeyOutcome::Done(state.selected.iter().copied().collect()),
    }
}

/// Renders the full menu: prompt, one line per option, hint, optional error
/// and optional notice. Every line ends with a newline.
#[must_use]
pub fn render(
    prompt: &str,
    options: &OptionSet,
    state: &MenuState,
    notice: Option<&str>,
) -> String {
    let mut output = format!("{prompt}\n");

    for (position, option) in options.iter().enumerate() {
        let cursor = if position == state.cursor {
            CURSOR_MARKER
        } else {
            NO_CURSOR_MARKER
        };

        let marker = match state.mode {
            SelectionMode::Multiple if state.is_selected(position) => CHECKED_MARKER,
            SelectionMode::Multiple => UNCHECKED_MARKER,
            SelectionMode::Single => BULLET_MARKER,
        };

        output.push_str(cursor);
        output.push_str(marker);
        output.push_str(&option.label);
        output.push('\n');
    }

    output.push_str(if state.is_multiple() {
        MULTIPLE_HINT
    } else {
        SINGLE_HINT
    });
    output.push('\n');

    if let Some(error) = &state.error {
        output.push_str(error);
        output.push('\n');
    }

    if let Some(notice) = notice {
        output.push_str(notice);
        output.push('\n');
    }

    output
}

fn count_lines(output: &str) -> usize {
    output.matches('\n').count()
}
