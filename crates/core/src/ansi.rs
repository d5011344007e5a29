//! ANSI escape sequences for in-place redraws.
//!
//! Parameterized sequences are produced from crossterm commands so the exact
//! bytes match what crossterm itself would queue on a terminal.

use crossterm::cursor::{MoveDown, MoveTo, MoveUp};
use crossterm::terminal::{Clear, ClearType};
use crossterm::Command;

/// Escape byte that starts every control sequence
pub const ESC: u8 = 0x1b;
/// Clears from the cursor to the end of the screen
pub const CLEAR_DOWN: &str = "\x1b[J";
/// Clears the whole current line
pub const CLEAR_LINE: &str = "\x1b[2K";
/// Returns the cursor to the first column
pub const CURSOR_START: &str = "\r";

fn ansi_string(command: impl Command) -> String {
    let mut sequence = String::new();
    // Writing into a String cannot fail.
    let _ = command.write_ansi(&mut sequence);
    sequence
}

fn as_row_count(lines: usize) -> u16 {
    u16::try_from(lines).unwrap_or(u16::MAX)
}

/// Moves the cursor up `lines` rows and back to the first column.
///
/// Zero lines only returns to the first column; terminals read a zero count
/// as one.
#[must_use]
pub fn cursor_up_and_start(lines: usize) -> String {
    if lines == 0 {
        return CURSOR_START.to_string();
    }
    ansi_string(MoveUp(as_row_count(lines))) + CURSOR_START
}

/// Moves the cursor down `lines` rows and back to the first column.
#[must_use]
pub fn cursor_down_and_start(lines: usize) -> String {
    if lines == 0 {
        return CURSOR_START.to_string();
    }
    ansi_string(MoveDown(as_row_count(lines))) + CURSOR_START
}

/// Erases `lines` rows above the cursor and leaves the cursor at their start.
#[must_use]
pub fn erase_lines_above(lines: usize) -> String {
    cursor_up_and_start(lines) + CLEAR_DOWN
}

/// Clears the whole screen and homes the cursor.
#[must_use]
pub fn clear_screen() -> String {
    ansi_string(Clear(ClearType::All)) + &ansi_string(MoveTo(0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_up_and_start() {
        assert_eq!(cursor_up_and_start(3), "\x1b[3A\r");
    }

    #[test]
    fn test_cursor_up_zero_lines_only_returns_to_start() {
        assert_eq!(cursor_up_and_start(0), "\r");
    }

    #[test]
    fn test_cursor_down_and_start() {
        assert_eq!(cursor_down_and_start(2), "\x1b[2B\r");
    }

    #[test]
    fn test_erase_lines_above() {
        assert_eq!(erase_lines_above(4), "\x1b[4A\r\x1b[J");
    }

    #[test]
    fn test_clear_screen() {
        assert_eq!(clear_screen(), "\x1b[2J\x1b[1;1H");
    }

    #[test]
    fn test_huge_line_count_saturates() {
        assert_eq!(cursor_up_and_start(1_000_000), "\x1b[65535A\r");
    }
}
