//! Scrolling monitor for long-running work.
//!
//! The monitor reserves a fixed number of lines below its label and keeps the
//! most recent output of a callback in them, redrawing the region in place on
//! every write. When the callback returns the region is erased.

use std::collections::VecDeque;

use log::debug;

use parex_core::ansi::{cursor_up_and_start, erase_lines_above, CLEAR_LINE};
use parex_core::error::{Error, Result};
use parex_core::terminal::{TerminalMode, TerminalModeGuard};
use parex_core::writer::Writer;

const LABEL_MARKER: &str = ":> ";
const LINE_MARKER: &str = " > ";

/// The last `capacity` lines written, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RollingBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RollingBuffer {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Appends text. Text continues the last line while that line has no
    /// terminator; every terminated line starts a new one, evicting the oldest
    /// line once the buffer is full.
    pub fn push(&mut self, text: &str) {
        for segment in text.split_inclusive('\n') {
            match self.lines.back_mut() {
                Some(last) if !last.ends_with('\n') => last.push_str(segment),
                _ => {
                    self.lines.push_back(segment.to_string());
                    if self.lines.len() > self.capacity {
                        self.lines.pop_front();
                    }
                }
            }
        }
    }

    /// Buffered lines without their terminators.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.trim_end_matches('\n'))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// The writer handed to a monitored callback.
pub struct MonitorSink<'w, W: Writer + ?Sized> {
    writer: &'w mut W,
    buffer: RollingBuffer,
    height: usize,
}

impl<'w, W: Writer + ?Sized> MonitorSink<'w, W> {
    fn new(writer: &'w mut W, height: usize) -> Self {
        Self {
            writer,
            buffer: RollingBuffer::new(height),
            height,
        }
    }

    /// Lines currently shown in the region, oldest first.
    pub fn visible_lines(&self) -> impl Iterator<Item = &str> {
        self.buffer.lines()
    }

    /// Redraws the whole region in one write.
    fn refresh(&mut self) -> Result<()> {
        let mut frame = cursor_up_and_start(self.height);
        let mut lines = self.buffer.lines();

        for _ in 0..self.height {
            frame.push_str(CLEAR_LINE);
            if let Some(line) = lines.next() {
                frame.push_str(LINE_MARKER);
                frame.push_str(line);
            }
            frame.push('\n');
        }

        self.writer.write(&frame)
    }
}

impl<W: Writer + ?Sized> Writer for MonitorSink<'_, W> {
    fn write(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.buffer.push(text);
        self.refresh()
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        self.write(&format!("{text}\n"))
    }
}

/// Shows the output of a long-running callback in a fixed-height region.
#[derive(Clone, Debug)]
pub struct Monitor {
    label: String,
    height: usize,
}

impl Monitor {
    pub fn new(label: impl Into<String>, height: usize) -> Self {
        Self {
            label: label.into(),
            height,
        }
    }

    /// Runs `callback` on the calling thread and returns its value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroMonitorHeight`] before writing anything when the
    /// height is zero, and propagates output failures.
    pub fn run<W, T, F, R>(&self, writer: &mut W, terminal: &mut T, callback: F) -> Result<R>
    where
        W: Writer + ?Sized,
        T: TerminalMode + ?Sized,
        F: FnOnce(&mut MonitorSink<'_, W>) -> R,
    {
        if self.height == 0 {
            return Err(Error::ZeroMonitorHeight);
        }

        writer.write_line(&format!("{LABEL_MARKER}{}", self.label))?;
        writer.write(&"\n".repeat(self.height))?;

        // Keeps keys typed during the work from being echoed into the region.
        let mut guard = TerminalModeGuard::engage(terminal);

        let value = {
            let mut sink = MonitorSink::new(writer, self.height);
            callback(&mut sink)
        };

        guard.release();
        writer.write(&erase_lines_above(self.height))?;

        debug!("Monitor `{}` finished", self.label);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parex_core::terminal::NoopTerminal;
    use parex_core::writer::BufferWriter;

    #[test]
    fn test_rolling_buffer_evicts_oldest() {
        let mut buffer = RollingBuffer::new(2);
        for line in ["a\n", "b\n", "c\n", "d\n"] {
            buffer.push(line);
        }
        assert_eq!(buffer.lines().collect::<Vec<_>>(), vec!["c", "d"]);
    }

    #[test]
    fn test_rolling_buffer_continues_unterminated_line() {
        let mut buffer = RollingBuffer::new(3);
        buffer.push("Processing");
        buffer.push(" item");
        buffer.push(" #1\n");
        buffer.push("next");
        assert_eq!(
            buffer.lines().collect::<Vec<_>>(),
            vec!["Processing item #1", "next"]
        );
    }

    #[test]
    fn test_rolling_buffer_splits_multi_line_writes() {
        let mut buffer = RollingBuffer::new(2);
        buffer.push("one\ntwo\nthree\n");
        assert_eq!(buffer.lines().collect::<Vec<_>>(), vec!["two", "three"]);
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_monitor_returns_callback_value() {
        let mut writer = BufferWriter::new();
        let mut terminal = NoopTerminal::new();
        let value = Monitor::new("Working", 2)
            .run(&mut writer, &mut terminal, |sink| {
                sink.write_line("step").unwrap();
                42
            })
            .unwrap();

        assert_eq!(value, 42);
        assert!(writer.contents().starts_with(":> Working\n\n\n"));
        assert!(writer.contents().ends_with(&erase_lines_above(2)));
        assert_eq!(terminal.enter_count(), 1);
        assert_eq!(terminal.restore_count(), 1);
    }

    #[test]
    fn test_monitor_shows_last_lines_in_order() {
        let mut writer = BufferWriter::new();
        let mut terminal = NoopTerminal::new();
        let visible = Monitor::new("Import", 2)
            .run(&mut writer, &mut terminal, |sink| {
                for i in 1..=4 {
                    sink.write_line(&format!("line {i}")).unwrap();
                }
                sink.visible_lines().map(str::to_string).collect::<Vec<_>>()
            })
            .unwrap();

        assert_eq!(visible, vec!["line 3", "line 4"]);

        let last_frame = format!(
            "{}{CLEAR_LINE} > line 3\n{CLEAR_LINE} > line 4\n{}",
            cursor_up_and_start(2),
            erase_lines_above(2)
        );
        assert!(writer.contents().ends_with(&last_frame));
    }

    #[test]
    fn test_monitor_pads_unused_rows() {
        let mut writer = BufferWriter::new();
        let mut terminal = NoopTerminal::new();
        Monitor::new("Short", 3)
            .run(&mut writer, &mut terminal, |sink| sink.write_line("only"))
            .unwrap()
            .unwrap();

        let frame = format!(
            "{}{CLEAR_LINE} > only\n{CLEAR_LINE}\n{CLEAR_LINE}\n",
            cursor_up_and_start(3)
        );
        assert!(writer.contents().contains(&frame));
    }

    #[test]
    fn test_monitor_empty_write_does_not_redraw() {
        let mut writer = BufferWriter::new();
        let mut terminal = NoopTerminal::new();
        Monitor::new("Quiet", 1)
            .run(&mut writer, &mut terminal, |sink| sink.write(""))
            .unwrap()
            .unwrap();

        assert_eq!(
            writer.contents(),
            format!(":> Quiet\n\n{}", erase_lines_above(1))
        );
    }

    #[test]
    fn test_monitor_zero_height_is_rejected() {
        let mut writer = BufferWriter::new();
        let mut terminal = NoopTerminal::new();
        let result = Monitor::new("Nothing", 0).run(&mut writer, &mut terminal, |_| ());
        assert!(matches!(result, Err(Error::ZeroMonitorHeight)));
        assert_eq!(writer.contents(), "");
        assert_eq!(terminal.enter_count(), 0);
    }
}
