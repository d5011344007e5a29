//! Output sinks.
//!
//! Every prompt renders exclusively through a [`Writer`], so output can be
//! captured in tests with [`BufferWriter`] instead of touching a real terminal.

use std::io::{self, Stdout, Write};

use crate::error::Result;

/// Appends text to an output stream.
pub trait Writer {
    fn write(&mut self, text: &str) -> Result<()>;

    fn write_line(&mut self, text: &str) -> Result<()> {
        self.write(text)?;
        self.write("\n")
    }
}

impl<T: Writer + ?Sized> Writer for &mut T {
    fn write(&mut self, text: &str) -> Result<()> {
        (**self).write(text)
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        (**self).write_line(text)
    }
}

/// Writes to any [`io::Write`] stream, flushing after each write so partial
/// lines (prompts) show up immediately.
#[derive(Debug)]
pub struct StreamWriter<W: Write> {
    stream: W,
}

impl<W: Write> StreamWriter<W> {
    pub fn new(stream: W) -> Self {
        Self { stream }
    }

    pub fn into_inner(self) -> W {
        self.stream
    }
}

impl StreamWriter<Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Writer for StreamWriter<W> {
    fn write(&mut self, text: &str) -> Result<()> {
        self.stream.write_all(text.as_bytes())?;
        self.stream.flush()?;
        Ok(())
    }
}

/// Captures everything written into an in-memory string.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BufferWriter {
    buffer: String,
}

impl BufferWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contents(&self) -> &str {
        &self.buffer
    }

    /// Returns the captured text and leaves the buffer empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }
}

impl Writer for BufferWriter {
    fn write(&mut self, text: &str) -> Result<()> {
        self.buffer.push_str(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_writer_captures_writes() {
        let mut writer = BufferWriter::new();
        writer.write("Hello, ").unwrap();
        writer.write_line("World").unwrap();
        assert_eq!(writer.contents(), "Hello, World\n");
    }

    #[test]
    fn test_buffer_writer_take_empties_buffer() {
        let mut writer = BufferWriter::new();
        writer.write("abc").unwrap();
        assert_eq!(writer.take(), "abc");
        assert_eq!(writer.contents(), "");
    }

    #[test]
    fn test_stream_writer_writes_bytes() {
        let mut writer = StreamWriter::new(Vec::new());
        writer.write_line("one").unwrap();
        writer.write("two").unwrap();
        assert_eq!(writer.into_inner(), b"one\ntwo".to_vec());
    }

    #[test]
    fn test_writer_through_mutable_reference() {
        fn greet(mut writer: impl Writer) {
            writer.write_line("via ref").unwrap();
        }

        let mut writer = BufferWriter::new();
        greet(&mut writer);
        assert_eq!(writer.contents(), "via ref\n");
    }
}
