//! Input sources for the prompts.
//!
//! Line-buffered prompts read whole lines through [`LineSource`]; the menu
//! reads single bytes through [`ByteSource`], where every read is bounded so
//! "no key yet" can be told apart from a key.

use std::collections::VecDeque;
use std::io::{self, BufRead, ErrorKind, Read, Stdin};

use crate::error::{Error, Result};
use crate::key::Key;
use crate::terminal;

/// Reads whole lines of user input.
pub trait LineSource {
    /// Reads one line without its terminator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputClosed`] when the stream has ended.
    fn read_line(&mut self) -> Result<String>;
}

/// Reads single bytes with a bounded wait.
pub trait ByteSource {
    /// Reads one byte, or `None` when nothing arrived within the read timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputClosed`] when the stream has ended.
    fn read_byte(&mut self) -> Result<Option<u8>>;
}

impl<T: LineSource + ?Sized> LineSource for &mut T {
    fn read_line(&mut self) -> Result<String> {
        (**self).read_line()
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        (**self).read_byte()
    }
}

/// Standard input of the process.
///
/// While the terminal mode is altered the timeout is enforced by the terminal
/// itself (`VMIN=0`, `VTIME`), so an empty read means "no byte yet". In
/// line-buffered mode an empty read means the stream has ended.
#[derive(Debug)]
pub struct StdinInput {
    stdin: Stdin,
}

impl StdinInput {
    #[must_use]
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl Default for StdinInput {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for StdinInput {
    fn read_line(&mut self) -> Result<String> {
        read_line_from(&mut self.stdin.lock())
    }
}

impl ByteSource for StdinInput {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        read_byte_from(&mut self.stdin.lock(), terminal::is_altered())
    }
}

/// Reads one byte. An empty read is a timeout while `bounded` (the terminal
/// enforces the wait) and the end of the stream otherwise.
fn read_byte_from<R: Read>(reader: &mut R, bounded: bool) -> Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) if bounded => return Ok(None),
            Ok(0) => return Err(Error::InputClosed),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
}

/// Reads one line of raw bytes. Bytes that are not valid UTF-8 are replaced
/// rather than failing the read, so the answer still reaches the prompt's
/// own validation.
fn read_line_from<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut bytes = Vec::new();
    loop {
        match reader.read_until(b'\n', &mut bytes) {
            Ok(0) if bytes.is_empty() => return Err(Error::InputClosed),
            Ok(_) => return Ok(decode_line(&bytes)),
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
}

fn decode_line(bytes: &[u8]) -> String {
    strip_terminator(&String::from_utf8_lossy(bytes)).to_string()
}

fn strip_terminator(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// A pre-recorded input stream.
///
/// Bytes are served in order; a pause serves exactly one timed-out read.
/// Once the script is exhausted every read fails with [`Error::InputClosed`],
/// so a prompt that never gets a valid answer ends instead of hanging.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    script: VecDeque<Option<u8>>,
}

impl ScriptedInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self::new().bytes(bytes)
    }

    #[must_use]
    pub fn bytes(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.script.extend(bytes.as_ref().iter().copied().map(Some));
        self
    }

    /// Appends `text` followed by a newline.
    #[must_use]
    pub fn line(self, text: &str) -> Self {
        self.bytes(text).bytes("\n")
    }

    #[must_use]
    pub fn key(self, key: &Key) -> Self {
        self.bytes(key.as_bytes())
    }

    #[must_use]
    pub fn keys(self, keys: &[Key]) -> Self {
        keys.iter().fold(self, |script, key| script.key(key))
    }

    /// Appends one read that times out without a byte.
    #[must_use]
    pub fn pause(mut self) -> Self {
        self.script.push_back(None);
        self
    }

    /// Number of bytes and pauses not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl ByteSource for ScriptedInput {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        self.script.pop_front().ok_or(Error::InputClosed)
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self) -> Result<String> {
        if self.script.is_empty() {
            return Err(Error::InputClosed);
        }

        let mut bytes = Vec::new();
        while let Some(entry) = self.script.pop_front() {
            match entry {
                Some(b'\n') => break,
                Some(byte) => bytes.push(byte),
                None => {}
            }
        }

        Ok(decode_line(&bytes))
    }
}
