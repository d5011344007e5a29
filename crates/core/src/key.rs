//! Decoding of raw input bytes into logical keys.

use log::trace;

use crate::ansi::ESC;
use crate::error::Result;
use crate::input::ByteSource;

const ARROW_UP: &[u8] = b"\x1b[A";
const ARROW_DOWN: &[u8] = b"\x1b[B";

/// A logical keypress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Space,
    Enter,
    /// Any other sequence; callers ignore it
    Unrecognized(Vec<u8>),
}

impl Key {
    /// Classifies one complete byte sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use parex_core::key::Key;
    ///
    /// assert_eq!(Key::from_bytes(b"\x1b[A"), Key::ArrowUp);
    /// assert_eq!(Key::from_bytes(b"\r"), Key::Enter);
    /// assert_eq!(Key::from_bytes(b"q"), Key::Unrecognized(b"q".to_vec()));
    /// ```
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match bytes {
            ARROW_UP => Key::ArrowUp,
            ARROW_DOWN => Key::ArrowDown,
            b" " => Key::Space,
            b"\n" | b"\r" => Key::Enter,
            other => Key::Unrecognized(other.to_vec()),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Key::ArrowUp => ARROW_UP,
            Key::ArrowDown => ARROW_DOWN,
            Key::Space => b" ",
            Key::Enter => b"\n",
            Key::Unrecognized(bytes) => bytes,
        }
    }
}

/// Reads one logical keypress.
///
/// Returns `Ok(None)` when no byte arrived within the source's read timeout.
/// After an escape byte up to two more bounded reads assemble the sequence;
/// if the rest of the sequence does not arrive in time, whatever was read is
/// classified as it stands.
///
/// # Errors
///
/// Propagates errors of the underlying source.
pub fn read_key<S: ByteSource + ?Sized>(source: &mut S) -> Result<Option<Key>> {
    let Some(first) = source.read_byte()? else {
        return Ok(None);
    };

    let mut sequence = vec![first];

    if first == ESC {
        if let Some(second) = source.read_byte()? {
            sequence.push(second);

            if second == b'[' {
                if let Some(third) = source.read_byte()? {
                    sequence.push(third);
                }
            }
        }
    }

    let key = Key::from_bytes(&sequence);
    trace!("Read key {key:?} from {sequence:?}");
    Ok(Some(key))
}

/// Serves the bytes of an already-read line, then reports "no byte".
struct LineBytes<'a> {
    bytes: &'a [u8],
}

impl ByteSource for LineBytes<'_> {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        Ok(self.bytes.split_first().map(|(&first, rest)| {
            self.bytes = rest;
            first
        }))
    }
}

/// Reads one typed line and decodes the keys in it, for terminals that only
/// deliver input line by line.
///
/// The line terminator becomes the final [`Key::Enter`]; a carriage return
/// right before it belongs to the terminator, so a `\r\n` line yields a
/// single Enter.
///
/// # Errors
///
/// Propagates errors of the underlying source.
pub fn read_line_keys<S: ByteSource + ?Sized>(source: &mut S) -> Result<Vec<Key>> {
    let mut line = Vec::new();
    loop {
        match source.read_byte()? {
            Some(b'\n') => break,
            Some(byte) => line.push(byte),
            None => {}
        }
    }

    let content = line.strip_suffix(b"\r").unwrap_or(&line[..]);
    let mut bytes = LineBytes { bytes: content };
    let mut keys = Vec::new();
    while let Some(key) = read_key(&mut bytes)? {
        keys.push(key);
    }
    keys.push(Key::Enter);

    trace!("Read line keys {keys:?}");
    Ok(keys)
}
