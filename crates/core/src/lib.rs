//! Parex Core Library
//!
//! This crate provides the terminal plumbing underneath the parex prompts:
//! output sinks, ANSI redraw sequences, input sources with bounded reads, key
//! decoding and safe control of the raw terminal mode.
//!
//! # Key Features
//!
//! - **Output Capture**: Every prompt renders through a [`writer::Writer`], so
//!   output can be captured in tests
//! - **Bounded Key Reads**: Multi-byte escape sequences are assembled from a
//!   byte stream whose every read times out
//! - **Terminal Safety**: Raw mode is restored on release, drop, panic and
//!   termination signals
//! - **Configuration**: Defaults resolved from flags and environment variables
//!
//! # Examples
//!
//! Decoding keys from a scripted byte stream:
//!
//! ```
//! use parex_core::input::ScriptedInput;
//! use parex_core::key::{read_key, Key};
//!
//! let mut input = ScriptedInput::from_bytes(b"\x1b[B\n");
//! assert_eq!(read_key(&mut input)?, Some(Key::ArrowDown));
//! assert_eq!(read_key(&mut input)?, Some(Key::Enter));
//! # Ok::<(), parex_core::error::Error>(())
//! ```

pub mod ansi;
pub mod config;
pub mod error;
pub mod input;
pub mod key;
pub mod terminal;
pub mod writer;
