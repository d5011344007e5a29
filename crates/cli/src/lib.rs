//! Parex CLI Library
//!
//! This crate provides the interactive prompts of parex: yes/no
//! confirmations, validated questions, arrow-key selection menus and a
//! scrolling monitor for long-running work, plus the `parex` demo binary.
//!
//! # Key Features
//!
//! - **Line Prompts**: Confirmation and question loops that re-ask until the
//!   answer is acceptable
//! - **Selection Menu**: Single and multiple choice, redrawn in place and
//!   erased when done
//! - **Scrolling Monitor**: The latest output of a callback in a fixed region
//! - **Testable**: Every prompt takes its writer, input and terminal as
//!   parameters
//!
//! # Architecture
//!
//! - [`console`]: The prompts and the monitor
//! - [`io`]: A facade owning the writer, input and terminal
//! - [`cli_args`]: Command-line arguments of the demo binary
//!
//! # Examples
//!
//! ```
//! use parex_cli::console::Selection;
//! use parex_core::input::ScriptedInput;
//! use parex_core::key::Key;
//! use parex_core::terminal::NoopTerminal;
//! use parex_core::writer::BufferWriter;
//!
//! let mut writer = BufferWriter::new();
//! let mut input = ScriptedInput::new().keys(&[Key::ArrowUp, Key::Enter]);
//! let mut terminal = NoopTerminal::new();
//!
//! let choice = Selection::new("Pick one", ["php", "json", "neon"])
//!     .select_one(&mut writer, &mut input, &mut terminal)?;
//! assert_eq!(choice.value(), "neon");
//! # Ok::<(), parex_core::error::Error>(())
//! ```

pub mod cli_args;
pub mod console;
pub mod io;
