//! Interactive prompts and live output.
//!
//! This module provides the building blocks behind [`crate::io::Io`]: line
//! prompts, the arrow-key selection menu, and the scrolling monitor.
//!
//! # Key Features
//!
//! - **Confirmation**: yes/no questions with configurable aliases and default
//! - **Questions**: free-text answers with defaults and custom validation
//! - **Selection Menu**: single or multiple choice driven by arrow keys, space
//!   and enter, redrawn in place
//! - **Monitor**: a fixed-height region showing the latest output of a
//!   long-running callback
//!
//! # Keyboard
//!
//! In the selection menu:
//! - Up/Down arrows move the cursor, wrapping at both ends
//! - Space toggles the current option (multiple choice only)
//! - Enter confirms

pub mod input;
pub mod monitor;
pub mod types;
pub mod ui;

// Re-exports for convenience
pub use input::{Confirmation, Question, Verdict};
pub use monitor::{Monitor, MonitorSink};
pub use types::{Choice, OptionKey, OptionSet};
pub use ui::Selection;
