use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Options for selection cannot be empty.")]
    EmptyOptions,

    #[error("Monitor height must be at least one line.")]
    ZeroMonitorHeight,

    #[error("Input stream was closed while waiting for an answer.")]
    InputClosed,

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),

    #[error("Unable to {} terminal mode: {}", .action, .original)]
    TerminalMode {
        action: String,
        original: std::io::Error,
    },

    #[error("Standard input is not an interactive terminal.")]
    NotATerminal,

    #[error("Invalid value for `{}`: \"{}\"", .name, .value)]
    InvalidSetting { name: String, value: String },
}

impl Error {
    pub fn terminal_mode(action: &str, original: impl Into<std::io::Error>) -> Self {
        Self::TerminalMode {
            action: action.to_string(),
            original: original.into(),
        }
    }

    pub fn invalid_setting(name: &str, value: &str) -> Self {
        Self::InvalidSetting {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}
