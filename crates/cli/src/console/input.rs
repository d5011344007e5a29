use itertools::Itertools;
use log::{debug, warn};

use parex_core::config::{DEFAULT_NO_ALIASES, DEFAULT_YES_ALIASES};
use parex_core::error::Result;
use parex_core::input::LineSource;
use parex_core::writer::Writer;

/// Message shown when a validator rejects input without its own explanation
pub const INVALID_VALUE: &str = "Invalid value";

fn lowercase_aliases<I, S>(aliases: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    aliases
        .into_iter()
        .map(|alias| alias.as_ref().trim().to_lowercase())
        .filter(|alias| !alias.is_empty())
        .collect()
}

/// A yes/no question answered on one line.
#[derive(Clone, Debug)]
pub struct Confirmation {
    prompt: String,
    default: bool,
    yes_aliases: Vec<String>,
    no_aliases: Vec<String>,
}

impl Confirmation {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            default: true,
            yes_aliases: lowercase_aliases(DEFAULT_YES_ALIASES),
            no_aliases: lowercase_aliases(DEFAULT_NO_ALIASES),
        }
    }

    /// Answer used when the user just presses Enter. Defaults to `true`.
    #[must_use]
    pub fn default_answer(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    /// Replaces the accepted "yes" answers. An empty list keeps the current ones.
    #[must_use]
    pub fn yes_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let aliases = lowercase_aliases(aliases);
        if aliases.is_empty() {
            warn!("Ignoring empty list of yes aliases");
        } else {
            self.yes_aliases = aliases;
        }
        self
    }

    /// Replaces the accepted "no" answers. An empty list keeps the current ones.
    #[must_use]
    pub fn no_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let aliases = lowercase_aliases(aliases);
        if aliases.is_empty() {
            warn!("Ignoring empty list of no aliases");
        } else {
            self.no_aliases = aliases;
        }
        self
    }

    /// The `[Y/n]` part of the prompt: first alias of each list, the default
    /// one upper-cased.
    fn options_display(&self) -> String {
        let yes = &self.yes_aliases[0];
        let no = &self.no_aliases[0];

        if self.default {
            format!("[{}/{no}]", yes.to_uppercase())
        } else {
            format!("[{yes}/{}]", no.to_uppercase())
        }
    }

    /// Asks until the user gives a recognized answer or accepts the default.
    ///
    /// # Errors
    ///
    /// Propagates input/output failures, including a closed input stream.
    pub fn ask<W, I>(&self, writer: &mut W, input: &mut I) -> Result<bool>
    where
        W: Writer + ?Sized,
        I: LineSource + ?Sized,
    {
        let options = self.options_display();

        loop {
            writer.write(&format!("{} {options} ", self.prompt))?;

            let answer = input.read_line()?.trim().to_lowercase();

            if answer.is_empty() {
                return Ok(self.default);
            }

            if self.yes_aliases.contains(&answer) {
                return Ok(true);
            }

            if self.no_aliases.contains(&answer) {
                return Ok(false);
            }

            debug!("Unrecognized confirmation answer `{answer}`");
            writer.write_line(&format!(
                "Please enter one of the options: {}",
                self.yes_aliases.iter().chain(&self.no_aliases).join(", ")
            ))?;
        }
    }
}

/// Outcome of validating an answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid,
    /// Rejected, with the message to show the user
    InvalidWith(String),
}

impl From<bool> for Verdict {
    fn from(valid: bool) -> Self {
        if valid {
            Verdict::Valid
        } else {
            Verdict::Invalid
        }
    }
}

impl From<&str> for Verdict {
    fn from(message: &str) -> Self {
        Verdict::InvalidWith(message.to_string())
    }
}

impl From<String> for Verdict {
    fn from(message: String) -> Self {
        Verdict::InvalidWith(message)
    }
}

impl From<std::result::Result<(), String>> for Verdict {
    fn from(result: std::result::Result<(), String>) -> Self {
        match result {
            Ok(()) => Verdict::Valid,
            Err(message) => Verdict::InvalidWith(message),
        }
    }
}

type Validator<'v> = Box<dyn Fn(&str) -> Verdict + 'v>;

/// A free-text question with an optional default and validator.
pub struct Question<'v> {
    prompt: String,
    default: Option<String>,
    validator: Option<Validator<'v>>,
}

impl<'v> Question<'v> {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            default: None,
            validator: None,
        }
    }

    /// Text used when the user just presses Enter. An empty default is no default.
    #[must_use]
    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        let default = default.into();
        self.default = (!default.is_empty()).then_some(default);
        self
    }

    /// Checks every answer; rejected answers are explained and asked again.
    ///
    /// The validator returns anything convertible into a [`Verdict`]: `true`,
    /// `false`, or an error message.
    #[must_use]
    pub fn validator<F, V>(mut self, validator: F) -> Self
    where
        F: Fn(&str) -> V + 'v,
        V: Into<Verdict>,
    {
        self.validator = Some(Box::new(move |text| validator(text).into()));
        self
    }

    fn prompt_display(&self) -> String {
        match &self.default {
            Some(default) => format!("{} [{default}] ", self.prompt),
            None => format!("{} ", self.prompt),
        }
    }

    fn validate(&self, text: &str) -> Verdict {
        self.validator
            .as_ref()
            .map_or(Verdict::Valid, |validator| validator(text))
    }

    /// Asks until the (possibly defaulted) answer passes validation.
    ///
    /// # Errors
    ///
    /// Propagates input/output failures, including a closed input stream.
    pub fn ask<W, I>(&self, writer: &mut W, input: &mut I) -> Result<String>
    where
        W: Writer + ?Sized,
        I: LineSource + ?Sized,
    {
        let prompt = self.prompt_display();

        loop {
            writer.write(&prompt)?;

            let line = input.read_line()?;
            let answer = match line.trim() {
                "" => self.default.clone().unwrap_or_default(),
                text => text.to_string(),
            };

            match self.validate(&answer) {
                Verdict::Valid => return Ok(answer),
                Verdict::Invalid => writer.write_line(INVALID_VALUE)?,
                Verdict::InvalidWith(message) => writer.write_line(&message)?,
            }
        }
    }
}
