//! Splitting an argument vector into positionals and canonical options.
//!
//! Options use the `--key=value` form only; a space-separated value becomes
//! a positional. Later occurrences of a canonical key overwrite earlier ones.
//! Malformed option tokens never stop tokenization: the first one is kept
//! and reported after shape classification, so a positional count error
//! always takes precedence.

use log::debug;

use crate::config::{ParamsConfig, USER_VARIABLE_PREFIX};
use crate::error::Error::{
    BareOptionMarker, EmptyOptionName, FlagWithValue, ShortOptionsDisabled, ShortUserVariable,
};
use crate::error::{Error, Result};
use crate::result::{OptionMap, OptionValue};

/// Output of [`Tokenizer::tokenize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizedArgs {
    /// Positional tokens in their original order.
    pub positionals: Vec<String>,
    pub options: OptionMap,
    /// Canonical keys seen more than once, in first-repeat order.
    pub duplicates: Vec<String>,
    /// First malformed option token, if any.
    pub syntax_error: Option<Error>,
}

impl TokenizedArgs {
    /// Reports the first malformed option token.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A token is a bare `-` or `--`
    /// - An option token has no name (`--=value`)
    /// - A single-dash token is used while short options are disabled
    /// - A user variable is given in single-dash form
    /// - A flag option is given a value
    pub fn check_syntax(&self) -> Result<()> {
        match &self.syntax_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn record(&mut self, error: Error) {
        if self.syntax_error.is_none() {
            self.syntax_error = Some(error);
        }
    }
}

pub struct Tokenizer<'a> {
    config: &'a ParamsConfig,
}

/// Lower-cases an option name, keeping the case of a user variable's suffix.
#[must_use]
pub fn canonical_key(name: &str) -> String {
    match name.get(..USER_VARIABLE_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(USER_VARIABLE_PREFIX) => {
            format!("{USER_VARIABLE_PREFIX}{}", &name[USER_VARIABLE_PREFIX.len()..])
        }
        _ => name.to_lowercase(),
    }
}

impl<'a> Tokenizer<'a> {
    #[must_use]
    pub fn new(config: &'a ParamsConfig) -> Self {
        Self { config }
    }

    /// Tokenizes `args`. Malformed option tokens are skipped and recorded in
    /// [`TokenizedArgs::syntax_error`].
    #[must_use]
    pub fn tokenize<S: AsRef<str>>(&self, args: &[S]) -> TokenizedArgs {
        let mut tokenized = TokenizedArgs::default();

        for token in args {
            let token = token.as_ref();

            let (body, short) = if let Some(body) = token.strip_prefix("--") {
                (body, false)
            } else if let Some(body) = token.strip_prefix('-') {
                (body, true)
            } else {
                tokenized.positionals.push(token.to_string());
                continue;
            };

            if body.is_empty() {
                tokenized.record(BareOptionMarker(token.to_string()));
                continue;
            }

            if short && !self.config.short_options.enabled {
                tokenized.record(ShortOptionsDisabled(token.to_string()));
                continue;
            }

            let (name, value) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };

            if name.is_empty() {
                tokenized.record(EmptyOptionName(token.to_string()));
                continue;
            }

            let key = if short {
                self.resolve_short(name)
            } else {
                canonical_key(name)
            };

            if short && key.starts_with(USER_VARIABLE_PREFIX) {
                tokenized.record(ShortUserVariable(token.to_string()));
                continue;
            }

            let value = if self.config.is_flag(&key) {
                if value.is_some() {
                    tokenized.record(FlagWithValue(key.clone()));
                }
                OptionValue::Bool(true)
            } else {
                value.map_or(OptionValue::Absent, |value| OptionValue::Text(value.to_string()))
            };

            if tokenized.options.insert(key.clone(), value).is_some()
                && !tokenized.duplicates.contains(&key)
            {
                tokenized.duplicates.push(key);
            }
        }

        debug!(
            "Tokenized {} arguments into {} positionals and {} options",
            args.len(),
            tokenized.positionals.len(),
            tokenized.options.len()
        );

        tokenized
    }

    fn resolve_short(&self, name: &str) -> String {
        let key = canonical_key(name);
        match self.config.short_options.aliases.get(&key) {
            Some(long) => canonical_key(long),
            None => key,
        }
    }
}
