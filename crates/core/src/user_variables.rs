//! Validation of `--uv-<name>=<value>` user variables.

use regex::Regex;

use crate::config::{ParamsConfig, USER_VARIABLE_PREFIX};
use crate::error::Error::{
    EmptyUserVariableValue, InvalidUserVariableName, MissingUserVariableValue,
    UserVariableValueTooLong,
};
use crate::error::{Error, ErrorPolicy, Result};
use crate::result::{OptionMap, OptionValue};

#[derive(Debug)]
pub struct UserVariableValidator {
    name_pattern: Regex,
    max_value_length: usize,
    empty_value: ErrorPolicy,
}

impl UserVariableValidator {
    /// Compiles the configured name pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PatternCompile`] if the name pattern is invalid.
    pub fn new(config: &ParamsConfig) -> Result<Self> {
        let pattern = &config.user_variables.name_pattern;
        let name_pattern = Regex::new(pattern)
            .map_err(|e| Error::pattern_compile("user_variables.name_pattern", pattern, &e))?;

        Ok(Self {
            name_pattern,
            max_value_length: config.user_variables.max_value_length,
            empty_value: config.error_handling.empty_value,
        })
    }

    /// Checks every user variable in `options`.
    ///
    /// # Errors
    ///
    /// Returns the first invalid name or value found.
    pub fn validate(&self, options: &OptionMap) -> Result<()> {
        let variables = options
            .iter()
            .filter(|(key, _)| key.starts_with(USER_VARIABLE_PREFIX));

        for (key, value) in variables {
            self.validate_variable(key, value)?;
        }

        Ok(())
    }

    fn validate_variable(&self, key: &str, value: &OptionValue) -> Result<()> {
        if key.len() == USER_VARIABLE_PREFIX.len() || !self.name_pattern.is_match(key) {
            return Err(InvalidUserVariableName(key.to_string()));
        }

        match value {
            OptionValue::Text(text) if text.is_empty() => {
                self.empty_value.apply(EmptyUserVariableValue(key.to_string()))
            }
            OptionValue::Text(text) if text.chars().count() > self.max_value_length => {
                Err(UserVariableValueTooLong {
                    key: key.to_string(),
                    max: self.max_value_length,
                })
            }
            OptionValue::Text(_) => Ok(()),
            OptionValue::Bool(_) | OptionValue::Absent => {
                Err(MissingUserVariableValue(key.to_string()))
            }
        }
    }
}
