//! Option rules for a classified shape.
//!
//! Checks run in a fixed order: unknown options, duplicates, value shape and empty values, then required options.
//! User variable keys pass through untouched when the shape allows them.

use crate::config::{ParamsConfig, ShapeRule, USER_VARIABLE_PREFIX};
use crate::error::Error::{DuplicateOption, EmptyOptionValue, MissingOptionValue, MissingRequiredOption};
use crate::error::{Error, Result};
use crate::result::{OptionMap, OptionValue};
use crate::shape::Shape;
use crate::tokenizer::TokenizedArgs;

pub struct OptionRuleValidator<'a> {
    config: &'a ParamsConfig,
}

impl<'a> OptionRuleValidator<'a> {
    #[must_use]
    pub fn new(config: &'a ParamsConfig) -> Self {
        Self { config }
    }

    /// Validates the tokenized options against the rules for `shape` and
    /// returns the accepted option map.
    ///
    /// # Errors
    ///
    /// Returns the first rule violation found.
    pub fn validate(&self, shape: Shape, tokens: &TokenizedArgs) -> Result<OptionMap> {
        let rule = self.config.validation.for_shape(shape);
        let policies = &self.config.error_handling;
        let mut options = OptionMap::with_capacity(tokens.options.len());

        for (key, value) in &tokens.options {
            if Self::is_user_variable(rule, key) || rule.allows(key) {
                options.insert(key.clone(), value.clone());
            } else {
                policies
                    .unknown_option
                    .apply(Error::unknown_option(key, shape))?;
            }
        }

        for key in &tokens.duplicates {
            if options.contains_key(key) {
                policies
                    .duplicate_option
                    .apply(DuplicateOption(key.clone()))?;
            }
        }

        for (key, value) in &mut options {
            if Self::is_user_variable(rule, key) {
                continue;
            }
            self.check_value(rule, key, value)?;
        }

        for required in &rule.required_options {
            if !options.contains_key(required) {
                return Err(MissingRequiredOption(required.clone()));
            }
        }

        Ok(options)
    }

    fn is_user_variable(rule: &ShapeRule, key: &str) -> bool {
        rule.allow_user_variables && key.starts_with(USER_VARIABLE_PREFIX)
    }

    fn check_value(&self, rule: &ShapeRule, key: &str, value: &mut OptionValue) -> Result<()> {
        match value {
            OptionValue::Bool(_) => Ok(()),
            OptionValue::Absent if rule.takes_value(key) => Err(MissingOptionValue(key.to_string())),
            OptionValue::Absent => {
                // A switch: presence means true.
                *value = OptionValue::Bool(true);
                Ok(())
            }
            OptionValue::Text(text) if text.is_empty() => self
                .config
                .error_handling
                .empty_value
                .apply(EmptyOptionValue(key.to_string())),
            OptionValue::Text(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, ErrorPolicy};
    use crate::tokenizer::Tokenizer;

    fn validate_with(config: &ParamsConfig, shape: Shape, args: &[&str]) -> Result<OptionMap> {
        let tokens = Tokenizer::new(config).tokenize(args);
        tokens.check_syntax()?;
        OptionRuleValidator::new(config).validate(shape, &tokens)
    }

    fn validate(shape: Shape, args: &[&str]) -> Result<OptionMap> {
        validate_with(&ParamsConfig::default(), shape, args)
    }

    #[test]
    fn test_zero_flags() {
        let options = validate(Shape::Zero, &["--help", "-v"]).unwrap();
        assert_eq!(options.get("help"), Some(&OptionValue::Bool(true)));
        assert_eq!(options.get("version"), Some(&OptionValue::Bool(true)));
    }

    #[test]
    fn test_unknown_option_for_shape() {
        let error = validate(Shape::Zero, &["--from=a"]).unwrap_err();
        assert_eq!(error.code(), ErrorCode::UnknownOption);
        assert!(error.to_string().contains("zero"));

        let error = validate(Shape::One, &["--destination=a"]).unwrap_err();
        assert_eq!(error.code(), ErrorCode::UnknownOption);
    }

    #[test]
    fn test_unknown_option_dropped_under_warn() {
        let mut config = ParamsConfig::default();
        config.error_handling.unknown_option = ErrorPolicy::Warn;
        let options = validate_with(&config, Shape::Zero, &["--from=a", "--help"]).unwrap();
        assert!(!options.contains_key("from"));
        assert!(options.contains_key("help"));
    }

    #[test]
    fn test_user_variables_only_where_allowed() {
        let options = validate(Shape::Two, &["--uv-proj=x"]).unwrap();
        assert_eq!(options.get("uv-proj"), Some(&OptionValue::Text("x".to_string())));

        let error = validate(Shape::Zero, &["--uv-proj=x"]).unwrap_err();
        assert_eq!(error.code(), ErrorCode::UnknownOption);
    }

    #[test]
    fn test_duplicates_last_wins_by_default() {
        let options = validate(Shape::Two, &["--from=a", "-f=b"]).unwrap();
        assert_eq!(options.get("from"), Some(&OptionValue::Text("b".to_string())));
    }

    #[test]
    fn test_duplicates_rejected_under_error_policy() {
        let mut config = ParamsConfig::default();
        config.error_handling.duplicate_option = ErrorPolicy::Error;
        let error = validate_with(&config, Shape::Two, &["--from=a", "-f=b"]).unwrap_err();
        assert_eq!(error, Error::DuplicateOption("from".to_string()));
        assert_eq!(error.code(), ErrorCode::InvalidOption);
    }

    #[test]
    fn test_empty_value_policy() {
        let error = validate(Shape::Two, &["--from="]).unwrap_err();
        assert_eq!(error.to_string(), "Empty value not allowed for option: from");

        let mut config = ParamsConfig::default();
        config.error_handling.empty_value = ErrorPolicy::Ignore;
        let options = validate_with(&config, Shape::Two, &["--from="]).unwrap();
        assert_eq!(options.get("from"), Some(&OptionValue::Text(String::new())));
    }

    #[test]
    fn test_value_option_without_value() {
        let error = validate(Shape::Two, &["--from"]).unwrap_err();
        assert_eq!(error, Error::MissingOptionValue("from".to_string()));
        assert_eq!(error.code(), ErrorCode::MissingValueForOption);
    }

    #[test]
    fn test_switch_becomes_true() {
        let mut config = ParamsConfig::default();
        config.validation.one.allowed_options.push("dry-run".to_string());
        let options = validate_with(&config, Shape::One, &["--dry-run"]).unwrap();
        assert_eq!(options.get("dry-run"), Some(&OptionValue::Bool(true)));
    }

    #[test]
    fn test_required_options() {
        let mut config = ParamsConfig::default();
        config.validation.two.required_options.push("from".to_string());
        let error = validate_with(&config, Shape::Two, &["--destination=b"]).unwrap_err();
        assert_eq!(error, Error::MissingRequiredOption("from".to_string()));
        assert_eq!(error.code(), ErrorCode::MissingRequiredArgument);

        assert!(validate_with(&config, Shape::Two, &["--from=a"]).is_ok());
    }

    #[test]
    fn test_unknown_checked_before_empty_value() {
        let error = validate(Shape::Two, &["--from=", "--bogus=1"]).unwrap_err();
        assert_eq!(error.code(), ErrorCode::UnknownOption);
    }
}
