//! Error taxonomy for the parameter pipeline.
//!
//! Every failure the pipeline can produce is a variant of [`Error`]. Each
//! variant maps onto a stable [`ErrorCode`] and an [`ErrorCategory`], and its
//! `Display` text is the end-user message carried by [`ErrorInfo`].

use std::fmt::{Display, Formatter};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Security error: argument `{}` contains forbidden sequence `{}`", .argument, .fragment)]
    ForbiddenSequence { argument: String, fragment: String },

    #[error("Invalid option format: `{}`", .0)]
    BareOptionMarker(String),

    #[error("Invalid option format: `{}` has no option name", .0)]
    EmptyOptionName(String),

    #[error("Short options are not supported: `{}`", .0)]
    ShortOptionsDisabled(String),

    #[error("Flag option `--{}` does not accept a value", .0)]
    FlagWithValue(String),

    #[error("User variables must use the `--uv-<name>=<value>` form: `{}`", .0)]
    ShortUserVariable(String),

    #[error("Too many arguments: expected at most {}, got {}", .max, .count)]
    TooManyArguments { count: usize, max: usize },

    #[error("Empty argument at position {}", .0)]
    EmptyArgument(usize),

    #[error("{}", .message)]
    InvalidDirectiveType { value: String, message: String },

    #[error("{}", .message)]
    InvalidLayerType { value: String, message: String },

    #[error("Unknown option for {} parameters: `--{}`", .shape, .key)]
    UnknownOption { key: String, shape: String },

    #[error("Duplicate option: `--{}`", .0)]
    DuplicateOption(String),

    #[error("Missing required option: `--{}`", .0)]
    MissingRequiredOption(String),

    #[error("Missing value for option: `--{}` (use `--{}=<value>`)", .0, .0)]
    MissingOptionValue(String),

    #[error("Empty value not allowed for option: {}", .0)]
    EmptyOptionValue(String),

    #[error("Invalid custom variable name: `--{}`", .0)]
    InvalidUserVariableName(String),

    #[error("Missing value for custom variable: `--{}`", .0)]
    MissingUserVariableValue(String),

    #[error("Empty value not allowed for option: {}", .0)]
    EmptyUserVariableValue(String),

    #[error("Value of custom variable `--{}` exceeds {} characters", .key, .max)]
    UserVariableValueTooLong { key: String, max: usize },

    #[error("Pattern required for {}", .0)]
    PatternRequired(String),

    #[error("Pattern `{}` for {} matches everything", .pattern, .field)]
    WildcardPattern { field: String, pattern: String },

    #[error("Pattern `{}` for {} contains forbidden sequence `{}`", .pattern, .field, .fragment)]
    UnsafePattern {
        field: String,
        pattern: String,
        fragment: String,
    },

    #[error("Invalid pattern `{}` for {}: {}", .pattern, .field, .reason)]
    PatternCompile {
        field: String,
        pattern: String,
        reason: String,
    },

    #[error("Invalid configuration: {}", .0)]
    InvalidConfig(String),
}

impl Error {
    pub fn unknown_option(key: &str, shape: impl Display) -> Self {
        Self::UnknownOption {
            key: key.to_string(),
            shape: shape.to_string(),
        }
    }

    pub fn pattern_compile(field: &str, pattern: &str, original: &regex::Error) -> Self {
        Self::PatternCompile {
            field: field.to_string(),
            pattern: pattern.to_string(),
            reason: original.to_string(),
        }
    }

    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ForbiddenSequence { .. } => ErrorCode::SecurityError,
            Self::BareOptionMarker(_)
            | Self::EmptyOptionName(_)
            | Self::ShortOptionsDisabled(_)
            | Self::FlagWithValue(_)
            | Self::ShortUserVariable(_)
            | Self::DuplicateOption(_) => ErrorCode::InvalidOption,
            Self::TooManyArguments { .. } => ErrorCode::TooManyArguments,
            Self::EmptyArgument(_) => ErrorCode::InvalidCommand,
            Self::InvalidDirectiveType { .. } => ErrorCode::InvalidDemonstrativeType,
            Self::InvalidLayerType { .. } => ErrorCode::InvalidLayerType,
            Self::UnknownOption { .. } => ErrorCode::UnknownOption,
            Self::MissingRequiredOption(_) => ErrorCode::MissingRequiredArgument,
            Self::MissingOptionValue(_) | Self::EmptyOptionValue(_) => {
                ErrorCode::MissingValueForOption
            }
            Self::InvalidUserVariableName(_) => ErrorCode::InvalidCustomVariableName,
            Self::MissingUserVariableValue(_)
            | Self::EmptyUserVariableValue(_)
            | Self::UserVariableValueTooLong { .. } => ErrorCode::InvalidCustomVariable,
            Self::PatternRequired(_) | Self::InvalidConfig(_) => ErrorCode::InvalidConfig,
            Self::WildcardPattern { .. }
            | Self::UnsafePattern { .. }
            | Self::PatternCompile { .. } => ErrorCode::InvalidPattern,
        }
    }

    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ForbiddenSequence { .. } => ErrorCategory::Security,
            Self::BareOptionMarker(_)
            | Self::EmptyOptionName(_)
            | Self::ShortOptionsDisabled(_)
            | Self::FlagWithValue(_)
            | Self::ShortUserVariable(_)
            | Self::TooManyArguments { .. }
            | Self::EmptyArgument(_) => ErrorCategory::Syntax,
            Self::InvalidDirectiveType { .. }
            | Self::InvalidLayerType { .. }
            | Self::UnknownOption { .. }
            | Self::DuplicateOption(_)
            | Self::MissingRequiredOption(_)
            | Self::MissingOptionValue(_)
            | Self::EmptyOptionValue(_)
            | Self::InvalidUserVariableName(_)
            | Self::MissingUserVariableValue(_)
            | Self::EmptyUserVariableValue(_)
            | Self::UserVariableValueTooLong { .. } => ErrorCategory::Validation,
            Self::PatternRequired(_)
            | Self::WildcardPattern { .. }
            | Self::UnsafePattern { .. }
            | Self::PatternCompile { .. }
            | Self::InvalidConfig(_) => ErrorCategory::Configuration,
        }
    }
}

/// Stable, programmatically matchable error codes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidCommand,
    InvalidDemonstrativeType,
    InvalidLayerType,
    TooManyArguments,
    MissingRequiredArgument,
    InvalidOption,
    UnknownOption,
    MissingValueForOption,
    InvalidCustomVariable,
    InvalidCustomVariableName,
    SecurityError,
    InvalidConfig,
    InvalidPattern,
}

impl ErrorCode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidCommand => "INVALID_COMMAND",
            Self::InvalidDemonstrativeType => "INVALID_DEMONSTRATIVE_TYPE",
            Self::InvalidLayerType => "INVALID_LAYER_TYPE",
            Self::TooManyArguments => "TOO_MANY_ARGUMENTS",
            Self::MissingRequiredArgument => "MISSING_REQUIRED_ARGUMENT",
            Self::InvalidOption => "INVALID_OPTION",
            Self::UnknownOption => "UNKNOWN_OPTION",
            Self::MissingValueForOption => "MISSING_VALUE_FOR_OPTION",
            Self::InvalidCustomVariable => "INVALID_CUSTOM_VARIABLE",
            Self::InvalidCustomVariableName => "INVALID_CUSTOM_VARIABLE_NAME",
            Self::SecurityError => "SECURITY_ERROR",
            Self::InvalidConfig => "INVALID_CONFIG",
            Self::InvalidPattern => "INVALID_PATTERN",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Security,
    Syntax,
    Validation,
    Configuration,
}

impl Display for ErrorCategory {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Security => "security",
            Self::Syntax => "syntax",
            Self::Validation => "validation",
            Self::Configuration => "configuration",
        };
        formatter.write_str(name)
    }
}

/// The error payload of a failed parse, displayable to end users as-is.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub message: String,
    pub code: ErrorCode,
    pub category: ErrorCategory,
}

impl From<&Error> for ErrorInfo {
    fn from(error: &Error) -> Self {
        Self {
            message: error.to_string(),
            code: error.code(),
            category: error.category(),
        }
    }
}

impl From<Error> for ErrorInfo {
    fn from(error: Error) -> Self {
        Self::from(&error)
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "[{}] {}", self.code, self.message)
    }
}

/// How a recoverable finding (empty value, unknown option, duplicate) is treated.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    #[default]
    Error,
    Warn,
    Ignore,
}

impl ErrorPolicy {
    /// Applies the policy to a finding.
    ///
    /// # Errors
    ///
    /// Returns the finding itself when the policy is [`ErrorPolicy::Error`].
    pub fn apply(self, finding: Error) -> Result<()> {
        match self {
            Self::Error => Err(finding),
            Self::Warn => {
                warn!("{finding}");
                Ok(())
            }
            Self::Ignore => {
                debug!("Ignoring: {finding}");
                Ok(())
            }
        }
    }
}
