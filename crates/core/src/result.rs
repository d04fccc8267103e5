//! The discriminated parse result.

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::ErrorInfo;
use crate::shape::Shape;

/// Value of a canonical option.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum OptionValue {
    /// `--key=value`
    Text(String),
    /// Presence of a flag or switch.
    Bool(bool),
    /// `--key` given without `=`, before the option rules decide what it means.
    Absent,
}

impl OptionValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Bool(_) | Self::Absent => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            Self::Text(_) | Self::Absent => None,
        }
    }
}

impl Display for OptionValue {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(value) => formatter.write_str(value),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Absent => Ok(()),
        }
    }
}

/// Canonical key to value, in first-seen order.
pub type OptionMap = IndexMap<String, OptionValue>;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ZeroParams {
    pub options: OptionMap,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OneParam {
    pub directive_type: String,
    pub options: OptionMap,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TwoParams {
    pub directive_type: String,
    pub layer_type: String,
    pub options: OptionMap,
}

/// Outcome of a single parse: exactly one shape, or the first error.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParamsResult {
    Zero(ZeroParams),
    One(OneParam),
    Two(TwoParams),
    Error(ErrorInfo),
}

impl ParamsResult {
    /// The positional shape, or `None` for an error.
    #[must_use]
    pub fn shape(&self) -> Option<Shape> {
        match self {
            Self::Zero(_) => Some(Shape::Zero),
            Self::One(_) => Some(Shape::One),
            Self::Two(_) => Some(Shape::Two),
            Self::Error(_) => None,
        }
    }

    #[must_use]
    pub fn options(&self) -> Option<&OptionMap> {
        match self {
            Self::Zero(params) => Some(&params.options),
            Self::One(params) => Some(&params.options),
            Self::Two(params) => Some(&params.options),
            Self::Error(_) => None,
        }
    }

    #[must_use]
    pub fn directive_type(&self) -> Option<&str> {
        match self {
            Self::One(params) => Some(&params.directive_type),
            Self::Two(params) => Some(&params.directive_type),
            Self::Zero(_) | Self::Error(_) => None,
        }
    }

    #[must_use]
    pub fn layer_type(&self) -> Option<&str> {
        match self {
            Self::Two(params) => Some(&params.layer_type),
            Self::Zero(_) | Self::One(_) | Self::Error(_) => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            Self::Error(info) => Some(info),
            Self::Zero(_) | Self::One(_) | Self::Two(_) => None,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}
