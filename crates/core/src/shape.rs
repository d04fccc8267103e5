//! Positional shape classification.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::error::Error::{EmptyArgument, TooManyArguments};
use crate::error::Result;

/// Largest number of positional arguments accepted.
pub const MAX_POSITIONALS: usize = 2;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Zero,
    One,
    Two,
}

impl Display for Shape {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
        };
        formatter.write_str(name)
    }
}

/// Positional values sorted into their shape, before pattern validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Positionals {
    Zero,
    One {
        directive_type: String,
    },
    Two {
        directive_type: String,
        layer_type: String,
    },
}

impl Positionals {
    #[must_use]
    pub fn shape(&self) -> Shape {
        match self {
            Self::Zero => Shape::Zero,
            Self::One { .. } => Shape::One,
            Self::Two { .. } => Shape::Two,
        }
    }
}

/// Classifies positional tokens by count.
///
/// The count check runs first so that too many arguments is reported even
/// when some of them are also empty.
///
/// # Errors
///
/// Returns [`TooManyArguments`] for more than [`MAX_POSITIONALS`] tokens and
/// [`EmptyArgument`] for an empty or whitespace-only token.
pub fn classify(positionals: Vec<String>) -> Result<Positionals> {
    if positionals.len() > MAX_POSITIONALS {
        return Err(TooManyArguments {
            count: positionals.len(),
            max: MAX_POSITIONALS,
        });
    }

    if let Some(position) = positionals.iter().position(|value| value.trim().is_empty()) {
        return Err(EmptyArgument(position + 1));
    }

    let mut values = positionals.into_iter();
    Ok(match (values.next(), values.next()) {
        (None, _) => Positionals::Zero,
        (Some(directive_type), None) => Positionals::One { directive_type },
        (Some(directive_type), Some(layer_type)) => Positionals::Two {
            directive_type,
            layer_type,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_classify_zero() {
        assert_eq!(classify(vec![]).unwrap(), Positionals::Zero);
    }

    #[test]
    fn test_classify_one() {
        let result = classify(strings(&["to"])).unwrap();
        assert_eq!(result.shape(), Shape::One);
        assert_eq!(
            result,
            Positionals::One {
                directive_type: "to".to_string()
            }
        );
    }

    #[test]
    fn test_classify_two_keeps_order() {
        let result = classify(strings(&["summary", "issue"])).unwrap();
        assert_eq!(
            result,
            Positionals::Two {
                directive_type: "summary".to_string(),
                layer_type: "issue".to_string()
            }
        );
    }

    #[test]
    fn test_classify_too_many() {
        let result = classify(strings(&["to", "project", "extra"]));
        assert!(matches!(result, Err(Error::TooManyArguments { count: 3, max: 2 })));
    }

    #[test]
    fn test_too_many_wins_over_empty() {
        let result = classify(strings(&["", "", "", ""]));
        assert!(matches!(result, Err(Error::TooManyArguments { count: 4, .. })));
    }

    #[test]
    fn test_classify_empty_argument() {
        let result = classify(strings(&["to", "  "]));
        assert_eq!(result, Err(Error::EmptyArgument(2)));
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(Shape::Zero.to_string(), "zero");
        assert_eq!(Shape::Two.to_string(), "two");
    }
}
