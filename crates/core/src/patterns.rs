//! Validation of the directive and layer type positionals.
//!
//! In default mode values are alias-resolved and checked against the fixed
//! [`DIRECTIVE_TYPES`] and [`LAYER_TYPES`] sets. In extended mode the raw value
//! is matched against an operator-supplied regular expression, which is
//! vetted and compiled once when the validator is built.

use indexmap::IndexMap;
use regex::Regex;

use crate::config::{ParamsConfig, PatternRule, ValidationMode, DIRECTIVE_TYPES, LAYER_TYPES};
use crate::error::Error::{
    InvalidDirectiveType, InvalidLayerType, PatternRequired, UnsafePattern, WildcardPattern,
};
use crate::error::{Error, Result};

/// Unrelated values a real type pattern never accepts all of. A pattern
/// matching every one of them is treated as a wildcard.
const WILDCARD_SAMPLES: [&str; 9] = ["a", "Z", "0", "#", "-", " ", "é", "to project", "_x_"];

/// Fragments that may not appear in an operator-supplied pattern.
const UNSAFE_PATTERN_FRAGMENTS: [&str; 7] = [";", "&", "`", ">", "<", "../", "..\\"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Directive,
    Layer,
}

impl Kind {
    fn field(self) -> &'static str {
        match self {
            Self::Directive => "directive_type",
            Self::Layer => "layer_type",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Directive => "directive type",
            Self::Layer => "layer type",
        }
    }

    fn fixed_set(self) -> &'static [&'static str] {
        match self {
            Self::Directive => &DIRECTIVE_TYPES,
            Self::Layer => &LAYER_TYPES,
        }
    }

    fn error(self, value: &str, message: String) -> Error {
        let value = value.to_string();
        match self {
            Self::Directive => InvalidDirectiveType { value, message },
            Self::Layer => InvalidLayerType { value, message },
        }
    }
}

#[derive(Debug)]
enum Matcher {
    Fixed { aliases: IndexMap<String, String> },
    Pattern(Regex),
}

#[derive(Debug)]
struct TypeValidator {
    kind: Kind,
    matcher: Matcher,
    error_message: Option<String>,
}

impl TypeValidator {
    fn new(
        kind: Kind,
        mode: ValidationMode,
        rule: &PatternRule,
        aliases: &IndexMap<String, String>,
    ) -> Result<Self> {
        let matcher = match mode {
            ValidationMode::Default => Matcher::Fixed {
                aliases: aliases.clone(),
            },
            ValidationMode::Extended => Matcher::Pattern(compile_pattern(kind.field(), &rule.pattern)?),
        };

        Ok(Self {
            kind,
            matcher,
            error_message: rule.error_message.clone(),
        })
    }

    fn validate(&self, value: String) -> Result<String> {
        match &self.matcher {
            Matcher::Fixed { aliases } => {
                let resolved = aliases.get(&value).cloned().unwrap_or(value);
                if self.kind.fixed_set().contains(&resolved.as_str()) {
                    Ok(resolved)
                } else {
                    let message = self.error_message.clone().unwrap_or_else(|| {
                        format!(
                            "Invalid {}: {}. Must be one of: {}",
                            self.kind.label(),
                            resolved,
                            self.kind.fixed_set().join(", ")
                        )
                    });
                    Err(self.kind.error(&resolved, message))
                }
            }
            Matcher::Pattern(pattern) => {
                if pattern.is_match(&value) {
                    Ok(value)
                } else {
                    let message = self.error_message.clone().unwrap_or_else(|| {
                        format!(
                            "Invalid {}: {}. Must match pattern {}",
                            self.kind.label(),
                            value,
                            pattern.as_str()
                        )
                    });
                    Err(self.kind.error(&value, message))
                }
            }
        }
    }
}

/// Vets and compiles an operator-supplied pattern.
///
/// # Errors
///
/// Returns an error if the pattern is empty, contains a forbidden fragment,
/// does not compile, or accepts arbitrary values.
pub fn compile_pattern(field: &str, pattern: &str) -> Result<Regex> {
    if pattern.trim().is_empty() {
        return Err(PatternRequired(field.to_string()));
    }

    if let Some(fragment) = UNSAFE_PATTERN_FRAGMENTS
        .iter()
        .find(|fragment| pattern.contains(*fragment))
    {
        return Err(UnsafePattern {
            field: field.to_string(),
            pattern: pattern.to_string(),
            fragment: (*fragment).to_string(),
        });
    }

    let regex = Regex::new(pattern).map_err(|e| Error::pattern_compile(field, pattern, &e))?;

    if WILDCARD_SAMPLES.iter().all(|sample| regex.is_match(sample)) {
        return Err(WildcardPattern {
            field: field.to_string(),
            pattern: pattern.to_string(),
        });
    }

    Ok(regex)
}

/// Validates directive and layer type values for one parser configuration.
#[derive(Debug)]
pub struct PatternValidator {
    directive: TypeValidator,
    layer: TypeValidator,
}

impl PatternValidator {
    /// Builds the validator, compiling patterns in extended mode.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unusable extended-mode pattern.
    pub fn new(config: &ParamsConfig) -> Result<Self> {
        Ok(Self {
            directive: TypeValidator::new(
                Kind::Directive,
                config.mode,
                &config.directive_type,
                &config.directive_type_aliases,
            )?,
            layer: TypeValidator::new(
                Kind::Layer,
                config.mode,
                &config.layer_type,
                &config.layer_type_aliases,
            )?,
        })
    }

    /// Returns the accepted directive type, alias-resolved in default mode.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDirectiveType`] when the value is rejected.
    pub fn validate_directive_type(&self, value: String) -> Result<String> {
        self.directive.validate(value)
    }

    /// Returns the accepted layer type, alias-resolved in default mode.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidLayerType`] when the value is rejected.
    pub fn validate_layer_type(&self, value: String) -> Result<String> {
        self.layer.validate(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCategory, ErrorCode};

    fn extended(directive: &str, layer: &str) -> ParamsConfig {
        let mut config = ParamsConfig::default();
        config.mode = ValidationMode::Extended;
        config.directive_type.pattern = directive.to_string();
        config.layer_type.pattern = layer.to_string();
        config
    }

    #[test]
    fn test_default_mode_fixed_sets() {
        let validator = PatternValidator::new(&ParamsConfig::default()).unwrap();
        for directive in DIRECTIVE_TYPES {
            assert_eq!(validator.validate_directive_type(directive.to_string()).unwrap(), directive);
        }
        for layer in LAYER_TYPES {
            assert_eq!(validator.validate_layer_type(layer.to_string()).unwrap(), layer);
        }
    }

    #[test]
    fn test_default_mode_layer_aliases() {
        let validator = PatternValidator::new(&ParamsConfig::default()).unwrap();
        let resolve = |value: &str| validator.validate_layer_type(value.to_string()).unwrap();
        assert_eq!(resolve("pj"), "project");
        assert_eq!(resolve("story"), "issue");
        for alias in ["todo", "chore", "style", "fix", "error", "bug"] {
            assert_eq!(resolve(alias), "task");
        }
    }

    #[test]
    fn test_default_mode_rejects_unknown() {
        let validator = PatternValidator::new(&ParamsConfig::default()).unwrap();
        let error = validator.validate_directive_type("init".to_string()).unwrap_err();
        assert_eq!(error.code(), ErrorCode::InvalidDemonstrativeType);
        assert_eq!(error.category(), ErrorCategory::Validation);
        assert!(error.to_string().contains("to, summary, defect"));

        let error = validator.validate_layer_type("epic".to_string()).unwrap_err();
        assert_eq!(error.code(), ErrorCode::InvalidLayerType);
    }

    #[test]
    fn test_configured_message_used() {
        let mut config = ParamsConfig::default();
        config.directive_type.error_message = Some("Unsupported directive".to_string());
        let validator = PatternValidator::new(&config).unwrap();
        let error = validator.validate_directive_type("x".to_string()).unwrap_err();
        assert_eq!(error.to_string(), "Unsupported directive");
    }

    #[test]
    fn test_extended_mode_uses_raw_value() {
        let validator = PatternValidator::new(&extended("^[a-z]+$", "^(project|pj)$")).unwrap();
        assert_eq!(validator.validate_directive_type("init".to_string()).unwrap(), "init");
        // No alias substitution in extended mode.
        assert_eq!(validator.validate_layer_type("pj".to_string()).unwrap(), "pj");
        assert!(validator.validate_directive_type("Init1".to_string()).is_err());
    }

    #[test]
    fn test_extended_mode_rejects_bad_patterns() {
        let error = PatternValidator::new(&extended("  ", "^x$")).unwrap_err();
        assert_eq!(error.code(), ErrorCode::InvalidConfig);
        assert_eq!(error.category(), ErrorCategory::Configuration);

        let error = PatternValidator::new(&extended("^x$", ".*")).unwrap_err();
        assert!(matches!(error, Error::WildcardPattern { .. }));

        let error = PatternValidator::new(&extended("^a;b$", "^x$")).unwrap_err();
        assert!(matches!(error, Error::UnsafePattern { .. }));

        let error = PatternValidator::new(&extended("^(unclosed$", "^x$")).unwrap_err();
        assert_eq!(error.code(), ErrorCode::InvalidPattern);
    }

    #[test]
    fn test_wildcard_equivalents_rejected() {
        for pattern in [".*", "^.*$", "(.*)", ".+", "^.+$", "(?s).*", "[a-z]*", "^(.*)$", ".?"] {
            let error = compile_pattern("directive_type", pattern).unwrap_err();
            assert!(matches!(error, Error::WildcardPattern { .. }), "{pattern}");
            assert_eq!(error.code(), ErrorCode::InvalidPattern);
        }
    }

    #[test]
    fn test_restrictive_patterns_accepted() {
        for pattern in ["^[a-z]+$", "^(to|summary|defect)$", "^[A-Za-z0-9_-]+$", "proj"] {
            assert!(compile_pattern("layer_type", pattern).is_ok(), "{pattern}");
        }
    }

    #[test]
    fn test_default_mode_ignores_pattern_text() {
        let mut config = ParamsConfig::default();
        config.directive_type.pattern = String::new();
        assert!(PatternValidator::new(&config).is_ok());
    }
}
