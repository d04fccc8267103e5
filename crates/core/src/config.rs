//! Parser configuration and the override resolver.
//!
//! [`ParamsConfig`] is the fully resolved, immutable configuration a
//! [`crate::parser::ParamsParser`] is built from. Callers usually start from
//! [`ParamsConfig::default`] or resolve a partial [`ConfigOverrides`] onto it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Error::InvalidConfig;
use crate::error::{ErrorPolicy, Result};
use crate::shape::Shape;

/// Prefix identifying user variable options (`--uv-<name>=<value>`).
pub const USER_VARIABLE_PREFIX: &str = "uv-";

/// Default pattern a full user variable key must match.
pub const DEFAULT_USER_VARIABLE_NAME_PATTERN: &str = "^uv-[a-zA-Z][a-zA-Z0-9_-]*$";

/// Default upper bound on the length of a user variable value, in characters.
pub const DEFAULT_MAX_USER_VARIABLE_VALUE_LENGTH: usize = 1000;

/// Directive types accepted in default mode.
pub const DIRECTIVE_TYPES: [&str; 3] = ["to", "summary", "defect"];

/// Layer types accepted in default mode.
pub const LAYER_TYPES: [&str; 3] = ["project", "issue", "task"];

const DEFAULT_DIRECTIVE_TYPE_PATTERN: &str = "^(to|summary|defect)$";
const DEFAULT_LAYER_TYPE_PATTERN: &str = "^(project|issue|task)$";

const DEFAULT_LAYER_TYPE_ALIASES: [(&str, &str); 8] = [
    ("pj", "project"),
    ("story", "issue"),
    ("todo", "task"),
    ("chore", "task"),
    ("style", "task"),
    ("fix", "task"),
    ("error", "task"),
    ("bug", "task"),
];

const DEFAULT_SHORT_ALIASES: [(&str, &str); 7] = [
    ("f", "from"),
    ("o", "destination"),
    ("i", "input"),
    ("a", "adaptation"),
    ("c", "config"),
    ("h", "help"),
    ("v", "version"),
];

const DEFAULT_FLAG_OPTIONS: [&str; 2] = ["help", "version"];

const DEFAULT_TWO_VALUE_OPTIONS: [&str; 5] = ["from", "destination", "input", "adaptation", "config"];

/// How positional values are checked.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Aliases are resolved and values must belong to the fixed type sets.
    #[default]
    Default,
    /// Raw values are matched against operator-supplied regular expressions.
    Extended,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PatternRule {
    pub pattern: String,
    pub error_message: Option<String>,
}

impl PatternRule {
    fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            error_message: None,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ShortOptions {
    pub enabled: bool,
    /// Single-character name to canonical long name.
    pub aliases: IndexMap<String, String>,
}

/// Option rules for one positional shape.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ShapeRule {
    /// Options that may appear without a value (flags and switches).
    pub allowed_options: Vec<String>,
    /// Options that take a `--key=value` value.
    pub allowed_value_options: Vec<String>,
    pub allow_user_variables: bool,
    pub required_options: Vec<String>,
}

impl ShapeRule {
    #[must_use]
    pub fn allows(&self, key: &str) -> bool {
        self.allowed_options.iter().any(|name| name == key) || self.takes_value(key)
    }

    #[must_use]
    pub fn takes_value(&self, key: &str) -> bool {
        self.allowed_value_options.iter().any(|name| name == key)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ValidationRules {
    pub zero: ShapeRule,
    pub one: ShapeRule,
    pub two: ShapeRule,
}

impl ValidationRules {
    #[must_use]
    pub fn for_shape(&self, shape: Shape) -> &ShapeRule {
        match shape {
            Shape::Zero => &self.zero,
            Shape::One => &self.one,
            Shape::Two => &self.two,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorHandling {
    pub empty_value: ErrorPolicy,
    pub unknown_option: ErrorPolicy,
    pub duplicate_option: ErrorPolicy,
}

impl Default for ErrorHandling {
    fn default() -> Self {
        Self {
            empty_value: ErrorPolicy::Error,
            unknown_option: ErrorPolicy::Error,
            duplicate_option: ErrorPolicy::Warn,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UserVariableRules {
    pub name_pattern: String,
    pub max_value_length: usize,
}

/// Fully resolved parser configuration.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ParamsConfig {
    pub mode: ValidationMode,
    pub directive_type: PatternRule,
    pub layer_type: PatternRule,
    pub directive_type_aliases: IndexMap<String, String>,
    pub layer_type_aliases: IndexMap<String, String>,
    pub flag_option_names: Vec<String>,
    pub short_options: ShortOptions,
    pub validation: ValidationRules,
    pub error_handling: ErrorHandling,
    pub user_variables: UserVariableRules,
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn table(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs
        .iter()
        .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
        .collect()
}

impl Default for ParamsConfig {
    fn default() -> Self {
        Self {
            mode: ValidationMode::Default,
            directive_type: PatternRule::new(DEFAULT_DIRECTIVE_TYPE_PATTERN),
            layer_type: PatternRule::new(DEFAULT_LAYER_TYPE_PATTERN),
            directive_type_aliases: IndexMap::new(),
            layer_type_aliases: table(&DEFAULT_LAYER_TYPE_ALIASES),
            flag_option_names: names(&DEFAULT_FLAG_OPTIONS),
            short_options: ShortOptions {
                enabled: true,
                aliases: table(&DEFAULT_SHORT_ALIASES),
            },
            validation: ValidationRules {
                zero: ShapeRule {
                    allowed_options: names(&DEFAULT_FLAG_OPTIONS),
                    ..ShapeRule::default()
                },
                one: ShapeRule {
                    allowed_value_options: names(&["config"]),
                    ..ShapeRule::default()
                },
                two: ShapeRule {
                    allowed_value_options: names(&DEFAULT_TWO_VALUE_OPTIONS),
                    allow_user_variables: true,
                    ..ShapeRule::default()
                },
            },
            error_handling: ErrorHandling::default(),
            user_variables: UserVariableRules {
                name_pattern: DEFAULT_USER_VARIABLE_NAME_PATTERN.to_string(),
                max_value_length: DEFAULT_MAX_USER_VARIABLE_VALUE_LENGTH,
            },
        }
    }
}

impl ParamsConfig {
    #[must_use]
    pub fn is_flag(&self, key: &str) -> bool {
        self.flag_option_names.iter().any(|name| name == key)
    }

    /// Checks the structural consistency of the configuration.
    ///
    /// Patterns are not compiled here; that happens when a parser is built.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfig`] if:
    /// - A required option is not allowed by its shape
    /// - A flag option is also a value option or uses the user variable prefix
    /// - A short alias is not a single character or has an empty target
    /// - The user variable value bound is zero
    pub fn validate(&self) -> Result<()> {
        for shape in [Shape::Zero, Shape::One, Shape::Two] {
            let rule = self.validation.for_shape(shape);
            for required in &rule.required_options {
                if !rule.allows(required) {
                    return Err(InvalidConfig(format!(
                        "required option `{required}` is not allowed for {shape} parameters"
                    )));
                }
            }
            for flag in &self.flag_option_names {
                if rule.takes_value(flag) {
                    return Err(InvalidConfig(format!(
                        "flag option `{flag}` is listed as a value option for {shape} parameters"
                    )));
                }
            }
        }

        for flag in &self.flag_option_names {
            if flag.starts_with(USER_VARIABLE_PREFIX) {
                return Err(InvalidConfig(format!(
                    "flag option `{flag}` uses the reserved `{USER_VARIABLE_PREFIX}` prefix"
                )));
            }
        }

        for (short, long) in &self.short_options.aliases {
            if short.chars().count() != 1 {
                return Err(InvalidConfig(format!(
                    "short option alias `{short}` must be a single character"
                )));
            }
            if long.trim().is_empty() {
                return Err(InvalidConfig(format!(
                    "short option alias `{short}` has an empty target"
                )));
            }
        }

        if self.user_variables.max_value_length == 0 {
            return Err(InvalidConfig(
                "user_variables.max_value_length must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PatternOverride {
    pub pattern: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ShortOptionsOverride {
    pub enabled: Option<bool>,
    pub aliases: Option<IndexMap<String, String>>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ShapeRuleOverride {
    pub allowed_options: Option<Vec<String>>,
    pub allowed_value_options: Option<Vec<String>>,
    pub allow_user_variables: Option<bool>,
    pub required_options: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationOverride {
    pub zero: Option<ShapeRuleOverride>,
    pub one: Option<ShapeRuleOverride>,
    pub two: Option<ShapeRuleOverride>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ErrorHandlingOverride {
    pub empty_value: Option<ErrorPolicy>,
    pub unknown_option: Option<ErrorPolicy>,
    pub duplicate_option: Option<ErrorPolicy>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct UserVariablesOverride {
    pub name_pattern: Option<String>,
    pub max_value_length: Option<usize>,
}

/// A partial configuration; every field left out keeps its default.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub mode: Option<ValidationMode>,
    pub directive_type: Option<PatternOverride>,
    pub layer_type: Option<PatternOverride>,
    pub directive_type_aliases: Option<IndexMap<String, String>>,
    pub layer_type_aliases: Option<IndexMap<String, String>>,
    pub flag_option_names: Option<Vec<String>>,
    pub short_options: Option<ShortOptionsOverride>,
    pub validation: Option<ValidationOverride>,
    pub error_handling: Option<ErrorHandlingOverride>,
    pub user_variables: Option<UserVariablesOverride>,
}

fn apply<T: Clone>(target: &mut T, value: Option<&T>) {
    if let Some(value) = value {
        target.clone_from(value);
    }
}

fn apply_pattern(target: &mut PatternRule, value: Option<&PatternOverride>) {
    if let Some(value) = value {
        apply(&mut target.pattern, value.pattern.as_ref());
        if value.error_message.is_some() {
            target.error_message.clone_from(&value.error_message);
        }
    }
}

fn apply_shape_rule(target: &mut ShapeRule, value: Option<&ShapeRuleOverride>) {
    if let Some(value) = value {
        apply(&mut target.allowed_options, value.allowed_options.as_ref());
        apply(&mut target.allowed_value_options, value.allowed_value_options.as_ref());
        apply(&mut target.allow_user_variables, value.allow_user_variables.as_ref());
        apply(&mut target.required_options, value.required_options.as_ref());
    }
}

fn require_pattern(value: Option<&PatternOverride>, field: &str) -> Result<()> {
    match value.and_then(|rule| rule.pattern.as_ref()) {
        Some(_) => Ok(()),
        None => Err(InvalidConfig(format!(
            "extended mode requires `{field}.pattern` to be supplied"
        ))),
    }
}

impl ConfigOverrides {
    /// Applies these overrides field by field onto the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfig`] if extended mode is selected without both
    /// positional patterns, or if the merged configuration fails
    /// [`ParamsConfig::validate`].
    pub fn resolve(&self) -> Result<ParamsConfig> {
        let mut config = ParamsConfig::default();

        apply(&mut config.mode, self.mode.as_ref());
        if config.mode == ValidationMode::Extended {
            require_pattern(self.directive_type.as_ref(), "directive_type")?;
            require_pattern(self.layer_type.as_ref(), "layer_type")?;
        }

        apply_pattern(&mut config.directive_type, self.directive_type.as_ref());
        apply_pattern(&mut config.layer_type, self.layer_type.as_ref());
        apply(&mut config.directive_type_aliases, self.directive_type_aliases.as_ref());
        apply(&mut config.layer_type_aliases, self.layer_type_aliases.as_ref());
        apply(&mut config.flag_option_names, self.flag_option_names.as_ref());

        if let Some(short_options) = &self.short_options {
            apply(&mut config.short_options.enabled, short_options.enabled.as_ref());
            apply(&mut config.short_options.aliases, short_options.aliases.as_ref());
        }

        if let Some(validation) = &self.validation {
            apply_shape_rule(&mut config.validation.zero, validation.zero.as_ref());
            apply_shape_rule(&mut config.validation.one, validation.one.as_ref());
            apply_shape_rule(&mut config.validation.two, validation.two.as_ref());
        }

        if let Some(error_handling) = &self.error_handling {
            let target = &mut config.error_handling;
            apply(&mut target.empty_value, error_handling.empty_value.as_ref());
            apply(&mut target.unknown_option, error_handling.unknown_option.as_ref());
            apply(&mut target.duplicate_option, error_handling.duplicate_option.as_ref());
        }

        if let Some(user_variables) = &self.user_variables {
            let target = &mut config.user_variables;
            apply(&mut target.name_pattern, user_variables.name_pattern.as_ref());
            apply(&mut target.max_value_length, user_variables.max_value_length.as_ref());
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_default_config_is_valid() {
        let config = ParamsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.mode, ValidationMode::Default);
        assert!(config.validation.two.allow_user_variables);
        assert!(!config.validation.zero.allow_user_variables);
        assert_eq!(config.short_options.aliases.get("f"), Some(&"from".to_string()));
        assert_eq!(config.layer_type_aliases.get("bug"), Some(&"task".to_string()));
    }

    #[test]
    fn test_empty_overrides_resolve_to_defaults() {
        let config = ConfigOverrides::default().resolve().unwrap();
        assert_eq!(config, ParamsConfig::default());
    }

    #[test]
    fn test_partial_overrides_keep_other_defaults() {
        let overrides = ConfigOverrides {
            validation: Some(ValidationOverride {
                two: Some(ShapeRuleOverride {
                    required_options: Some(vec!["from".to_string()]),
                    ..ShapeRuleOverride::default()
                }),
                ..ValidationOverride::default()
            }),
            error_handling: Some(ErrorHandlingOverride {
                empty_value: Some(ErrorPolicy::Ignore),
                ..ErrorHandlingOverride::default()
            }),
            ..ConfigOverrides::default()
        };

        let config = overrides.resolve().unwrap();
        assert_eq!(config.validation.two.required_options, vec!["from"]);
        assert_eq!(config.validation.two.allowed_value_options.len(), 5);
        assert_eq!(config.error_handling.empty_value, ErrorPolicy::Ignore);
        assert_eq!(config.error_handling.unknown_option, ErrorPolicy::Error);
    }

    #[test]
    fn test_error_message_override_keeps_default_pattern() {
        let overrides = ConfigOverrides {
            layer_type: Some(PatternOverride {
                error_message: Some("bad layer".to_string()),
                ..PatternOverride::default()
            }),
            ..ConfigOverrides::default()
        };

        let config = overrides.resolve().unwrap();
        assert_eq!(config.layer_type.pattern, DEFAULT_LAYER_TYPE_PATTERN);
        assert_eq!(config.layer_type.error_message, Some("bad layer".to_string()));
    }

    #[test]
    fn test_extended_mode_requires_patterns() {
        let overrides = ConfigOverrides {
            mode: Some(ValidationMode::Extended),
            directive_type: Some(PatternOverride {
                pattern: Some("^[a-z]+$".to_string()),
                error_message: None,
            }),
            ..ConfigOverrides::default()
        };

        let error = overrides.resolve().unwrap_err();
        assert_eq!(error.code(), ErrorCode::InvalidConfig);
        assert!(error.to_string().contains("layer_type.pattern"));
    }

    #[test]
    fn test_required_option_must_be_allowed() {
        let overrides = ConfigOverrides {
            validation: Some(ValidationOverride {
                zero: Some(ShapeRuleOverride {
                    required_options: Some(vec!["from".to_string()]),
                    ..ShapeRuleOverride::default()
                }),
                ..ValidationOverride::default()
            }),
            ..ConfigOverrides::default()
        };

        assert!(matches!(overrides.resolve(), Err(InvalidConfig(_))));
    }

    #[test]
    fn test_flag_cannot_take_value() {
        let mut config = ParamsConfig::default();
        config.validation.two.allowed_value_options.push("help".to_string());
        assert!(matches!(config.validate(), Err(InvalidConfig(_))));
    }

    #[test]
    fn test_short_alias_must_be_single_character() {
        let mut config = ParamsConfig::default();
        config
            .short_options
            .aliases
            .insert("fr".to_string(), "from".to_string());
        assert!(matches!(config.validate(), Err(InvalidConfig(_))));
    }

    #[test]
    fn test_zero_value_length_rejected() {
        let mut config = ParamsConfig::default();
        config.user_variables.max_value_length = 0;
        assert!(matches!(config.validate(), Err(InvalidConfig(_))));
    }

    #[test]
    fn test_shape_rule_allows() {
        let config = ParamsConfig::default();
        assert!(config.validation.zero.allows("help"));
        assert!(!config.validation.zero.takes_value("help"));
        assert!(config.validation.two.takes_value("destination"));
        assert!(!config.validation.one.allows("from"));
    }
}
