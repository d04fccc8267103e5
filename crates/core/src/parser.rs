//! The classification and validation pipeline.
//!
//! A [`ParamsParser`] owns one resolved configuration and the validators
//! compiled from it. It is immutable, so one instance can serve concurrent
//! callers, and parsers with different configurations never share state.

use log::debug;

use crate::config::{ConfigOverrides, ParamsConfig};
use crate::error::{ErrorInfo, Result};
use crate::options::OptionRuleValidator;
use crate::patterns::PatternValidator;
use crate::result::{OneParam, ParamsResult, TwoParams, ZeroParams};
use crate::security;
use crate::shape::{self, Positionals};
use crate::tokenizer::Tokenizer;
use crate::user_variables::UserVariableValidator;

#[derive(Debug)]
pub struct ParamsParser {
    config: ParamsConfig,
    patterns: PatternValidator,
    user_variables: UserVariableValidator,
}

impl ParamsParser {
    /// Builds a parser from a resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the configuration is inconsistent or
    /// one of its patterns cannot be used.
    pub fn new(config: ParamsConfig) -> Result<Self> {
        config.validate()?;
        let patterns = PatternValidator::new(&config)?;
        let user_variables = UserVariableValidator::new(&config)?;

        Ok(Self {
            config,
            patterns,
            user_variables,
        })
    }

    /// Resolves `overrides` onto the defaults and builds a parser from them.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if resolution or construction fails.
    pub fn from_overrides(overrides: &ConfigOverrides) -> Result<Self> {
        Self::new(overrides.resolve()?)
    }

    #[must_use]
    pub fn config(&self) -> &ParamsConfig {
        &self.config
    }

    /// Parses `args` into exactly one [`ParamsResult`].
    pub fn parse<S: AsRef<str>>(&self, args: &[S]) -> ParamsResult {
        match security::check_arguments(args) {
            Ok(()) => self.parse_checked(args),
            Err(e) => failure(e.into()),
        }
    }

    /// Runs every stage after the security filter.
    fn parse_checked<S: AsRef<str>>(&self, args: &[S]) -> ParamsResult {
        self.run(args).unwrap_or_else(|e| failure(e.into()))
    }

    fn run<S: AsRef<str>>(&self, args: &[S]) -> Result<ParamsResult> {
        let tokens = Tokenizer::new(&self.config).tokenize(args);
        let positionals = shape::classify(tokens.positionals.clone())?;
        tokens.check_syntax()?;

        let positionals = match positionals {
            Positionals::Zero => Positionals::Zero,
            Positionals::One { directive_type } => Positionals::One {
                directive_type: self.patterns.validate_directive_type(directive_type)?,
            },
            Positionals::Two {
                directive_type,
                layer_type,
            } => {
                let directive_type = self.patterns.validate_directive_type(directive_type)?;
                let layer_type = self.patterns.validate_layer_type(layer_type)?;
                Positionals::Two {
                    directive_type,
                    layer_type,
                }
            }
        };

        let shape = positionals.shape();
        debug!("Classified arguments as {shape} parameters");
        let options = OptionRuleValidator::new(&self.config).validate(shape, &tokens)?;

        if self.config.validation.for_shape(shape).allow_user_variables {
            self.user_variables.validate(&options)?;
        }

        Ok(match positionals {
            Positionals::Zero => ParamsResult::Zero(ZeroParams { options }),
            Positionals::One { directive_type } => ParamsResult::One(OneParam {
                directive_type,
                options,
            }),
            Positionals::Two {
                directive_type,
                layer_type,
            } => ParamsResult::Two(TwoParams {
                directive_type,
                layer_type,
                options,
            }),
        })
    }
}

fn failure(info: ErrorInfo) -> ParamsResult {
    debug!("Parameter parsing failed: {info}");
    ParamsResult::Error(info)
}

/// Parses `args` with the default configuration, or with `overrides` applied.
///
/// The security filter runs before the configuration is resolved, so
/// dangerous input is rejected even when the configuration is also invalid.
pub fn parse<S: AsRef<str>>(args: &[S], overrides: Option<&ConfigOverrides>) -> ParamsResult {
    if let Err(e) = security::check_arguments(args) {
        return failure(e.into());
    }

    let parser = match overrides {
        Some(overrides) => ParamsParser::from_overrides(overrides),
        None => ParamsParser::new(ParamsConfig::default()),
    };

    match parser {
        Ok(parser) => parser.parse_checked(args),
        Err(e) => failure(e.into()),
    }
}
