//! Breakdown Params Core Library
//!
//! This crate classifies a command-line argument vector into one of three
//! positional shapes (zero, one or two free arguments) and validates it
//! against a configurable rule set, producing either a typed result or a
//! structured error.
//!
//! # Pipeline
//!
//! Every call runs the same ordered stages and stops at the first failure:
//!
//! 1. [`security`]: shell metacharacters, redirection and path traversal
//! 2. [`tokenizer`]: positionals and canonical `--key=value` options
//! 3. [`shape`]: zero, one, two or too many positionals, then malformed
//!    option tokens recorded by the tokenizer
//! 4. [`patterns`]: directive type, then layer type
//! 5. [`options`]: allowed, duplicate, empty and required options
//! 6. [`user_variables`]: `--uv-<name>=<value>` names and values
//!
//! Configuration lives in [`config`]; results in [`result`]; the error
//! taxonomy in [`error`].
//!
//! # Examples
//!
//! ```
//! use breakdown_params_core::{parse, ParamsResult};
//!
//! let result = parse(&["to", "pj", "--from=input.md"], None);
//! match result {
//!     ParamsResult::Two(params) => {
//!         assert_eq!(params.directive_type, "to");
//!         assert_eq!(params.layer_type, "project");
//!     }
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```
//!
//! A parser built once can be reused, including from several threads:
//!
//! ```
//! use breakdown_params_core::config::ParamsConfig;
//! use breakdown_params_core::ParamsParser;
//!
//! let parser = ParamsParser::new(ParamsConfig::default())?;
//! assert!(parser.parse(&["--help"]).options().is_some());
//! # Ok::<(), breakdown_params_core::error::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod options;
pub mod parser;
pub mod patterns;
pub mod result;
pub mod security;
pub mod shape;
pub mod tokenizer;
pub mod user_variables;

pub use config::{ConfigOverrides, ParamsConfig};
pub use error::{ErrorCategory, ErrorCode, ErrorInfo};
pub use parser::{parse, ParamsParser};
pub use result::{OptionMap, OptionValue, ParamsResult};
