//! Breakdown Params CLI Library
//!
//! This crate provides the command-line front end for breakdown-params. It
//! reads the raw argument list, loads optional configuration overrides from
//! disk, hands the arguments to the core parser and renders the result.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line parsing of the front end's own options
//! - [`config_file`]: YAML configuration overrides and CLI flag layering
//! - [`output`]: Text/YAML rendering and exit-code mapping
//!
//! # Examples
//!
//! ```bash
//! # Two parameters with options and a user variable
//! bp -- to project --from=input.md -o=output.md --uv-owner=me
//!
//! # Extended mode with operator-supplied patterns
//! bp --extended --directive-pattern '^(init|find)$' --layer-pattern '^[a-z]+$' -- find bugs
//!
//! # YAML output
//! bp -o yaml -- summary issue
//! ```

pub mod cli_args;
pub mod config_file;
pub mod error;
pub mod output;
