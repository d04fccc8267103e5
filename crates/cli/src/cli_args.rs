//! Command-line argument parsing for the `bp` front end.
//!
//! The front end's own options are parsed with `clap`; everything after them
//! (conventionally after `--`) is handed to the core parser untouched.

use clap::{Parser, ValueEnum};

/// How a parse result is printed.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Yaml,
}

/// Command-line arguments for the breakdown-params CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use breakdown_params_cli::cli_args::Args;
///
/// let args = Args::parse_from(["bp", "--", "to", "project", "--from=a.md"]);
/// assert_eq!(args.arguments, vec!["to", "project", "--from=a.md"]);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to a YAML file with configuration overrides.
    ///
    /// If not provided, `~/.breakdown-params/config.yml` is used when it exists.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Validate positionals against regular expressions instead of the fixed type sets.
    #[arg(long, short = 'e', action)]
    pub extended: bool,

    /// Regular expression for the directive type (extended mode).
    #[arg(long)]
    pub directive_pattern: Option<String>,

    /// Regular expression for the layer type (extended mode).
    #[arg(long)]
    pub layer_pattern: Option<String>,

    /// Output format for the parse result.
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// The arguments to classify and validate.
    ///
    /// Separate them from the options above with `--`.
    ///
    /// # Examples
    /// ```bash
    /// bp -- to project --from=input.md --uv-owner=me
    /// ```
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub arguments: Vec<String>,
}
