//! Loading configuration overrides from disk.
//!
//! The core never touches the filesystem; this module reads an optional
//! YAML file into [`ConfigOverrides`] and layers the CLI flags on top.

use std::fs::File;
use std::path::Path;

use breakdown_params_core::config::{ConfigOverrides, PatternOverride, ValidationMode};
use log::debug;

use crate::cli_args::Args;
use crate::error::{Error, Result};

/// Default path for the configuration overrides file
const DEFAULT_CONFIG_PATH: &str = "~/.breakdown-params/config.yml";

const FILE_DESCRIPTION: &str = "configuration";

/// Resolves the configuration file path.
///
/// An explicit path is always returned (after `~` expansion). Without one,
/// the default path is returned only if a file exists there.
///
/// # Examples
///
/// ```
/// use breakdown_params_cli::config_file::get_config_path;
///
/// let custom_path = get_config_path(Some("/path/to/config.yml"));
/// assert_eq!(custom_path, Some("/path/to/config.yml".to_string()));
/// ```
#[must_use]
pub fn get_config_path(config_path_arg: Option<&str>) -> Option<String> {
    match config_path_arg {
        Some(config_path) => Some(shellexpand::tilde(config_path).to_string()),
        None => {
            let default_path = shellexpand::tilde(DEFAULT_CONFIG_PATH).to_string();
            Path::new(&default_path).exists().then_some(default_path)
        }
    }
}

/// Reads configuration overrides from a YAML file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file contains invalid YAML
/// - The YAML names fields the configuration does not have
pub fn read_overrides(path: &str) -> Result<ConfigOverrides> {
    let reader = File::open(path)
        .map_err(|e| Error::io_error(FILE_DESCRIPTION.to_string(), path.to_string(), e))?;

    serde_yaml::from_reader(reader)
        .map_err(|e| Error::yaml_error(FILE_DESCRIPTION.to_string(), path.to_string(), e))
}

fn override_pattern(target: &mut Option<PatternOverride>, pattern: Option<&String>) {
    if let Some(pattern) = pattern {
        target.get_or_insert_with(PatternOverride::default).pattern = Some(pattern.clone());
    }
}

/// Builds the overrides for this invocation: the file (if any), then flags.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be read.
pub fn load_overrides(args: &Args) -> Result<ConfigOverrides> {
    let mut overrides = match get_config_path(args.config_path.as_deref()) {
        Some(path) => {
            debug!("Config path: `{path}`");
            read_overrides(&path)?
        }
        None => ConfigOverrides::default(),
    };

    if args.extended {
        overrides.mode = Some(ValidationMode::Extended);
    }
    override_pattern(&mut overrides.directive_type, args.directive_pattern.as_ref());
    override_pattern(&mut overrides.layer_type, args.layer_pattern.as_ref());

    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_get_config_path_with_custom_path() {
        let result = get_config_path(Some("/custom/path/config.yml"));
        assert_eq!(result, Some("/custom/path/config.yml".to_string()));
    }

    #[test]
    fn test_get_config_path_with_tilde() {
        let result = get_config_path(Some("~/my-config.yml")).unwrap();
        assert!(!result.starts_with('~'));
        assert!(result.ends_with("my-config.yml"));
    }

    #[test]
    fn test_read_overrides_missing_file() {
        let result = read_overrides("/definitely/not/here/config.yml");
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_flags_layer_onto_overrides() {
        let args = Args::parse_from([
            "bp",
            "-c",
            "/definitely/not/here/config.yml",
            "--extended",
            "--layer-pattern",
            "^[a-z]+$",
        ]);
        // The explicit path does not exist, so loading fails.
        assert!(load_overrides(&args).is_err());

        let mut overrides = ConfigOverrides::default();
        override_pattern(&mut overrides.layer_type, args.layer_pattern.as_ref());
        let layer_type = overrides.layer_type.unwrap();
        assert_eq!(layer_type.pattern, Some("^[a-z]+$".to_string()));
        assert!(layer_type.error_message.is_none());
    }
}
