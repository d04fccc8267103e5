//! Rendering parse results and mapping them to exit codes.

use breakdown_params_core::{ErrorCategory, ParamsResult};
use itertools::Itertools;

use crate::cli_args::OutputFormat;
use crate::error::Result;

/// Exit code for a result: 0 on success, otherwise by error category.
#[must_use]
pub fn exit_code(result: &ParamsResult) -> u8 {
    match result.error() {
        None => 0,
        Some(info) => match info.category {
            ErrorCategory::Validation => 1,
            ErrorCategory::Syntax => 2,
            ErrorCategory::Configuration => 3,
            ErrorCategory::Security => 4,
        },
    }
}

/// Renders `result` in the requested format.
///
/// # Errors
///
/// Returns an error if YAML serialization fails.
pub fn render(result: &ParamsResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(result)),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(result)?),
    }
}

fn render_text(result: &ParamsResult) -> String {
    let Some(shape) = result.shape() else {
        return match result.error() {
            Some(info) => format!("error ({}): {info}", info.category),
            None => String::new(),
        };
    };

    let mut lines = vec![format!("type: {shape}")];
    if let Some(directive_type) = result.directive_type() {
        lines.push(format!("directive_type: {directive_type}"));
    }
    if let Some(layer_type) = result.layer_type() {
        lines.push(format!("layer_type: {layer_type}"));
    }
    if let Some(options) = result.options() {
        for (key, value) in options.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
            lines.push(format!("--{key}={value}"));
        }
    }

    lines.join("\n")
}
