use std::process::ExitCode;

use breakdown_params_core::{parse, ParamsResult};
use clap::Parser;
use log::{debug, info};

use breakdown_params_cli::cli_args::Args;
use breakdown_params_cli::config_file::load_overrides;
use breakdown_params_cli::error::Result;
use breakdown_params_cli::output::{exit_code, render};

fn execute(args: &Args) -> Result<ParamsResult> {
    let overrides = load_overrides(args)?;
    debug!("Configuration overrides: {overrides:?}");

    // Configuration errors come back as an error result, after the security check
    let result = parse(&args.arguments, Some(&overrides));

    info!("Classified {} arguments", args.arguments.len());
    Ok(result)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let result = match execute(&args) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match render(&result, args.output) {
        Ok(rendered) if result.is_error() => eprintln!("{rendered}"),
        Ok(rendered) => println!("{rendered}"),
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::from(exit_code(&result))
}
