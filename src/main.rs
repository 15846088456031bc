use std::process::ExitCode;

use clap::Parser;
use el_udf::cli::Cli;
use el_udf::{FilterConfig, execute, init_tracing};
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let base = match cli.config.as_deref() {
        Some(path) => match FilterConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                error!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => FilterConfig::default(),
    };
    let config = base.with_overrides(cli.input_encoding, cli.on_error);

    let (kind, files) = cli.command.into_parts();
    execute(kind, &config, &files)
}
