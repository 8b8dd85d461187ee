use std::process::ExitCode;

use conf2struct::{ClapArguments, config, runner::run_main};
use tracing_subscriber::EnvFilter;

/// Parses the command line and prints the resulting configuration.
#[config(path = "eg.toml", export = false)]
struct EgConfig;

fn main() -> ExitCode {
    // stdout carries the configuration dump only.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    run_main(&ClapArguments::<EgConfig>::new())
}
