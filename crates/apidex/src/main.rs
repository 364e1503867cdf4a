//! Command-line interface for the `apidex` symbol search tool.

use std::{io, process::ExitCode};

use apidex::cli::{
    CommandContext,
    args::{Commands, parse_cli},
    commands,
};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "APIDEX_LOG";

fn main() -> ExitCode {
    init_logging();
    let cli = parse_cli();

    let ctx = if matches!(cli.command, Commands::Init(_)) {
        CommandContext::load_cwd_only()
    } else {
        CommandContext::load()
    };
    let mut ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &mut ctx)
}

/// Installs a stderr subscriber filtered by `APIDEX_LOG` (default `warn`).
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
