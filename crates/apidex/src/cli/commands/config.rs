//! Implementation of `apidex config`.

use std::process::ExitCode;

use apidex_highlight::Highlighter;

use crate::cli::context::CommandContext;

/// Shows effective configuration settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let toml = match ctx.config.settings_to_toml() {
        Ok(toml) => toml,
        Err(e) => {
            eprintln!("error: failed to serialize settings: {e}");
            return ExitCode::FAILURE;
        }
    };
    let highlighter = Highlighter::new();
    print!("{}", highlighter.highlight_toml(&toml));
    ExitCode::SUCCESS
}
