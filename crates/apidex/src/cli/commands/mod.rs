//! Command implementations and dispatch.

pub mod build;
pub mod config;
pub mod init;
pub mod open;
pub mod search;
mod shared;
pub mod status;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &mut CommandContext) -> ExitCode {
    match command {
        Commands::Search(cmd) => search::run(ctx, &cmd),
        Commands::Open(cmd) => open::run(ctx, &cmd),
        Commands::Build(cmd) => build::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Status => status::run(ctx),
        Commands::Config => config::run(ctx),
    }
}
