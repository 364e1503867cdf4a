//! CLI support for the `apidex` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod output;
pub mod source;

pub use context::CommandContext;
