//! Clap argument definitions for the `apidex` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "apidex")]
#[command(about = "Symbol search for generated API reference sites")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared flags that narrow a search.
#[derive(Args, Debug, Clone, Default)]
pub struct SearchParamsArgs {
    /// Maximum display keys to return [default: 40]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Limit results to a symbol kind: type, function, member, namespace, constant
    /// (can be specified multiple times)
    #[arg(short = 'k', long = "kind")]
    pub kinds: Vec<String>,
}

/// Output format flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output in JSON format
    #[arg(long, conflicts_with = "html")]
    pub json: bool,

    /// Output an HTML fragment
    #[arg(long)]
    pub html: bool,
}

/// Output format selected by [`OutputArgs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Colored terminal text.
    Terminal,
    /// Pretty-printed JSON.
    Json,
    /// HTML fragment.
    Html,
}

impl OutputArgs {
    /// The selected output mode.
    pub fn mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.html {
            OutputMode::Html
        } else {
            OutputMode::Terminal
        }
    }
}

/// Arguments for `apidex search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Queries; each is searched separately
    #[arg(required = true)]
    pub queries: Vec<String>,

    #[command(flatten)]
    /// Search parameter overrides.
    pub params: SearchParamsArgs,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `apidex open`.
#[derive(Args, Debug, Clone)]
pub struct OpenCommand {
    /// Query to resolve; the best-ranked group is selected
    pub key: String,

    /// Symbol within the group, counting from 1
    #[arg(short = 'i', long, default_value = "1")]
    pub item: usize,

    /// Result group, counting from 1
    #[arg(short = 'g', long, default_value = "1")]
    pub group: usize,

    #[command(flatten)]
    /// Search parameter overrides.
    pub params: SearchParamsArgs,
}

/// Arguments for `apidex build`.
#[derive(Args, Debug, Clone, Default)]
pub struct BuildCommand {
    /// Doxygen search directory or declarations JSON file, overriding [source] path
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Artifact path, overriding [index] path
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Drop malformed declarations instead of failing
    #[arg(long)]
    pub skip_malformed: bool,
}

/// Arguments for `apidex init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.apidex.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `apidex` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search symbols by name
    #[command(after_help = "\
MATCHING:
  Results are grouped by short name. Names equal to the query come first, then
  names starting with it, then names containing it. Matching ignores case.

EXAMPLES:
  apidex search getLayer
  apidex search init -k function
  apidex search Packet --json
  apidex search layer -n 5 --html")]
    Search(SearchCommand),

    /// Resolve a search result to its page and anchor
    Open(OpenCommand),

    /// Build the index artifact from the configured source
    Build(BuildCommand),

    /// Initialize apidex configuration in current directory
    Init(InitCommand),

    /// Show status and validate configuration
    Status,

    /// Show effective configuration settings
    Config,
}

/// Parses CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use apidex_index::DEFAULT_LIMIT;
    use clap::CommandFactory;

    use super::*;

    /// Gets help text for a subcommand's argument.
    fn get_arg_help(cmd: &clap::Command, subcmd: &str, arg: &str) -> String {
        cmd.get_subcommands()
            .find(|c| c.get_name() == subcmd)
            .and_then(|c| c.get_arguments().find(|a| a.get_id() == arg))
            .and_then(|a| a.get_help().map(|h| h.to_string()))
            .unwrap_or_default()
    }

    #[test]
    fn cli_help_defaults_match_constants() {
        let cmd = Cli::command();
        let limit_help = get_arg_help(&cmd, "search", "limit");
        assert!(
            limit_help.contains(&format!("[default: {DEFAULT_LIMIT}]")),
            "search --limit help should contain default {DEFAULT_LIMIT}: {limit_help}"
        );
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn output_flags_select_mode() {
        let cli = Cli::try_parse_from(["apidex", "search", "get", "--json"]).unwrap();
        let Commands::Search(cmd) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(cmd.output.mode(), OutputMode::Json);
        assert!(Cli::try_parse_from(["apidex", "search", "get", "--json", "--html"]).is_err());
    }

    #[test]
    fn kinds_repeat() {
        let cli =
            Cli::try_parse_from(["apidex", "search", "get", "-k", "member", "--kind", "type"])
                .unwrap();
        let Commands::Search(cmd) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(cmd.params.kinds, vec!["member", "type"]);
    }
}
