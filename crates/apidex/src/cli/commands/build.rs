//! Implementation of `apidex build`.

use std::process::ExitCode;

use apidex_config::{DEFAULT_INCLUDE_PATTERNS, Source};
use apidex_index::{BuildPolicy, build_with_stats, save_artifact};

use crate::cli::{
    args::BuildCommand,
    context::{CommandContext, read_source_or_failure, source_policy},
    output::{dim, success},
};

/// Reads the source, builds the index, and writes the artifact.
pub fn run(ctx: &CommandContext, cmd: &BuildCommand) -> ExitCode {
    let source = match resolve_source(ctx, cmd) {
        Ok(source) => source,
        Err(code) => return code,
    };
    let path = match &cmd.output {
        Some(path) => ctx.cwd.join(path),
        None => match ctx.artifact_path() {
            Ok(path) => path,
            Err(code) => return code,
        },
    };

    let data = match read_source_or_failure(&source) {
        Ok(data) => data,
        Err(code) => return code,
    };
    let policy = if cmd.skip_malformed {
        BuildPolicy::SkipMalformed
    } else {
        source_policy(&source)
    };

    let (index, stats) = match build_with_stats(&data.declarations, policy) {
        Ok(built) => built,
        Err(e) => {
            eprintln!("error: indexing failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = save_artifact(&index, &path, Some(&data.fingerprint)) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    println!(
        "{} {} entries, {} symbols from {} file(s)",
        success("Indexed"),
        stats.entries,
        stats.symbols,
        data.files_read
    );
    if stats.skipped > 0 {
        println!(
            "   {}",
            dim(&format!("skipped {} malformed declaration(s)", stats.skipped))
        );
    }
    println!("   {}", dim(&format!("-> {}", path.display())));

    ExitCode::SUCCESS
}

/// The configured source, with `--source` replacing its path.
fn resolve_source(ctx: &CommandContext, cmd: &BuildCommand) -> Result<Source, ExitCode> {
    match (&cmd.source, &ctx.config.source) {
        (Some(path), Some(configured)) => Ok(Source {
            path: ctx.cwd.join(path),
            ..configured.clone()
        }),
        (Some(path), None) => Ok(Source {
            path: ctx.cwd.join(path),
            include: DEFAULT_INCLUDE_PATTERNS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            exclude: Vec::new(),
            skip_malformed: false,
        }),
        (None, _) => ctx.require_source(true).cloned(),
    }
}
