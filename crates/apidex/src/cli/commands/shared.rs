//! Shared helpers for command implementations.

use std::{process::ExitCode, time::Duration};

use apidex_index::KindFilter;
use apidex_present::PresenterOptions;

use crate::cli::{args::SearchParamsArgs, context::CommandContext};

/// Builds presenter options by applying CLI overrides to the configured settings.
///
/// Searches run on submit, so the configured debounce interval is replaced with zero.
pub fn presenter_options(
    ctx: &CommandContext,
    params: &SearchParamsArgs,
) -> Result<PresenterOptions, ExitCode> {
    let options = PresenterOptions::from_config(&ctx.config).map_err(|e| {
        eprintln!("error: invalid [search] settings: {e}");
        ExitCode::FAILURE
    })?;
    let mut search = options.search;

    if let Some(limit) = params.limit {
        search = search.with_limit(limit);
    }
    if !params.kinds.is_empty() {
        let kinds = KindFilter::parse_list(params.kinds.as_slice()).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?;
        search = search.with_kinds(kinds);
    }

    Ok(PresenterOptions {
        search,
        debounce: Duration::ZERO,
    })
}
