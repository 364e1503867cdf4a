//! Implementation of `apidex search`.

use std::{process::ExitCode, time::Instant};

use apidex_present::{
    IndexHandle, Presenter, PresenterOptions, RecordingNavigator, html::HtmlView,
};

use super::shared::presenter_options;
use crate::cli::{
    args::{OutputMode, SearchCommand},
    context::CommandContext,
    output::{JsonQueryResults, JsonSearchOutput, JsonView, TerminalView},
};

/// Searches the index and prints grouped matches for each query.
pub fn run(ctx: &mut CommandContext, cmd: &SearchCommand) -> ExitCode {
    let options = match presenter_options(ctx, &cmd.params) {
        Ok(options) => options,
        Err(code) => return code,
    };
    let handle = match ctx.index() {
        Ok(handle) => handle,
        Err(code) => return code,
    };
    let base_url = ctx.config.presenter.base_url.clone();

    match cmd.output.mode() {
        OutputMode::Terminal => {
            let view = TerminalView::new(base_url);
            let mut presenter =
                Presenter::new(view, RecordingNavigator::default(), handle, options);
            for (i, query) in cmd.queries.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                presenter.view_mut().set_query(query);
                presenter.submit_now(query.as_str(), Instant::now());
                print!("{}", presenter.view().rendered());
            }
            ExitCode::SUCCESS
        }
        OutputMode::Html => {
            let view = HtmlView::new(base_url);
            let mut presenter =
                Presenter::new(view, RecordingNavigator::default(), handle, options);
            for query in &cmd.queries {
                presenter.submit_now(query.as_str(), Instant::now());
                print!("{}", presenter.view().to_html());
            }
            ExitCode::SUCCESS
        }
        OutputMode::Json => output_json(&cmd.queries, handle, options),
    }
}

/// Prints every query's results as one JSON document.
fn output_json(
    queries: &[String],
    handle: IndexHandle,
    options: PresenterOptions,
) -> ExitCode {
    let mut presenter = Presenter::new(
        JsonView::default(),
        RecordingNavigator::default(),
        handle,
        options,
    );
    let mut output = JsonSearchOutput {
        queries: Vec::with_capacity(queries.len()),
    };
    for query in queries {
        let presentation = presenter.submit_now(query.as_str(), Instant::now());
        let results = presenter.view_mut().take_groups();
        output
            .queries
            .push(JsonQueryResults::new(query, presentation, results));
    }

    match serde_json::to_string_pretty(&output) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}
