//! Implementation of `apidex open`.

use std::{process::ExitCode, time::Instant};

use apidex_index::Location;
use apidex_present::{Navigator, Presentation, Presenter};

use super::shared::presenter_options;
use crate::cli::{args::OpenCommand, context::CommandContext, output::JsonView};

/// Prints the link a selection navigates to.
struct PrintNavigator {
    /// Prefix for printed links.
    base_url: Option<String>,
}

impl Navigator for PrintNavigator {
    fn navigate(&mut self, location: &Location) {
        println!("{}", location.href(self.base_url.as_deref()));
    }
}

/// Resolves a result group and item to its page and anchor.
pub fn run(ctx: &mut CommandContext, cmd: &OpenCommand) -> ExitCode {
    let (Some(group), Some(item)) = (cmd.group.checked_sub(1), cmd.item.checked_sub(1)) else {
        eprintln!("error: --group and --item count from 1");
        return ExitCode::FAILURE;
    };
    let options = match presenter_options(ctx, &cmd.params) {
        Ok(options) => options,
        Err(code) => return code,
    };
    let handle = match ctx.index() {
        Ok(handle) => handle,
        Err(code) => return code,
    };
    let navigator = PrintNavigator {
        base_url: ctx.config.presenter.base_url.clone(),
    };

    let mut presenter = Presenter::new(JsonView::default(), navigator, handle, options);
    match presenter.submit_now(cmd.key.as_str(), Instant::now()) {
        Presentation::Rendered(_) => {}
        Presentation::NoMatches | Presentation::Empty => {
            eprintln!("error: no symbol matches '{}'", cmd.key);
            return ExitCode::FAILURE;
        }
        Presentation::Unavailable => {
            eprintln!("error: search unavailable; run 'apidex build' to rebuild the index");
            return ExitCode::FAILURE;
        }
        Presentation::Stale => return ExitCode::FAILURE,
    }

    match presenter.select(group, item) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
