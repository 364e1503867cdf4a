//! Implementation of `apidex status`.

use std::{path::Path, process::ExitCode};

use apidex_config::{ConfigWarning, Source, discover_config_files};
use apidex_index::{
    ArtifactStatus, Index, SymbolKind, artifact_path, detect_artifact_status, load_artifact,
};
use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
    source::read_source,
};

/// Shows configuration files, the source, artifact status, and validation warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);
    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("apidex init")
        );
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Config files:"));
    for path in &config_files {
        println!("   {}", path.display());
    }
    println!();

    let config = &ctx.config;

    println!("{}", subheader("Source:"));
    let fingerprint = match &config.source {
        Some(source) => print_source(source),
        None => {
            println!("   {}", dim("(none defined)"));
            None
        }
    };
    println!();

    if let Some(path) = artifact_path(config) {
        print_artifact(&path, fingerprint.as_deref());
        println!();
    }

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints the source path and returns its fingerprint when it can be read.
fn print_source(source: &Source) -> Option<String> {
    let kind = if source.path.is_dir() {
        "search directory"
    } else {
        "declarations file"
    };
    if !source.path.exists() {
        println!("   {} {}", source.path.display(), warning("[missing]"));
        return None;
    }
    println!("   {} {}", source.path.display(), dim(&format!("({kind})")));
    if source.path.is_dir() {
        for pattern in &source.include {
            println!("      + {pattern}");
        }
        for pattern in &source.exclude {
            println!("      - {pattern}");
        }
    }

    match read_source(source) {
        Ok(data) => {
            println!(
                "   {}",
                dim(&format!(
                    "{} declarations, fingerprint {}",
                    data.declarations.len(),
                    data.fingerprint
                ))
            );
            Some(data.fingerprint)
        }
        Err(e) => {
            println!("   {}", warning(&e.to_string()));
            None
        }
    }
}

/// Prints the artifact status and, when it loads, a per-kind symbol table.
fn print_artifact(path: &Path, fingerprint: Option<&str>) {
    let status = detect_artifact_status(path, fingerprint);
    println!(
        "{}\n   {} {}",
        subheader("Index:"),
        status.description(),
        dim(&format!("({})", path.display()))
    );

    match &status {
        ArtifactStatus::Missing => {
            println!("   {}", dim("Run 'apidex build' or any search to create it."));
        }
        ArtifactStatus::Malformed(reason) => {
            println!("   {}", warning(reason));
        }
        ArtifactStatus::Current | ArtifactStatus::Stale => match load_artifact(path) {
            Ok((index, _)) => println!("{}", kind_table(&index)),
            Err(e) => println!("   {}", warning(&e.to_string())),
        },
    }
}

/// Tabulates symbols per kind.
fn kind_table(index: &Index) -> Table {
    let mut counts = [0usize; SymbolKind::ALL.len()];
    for entry in index.entries() {
        for symbol in entry.symbols() {
            if let Some(slot) = SymbolKind::ALL.iter().position(|k| *k == symbol.kind()) {
                counts[slot] += 1;
            }
        }
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Kind", "Symbols"]);
    for (kind, count) in SymbolKind::ALL.iter().zip(counts) {
        table.add_row(vec![Cell::new(kind.as_str()), Cell::new(count.to_string())]);
    }
    table.add_row(vec![
        Cell::new("total"),
        Cell::new(format!("{} in {} entries", index.symbol_count(), index.len())),
    ]);
    table
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::NoSourceDefined => {
                println!("{}", dim("Hint: add a [source] section to .apidex.toml"));
            }
            ConfigWarning::SourceMatchesNothing { .. } => {
                println!("{}", dim("Hint: check [source] include patterns"));
            }
            _ => {}
        }
    }
}
