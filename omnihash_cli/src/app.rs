//! Top-level command flow: configure, classify, hash, print

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::input::{Acquirer, InputKind};
use crate::output::{OutputFormat, create_formatter};
use crate::progress::TerminalProvider;
use crate::terminal;
use anyhow::Context;
use clap::CommandFactory;
use clap_complete::generate;
use colored::*;
use omnihash_core::{DigestSelection, ItemReport, Omnihasher, Outcome, ProgressProvider};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

/// Run one invocation of the command
pub fn run(cli: Cli, config: AppConfig) -> CliResult<()> {
    if cli.version {
        return emit(&format!("{}\n", env!("CARGO_PKG_VERSION")));
    }

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        generate(shell, &mut command, "omnihash", &mut io::stdout());
        return Ok(());
    }

    if !config.output.color_enabled || !terminal::supports_ansi() {
        colored::control::set_override(false);
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        config.output.default_format
    };

    let selection = DigestSelection {
        families: cli.families.clone(),
        excludes: cli.excludes.clone(),
        include_crcs: cli.crc,
        match_digest: cli.match_digest.clone(),
    };
    let mut hasher = Omnihasher::new(config.hashing.clone(), selection)?;

    if cli.list_algorithms {
        return list_algorithms(&hasher);
    }

    let items = if cli.hashmes.is_empty() {
        if terminal::stdin_is_terminal() {
            Cli::command()
                .print_help()
                .map_err(|e| CliError::from_io_error(e, "stdout"))?;
            return Ok(());
        }
        vec![(None, InputKind::Stdin)]
    } else {
        cli.hashmes
            .iter()
            .map(|hashme| (Some(hashme.clone()), InputKind::classify(hashme, cli.string)))
            .collect()
    };

    let progress = (format == OutputFormat::Text
        && !cli.no_progress
        && config.output.progress_enabled
        && terminal::should_show_progress_by_default())
    .then(|| Arc::new(TerminalProvider::new()));
    if let Some(provider) = &progress {
        hasher = hasher.with_progress(provider.clone());
    }

    let acquirer = Acquirer::new(
        config.hashing.chunk_size,
        Duration::from_secs(config.network.timeout_seconds),
    );
    let result = hash_items(&hasher, &acquirer, items, format);

    if let Some(provider) = &progress {
        provider.complete();
    }
    result
}

fn hash_items(
    hasher: &Omnihasher,
    acquirer: &Acquirer,
    items: Vec<(Option<String>, InputKind)>,
    format: OutputFormat,
) -> CliResult<()> {
    let formatter = create_formatter(format);
    let text = format == OutputFormat::Text;
    let hash_many = items.len() > 1;
    let mut collected: Vec<ItemReport> = Vec::new();
    let mut warned_empty_selection = false;

    for (label, kind) in items {
        if let InputKind::Directory(path) = &kind {
            log::debug!("Skipping directory {}", path.display());
            if text {
                eprintln!("{}", kind.header());
            }
            continue;
        }

        if text {
            // A lone item keeps stdout for digests only
            if hash_many && kind != InputKind::Stdin {
                emit(&format!("{}\n", kind.header()))?;
            } else {
                eprintln!("{}", kind.header());
            }
        }

        let source = acquirer.open(&kind)?;
        let report = hasher.hash_item(label.as_deref(), source)?;

        match report.outcome {
            Outcome::NoMatch if text => {
                eprintln!("{} found!", "No matches".red());
            }
            Outcome::NoAlgorithms if text && !warned_empty_selection => {
                warned_empty_selection = true;
                eprintln!("{}", "No algorithms match the selected families.".yellow());
            }
            _ => {}
        }

        if formatter.is_streaming() {
            let rendered = formatter
                .format_single(&report)
                .context("Failed to format digests")?;
            emit(&rendered)?;
        } else {
            collected.push(report);
        }
    }

    if !formatter.is_streaming() {
        let rendered = formatter
            .format_batch(&collected)
            .context("Failed to format digests")?;
        emit(&rendered)?;
    }

    Ok(())
}

fn list_algorithms(hasher: &Omnihasher) -> CliResult<()> {
    let mut listing = String::new();
    for entry in hasher.registry().entries() {
        listing.push_str(&format!("{:<23}{}\n", entry.name(), entry.family()));
    }
    emit(&listing)
}

/// Write to stdout, surfacing a closed pipe as an error instead of a panic
fn emit(text: &str) -> CliResult<()> {
    if text.is_empty() {
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|e| CliError::from_io_error(e, "stdout"))
}
