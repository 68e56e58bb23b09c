//! CLI entry point for the ORCID lookup tool.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use orcid_lookup::{AuthorityLookupService, ChoiceAuthority, LookupConfig, ResultSet};
use tracing::{debug, info};

mod app_config;
mod cli;

use cli::{Args, Command};

/// Exit status when the lookup itself reported an error result.
const EXIT_LOOKUP_ERROR: u8 = 2;

fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let config = resolve_config(&args)?;
    info!(search_url = %config.search_url, reverse = config.reverse_lookup_enabled(), "Lookup configured");

    let service =
        AuthorityLookupService::new(config).context("Failed to initialize lookup service")?;

    let result = match &args.command {
        Command::Matches {
            name,
            start,
            limit,
            field,
        } => service.lookup_matches(field, name, -1, *start, *limit, None),
        Command::Best { name, field } => service.lookup_best_match(field, name, -1, None),
        Command::Label { key, field } => {
            let label = service.resolve_label(field, key, None);
            if args.json {
                println!("{}", serde_json::json!({ "key": key, "label": label }));
            } else {
                println!("{label}");
            }
            return Ok(ExitCode::SUCCESS);
        }
    };

    print_result(&result, args.json)?;

    if result.is_error() {
        Ok(ExitCode::from(EXIT_LOOKUP_ERROR))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// CLI flag > config file > built-in default.
fn resolve_config(args: &Args) -> Result<LookupConfig> {
    let file_config = app_config::load_file_config(args.config.as_deref())?;
    let mut config = match file_config {
        Some(file_config) => {
            debug!(?file_config, "Loaded config file");
            file_config.apply(LookupConfig::default())
        }
        None => LookupConfig::default(),
    };

    if let Some(search_url) = &args.search_url {
        config.search_url.clone_from(search_url);
    }
    if let Some(reverse_url) = &args.reverse_url {
        config.reverse_url = Some(reverse_url.clone());
    }
    if let Some(secs) = args.connect_timeout {
        config.connect_timeout_secs = secs;
    }
    Ok(config)
}

fn print_result(result: &ResultSet, json: bool) -> Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(result).context("Failed to serialize lookup result")?;
        println!("{rendered}");
        return Ok(());
    }

    if result.is_error() {
        println!("lookup failed (see log for details)");
        return Ok(());
    }

    for candidate in result.candidates() {
        println!("{}\t{}", candidate.authority_key, candidate.label);
    }
    println!(
        "confidence={} start={} returned={} total={} more={}",
        result.confidence(),
        result.window_start(),
        result.candidates().len(),
        result.total_available(),
        result.has_more()
    );
    Ok(())
}
