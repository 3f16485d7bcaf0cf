// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use provision::{DomainSynonyms, EngineConfig, JsonFileSource, SearchEngine, SearchOptions};

mod cli;
use cli::{display, Cli, Commands};

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Search {
            query,
            corpus,
            synonyms,
            method,
            top_k,
            min_score,
            sector,
            no_expand,
            json,
        } => {
            let options = SearchOptions {
                top_k,
                expand_query: !no_expand,
                method,
                min_score,
                sector,
            };
            run_search(&query, corpus.as_deref(), synonyms.as_deref(), &options, json)
        }
        Commands::Stats { corpus } => run_stats(corpus.as_deref()),
    };

    if let Err(e) = outcome {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_source(corpus: Option<&Path>) -> Result<JsonFileSource> {
    match corpus {
        Some(path) => Ok(JsonFileSource::new(path)),
        None => JsonFileSource::from_env().context("no --corpus given"),
    }
}

fn build_engine(corpus: Option<&Path>, synonyms: Option<&Path>) -> Result<SearchEngine> {
    let mut config = EngineConfig::from_env().context("reading PROVISION_* settings")?;
    if let Some(path) = synonyms {
        config.synonyms = load_synonyms(path)?;
    }
    let source = open_source(corpus)?;
    SearchEngine::new(Arc::new(source), config).context("configuring search engine")
}

fn load_synonyms(path: &Path) -> Result<DomainSynonyms> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading synonyms from {}", path.display()))?;
    DomainSynonyms::from_json_str(&text)
        .with_context(|| format!("parsing synonyms in {}", path.display()))
}

fn run_search(
    query: &str,
    corpus: Option<&Path>,
    synonyms: Option<&Path>,
    options: &SearchOptions,
    json: bool,
) -> Result<()> {
    let engine = build_engine(corpus, synonyms)?;
    let results = engine.search(query, options).context("search failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No passages matched {:?}", query);
        return Ok(());
    }

    display::divider();
    for (rank, result) in results.iter().enumerate() {
        display::result_block(rank + 1, result);
        display::divider();
    }
    Ok(())
}

fn run_stats(corpus: Option<&Path>) -> Result<()> {
    let engine = build_engine(corpus, None)?;
    let stats = engine.refresh_index().context("building index")?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
