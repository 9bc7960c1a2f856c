//! Webharvest main entry point
//!
//! Command-line interface for the webharvest site asset crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use webharvest::config::{load_config, validate, Config};
use webharvest::crawler::Coordinator;
use webharvest::output::print_report;
use webharvest::url::CrawlUrl;

/// Webharvest: a polite recursive site asset harvester
///
/// Crawls a site from a seed URL, following same-site links to a bounded
/// depth while respecting robots.txt, and downloads the documents and
/// images it finds.
#[derive(Parser, Debug)]
#[command(name = "webharvest")]
#[command(version)]
#[command(about = "A polite recursive site asset harvester", long_about = None)]
struct Cli {
    /// Absolute seed URL to start crawling from
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Maximum number of link hops to follow from the seed
    #[arg(short, long)]
    depth: Option<u32>,

    /// Asset filename extension to download (repeatable, e.g. --ext .pdf)
    #[arg(long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Directory to write downloaded assets into
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Maximum simultaneous in-flight fetches (1 = strictly serial)
    #[arg(long, value_name = "N")]
    concurrency: Option<u32>,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    let seed = CrawlUrl::parse(&cli.seed)
        .with_context(|| format!("invalid seed URL: {}", cli.seed))?;

    let mut coordinator =
        Coordinator::new(config, seed).context("failed to initialize crawler")?;

    // Ctrl-C stops issuing new fetches; in-flight requests finish.
    let stop = coordinator.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing in-flight fetches");
            stop.stop();
        }
    });

    let report = coordinator.run().await.context("crawl failed")?;

    if !cli.quiet {
        print_report(&report);
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("webharvest=info,warn"),
            1 => EnvFilter::new("webharvest=debug,info"),
            2 => EnvFilter::new("webharvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Builds the effective configuration: file values (if any) with CLI
/// overrides on top
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if let Some(concurrency) = cli.concurrency {
        config.crawler.max_concurrent_fetches = concurrency;
    }
    if let Some(output_dir) = &cli.output_dir {
        config.assets.output_dir = output_dir.clone();
    }
    if !cli.extensions.is_empty() {
        config.assets.extensions = cli.extensions.clone();
    }

    validate(&config).context("invalid configuration")?;
    Ok(config)
}
