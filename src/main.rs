//! Wiki-Ripple main entry point
//!
//! This is the command-line interface for the Wiki-Ripple crawler.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wiki_ripple::config::{load_config, Config, FetchSource};
use wiki_ripple::crawler::{Fetcher, LinkPolicy, LiveFetcher, LocalFetcher, WikiCrawler};
use wiki_ripple::index::{Index, SqliteIndex};
use wiki_ripple::output::{load_statistics, print_statistics, print_term_counts};

/// Wiki-Ripple: a breadth-first wiki crawler and term indexer
///
/// Wiki-Ripple starts from a seed page, follows internal links in the order
/// they appear, and indexes the paragraphs of every page it visits.
#[derive(Parser, Debug)]
#[command(name = "wiki-ripple")]
#[command(version = "1.0.0")]
#[command(about = "A breadth-first wiki crawler and term indexer", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Read pages from the fixtures directory instead of the network
    #[arg(long)]
    local: bool,

    /// Stop after this many newly indexed pages (overrides the config)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: Option<u32>,

    /// Index popped URLs even if the index already holds them
    #[arg(long)]
    bypass_visited_check: bool,

    /// Print the URL counts for this term after crawling (repeatable)
    #[arg(long = "term", value_name = "TERM")]
    terms: Vec<String>,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the index and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = match load_config(&cli.config) {
        Ok(cfg) => {
            tracing::info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.local {
        config.crawler.source = FetchSource::Local;
        if config.crawler.fixtures_dir.is_none() {
            anyhow::bail!("--local requires fixtures-dir in the [crawler] config section");
        }
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(&config, cli.bypass_visited_check, &cli.terms).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wiki_ripple=info,warn"),
            1 => EnvFilter::new("wiki_ripple=debug,info"),
            2 => EnvFilter::new("wiki_ripple=trace,debug"),
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

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Wiki-Ripple Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed: {}", config.crawler.seed);
    println!("  Origin: {}", config.crawler.origin);
    println!("  Link prefix: {}", config.crawler.link_prefix);
    println!("  Source: {:?}", config.crawler.source);
    if let Some(dir) = &config.crawler.fixtures_dir {
        println!("  Fixtures: {}", dir);
    }
    println!("  Max pages: {}", config.crawler.max_pages);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nIndex:");
    println!("  Database: {}", config.index.database_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: shows statistics from the index
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.index.database_path);

    let index = SqliteIndex::new(Path::new(&config.index.database_path))
        .context("failed to open index")?;
    let stats = load_statistics(&index)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, bypass: bool, terms: &[String]) -> anyhow::Result<()> {
    let index = SqliteIndex::new(Path::new(&config.index.database_path))
        .context("failed to open index")?;

    let index = match (config.crawler.source, config.crawler.fixtures_dir.as_deref()) {
        (FetchSource::Local, Some(dir)) => {
            tracing::info!("Reading pages from {}", dir);
            crawl_with(config, index, LocalFetcher::new(dir), bypass).await?
        }
        _ => {
            let fetcher = LiveFetcher::new(&config.user_agent)?;
            crawl_with(config, index, fetcher, bypass).await?
        }
    };

    for term in terms {
        let counts = index.get_term_counts(&term.to_lowercase())?;
        print_term_counts(term, &counts);
    }

    Ok(())
}

/// Runs a bounded crawl with the given fetcher and hands the index back
async fn crawl_with<F: Fetcher>(
    config: &Config,
    index: SqliteIndex,
    fetcher: F,
    bypass: bool,
) -> anyhow::Result<SqliteIndex> {
    let policy = LinkPolicy::new(&config.crawler.origin, &config.crawler.link_prefix);
    let mut crawler = WikiCrawler::new(&config.crawler.seed, index, fetcher).with_policy(policy);

    tracing::info!(
        "Starting crawl from {} (max {} new pages)",
        crawler.seed(),
        config.crawler.max_pages
    );

    match crawler.run(config.crawler.max_pages as usize, bypass).await {
        Ok(report) => {
            for url in &report.indexed {
                println!("Indexed {}", url);
            }
            if report.indexed.is_empty() {
                println!("No new pages indexed");
            }
            Ok(crawler.into_index())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
