//! Crawldex: word-frequency crawler for numerically indexed article archives
//!
//! Walks an inclusive article-id range, gathers noun surfaces from every
//! reachable article, and writes a document-frequency index as CSV.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use crawldex::{
    config::Config,
    scraping::{
        ArticleExtractor, CrawlContext, CrawlCoordinator, CrawlReport, FetchConfig, FetchEngine,
    },
    tokenizer::SimpleTokenizer,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "crawldex")]
#[command(about = "Word-frequency crawler for numerically indexed article archives")]
#[command(version)]
struct Cli {
    /// First article id to crawl (inclusive)
    start_id: u64,

    /// Last article id to crawl (inclusive)
    end_id: u64,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output CSV path (overrides the config file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Archive base URL (overrides the config file)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Concurrent workers (overrides the config file)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.start_id > cli.end_id {
        Cli::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!(
                    "start id {} is greater than end id {}",
                    cli.start_id, cli.end_id
                ),
            )
            .exit();
    }

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    // Setup logging; -v overrides the configured level
    let log_level = match cli.verbose {
        0 => config.logging.level.as_tracing(),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(output) = cli.output {
        config.crawl.output_path = output;
    }
    if let Some(base_url) = cli.base_url {
        config.crawl.base_url = base_url;
    }
    if let Some(workers) = cli.workers {
        config.crawl.workers = workers;
    }
    config.validate()?;

    run_crawl(config, cli.start_id, cli.end_id).await
}

async fn run_crawl(config: Config, start_id: u64, end_id: u64) -> Result<()> {
    info!("Crawling articles {} through {}", start_id, end_id);
    info!("Archive: {}", config.crawl.base_url);

    let started = Instant::now();

    let engine = FetchEngine::new(FetchConfig::from_config(&config.http))
        .context("Failed to build HTTP client")?;

    let ctx = Arc::new(CrawlContext::new(
        Arc::new(engine),
        ArticleExtractor::new(),
        Arc::new(SimpleTokenizer),
        config.crawl.base_url.clone(),
        config.crawl.max_pages_per_article,
    ));

    let coordinator = CrawlCoordinator::new(
        ctx,
        config.crawl.workers,
        config.crawl.volume_ceiling_bytes,
    );

    let CrawlReport {
        index,
        stats,
        reason,
    } = coordinator.run(start_id, end_id).await;
    let elapsed = started.elapsed();

    println!("\nCrawl complete!");
    println!("===============");
    println!("Articles dispatched: {}", stats.dispatched);
    println!("Documents gathered:  {}", stats.documents);
    println!("Missing articles:    {}", stats.missing);
    println!("Articles skipped:    {}", stats.skipped);
    println!("Access refusals:     {}", stats.forbidden);
    println!("Distinct words:      {}", index.len());
    println!("Stop reason:         {}", reason);
    println!("Elapsed time:        {:.2}s", elapsed.as_secs_f64());

    if index.is_empty() {
        println!("\nNo words collected; output file not written.");
        return Ok(());
    }

    let output_path = config.crawl.output_path;
    index.write_csv(&output_path)?;
    println!("\nOutput: {}", output_path.display());

    Ok(())
}
