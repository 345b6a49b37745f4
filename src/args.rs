use career_crawl::{CareerCrawler, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "career-crawl")]
#[command(about = "Crawls company career pages and prints the collected text as JSON")]
#[command(version)]
pub struct Args {
    /// Seed URLs, one per company
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Only fetch the seed pages, do not follow subpages
    #[arg(long)]
    pub shallow: bool,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum subpages followed per seed
    #[arg(long)]
    pub max_subpages: Option<usize>,

    /// Pause before each subpage request, in milliseconds
    #[arg(long)]
    pub page_delay_ms: Option<u64>,

    /// Pause between seeds, in milliseconds
    #[arg(long)]
    pub seed_delay_ms: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Turn command-line arguments into a crawler builder
pub fn into_builder(args: &Args) -> Result<CareerCrawler> {
    let mut builder = CareerCrawler::new().with_deep(!args.shallow);

    if let Some(path) = &args.config {
        builder = builder.with_config_file(path)?;
    }
    if let Some(max) = args.max_subpages {
        builder = builder.with_max_subpages(max);
    }
    if let Some(ms) = args.page_delay_ms {
        builder = builder.with_page_delay_ms(ms);
    }
    if let Some(ms) = args.seed_delay_ms {
        builder = builder.with_seed_delay_ms(ms);
    }
    if let Some(secs) = args.timeout {
        builder = builder.with_request_timeout(secs);
    }

    Ok(builder)
}
