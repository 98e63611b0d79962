use anyhow::Result;
use clap::Parser;
use sift_core::{Config, SledStore};
use sift_crawler::{crawl_all, WebSource, DEFAULT_DELIMITER};
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "crawler")]
#[command(about = "Fetch resources, store them as documents and index their words")]
struct Cli {
    /// Resources to crawl, separated by `|`
    #[arg(long)]
    url: String,
    /// Path to the YAML configuration file
    #[arg(long, env = "SIFT_CONFIG", default_value = "config.yml")]
    config: String,
    /// Request timeout seconds
    #[arg(long, default_value_t = 12)]
    timeout_secs: u64,
    /// User-Agent string sent with every request
    #[arg(long, default_value = "sift-bot/0.1")]
    user_agent: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Cli::parse();

    let config = Config::load_or_default(&args.config)?;
    let store = SledStore::open(&config)?;
    let source = WebSource::new(&args.user_agent, Duration::from_secs(args.timeout_secs))?;

    let docs = crawl_all(&source, &store, &args.url, DEFAULT_DELIMITER).await?;
    store.flush()?;
    tracing::info!(documents = docs.len(), "crawl complete");
    for doc in &docs {
        println!("{}\t{}", doc.id, doc.source);
    }
    Ok(())
}
