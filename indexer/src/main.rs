use anyhow::Result;
use clap::{Parser, Subcommand};
use sift_core::{search, Config, Paginator, SledStore};
use sift_indexer::{index_path, render_results};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build, rebuild and query the word index", long_about = None)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, env = "SIFT_CONFIG", default_value = "config.yml", global = true)]
    config: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drop and recreate the document and index tables
    Rebuild,
    /// Index documents from JSON/JSONL files or a directory of them
    Index {
        /// Input path (file or directory)
        #[arg(long)]
        input: PathBuf,
    },
    /// Search the index
    Search {
        /// Whitespace separated words, matched exactly
        #[arg(long)]
        query: String,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: i64,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config)?;
    let store = SledStore::open(&config)?;

    match cli.command {
        Commands::Rebuild => {
            store.rebuild()?;
            println!("Rebuilt database");
        }
        Commands::Index { input } => {
            let n = index_path(&store, &input)?;
            println!("Indexed {n} documents");
        }
        Commands::Search { query, page } => {
            let paginator = Paginator::from_config(&config);
            let results = search(&store, &query, page, &paginator)?;
            print!("{}", render_results(&results, Paginator::normalize_page(page), &paginator));
        }
    }
    store.flush()?;
    Ok(())
}
