//! cirque-crawler - Headless-browser product scraper for the Cirque Colors storefront

use anyhow::Result;
use cirque_crawler::cirque::overrides;
use cirque_crawler::commands::ScrapeCommand;
use cirque_crawler::config::{Config, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cirque-crawler",
    version,
    about = "Headless-browser product scraper for the Cirque Colors storefront",
    long_about = "Renders product pages in headless Chrome and extracts normalized \
                  product records, one per variant where the page offers variants."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Chrome/Chromium executable to launch
    #[arg(long, global = true, env = "CIRQUE_CHROME")]
    chrome: Option<String>,

    /// Directory to write page screenshots into
    #[arg(long, global = true)]
    screenshot_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape one or more product pages
    #[command(alias = "s")]
    Scrape {
        /// Product page URL(s)
        #[arg(required = true)]
        urls: Vec<String>,

        /// Settle delay after a variant selection, in milliseconds
        #[arg(long)]
        settle_ms: Option<u64>,
    },

    /// List the per-product override tables
    Overrides,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.format = cli.format;

    if let Some(chrome) = cli.chrome {
        config.chrome_path = Some(chrome);
    }
    if let Some(dir) = cli.screenshot_dir {
        config.screenshot_dir = Some(dir);
    }

    match cli.command {
        Commands::Scrape { urls, settle_ms } => {
            if let Some(ms) = settle_ms {
                config.settle_ms = ms;
            }

            let cmd = ScrapeCommand::new(config);
            let output = cmd.execute(&urls).await?;
            println!("{}", output);
        }

        Commands::Overrides => {
            let (images, directions) = overrides::override_keys();

            println!("Image overrides (catalogId_variantLabel):\n");
            for key in images {
                println!("  {}", key);
            }

            println!("\nDirections overrides (catalogId):\n");
            for key in directions {
                println!("  {}", key);
            }
        }
    }

    Ok(())
}
