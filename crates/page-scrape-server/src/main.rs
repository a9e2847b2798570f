//! Page Scrape Server — entry point.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use page_scrape_server::{serve, AppState};

#[derive(Parser)]
#[command(
    name = "page-scrape-server",
    about = "Serve the page-scrape artifact over HTTP",
    version
)]
struct Cli {
    /// Listen address (host:port).
    #[arg(long, env = "SCRAPE_SERVER_ADDR", default_value = "0.0.0.0:5000")]
    addr: String,

    /// Path to the scraped_data.json artifact.
    #[arg(long, env = "SCRAPED_FILE", default_value = "scraped_data.json")]
    data_file: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let data_file = std::path::absolute(&cli.data_file).unwrap_or(cli.data_file);
    tracing::info!("Scraped data file: {}", data_file.display());
    match std::fs::metadata(&data_file) {
        Ok(meta) => tracing::info!("File exists: true ({} bytes)", meta.len()),
        Err(_) => tracing::warn!("File exists: false"),
    }
    tracing::info!("Endpoints: GET / | GET /raw | GET /health | GET /info");

    serve(&cli.addr, Arc::new(AppState { data_file })).await
}
