//! `page-scrape` — scrape the page named by `SCRAPE_URL` into
//! `scraped_data.json`.

use std::process::ExitCode;

use page_scrape::renderer::ChromiumRenderer;
use page_scrape::{report, runner, ScrapeConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match ScrapeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            report::missing_url(&e);
            return ExitCode::FAILURE;
        }
    };

    report::start(&config);
    let outcome = runner::scrape(&config, || ChromiumRenderer::launch(&config.browser)).await;
    runner::finish(&config, outcome)
}
