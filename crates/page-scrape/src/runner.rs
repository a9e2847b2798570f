//! The scrape sequence: launch, open, navigate, extract, release, persist.

use std::future::Future;
use std::process::ExitCode;

use chrono::Utc;

use crate::config::ScrapeConfig;
use crate::error::RunError;
use crate::extract::{PageSnapshot, EXTRACT_SCRIPT};
use crate::output::write_output;
use crate::renderer::{RenderContext, Renderer};
use crate::report;
use crate::types::{ScrapeError, ScrapeOutput, ScrapeResult};

/// Run launch through release and return the extracted fields.
///
/// Once `launch` succeeds the browser is shut down on every path. On the
/// success path a shutdown failure fails the run; otherwise it is logged and
/// the original error wins.
pub async fn scrape<R, F, Fut>(config: &ScrapeConfig, launch: F) -> Result<ScrapeResult, RunError>
where
    R: Renderer,
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<R>>,
{
    report::step("Launching headless browser...");
    let renderer = launch().await.map_err(RunError::Launch)?;
    report::step("Browser launched successfully");
    tracing::info!(url = %config.url, "browser ready");

    let outcome = visit(&renderer, config).await;

    report::step("Closing browser...");
    let released = renderer.shutdown().await;

    match (outcome, released) {
        (Ok(result), Ok(())) => {
            report::step("Browser closed");
            Ok(result)
        }
        (Ok(_), Err(e)) => Err(RunError::Release(e)),
        (Err(err), released) => {
            if let Err(e) = released {
                tracing::warn!("browser shutdown after failure: {e:#}");
            }
            Err(err)
        }
    }
}

async fn visit<R: Renderer>(renderer: &R, config: &ScrapeConfig) -> Result<ScrapeResult, RunError> {
    report::step("Opening new page...");
    let mut page = renderer
        .new_context(config.browser.viewport)
        .await
        .map_err(RunError::Launch)?;

    let outcome = load_and_extract(page.as_mut(), config).await;

    if let Err(e) = page.close().await {
        tracing::debug!("page close: {e:#}");
    }
    outcome
}

async fn load_and_extract(
    page: &mut dyn RenderContext,
    config: &ScrapeConfig,
) -> Result<ScrapeResult, RunError> {
    report::step(&format!("Navigating to {}...", config.url));
    tokio::time::timeout(config.navigation_timeout, page.navigate(&config.url))
        .await
        .map_err(|_| RunError::NavigationTimeout {
            timeout: config.navigation_timeout,
        })?
        .map_err(RunError::Navigation)?;
    report::step("Page loaded successfully");

    report::step("Extracting data...");
    let value = page
        .execute_js(EXTRACT_SCRIPT)
        .await
        .map_err(RunError::Extraction)?;
    let snapshot = PageSnapshot::from_value(value)
        .map_err(|e| RunError::Extraction(anyhow::Error::new(e).context("unexpected page data")))?;
    let result = snapshot.into_result(Utc::now());
    report::step("Data extracted successfully");
    tracing::info!(url = %result.url, "extracted page fields");
    Ok(result)
}

/// Persist the outcome of [`scrape`] and pick the exit code.
///
/// A failed success-path write is handled like any other failure: the
/// error record is written in its place.
pub fn finish(config: &ScrapeConfig, outcome: Result<ScrapeResult, RunError>) -> ExitCode {
    let path = config.output_path();

    let failure = match outcome {
        Ok(result) => {
            report::step("Saving data to file...");
            let output = ScrapeOutput::from(result);
            match write_output(&path, &output) {
                Ok(()) => {
                    report::success(&output, &path);
                    return ExitCode::SUCCESS;
                }
                Err(e) => e,
            }
        }
        Err(e) => e,
    };

    tracing::error!(error_type = failure.error_type(), "scrape failed: {failure}");
    report::failure(&failure);

    let record = ScrapeError::new(&config.url, &failure, Utc::now());
    match write_output(&path, &record.into()) {
        Ok(()) => report::error_saved(&path),
        Err(e) => report::error_not_saved(&e),
    }
    ExitCode::FAILURE
}
