//! Chromium-based renderer using chromiumoxide.

use std::future::Future;
use std::path::PathBuf;
use std::process::ExitStatus;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::{EventDomContentEventFired, NavigateParams};
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

use super::{RenderContext, Renderer};
use crate::config::{BrowserSettings, Viewport};

/// Flags for running inside a container without a sandbox or GPU.
/// Headless mode and `--no-sandbox` are set through the builder.
const LAUNCH_ARGS: &[&str] = &[
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--disable-software-rasterizer",
    "--no-first-run",
    "--no-zygote",
    "--single-process",
    "--disable-extensions",
];

/// Resolve the Chromium binary: the configured path if it exists,
/// otherwise the first match on PATH.
pub fn find_chromium(preferred: &std::path::Path) -> Option<PathBuf> {
    if preferred.exists() {
        return Some(preferred.to_path_buf());
    }
    ["chromium", "chromium-browser", "google-chrome"]
        .iter()
        .find_map(|name| which::which(name).ok())
}

/// A running headless Chromium instance.
pub struct ChromiumRenderer {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl ChromiumRenderer {
    /// Launch headless Chromium and start driving its CDP connection.
    pub async fn launch(settings: &BrowserSettings) -> Result<Self> {
        let chrome_path = find_chromium(&settings.executable).with_context(|| {
            format!(
                "Chromium not found at {} or on PATH",
                settings.executable.display()
            )
        })?;
        tracing::debug!(path = %chrome_path.display(), "launching chromium");

        let Viewport { width, height } = settings.viewport;
        let config = LAUNCH_ARGS
            .iter()
            .fold(
                BrowserConfig::builder()
                    .chrome_executable(chrome_path)
                    .new_headless_mode()
                    .no_sandbox()
                    .window_size(width, height),
                |builder, flag| builder.arg(*flag),
            )
            .build()
            .map_err(|e| anyhow!("failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch Chromium")?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler stopped: {e}");
                    break;
                }
            }
        });

        Ok(Self { browser, handler })
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn new_context(&self, viewport: Viewport) -> Result<Box<dyn RenderContext>> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("failed to create new page")?;

        page.execute(SetDeviceMetricsOverrideParams::new(
            i64::from(viewport.width),
            i64::from(viewport.height),
            1.0,
            false,
        ))
        .await
        .context("failed to set viewport")?;

        Ok(Box::new(ChromiumContext { page }))
    }

    async fn shutdown(mut self) -> Result<()> {
        let closed = self
            .browser
            .close()
            .await
            .map(|_| ())
            .context("Browser.close failed");
        let reaped = reap(closed, self.browser.wait()).await;
        self.handler.abort();
        reaped
    }
}

/// Wait for the browser process to exit, but only after a clean close;
/// otherwise the process may never exit and is left to `Browser`'s drop.
async fn reap<W>(closed: Result<()>, wait: W) -> Result<()>
where
    W: Future<Output = std::io::Result<Option<ExitStatus>>>,
{
    closed?;
    match wait.await {
        Ok(status) => tracing::debug!(?status, "chromium exited"),
        Err(e) => tracing::debug!("waiting for chromium exit: {e}"),
    }
    Ok(())
}

/// A single Chromium page.
pub struct ChromiumContext {
    page: Page,
}

#[async_trait]
impl RenderContext for ChromiumContext {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        // Subscribe before navigating so the event cannot be missed.
        let mut dom_ready = self
            .page
            .event_listener::<EventDomContentEventFired>()
            .await
            .context("failed to subscribe to DOMContentLoaded")?;

        let response = self
            .page
            .execute(NavigateParams::new(url))
            .await
            .context("Page.navigate failed")?;

        if let Some(error_text) = &response.result.error_text {
            bail!("{error_text} at {url}");
        }

        dom_ready
            .next()
            .await
            .context("page closed before DOMContentLoaded")?;
        Ok(())
    }

    async fn execute_js(&self, script: &str) -> Result<serde_json::Value> {
        let params = EvaluateParams::builder()
            .expression(script)
            .return_by_value(true)
            .await_promise(true)
            .build()
            .map_err(|e| anyhow!("invalid evaluate params: {e}"))?;

        let result = self
            .page
            .evaluate_expression(params)
            .await
            .context("JS execution failed")?;

        result
            .into_value()
            .map_err(|e| anyhow!("failed to convert JS result: {e:?}"))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.page.close().await.context("failed to close page")
    }
}
