//! Renderer abstraction for browser-based page loading.
//!
//! Defines the `Renderer` and `RenderContext` traits that abstract over
//! the browser engine (Chromium via chromiumoxide), so the run sequence can
//! be driven against a stub in tests.

pub mod chromium;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Viewport;

pub use chromium::ChromiumRenderer;

/// A launched browser engine that can open page contexts.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Open a new page (tab) with the given viewport.
    async fn new_context(&self, viewport: Viewport) -> Result<Box<dyn RenderContext>>;
    /// Close the browser and wait for its process to exit.
    async fn shutdown(self) -> Result<()>
    where
        Self: Sized;
}

/// A single page in a launched browser.
#[async_trait]
pub trait RenderContext: Send + Sync {
    /// Navigate and wait until the document has been parsed
    /// (DOMContentLoaded). Carries no deadline of its own.
    async fn navigate(&mut self, url: &str) -> Result<()>;
    /// Evaluate a script in the page and return its value.
    async fn execute_js(&self, script: &str) -> Result<serde_json::Value>;
    /// Close this page.
    async fn close(self: Box<Self>) -> Result<()>;
}
