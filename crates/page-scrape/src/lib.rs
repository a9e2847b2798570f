//! Page Scrape — load one URL in headless Chromium and record what it says
//! about itself.
//!
//! The binary reads `SCRAPE_URL`, renders the page, extracts the title, the
//! first `<h1>` and the meta description, and writes either a
//! [`ScrapeResult`] or a [`ScrapeError`] to `scraped_data.json`.

pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod renderer;
pub mod report;
pub mod runner;
pub mod types;

pub use config::{BrowserSettings, ScrapeConfig};
pub use error::RunError;
pub use output::{read_output, write_output};
pub use runner::{finish, scrape};
pub use types::{ScrapeError, ScrapeOutput, ScrapeResult};
