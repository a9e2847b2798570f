//! Run configuration resolved from the process environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::RunError;

/// Environment variable holding the page to scrape.
pub const URL_ENV: &str = "SCRAPE_URL";
/// Environment variable overriding the output directory.
pub const OUTPUT_DIR_ENV: &str = "SCRAPE_OUTPUT_DIR";
/// Environment variable overriding the Chromium executable.
pub const CHROMIUM_PATH_ENV: &str = "SCRAPE_CHROMIUM_PATH";

pub const DEFAULT_OUTPUT_DIR: &str = "/output";
pub const OUTPUT_FILE_NAME: &str = "scraped_data.json";
pub const DEFAULT_CHROMIUM_PATH: &str = "/usr/bin/chromium";

pub const VIEWPORT_WIDTH: u32 = 1280;
pub const VIEWPORT_HEIGHT: u32 = 800;
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Page viewport in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

/// How the headless browser is started.
#[derive(Debug, Clone)]
pub struct BrowserSettings {
    /// Preferred executable; PATH is searched when it does not exist.
    pub executable: PathBuf,
    pub viewport: Viewport,
}

/// Everything one run needs, resolved before any browser work starts.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub url: String,
    pub output_dir: PathBuf,
    pub navigation_timeout: Duration,
    pub browser: BrowserSettings,
}

impl ScrapeConfig {
    /// Resolve from the real process environment.
    pub fn from_env() -> Result<Self, RunError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RunError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(URL_ENV)
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                RunError::Configuration(format!("{URL_ENV} environment variable is not set"))
            })?;

        let output_dir = non_empty(lookup(OUTPUT_DIR_ENV))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let executable = non_empty(lookup(CHROMIUM_PATH_ENV))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CHROMIUM_PATH));

        Ok(Self {
            url,
            output_dir,
            navigation_timeout: NAVIGATION_TIMEOUT,
            browser: BrowserSettings {
                executable,
                viewport: Viewport::default(),
            },
        })
    }

    /// Full path of the JSON artifact.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(OUTPUT_FILE_NAME)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
