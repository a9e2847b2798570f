//! Failure categories for a scrape run.

use std::time::Duration;

/// Every way a run can fail. Each variant maps to one free-text
/// `errorType` in the error record.
#[derive(thiserror::Error, Debug)]
pub enum RunError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0:#}")]
    Launch(anyhow::Error),

    #[error("Navigation timeout of {} ms exceeded", .timeout.as_millis())]
    NavigationTimeout { timeout: Duration },

    #[error("navigation failed: {0:#}")]
    Navigation(anyhow::Error),

    #[error("extraction failed: {0:#}")]
    Extraction(anyhow::Error),

    #[error("failed to close browser: {0:#}")]
    Release(anyhow::Error),

    #[error("failed to write {path}: {source}")]
    Persistence {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RunError {
    /// Category name written to the `errorType` field.
    pub fn error_type(&self) -> &'static str {
        match self {
            RunError::Configuration(_) => "ConfigurationError",
            RunError::Launch(_) => "LaunchError",
            RunError::NavigationTimeout { .. } => "TimeoutError",
            RunError::Navigation(_) => "NavigationError",
            RunError::Extraction(_) => "ExtractionError",
            RunError::Release(_) => "ReleaseError",
            RunError::Persistence { .. } => "PersistenceError",
        }
    }

    /// Multi-line cause chain for diagnostics, if the error carries one.
    pub fn trace(&self) -> Option<String> {
        let chain: Option<&anyhow::Error> = match self {
            RunError::Launch(e)
            | RunError::Navigation(e)
            | RunError::Extraction(e)
            | RunError::Release(e) => Some(e),
            _ => None,
        };
        chain.map(|e| format!("{e:?}"))
    }
}
