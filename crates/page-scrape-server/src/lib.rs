//! Page Scrape Server — read-only HTTP access to the scrape artifact.

pub mod data;
pub mod routes;

pub use data::{is_failure, load_scraped_data, LoadError};
pub use routes::{router, serve, AppState};
