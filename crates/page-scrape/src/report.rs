//! Human-readable banners. Progress and the result echo go to stdout,
//! failures to stderr.

use std::path::Path;

use crate::config::ScrapeConfig;
use crate::error::RunError;
use crate::output::to_pretty_json;
use crate::types::{now_iso, ScrapeOutput};

fn rule() -> String {
    "=".repeat(60)
}

pub fn missing_url(err: &RunError) {
    eprintln!("ERROR: {err}");
    eprintln!("Please provide a URL to scrape.");
}

pub fn start(config: &ScrapeConfig) {
    println!("{}", rule());
    println!("Web Scraper Starting...");
    println!("{}", rule());
    println!("Target URL: {}", config.url);
    println!("Started at: {}", now_iso());
    println!("{}", rule());
}

pub fn step(message: &str) {
    println!("{message}");
}

pub fn success(output: &ScrapeOutput, path: &Path) {
    println!("{}", rule());
    println!("SUCCESS! Scraping completed");
    println!("{}", rule());
    println!("Scraped Data:");
    match to_pretty_json(output) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::warn!("could not echo result: {e}"),
    }
    println!("{}", rule());
    println!("Data saved to: {}", path.display());
    println!("Completed at: {}", now_iso());
    println!("{}", rule());
}

pub fn failure(err: &RunError) {
    eprintln!("{}", rule());
    eprintln!("SCRAPING FAILED");
    eprintln!("{}", rule());
    eprintln!("Error Type: {}", err.error_type());
    eprintln!("Error Message: {err}");
    if let Some(trace) = err.trace() {
        eprintln!("Trace: {trace}");
    }
    eprintln!("{}", rule());
}

pub fn error_saved(path: &Path) {
    eprintln!("Error information saved to {}", path.display());
}

pub fn error_not_saved(err: &RunError) {
    eprintln!("Could not save error information: {err}");
}
