//! In-page field extraction.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::ScrapeResult;

pub const NO_TITLE: &str = "No title found";
pub const NO_HEADING: &str = "No h1 heading found";
pub const NO_DESCRIPTION: &str = "No meta description found";

/// Evaluated inside the page so it sees the live DOM. Absent values come
/// back as `null` and are replaced with placeholders on the Rust side.
pub const EXTRACT_SCRIPT: &str = r#"(() => {
  const h1 = document.querySelector("h1");
  const meta = document.querySelector('meta[name="description"]');
  return {
    title: document.title,
    firstHeading: h1 ? h1.innerText : null,
    metaDescription: meta ? meta.getAttribute("content") : null,
    url: window.location.href
  };
})()"#;

/// Raw values as read from the document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub first_heading: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    pub url: String,
}

impl PageSnapshot {
    pub fn from_value(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// Apply placeholders and stamp the extraction time.
    pub fn into_result(self, scraped_at: DateTime<Utc>) -> ScrapeResult {
        ScrapeResult {
            title: self
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| NO_TITLE.to_string()),
            // An <h1> that exists but is empty is reported as empty.
            first_heading: self.first_heading.unwrap_or_else(|| NO_HEADING.to_string()),
            meta_description: self
                .meta_description
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            url: self.url,
            scraped_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_page_keeps_every_field() {
        let now = Utc::now();
        let result = PageSnapshot::from_value(json!({
            "title": "Example Domain",
            "firstHeading": "Example Domain",
            "metaDescription": "An illustrative page",
            "url": "https://example.com/"
        }))
        .unwrap()
        .into_result(now);

        assert_eq!(result.title, "Example Domain");
        assert_eq!(result.first_heading, "Example Domain");
        assert_eq!(result.meta_description, "An illustrative page");
        assert_eq!(result.url, "https://example.com/");
        assert_eq!(result.scraped_at, now);
    }

    #[test]
    fn missing_heading_uses_placeholder() {
        let result = PageSnapshot::from_value(json!({
            "title": "Plain",
            "firstHeading": null,
            "metaDescription": "d",
            "url": "https://example.com/"
        }))
        .unwrap()
        .into_result(Utc::now());
        assert_eq!(result.first_heading, "No h1 heading found");
    }

    #[test]
    fn missing_description_uses_placeholder() {
        let result = PageSnapshot::from_value(json!({
            "title": "Plain",
            "firstHeading": "h",
            "url": "https://example.com/"
        }))
        .unwrap()
        .into_result(Utc::now());
        assert_eq!(result.meta_description, "No meta description found");
    }

    #[test]
    fn empty_title_uses_placeholder() {
        let result = PageSnapshot::from_value(json!({
            "title": "",
            "firstHeading": "h",
            "metaDescription": "d",
            "url": "https://example.com/"
        }))
        .unwrap()
        .into_result(Utc::now());
        assert_eq!(result.title, "No title found");
    }

    #[test]
    fn empty_heading_is_not_replaced() {
        let result = PageSnapshot::from_value(json!({
            "title": "t",
            "firstHeading": "",
            "metaDescription": "",
            "url": "https://example.com/"
        }))
        .unwrap()
        .into_result(Utc::now());
        assert_eq!(result.first_heading, "");
        assert_eq!(result.meta_description, "");
    }

    #[test]
    fn snapshot_without_url_is_rejected() {
        assert!(PageSnapshot::from_value(json!({ "title": "t" })).is_err());
        assert!(PageSnapshot::from_value(json!("not an object")).is_err());
    }
}
