//! The two records a run can leave behind.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RunError;

/// Fields extracted from a successfully loaded page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResult {
    pub title: String,
    pub first_heading: String,
    pub meta_description: String,
    /// Final URL as the browser saw it, after redirects.
    pub url: String,
    #[serde(with = "iso_millis")]
    pub scraped_at: DateTime<Utc>,
}

/// Record written in place of a result when a run fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeError {
    pub error: bool,
    pub error_type: String,
    pub error_message: String,
    /// The URL that was requested, not necessarily the one reached.
    pub url: String,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl ScrapeError {
    pub fn new(url: impl Into<String>, failure: &RunError, at: DateTime<Utc>) -> Self {
        Self {
            error: true,
            error_type: failure.error_type().to_string(),
            error_message: failure.to_string(),
            url: url.into(),
            timestamp: at,
        }
    }
}

/// Contents of the output file: exactly one of the two records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScrapeOutput {
    Failure(ScrapeError),
    Success(ScrapeResult),
}

impl ScrapeOutput {
    pub fn is_failure(&self) -> bool {
        matches!(self, ScrapeOutput::Failure(_))
    }
}

impl From<ScrapeResult> for ScrapeOutput {
    fn from(result: ScrapeResult) -> Self {
        ScrapeOutput::Success(result)
    }
}

impl From<ScrapeError> for ScrapeOutput {
    fn from(error: ScrapeError) -> Self {
        ScrapeOutput::Failure(error)
    }
}

/// Current time in the same shape the records serialize.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `2026-10-16T08:30:00.123Z`
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use std::time::Duration;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 8, 30, 0).unwrap()
    }

    #[test]
    fn result_serializes_with_camel_case_keys() {
        let result = ScrapeResult {
            title: "Example Domain".into(),
            first_heading: "Example Domain".into(),
            meta_description: "No meta description found".into(),
            url: "https://example.com/".into(),
            scraped_at: at(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Example Domain",
                "firstHeading": "Example Domain",
                "metaDescription": "No meta description found",
                "url": "https://example.com/",
                "scrapedAt": "2026-10-16T08:30:00.000Z"
            })
        );
    }

    #[test]
    fn error_record_carries_category_and_requested_url() {
        let failure = RunError::NavigationTimeout {
            timeout: Duration::from_secs(30),
        };
        let record = ScrapeError::new("http://10.255.255.1/", &failure, at());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "error": true,
                "errorType": "TimeoutError",
                "errorMessage": "Navigation timeout of 30000 ms exceeded",
                "url": "http://10.255.255.1/",
                "timestamp": "2026-10-16T08:30:00.000Z"
            })
        );
    }

    #[test]
    fn untagged_output_picks_the_right_shape() {
        let success: ScrapeOutput = serde_json::from_value(json!({
            "title": "t",
            "firstHeading": "h",
            "metaDescription": "d",
            "url": "https://example.com/",
            "scrapedAt": "2026-10-16T08:30:00.123Z"
        }))
        .unwrap();
        assert!(!success.is_failure());

        let failure: ScrapeOutput = serde_json::from_value(json!({
            "error": true,
            "errorType": "LaunchError",
            "errorMessage": "boom",
            "url": "https://example.com/",
            "timestamp": "2026-10-16T08:30:00.123Z"
        }))
        .unwrap();
        assert!(failure.is_failure());
    }

    #[test]
    fn now_iso_is_rfc3339_with_millis() {
        let stamp = now_iso();
        assert!(stamp.ends_with('Z'));
        assert_eq!(stamp.len(), "2026-10-16T08:30:00.123Z".len());
        assert!(DateTime::parse_from_rfc3339(&stamp).is_ok());
    }
}
