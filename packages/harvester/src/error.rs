//! Error types for the harvester.
//!
//! Variants follow the pipeline stages: the catalog client, the per-title
//! fetcher, and the text extractor each fail in their own ways, so the
//! caller can tell an unreachable publisher apart from a broken document.

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Title number outside the CFR range.
    #[error("Invalid title number: {0}. CFR titles run 1-50")]
    InvalidTitleNumber(u16),

    /// Invalid date format.
    #[error("Invalid date: '{0}'. Expected YYYY-MM-DD (e.g., 2025-06-01)")]
    InvalidDate(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The title catalog could not be retrieved.
    #[error("Title catalog unavailable at {url}: {source}")]
    CatalogUnavailable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The title catalog body was not decodable.
    #[error("Failed to decode title catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),

    /// The requested title does not appear in the catalog.
    #[error("Title {0} is not listed in the catalog")]
    TitleNotListed(u16),

    /// The title is listed but carries no published issue date.
    #[error("Title {0} has no published issue date")]
    TitleNotVersioned(u16),

    /// Failed to download a title document.
    #[error("Failed to download title {number} at {date}: {source}")]
    FetchFailed {
        number: u16,
        date: NaiveDate,
        #[source]
        source: reqwest::Error,
    },

    /// The publisher answered with success but an empty body.
    #[error("Title {number} at {date} returned an empty document")]
    EmptyDocument { number: u16, date: NaiveDate },

    /// Response body exceeded the configured size guard.
    #[error("Response from {url} exceeds the size limit of {limit} bytes")]
    ResponseTooLarge { url: String, limit: u64 },

    /// The title document is not parseable as XML at all.
    #[error("Title {number} is not parseable XML: {source}")]
    MalformedDocument {
        number: u16,
        #[source]
        source: roxmltree::Error,
    },

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_title_number_display() {
        let err = HarvestError::InvalidTitleNumber(51);
        assert!(err.to_string().contains("51"));
        assert!(err.to_string().contains("1-50"));
    }

    #[test]
    fn test_invalid_date_display() {
        let err = HarvestError::InvalidDate("06/01/2025".to_string());
        assert!(err.to_string().contains("06/01/2025"));
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_empty_document_display() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let err = HarvestError::EmptyDocument { number: 7, date };
        assert_eq!(
            err.to_string(),
            "Title 7 at 2025-06-01 returned an empty document"
        );
    }

    #[test]
    fn test_title_not_listed_display() {
        let err = HarvestError::TitleNotListed(51);
        assert_eq!(err.to_string(), "Title 51 is not listed in the catalog");
    }
}
