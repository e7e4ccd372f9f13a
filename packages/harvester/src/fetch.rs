//! Per-title document downloading.
//!
//! Fetches the consolidated XML of one title pinned to an exact issue date,
//! so a mid-run publisher update can never mix editions within a run.

use chrono::NaiveDate;
use reqwest::blocking::Client;

use crate::config::title_xml_url;
use crate::error::{HarvestError, Result};
use crate::http::{bytes_to_string, download_bytes_default};

/// Download the full XML for a title at a specific issue date.
///
/// A success status with an empty body is an error, not an empty edition:
/// zero-metric snapshots must never masquerade as observations.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `base_url` - Publisher base URL
/// * `number` - The title number (validated by the caller)
/// * `date` - The edition issue date
///
/// # Returns
/// Raw XML content as a string
pub fn download_title_xml(
    client: &Client,
    base_url: &str,
    number: u16,
    date: NaiveDate,
) -> Result<String> {
    let url = title_xml_url(base_url, number, date);
    let bytes = download_bytes_default(client, &url).map_err(|e| {
        if let HarvestError::Http(source) = e {
            HarvestError::FetchFailed {
                number,
                date,
                source,
            }
        } else {
            e
        }
    })?;

    if bytes.is_empty() {
        return Err(HarvestError::EmptyDocument { number, date });
    }

    Ok(bytes_to_string(&bytes, &format!("title {number} XML")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::create_client;

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    async fn fetch(server: &MockServer, number: u16) -> Result<String> {
        let base = server.uri();
        tokio::task::spawn_blocking(move || {
            let client = create_client(Duration::from_secs(5)).unwrap();
            download_title_xml(&client, &base, number, june_first())
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_download_title_xml_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/versioner/v1/full/2025-06-01/title-7.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<ECFR/>"))
            .mount(&server)
            .await;

        let xml = fetch(&server, 7).await.unwrap();
        assert_eq!(xml, "<ECFR/>");
    }

    #[tokio::test]
    async fn test_download_title_xml_empty_body_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/versioner/v1/full/2025-06-01/title-7.xml"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let err = fetch(&server, 7).await.unwrap_err();
        assert!(matches!(err, HarvestError::EmptyDocument { number: 7, .. }));
    }

    #[tokio::test]
    async fn test_download_title_xml_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/versioner/v1/full/2025-06-01/title-7.xml"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = fetch(&server, 7).await.unwrap_err();
        assert!(matches!(err, HarvestError::FetchFailed { number: 7, .. }));
        assert!(err.to_string().contains("title 7 at 2025-06-01"));
    }

    #[tokio::test]
    async fn test_download_title_xml_not_found() {
        let server = MockServer::start().await;
        // No mock mounted: wiremock answers 404

        let err = fetch(&server, 7).await.unwrap_err();
        assert!(matches!(err, HarvestError::FetchFailed { number: 7, .. }));
    }
}
