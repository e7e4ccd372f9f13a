//! HTTP client wrapper for downloading from the eCFR publisher.

use std::borrow::Cow;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::DEFAULT_MAX_RESPONSE_SIZE;
use crate::error::{HarvestError, Result};

/// User agent string identifying this harvester.
const USER_AGENT: &str = concat!("regscope/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// # Arguments
/// * `timeout` - Per-request timeout, covering connect through body read
///
/// # Returns
/// A `reqwest::blocking::Client` with the given timeout and a user agent.
pub fn create_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Download content from a URL in a single attempt.
///
/// There is no retry here: a failed download surfaces as an error for the
/// run report, and the next scheduled run tries the title again.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL to download from
/// * `max_size` - Upper bound on the response body size in bytes
///
/// # Returns
/// Raw bytes of the response body
pub fn download_bytes(client: &Client, url: &str, max_size: u64) -> Result<Vec<u8>> {
    tracing::debug!(url, "downloading");

    let response = client.get(url).send()?.error_for_status()?;

    if let Some(length) = response.content_length() {
        if length > max_size {
            return Err(HarvestError::ResponseTooLarge {
                url: url.to_string(),
                limit: max_size,
            });
        }
    }

    let bytes = response.bytes()?;
    if bytes.len() as u64 > max_size {
        return Err(HarvestError::ResponseTooLarge {
            url: url.to_string(),
            limit: max_size,
        });
    }

    Ok(bytes.to_vec())
}

/// Download content with the default size guard.
pub fn download_bytes_default(client: &Client, url: &str) -> Result<Vec<u8>> {
    download_bytes(client, url, DEFAULT_MAX_RESPONSE_SIZE)
}

/// Decode response bytes as UTF-8, replacing invalid sequences.
///
/// Logs a warning when replacement characters were introduced, so silent
/// corruption never goes unnoticed.
pub fn bytes_to_string(bytes: &[u8], context: &str) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => {
            tracing::warn!(context, "invalid UTF-8 in response, characters were replaced");
            s
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_create_client() {
        let client = create_client(Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_bytes_to_string_valid_utf8() {
        assert_eq!(bytes_to_string(b"hello", "test"), "hello");
    }

    #[test]
    fn test_bytes_to_string_invalid_utf8() {
        let decoded = bytes_to_string(&[0x68, 0x69, 0xFF], "test");
        assert!(decoded.starts_with("hi"));
        assert!(decoded.contains('\u{FFFD}'));
    }

    #[tokio::test]
    async fn test_download_bytes_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("payload"))
            .mount(&server)
            .await;

        let url = format!("{}/doc", server.uri());
        let bytes = tokio::task::spawn_blocking(move || {
            let client = create_client(Duration::from_secs(5)).unwrap();
            download_bytes(&client, &url, 1024)
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(bytes, b"payload");
    }

    #[tokio::test]
    async fn test_download_bytes_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/missing", server.uri());
        let result = tokio::task::spawn_blocking(move || {
            let client = create_client(Duration::from_secs(5)).unwrap();
            download_bytes(&client, &url, 1024)
        })
        .await
        .unwrap();

        assert!(matches!(result, Err(HarvestError::Http(_))));
    }

    #[tokio::test]
    async fn test_download_bytes_too_large() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/big"))
            .respond_with(ResponseTemplate::new(200).set_body_string("0123456789"))
            .mount(&server)
            .await;

        let url = format!("{}/big", server.uri());
        let result = tokio::task::spawn_blocking(move || {
            let client = create_client(Duration::from_secs(5)).unwrap();
            download_bytes(&client, &url, 4)
        })
        .await
        .unwrap();

        assert!(matches!(
            result,
            Err(HarvestError::ResponseTooLarge { limit: 4, .. })
        ));
    }
}
