//! Per-title capture: fetch one title edition and reduce it to metrics.

use chrono::NaiveDate;
use reqwest::blocking::Client;

use crate::error::{HarvestError, Result};
use crate::extract;
use crate::fetch::download_title_xml;
use crate::metrics::{self, Metrics};

/// Everything measured about one title at one edition date.
///
/// The source text itself is not kept; the fingerprint inside [`Metrics`] is
/// the only trace of the exact content.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleCapture {
    pub number: u16,
    pub as_of: NaiveDate,
    /// True when no sections were recognized and the raw body was measured.
    pub degraded: bool,
    pub metrics: Metrics,
}

/// Fetch one title's XML at the given issue date and reduce it to metrics.
///
/// One blocking call per title: fetch, extract, compute, in that order.
/// The first failing stage decides the error; a degraded extraction is an
/// advisory flag on the result, never a failure.
pub fn capture_title(
    client: &Client,
    base_url: &str,
    number: u16,
    as_of: NaiveDate,
) -> Result<TitleCapture> {
    let raw = download_title_xml(client, base_url, number, as_of)?;

    let extraction = extract::extract(&raw).map_err(|e| match e {
        HarvestError::Xml(source) => HarvestError::MalformedDocument { number, source },
        other => other,
    })?;

    if extraction.is_degraded() {
        tracing::warn!(
            title = number,
            as_of = %as_of,
            "no recognizable sections, measuring raw document body"
        );
    }

    let metrics = metrics::compute(extraction.text());

    tracing::debug!(
        title = number,
        as_of = %as_of,
        words = metrics.word_count,
        degraded = extraction.is_degraded(),
        "title captured"
    );

    Ok(TitleCapture {
        number,
        as_of,
        degraded: extraction.is_degraded(),
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::create_client;

    const TITLE_XML: &str = r#"<ECFR>
      <DIV8 N="9.1" TYPE="SECTION">
        <HEAD>§ 9.1 Purpose.</HEAD>
        <P>This part defines “device” for every later rule.</P>
      </DIV8>
    </ECFR>"#;

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    async fn capture(server: &MockServer, number: u16) -> Result<TitleCapture> {
        let base = server.uri();
        tokio::task::spawn_blocking(move || {
            let client = create_client(Duration::from_secs(5)).unwrap();
            capture_title(&client, &base, number, june_first())
        })
        .await
        .unwrap()
    }

    async fn mount_title(server: &MockServer, number: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!(
                "/api/versioner/v1/full/2025-06-01/title-{number}.xml"
            )))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_capture_title_structured() {
        let server = MockServer::start().await;
        mount_title(&server, 9, TITLE_XML).await;

        let capture = capture(&server, 9).await.unwrap();

        assert_eq!(capture.number, 9);
        assert_eq!(capture.as_of, june_first());
        assert!(!capture.degraded);
        // "§ 9.1 Purpose. This part defines “device” for every later rule."
        assert_eq!(capture.metrics.word_count, 11);
        assert!(capture.metrics.ref_density > 0.0);
        assert!(capture.metrics.def_density > 0.0);
    }

    #[tokio::test]
    async fn test_capture_title_degraded() {
        let server = MockServer::start().await;
        mount_title(&server, 9, "<NOTICE>migration pending</NOTICE>").await;

        let capture = capture(&server, 9).await.unwrap();

        assert!(capture.degraded);
        assert!(capture.metrics.word_count > 0);
    }

    #[tokio::test]
    async fn test_capture_title_malformed() {
        let server = MockServer::start().await;
        mount_title(&server, 9, "not xml at all").await;

        let err = capture(&server, 9).await.unwrap_err();
        assert!(matches!(
            err,
            HarvestError::MalformedDocument { number: 9, .. }
        ));
    }
}
