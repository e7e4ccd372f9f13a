//! Title catalog client.
//!
//! The publisher's titles index lists every CFR title with its display name,
//! latest issue date, and a reserved marker. The index also carries a global
//! advisory flag set while the publisher is importing new editions.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::titles_url;
use crate::error::{HarvestError, Result};
use crate::http::{bytes_to_string, download_bytes_default};

/// One catalog entry as served by the publisher.
#[derive(Debug, Clone, Deserialize)]
struct TitleEntry {
    number: u16,
    name: String,
    latest_issue_date: Option<NaiveDate>,
    #[serde(default)]
    reserved: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct IndexMeta {
    #[serde(default)]
    import_in_progress: bool,
}

#[derive(Debug, Deserialize)]
struct TitlesResponse {
    titles: Vec<TitleEntry>,
    #[serde(default)]
    meta: IndexMeta,
}

/// Summary of one listed title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub number: u16,
    pub name: String,
    /// Reserved titles have no document to fetch.
    pub reserved: bool,
}

/// Version marker resolved for a title at catalog time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionMarker {
    /// Issue date of the latest published edition.
    pub issue_date: NaiveDate,
    /// Set while the publisher is mid-import; dates may still be shifting.
    pub import_in_progress: bool,
}

/// The parsed title catalog.
#[derive(Debug, Clone)]
pub struct TitleIndex {
    entries: Vec<TitleEntry>,
    import_in_progress: bool,
}

impl TitleIndex {
    /// Parse the catalog from its JSON body.
    pub fn parse(json: &str) -> Result<Self> {
        let response: TitlesResponse = serde_json::from_str(json)?;
        Ok(Self {
            entries: response.titles,
            import_in_progress: response.meta.import_in_progress,
        })
    }

    /// All listed titles, in catalog order.
    #[must_use]
    pub fn titles(&self) -> Vec<Title> {
        self.entries
            .iter()
            .map(|entry| Title {
                number: entry.number,
                name: entry.name.clone(),
                reserved: entry.reserved,
            })
            .collect()
    }

    /// Resolve the version marker for a title.
    ///
    /// Fails with `TitleNotListed` when the title is absent from the index
    /// and `TitleNotVersioned` when it carries no issue date (reserved
    /// titles never have one).
    pub fn version_for(&self, number: u16) -> Result<VersionMarker> {
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.number == number)
            .ok_or(HarvestError::TitleNotListed(number))?;

        let issue_date = entry
            .latest_issue_date
            .ok_or(HarvestError::TitleNotVersioned(number))?;

        Ok(VersionMarker {
            issue_date,
            import_in_progress: self.import_in_progress,
        })
    }

    /// Whether the publisher reported an import in progress.
    #[must_use]
    pub fn import_in_progress(&self) -> bool {
        self.import_in_progress
    }
}

/// Download and parse the title catalog.
///
/// Transport failures map to `CatalogUnavailable`; an undecodable body maps
/// to `CatalogParse`. The import advisory is logged, never fatal.
pub fn download_title_index(client: &Client, base_url: &str) -> Result<TitleIndex> {
    let url = titles_url(base_url);
    let bytes = download_bytes_default(client, &url).map_err(|e| {
        if let HarvestError::Http(source) = e {
            HarvestError::CatalogUnavailable { url: url.clone(), source }
        } else {
            e
        }
    })?;

    let body = bytes_to_string(&bytes, "title catalog");
    let index = TitleIndex::parse(&body)?;

    if index.import_in_progress() {
        tracing::warn!("publisher import in progress, issue dates may still be shifting");
    }
    tracing::debug!(titles = index.entries.len(), "title catalog downloaded");

    Ok(index)
}
