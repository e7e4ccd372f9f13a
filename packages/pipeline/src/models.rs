use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use regscope_harvester::TitleCapture;

/// One immutable metrics observation for one title at one edition date.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Snapshot {
    pub id: i64,
    pub title_number: i64,
    pub title_name: String,
    /// Issue date of the edition that was measured.
    pub as_of: NaiveDate,
    pub word_count: i64,
    /// SHA-256 of the normalized text, lowercase hex.
    pub fingerprint: String,
    /// Section references per 1,000 words.
    pub ref_density: f64,
    /// Defined terms per word.
    pub def_density: f64,
    /// Set when no section structure was found and the raw document was
    /// measured instead. Densities include markup noise in that case.
    pub degraded: bool,
    pub created_at: DateTime<Utc>,
}

/// A snapshot as measured, before the store assigns an id.
pub struct NewSnapshot {
    pub title_number: i64,
    pub title_name: String,
    pub as_of: NaiveDate,
    pub word_count: i64,
    pub fingerprint: String,
    pub ref_density: f64,
    pub def_density: f64,
    pub degraded: bool,
}

impl NewSnapshot {
    pub fn from_capture(capture: &TitleCapture, title_name: impl Into<String>) -> Self {
        Self {
            title_number: i64::from(capture.number),
            title_name: title_name.into(),
            as_of: capture.as_of,
            word_count: capture.metrics.word_count as i64,
            fingerprint: capture.metrics.fingerprint.clone(),
            ref_density: capture.metrics.ref_density,
            def_density: capture.metrics.def_density,
            degraded: capture.degraded,
        }
    }
}

/// One point in a title's word count history.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SeriesPoint {
    pub as_of: NaiveDate,
    pub word_count: i64,
}
