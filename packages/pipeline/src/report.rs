use chrono::{DateTime, Utc};
use strum::Display;
use uuid::Uuid;

use regscope_harvester::HarvestError;

use crate::error::PipelineError;

/// Coarse reason class for a title that was not captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    CatalogUnavailable,
    FetchFailed,
    MalformedDocument,
    PersistenceError,
    Internal,
}

impl FailureKind {
    /// Map an error to the reason class reported to operators.
    pub fn classify(error: &PipelineError) -> Self {
        match error {
            PipelineError::Harvest(e) => match e {
                HarvestError::CatalogUnavailable { .. }
                | HarvestError::CatalogParse(_)
                | HarvestError::TitleNotListed(_)
                | HarvestError::TitleNotVersioned(_) => FailureKind::CatalogUnavailable,
                HarvestError::FetchFailed { .. }
                | HarvestError::EmptyDocument { .. }
                | HarvestError::ResponseTooLarge { .. }
                | HarvestError::Http(_) => FailureKind::FetchFailed,
                HarvestError::MalformedDocument { .. } | HarvestError::Xml(_) => {
                    FailureKind::MalformedDocument
                }
                HarvestError::InvalidTitleNumber(_) | HarvestError::InvalidDate(_) => {
                    FailureKind::Internal
                }
            },
            PipelineError::Database(_) | PipelineError::Migration(_) => {
                FailureKind::PersistenceError
            }
            PipelineError::Config(_) | PipelineError::Join(_) | PipelineError::Io(_) => {
                FailureKind::Internal
            }
        }
    }
}

/// One title that reached a terminal failure during a run.
#[derive(Debug, Clone)]
pub struct UnitFailure {
    pub title_number: u16,
    pub kind: FailureKind,
    pub detail: String,
}

/// Outcome of one ingestion run.
///
/// Every listed title lands in exactly one of `succeeded` or `failed`,
/// except reserved titles (skipped) and titles never dispatched before an
/// interrupt.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub succeeded: Vec<u16>,
    pub failed: Vec<UnitFailure>,
    pub interrupted: bool,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            succeeded: Vec::new(),
            failed: Vec::new(),
            interrupted: false,
        }
    }

    pub fn record_success(&mut self, title_number: u16) {
        self.succeeded.push(title_number);
    }

    pub fn record_failure(&mut self, title_number: u16, error: &PipelineError) {
        self.failed.push(UnitFailure {
            title_number,
            kind: FailureKind::classify(error),
            detail: error.to_string(),
        });
    }

    /// Order both lists by title number. Workers finish in arbitrary order.
    pub fn sort(&mut self) {
        self.succeeded.sort_unstable();
        self.failed.sort_by_key(|f| f.title_number);
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}
