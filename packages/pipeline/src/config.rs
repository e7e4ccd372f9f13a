use std::time::Duration;

use crate::error::{PipelineError, Result};

/// Settings for one ingestion run and the snapshot store behind it.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Base URL of the publisher serving the title catalog and documents.
    pub catalog_url: String,
    /// Connection string for the snapshot store.
    pub database_url: String,
    pub max_connections: u32,
    /// Number of titles captured concurrently.
    pub max_concurrency: usize,
    /// Per-request deadline for catalog and document downloads.
    pub request_timeout: Duration,
}

impl IngestConfig {
    pub fn from_env() -> Result<Self> {
        let catalog_url = std::env::var("ECFR_BASE_URL")
            .unwrap_or_else(|_| regscope_harvester::config::ECFR_BASE_URL.to_string());

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:regscope.db".into());

        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let max_concurrency: usize = std::env::var("REGSCOPE_MAX_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(6);
        if max_concurrency == 0 {
            return Err(PipelineError::Config(
                "REGSCOPE_MAX_CONCURRENCY must be at least 1".into(),
            ));
        }

        let request_timeout_secs: u64 = std::env::var("REGSCOPE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(regscope_harvester::config::DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            catalog_url,
            database_url,
            max_connections,
            max_concurrency,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }

    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            catalog_url: regscope_harvester::config::ECFR_BASE_URL.to_string(),
            database_url: database_url.into(),
            max_connections: 5,
            max_concurrency: 6,
            request_timeout: Duration::from_secs(regscope_harvester::config::DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_catalog_url(mut self, catalog_url: impl Into<String>) -> Self {
        self.catalog_url = catalog_url.into();
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }
}
