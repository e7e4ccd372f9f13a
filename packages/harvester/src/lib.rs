//! RegScope Harvester - Download and measure US federal regulations.
//!
//! This crate retrieves CFR titles from the eCFR publisher, reduces each
//! title's XML to normalized section text, and computes structural metrics
//! over that text (word count, content fingerprint, citation and
//! defined-term densities).
//!
//! # Example
//!
//! ```
//! use regscope_harvester::config;
//!
//! // Validate title number and date
//! assert!(config::validate_title_number(29).is_ok());
//! assert!(config::validate_date("2025-06-01").is_ok());
//! ```
//!
//! # Architecture
//!
//! The harvester is organized into several modules:
//!
//! - [`config`]: Constants, URL builders, and validation
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client for downloading from the publisher
//! - [`catalog`]: Title catalog client
//! - [`fetch`]: Per-title XML downloading
//! - [`extract`]: Normalized text extraction
//! - [`metrics`]: Pure metric computation
//! - [`capture`]: Per-title capture pipeline

pub mod capture;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod http;
pub mod metrics;

// Re-export main functions
pub use capture::{capture_title, TitleCapture};
pub use catalog::{download_title_index, Title, TitleIndex, VersionMarker};

// Re-export commonly used items
pub use config::{validate_date, validate_title_number};
pub use error::{HarvestError, Result};
pub use extract::Extraction;
pub use metrics::Metrics;
