pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod report;
pub mod store;

pub use config::IngestConfig;
pub use db::{create_pool, run_migrations};
pub use error::PipelineError;
pub use models::{NewSnapshot, SeriesPoint, Snapshot};
pub use report::{FailureKind, RunReport, UnitFailure};
