use thiserror::Error;

use regscope_harvester::HarvestError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("harvest failed: {0}")]
    Harvest(#[from] HarvestError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
