use sqlx::SqlitePool;
use tempfile::TempDir;

use regscope_pipeline::config::IngestConfig;
use regscope_pipeline::db;

pub struct TestDb {
    pub pool: SqlitePool,
    #[allow(dead_code)]
    pub url: String,
    // Hold the tempdir so the database file stays alive for the duration of the test
    _dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regscope-test.db");
        let url = format!("sqlite:{}", path.display());

        let config = IngestConfig::new(&url);
        let pool = db::create_pool(&config).await.unwrap();
        db::run_migrations(&pool).await.unwrap();

        Self {
            pool,
            url,
            _dir: dir,
        }
    }
}
