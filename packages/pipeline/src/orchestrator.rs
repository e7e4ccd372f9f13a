use std::sync::Arc;

use reqwest::blocking::Client;
use sqlx::SqlitePool;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use regscope_harvester::http::create_client;
use regscope_harvester::{
    capture_title, download_title_index, validate_title_number, HarvestError, Title, TitleIndex,
    VersionMarker,
};

use crate::config::IngestConfig;
use crate::error::{PipelineError, Result};
use crate::models::{NewSnapshot, Snapshot};
use crate::report::RunReport;
use crate::store;

/// Run one full ingestion pass over every title the publisher lists.
///
/// Titles are captured by a bounded pool of workers. A failure in one
/// title is recorded in the report and never aborts the rest of the run.
/// Only a catalog failure before any title is known fails the run itself.
///
/// Ctrl+C stops dispatching new titles; in-flight captures run to
/// completion so no partial snapshot is ever written.
pub async fn run_all(pool: &SqlitePool, config: &IngestConfig) -> Result<RunReport> {
    let mut report = RunReport::new();

    let (client, index) = connect_catalog(config).await?;

    let titles = index.titles();
    tracing::info!(
        run_id = %report.run_id,
        listed = titles.len(),
        max_concurrency = config.max_concurrency,
        "starting ingestion run"
    );

    // Resolve version markers up front; titles without one fail before dispatch
    let mut pending: Vec<(Title, VersionMarker)> = Vec::new();
    for title in titles {
        if title.reserved {
            tracing::debug!(title = title.number, "skipping reserved title");
            continue;
        }
        match index.version_for(title.number) {
            Ok(marker) => pending.push((title, marker)),
            Err(e) => report.record_failure(title.number, &PipelineError::from(e)),
        }
    }

    let semaphore = Arc::new(Semaphore::new(config.max_concurrency));
    let mut tasks = JoinSet::new();

    for (title, marker) in pending {
        let permit = tokio::select! {
            biased;

            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupt received, draining in-flight titles");
                report.interrupted = true;
                break;
            }
            permit = Arc::clone(&semaphore).acquire_owned() => {
                match permit {
                    Ok(permit) => permit,
                    // The semaphore is never closed
                    Err(_) => break,
                }
            }
        };

        let pool = pool.clone();
        let client = client.clone();
        let base_url = config.catalog_url.clone();
        tasks.spawn(async move {
            let _permit = permit;
            let outcome = ingest_title(&pool, client, &base_url, &title, marker).await;
            (title.number, outcome)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((number, Ok(snapshot))) => {
                tracing::info!(title = number, snapshot_id = snapshot.id, "title captured");
                report.record_success(number);
            }
            Ok((number, Err(e))) => {
                tracing::error!(title = number, error = %e, "title failed");
                report.record_failure(number, &e);
            }
            Err(e) => {
                tracing::error!(error = %e, "ingestion task aborted");
            }
        }
    }

    report.sort();
    tracing::info!(
        run_id = %report.run_id,
        succeeded = report.succeeded.len(),
        failed = report.failed.len(),
        "ingestion run finished"
    );
    for failure in &report.failed {
        tracing::warn!(
            title = failure.title_number,
            kind = %failure.kind,
            detail = %failure.detail,
            "title not captured"
        );
    }

    Ok(report)
}

/// Capture a single title on demand, outside a full run.
///
/// The edition defaults to the publisher's current version marker and can
/// be pinned to an explicit date.
pub async fn run_single(
    pool: &SqlitePool,
    config: &IngestConfig,
    number: u16,
    date: Option<chrono::NaiveDate>,
) -> Result<Snapshot> {
    validate_title_number(number)?;

    let (client, index) = connect_catalog(config).await?;

    let title = index
        .titles()
        .into_iter()
        .find(|t| t.number == number)
        .ok_or(HarvestError::TitleNotListed(number))?;

    let marker = match date {
        Some(issue_date) => VersionMarker {
            issue_date,
            import_in_progress: index.import_in_progress(),
        },
        None => index.version_for(number)?,
    };

    ingest_title(pool, client, &config.catalog_url, &title, marker).await
}

/// Build the HTTP client and download the title catalog.
async fn connect_catalog(config: &IngestConfig) -> Result<(Client, TitleIndex)> {
    let timeout = config.request_timeout;
    let base_url = config.catalog_url.clone();

    let (client, index) = tokio::task::spawn_blocking(move || {
        let client = create_client(timeout)?;
        let index = download_title_index(&client, &base_url)?;
        Ok::<_, HarvestError>((client, index))
    })
    .await??;

    if index.import_in_progress() {
        tracing::warn!("catalog reports an import in progress, editions may be stale");
    }

    Ok((client, index))
}

/// Run the fetch, extract, measure, persist pipeline for one title.
async fn ingest_title(
    pool: &SqlitePool,
    client: Client,
    base_url: &str,
    title: &Title,
    marker: VersionMarker,
) -> Result<Snapshot> {
    let number = title.number;
    let base = base_url.to_string();
    let capture = tokio::task::spawn_blocking(move || {
        capture_title(&client, &base, number, marker.issue_date)
    })
    .await??;

    store::insert_snapshot(pool, &NewSnapshot::from_capture(&capture, &title.name)).await
}
