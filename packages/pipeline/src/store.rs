use crate::error::Result;
use crate::models::{NewSnapshot, SeriesPoint, Snapshot};

/// Insert one snapshot row and return the persisted record.
///
/// The store is append-only. Nothing ever updates or deletes a snapshot,
/// and identical observations from separate runs accumulate as separate
/// rows.
#[tracing::instrument(skip(executor, snapshot), fields(title = snapshot.title_number, as_of = %snapshot.as_of))]
pub async fn insert_snapshot<'e, E>(executor: E, snapshot: &NewSnapshot) -> Result<Snapshot>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let row = sqlx::query_as::<_, Snapshot>(
        r#"
        INSERT INTO snapshots (title_number, title_name, as_of, word_count, fingerprint, ref_density, def_density, degraded, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(snapshot.title_number)
    .bind(&snapshot.title_name)
    .bind(snapshot.as_of)
    .bind(snapshot.word_count)
    .bind(&snapshot.fingerprint)
    .bind(snapshot.ref_density)
    .bind(snapshot.def_density)
    .bind(snapshot.degraded)
    .bind(chrono::Utc::now())
    .fetch_one(executor)
    .await?;

    tracing::info!(snapshot_id = row.id, "snapshot written");
    Ok(row)
}

/// Every title number with at least one snapshot, ascending.
pub async fn known_titles<'e, E>(executor: E) -> Result<Vec<i64>>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let numbers = sqlx::query_scalar::<_, i64>(
        r#"SELECT DISTINCT title_number FROM snapshots ORDER BY title_number ASC"#,
    )
    .fetch_all(executor)
    .await?;

    Ok(numbers)
}

/// The most recently written snapshot for a title, if any.
pub async fn latest_snapshot<'e, E>(executor: E, title_number: i64) -> Result<Option<Snapshot>>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let snapshot = sqlx::query_as::<_, Snapshot>(
        r#"SELECT * FROM snapshots WHERE title_number = ? ORDER BY id DESC LIMIT 1"#,
    )
    .bind(title_number)
    .fetch_optional(executor)
    .await?;

    Ok(snapshot)
}

/// Word count over time for one title, ascending by edition date.
///
/// When a date was captured more than once, the most recently written
/// snapshot represents that date.
pub async fn word_count_series<'e, E>(executor: E, title_number: i64) -> Result<Vec<SeriesPoint>>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let points = sqlx::query_as::<_, SeriesPoint>(
        r#"
        SELECT s.as_of, s.word_count
        FROM snapshots s
        JOIN (
            SELECT MAX(id) AS id FROM snapshots
            WHERE title_number = ?
            GROUP BY as_of
        ) latest ON latest.id = s.id
        ORDER BY s.as_of ASC
        "#,
    )
    .bind(title_number)
    .fetch_all(executor)
    .await?;

    Ok(points)
}
