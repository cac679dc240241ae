//! `SQLite` implementation of [`IncidentRepository`].

use std::str::FromStr;

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Row, Sqlite, SqlitePool};

use incidents_app::ports::IncidentRepository;
use incidents_domain::error::IncidentsError;
use incidents_domain::id::IncidentId;
use incidents_domain::incident::{Incident, NewIncident, Severity};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(Incident);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Incident> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let title: String = row.try_get("title")?;
        let description: String = row.try_get("description")?;
        let severity_str: String = row.try_get("severity")?;
        let reported_at_str: String = row.try_get("reported_at")?;

        let severity =
            Severity::from_str(&severity_str).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let reported_at = chrono::DateTime::parse_from_rfc3339(&reported_at_str)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();

        Ok(Self(Incident {
            id: IncidentId::new(id),
            title,
            description,
            severity,
            reported_at,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO incidents (title, description, severity, reported_at)
    VALUES (?, ?, ?, ?)
";

const SELECT_BY_ID: &str = "SELECT * FROM incidents WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM incidents ORDER BY id";
const COUNT: &str = "SELECT COUNT(*) FROM incidents";
const DELETE_BY_ID: &str = "DELETE FROM incidents WHERE id = ?";

/// Bind a draft to the insert statement. `reported_at` is stored as RFC 3339
/// with full sub-second precision.
fn insert_query(draft: &NewIncident) -> Query<'_, Sqlite, SqliteArguments<'_>> {
    sqlx::query(INSERT)
        .bind(draft.title.as_str())
        .bind(draft.description.as_str())
        .bind(draft.severity.as_str())
        .bind(draft.reported_at.to_rfc3339())
}

fn row_count(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

/// `SQLite`-backed incident repository.
pub struct SqliteIncidentRepository {
    pool: SqlitePool,
}

impl SqliteIncidentRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl IncidentRepository for SqliteIncidentRepository {
    async fn create(&self, draft: NewIncident) -> Result<Incident, IncidentsError> {
        let result = insert_query(&draft)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        let id = IncidentId::new(result.last_insert_rowid());
        Ok(Incident::from_draft(id, draft))
    }

    async fn get_by_id(&self, id: IncidentId) -> Result<Option<Incident>, IncidentsError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Incident>, IncidentsError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn delete(&self, id: IncidentId) -> Result<bool, IncidentsError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64, IncidentsError> {
        let count: i64 = sqlx::query_scalar(COUNT)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row_count(count))
    }

    async fn seed(&self, drafts: Vec<NewIncident>) -> Result<usize, IncidentsError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        let existing: i64 = sqlx::query_scalar(COUNT)
            .fetch_one(&mut *tx)
            .await
            .map_err(StorageError::from)?;
        if existing > 0 {
            tx.rollback().await.map_err(StorageError::from)?;
            return Ok(0);
        }

        for draft in &drafts {
            insert_query(draft)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
        }
        tx.commit().await.map_err(StorageError::from)?;

        Ok(drafts.len())
    }
}
