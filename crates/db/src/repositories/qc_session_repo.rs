//! Repository for the `qc_sessions` table.

use mxqc_core::history::{
    clamp_limit, clamp_offset, like_pattern, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
use mxqc_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::qc_session::{CreateQcSession, QcSession, QcSessionPage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, hospital, room, model, serial, tube_serial, detector_serial, tech_name, \
    session_date, kv_test, repeatability_test, linearity_test, overall_passed, created_at";

/// History search: hospital, model or technician (case-insensitive
/// substring), or the ISO session date.
const SEARCH_CLAUSE: &str = "\
    ($1::TEXT IS NULL \
     OR hospital ILIKE $1 \
     OR model ILIKE $1 \
     OR tech_name ILIKE $1 \
     OR to_char(session_date, 'YYYY-MM-DD') LIKE $1)";

/// Provides CRUD operations for QC sessions.
pub struct QcSessionRepo;

impl QcSessionRepo {
    /// Insert a finished session, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateQcSession) -> Result<QcSession, sqlx::Error> {
        let m = &input.machine;
        let e = &input.evaluation;
        let query = format!(
            "INSERT INTO qc_sessions
                (hospital, room, model, serial, tube_serial, detector_serial, tech_name,
                 session_date, kv_test, repeatability_test, linearity_test, overall_passed)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, QcSession>(&query)
            .bind(&m.hospital)
            .bind(&m.room)
            .bind(&m.model)
            .bind(&m.serial)
            .bind(&m.tube_serial)
            .bind(&m.detector_serial)
            .bind(&m.tech_name)
            .bind(m.session_date)
            .bind(Json(&e.kv_test))
            .bind(Json(&e.repeatability_test))
            .bind(Json(&e.linearity_test))
            .bind(e.overall_passed)
            .fetch_one(pool)
            .await?;

        tracing::debug!(session_id = row.id, "Inserted QC session");
        Ok(row)
    }

    /// Find a session by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<QcSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM qc_sessions WHERE id = $1");
        sqlx::query_as::<_, QcSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List sessions newest first, optionally filtered by a search term.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<QcSessionPage, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let offset = clamp_offset(offset);
        let pattern = search.map(like_pattern);

        let query = format!(
            "SELECT {COLUMNS} FROM qc_sessions
             WHERE {SEARCH_CLAUSE}
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, QcSession>(&query)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let total = Self::count(pool, search).await?;

        Ok(QcSessionPage {
            items,
            total,
            limit,
            offset,
        })
    }

    /// Count sessions matching an optional search term.
    pub async fn count(pool: &PgPool, search: Option<&str>) -> Result<i64, sqlx::Error> {
        let pattern = search.map(like_pattern);
        let query = format!("SELECT COUNT(*) FROM qc_sessions WHERE {SEARCH_CLAUSE}");
        let (count,): (i64,) = sqlx::query_as(&query)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Permanently delete a session. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM qc_sessions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete every session. Returns the number of rows removed.
    ///
    /// Settings are untouched.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM qc_sessions").execute(pool).await?;
        tracing::warn!(deleted = result.rows_affected(), "Deleted all QC sessions");
        Ok(result.rows_affected())
    }
}
