//! Repository for the `call_logs` table.

use opsdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::call::{CallLog, CreateCall, UpdateCall};
use crate::repositories::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, staff_id, scheduled_at, duration_mins, call_type, \
                        status, notes, created_at, updated_at";

/// Provides CRUD operations for call logs.
pub struct CallRepo;

impl CallRepo {
    /// Schedule a call, returning the created row.
    pub async fn create(
        pool: &PgPool,
        staff_id: DbId,
        input: &CreateCall,
    ) -> Result<CallLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO call_logs (client_id, staff_id, scheduled_at, call_type, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CallLog>(&query)
            .bind(input.client_id)
            .bind(staff_id)
            .bind(input.scheduled_at)
            .bind(&input.call_type)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a call by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CallLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM call_logs WHERE id = $1");
        sqlx::query_as::<_, CallLog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List calls by schedule order, optionally scoped to a client.
    pub async fn list(
        pool: &PgPool,
        client_id: Option<DbId>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<CallLog>, sqlx::Error> {
        match client_id {
            Some(client_id) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM call_logs
                     WHERE client_id = $3
                     ORDER BY scheduled_at DESC
                     LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, CallLog>(&query)
                    .bind(clamp_limit(limit))
                    .bind(clamp_offset(offset))
                    .bind(client_id)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM call_logs
                     ORDER BY scheduled_at DESC
                     LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, CallLog>(&query)
                    .bind(clamp_limit(limit))
                    .bind(clamp_offset(offset))
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Update a call. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCall,
    ) -> Result<Option<CallLog>, sqlx::Error> {
        let query = format!(
            "UPDATE call_logs SET
                scheduled_at = COALESCE($2, scheduled_at),
                duration_mins = COALESCE($3, duration_mins),
                status = COALESCE($4, status),
                notes = COALESCE($5, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CallLog>(&query)
            .bind(id)
            .bind(input.scheduled_at)
            .bind(input.duration_mins)
            .bind(&input.status)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a call. Returns `true` if the row existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM call_logs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
