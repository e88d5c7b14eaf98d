//! Repository for the `staff` table, including round-robin assignment.

use opsdesk_core::roles::{ROLE_LINKEDIN_SPECIALIST, ROLE_RESUME_WRITER};
use opsdesk_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::staff::{CreateStaff, Staff, UpdateStaff};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, role_id, is_active, \
                        last_login_at, failed_login_count, locked_until, \
                        last_resume_assigned_at, last_linkedin_assigned_at, \
                        created_at, updated_at";

/// Provides CRUD operations and assignment queries for staff.
pub struct StaffRepo;

impl StaffRepo {
    /// Insert a new staff member, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStaff) -> Result<Staff, sqlx::Error> {
        let query = format!(
            "INSERT INTO staff (username, email, password_hash, role_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Staff>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.role_id)
            .fetch_one(pool)
            .await
    }

    /// Find a staff member by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Staff>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff WHERE id = $1");
        sqlx::query_as::<_, Staff>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a staff member by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Staff>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff WHERE username = $1");
        sqlx::query_as::<_, Staff>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// List all staff ordered by most recently created first.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Staff>, sqlx::Error> {
        let query = if include_inactive {
            format!("SELECT {COLUMNS} FROM staff ORDER BY created_at DESC")
        } else {
            format!("SELECT {COLUMNS} FROM staff WHERE is_active = true ORDER BY created_at DESC")
        };
        sqlx::query_as::<_, Staff>(&query).fetch_all(pool).await
    }

    /// Update a staff member. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStaff,
    ) -> Result<Option<Staff>, sqlx::Error> {
        let query = format!(
            "UPDATE staff SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                role_id = COALESCE($4, role_id),
                is_active = COALESCE($5, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Staff>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.email)
            .bind(input.role_id)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-deactivate a staff member. Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE staff SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increment the failed login counter by 1.
    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE staff SET failed_login_count = failed_login_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Lock a staff account until the specified timestamp.
    pub async fn lock_account(
        pool: &PgPool,
        id: DbId,
        until: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE staff SET locked_until = $2 WHERE id = $1")
            .bind(id)
            .bind(until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Record a successful login: reset `failed_login_count`, clear
    /// `locked_until`, and set `last_login_at` to now.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE staff SET
                failed_login_count = 0,
                locked_until = NULL,
                last_login_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Update a staff member's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE staff SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Atomically pick the next resume writer in round-robin order.
    ///
    /// Selects the active member of the `resume_writer` role whose
    /// `last_resume_assigned_at` is least recent (NULLs first) and stamps it
    /// in the same statement, so the member moves to the back of the queue.
    /// `FOR UPDATE SKIP LOCKED` guarantees two concurrent assignments never
    /// pick the same row. Returns `None` when no active writer exists.
    pub async fn next_resume_writer(pool: &PgPool) -> Result<Option<Staff>, sqlx::Error> {
        Self::next_in_rotation(pool, ROLE_RESUME_WRITER, "last_resume_assigned_at").await
    }

    /// Atomically pick the next LinkedIn specialist in round-robin order.
    pub async fn next_linkedin_specialist(pool: &PgPool) -> Result<Option<Staff>, sqlx::Error> {
        Self::next_in_rotation(pool, ROLE_LINKEDIN_SPECIALIST, "last_linkedin_assigned_at").await
    }

    async fn next_in_rotation(
        pool: &PgPool,
        role_name: &str,
        cursor_column: &str,
    ) -> Result<Option<Staff>, sqlx::Error> {
        let query = format!(
            "UPDATE staff SET {cursor_column} = NOW()
             WHERE id = (
                 SELECT s.id FROM staff s
                 JOIN roles r ON r.id = s.role_id
                 WHERE r.name = $1 AND s.is_active = true
                 ORDER BY s.{cursor_column} ASC NULLS FIRST, s.id ASC
                 LIMIT 1
                 FOR UPDATE OF s SKIP LOCKED
             )
             RETURNING {COLUMNS}"
        );
        let picked = sqlx::query_as::<_, Staff>(&query)
            .bind(role_name)
            .fetch_optional(pool)
            .await?;

        if let Some(ref staff) = picked {
            tracing::debug!(staff_id = staff.id, role = role_name, "Assigned next in rotation");
        }
        Ok(picked)
    }
}
