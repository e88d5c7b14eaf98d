//! Repository for the `jobs` table.
//!
//! `status` is free text, so bucket filtering and summaries happen here in
//! Rust via `opsdesk_core::job_status` rather than in SQL.

use opsdesk_core::job_status::{bucket_for, JobBucket, ALL_BUCKETS};
use opsdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::job::{CreateJob, Job, UpdateJob};
use crate::repositories::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, operator_id, title, company, job_url, status, \
                        notes, applied_at, created_at, updated_at";

/// Provides CRUD and bucket queries for job-application records.
pub struct JobRepo;

impl JobRepo {
    /// Insert a new job record, returning the created row.
    pub async fn create(
        pool: &PgPool,
        operator_id: DbId,
        input: &CreateJob,
    ) -> Result<Job, sqlx::Error> {
        let status = input.status.as_deref().unwrap_or("saved");
        let query = format!(
            "INSERT INTO jobs (client_id, operator_id, title, company, job_url, status, notes, applied_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(input.client_id)
            .bind(operator_id)
            .bind(&input.title)
            .bind(&input.company)
            .bind(&input.job_url)
            .bind(status)
            .bind(&input.notes)
            .bind(input.applied_at)
            .fetch_one(pool)
            .await
    }

    /// Find a job by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List jobs, most recently created first, optionally scoped to a client
    /// and filtered to a reporting bucket.
    ///
    /// Bucket filtering is applied after the fetch because the stored status
    /// is free text; pagination is applied to the filtered sequence. The
    /// default deleted-exclusion is pushed into SQL so the common listing
    /// path never hauls soft-deleted rows out of the database.
    pub async fn list(
        pool: &PgPool,
        client_id: Option<DbId>,
        bucket: Option<JobBucket>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Job>, sqlx::Error> {
        let rows = Self::fetch_for_client(pool, client_id, bucket.is_none()).await?;

        let limit = clamp_limit(limit) as usize;
        let offset = clamp_offset(offset) as usize;

        Ok(rows
            .into_iter()
            .filter(|job| match bucket {
                Some(b) => bucket_for(&job.status) == b,
                None => true,
            })
            .skip(offset)
            .take(limit)
            .collect())
    }

    /// Count jobs per reporting bucket, optionally scoped to a client.
    pub async fn summary(
        pool: &PgPool,
        client_id: Option<DbId>,
    ) -> Result<Vec<(JobBucket, usize)>, sqlx::Error> {
        let rows = Self::fetch_for_client(pool, client_id, false).await?;

        Ok(ALL_BUCKETS
            .iter()
            .map(|bucket| {
                let count = rows
                    .iter()
                    .filter(|job| bucket_for(&job.status) == *bucket)
                    .count();
                (*bucket, count)
            })
            .collect())
    }

    /// Update a job. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateJob,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            "UPDATE jobs SET
                title = COALESCE($2, title),
                company = COALESCE($3, company),
                job_url = COALESCE($4, job_url),
                status = COALESCE($5, status),
                notes = COALESCE($6, notes),
                applied_at = COALESCE($7, applied_at)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.company)
            .bind(&input.job_url)
            .bind(&input.status)
            .bind(&input.notes)
            .bind(input.applied_at)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a job by setting its status to `deleted`.
    ///
    /// Returns `true` if the row was updated.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE jobs SET status = 'deleted' WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn fetch_for_client(
        pool: &PgPool,
        client_id: Option<DbId>,
        exclude_deleted: bool,
    ) -> Result<Vec<Job>, sqlx::Error> {
        // Mirrors the deleted arm of `bucket_for`: that bucket matches any
        // status containing "delete", which SQL can express directly.
        let deleted_filter = if exclude_deleted {
            "AND status NOT ILIKE '%delete%'"
        } else {
            ""
        };
        match client_id {
            Some(client_id) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM jobs
                     WHERE client_id = $1 {deleted_filter}
                     ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, Job>(&query)
                    .bind(client_id)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM jobs
                     WHERE true {deleted_filter}
                     ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, Job>(&query).fetch_all(pool).await
            }
        }
    }
}
