//! Repository for the onboarding workflow tables.

use opsdesk_core::types::DbId;
use opsdesk_core::workflow::OnboardingStatus;
use sqlx::PgPool;

use crate::models::onboarding::{OnboardingComment, OnboardingJob, OnboardingMove};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, status, resume_writer_id, linkedin_specialist_id, \
                        linkedin_phase_started, attachments_json, created_at, updated_at";

const MOVE_COLUMNS: &str = "id, onboarding_job_id, from_status, to_status, moved_by, moved_at";

const COMMENT_COLUMNS: &str = "id, onboarding_job_id, author_id, body, created_at";

/// Provides operations for onboarding jobs, their move history, and comments.
pub struct OnboardingRepo;

impl OnboardingRepo {
    /// Create an onboarding job for a client with an assigned resume writer.
    ///
    /// One job per client is enforced by `uq_onboarding_jobs_client_id`.
    pub async fn create(
        pool: &PgPool,
        client_id: DbId,
        resume_writer_id: Option<DbId>,
    ) -> Result<OnboardingJob, sqlx::Error> {
        let query = format!(
            "INSERT INTO onboarding_jobs (client_id, resume_writer_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingJob>(&query)
            .bind(client_id)
            .bind(resume_writer_id)
            .fetch_one(pool)
            .await
    }

    /// Find an onboarding job by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<OnboardingJob>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM onboarding_jobs WHERE id = $1");
        sqlx::query_as::<_, OnboardingJob>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a client's onboarding job.
    pub async fn find_by_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Option<OnboardingJob>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM onboarding_jobs WHERE client_id = $1");
        sqlx::query_as::<_, OnboardingJob>(&query)
            .bind(client_id)
            .fetch_optional(pool)
            .await
    }

    /// List all onboarding jobs, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<OnboardingJob>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM onboarding_jobs ORDER BY created_at DESC");
        sqlx::query_as::<_, OnboardingJob>(&query)
            .fetch_all(pool)
            .await
    }

    /// Move an onboarding job to a new status and append the move-history
    /// row, in one transaction.
    ///
    /// The status update is guarded by the expected `from` status so a
    /// concurrent move cannot be silently overwritten; returns `None` when
    /// the job no longer holds the expected status.
    pub async fn move_status(
        pool: &PgPool,
        id: DbId,
        from: OnboardingStatus,
        to: OnboardingStatus,
        moved_by: DbId,
    ) -> Result<Option<OnboardingJob>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE onboarding_jobs SET status = $2
             WHERE id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, OnboardingJob>(&query)
            .bind(id)
            .bind(to.as_str())
            .bind(from.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(job) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO onboarding_moves (onboarding_job_id, from_status, to_status, moved_by)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(from.as_str())
        .bind(to.as_str())
        .bind(moved_by)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            onboarding_job_id = id,
            from = %from,
            to = %to,
            moved_by,
            "Onboarding status moved",
        );
        Ok(Some(job))
    }

    /// Start the LinkedIn phase: set the flag and the assigned specialist.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn start_linkedin_phase(
        pool: &PgPool,
        id: DbId,
        specialist_id: DbId,
    ) -> Result<Option<OnboardingJob>, sqlx::Error> {
        let query = format!(
            "UPDATE onboarding_jobs SET
                linkedin_phase_started = true,
                linkedin_specialist_id = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingJob>(&query)
            .bind(id)
            .bind(specialist_id)
            .fetch_optional(pool)
            .await
    }

    /// The move history for a job, oldest first.
    pub async fn history(pool: &PgPool, id: DbId) -> Result<Vec<OnboardingMove>, sqlx::Error> {
        let query = format!(
            "SELECT {MOVE_COLUMNS} FROM onboarding_moves
             WHERE onboarding_job_id = $1
             ORDER BY moved_at ASC, id ASC"
        );
        sqlx::query_as::<_, OnboardingMove>(&query)
            .bind(id)
            .fetch_all(pool)
            .await
    }

    /// Comments on a job, oldest first.
    pub async fn comments(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Vec<OnboardingComment>, sqlx::Error> {
        let query = format!(
            "SELECT {COMMENT_COLUMNS} FROM onboarding_comments
             WHERE onboarding_job_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, OnboardingComment>(&query)
            .bind(id)
            .fetch_all(pool)
            .await
    }

    /// Add a comment to a job, returning the created row.
    pub async fn add_comment(
        pool: &PgPool,
        id: DbId,
        author_id: DbId,
        body: &str,
    ) -> Result<OnboardingComment, sqlx::Error> {
        let query = format!(
            "INSERT INTO onboarding_comments (onboarding_job_id, author_id, body)
             VALUES ($1, $2, $3)
             RETURNING {COMMENT_COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingComment>(&query)
            .bind(id)
            .bind(author_id)
            .bind(body)
            .fetch_one(pool)
            .await
    }
}
