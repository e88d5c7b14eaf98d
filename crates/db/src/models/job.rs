//! Job-application entity model and DTOs.

use opsdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A job-application row from the `jobs` table.
///
/// `status` is free text written by operators; use
/// `opsdesk_core::job_status::bucket_for` to classify it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Job {
    pub id: DbId,
    pub client_id: DbId,
    pub operator_id: Option<DbId>,
    pub title: String,
    pub company: String,
    pub job_url: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub applied_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a job-application record.
#[derive(Debug, Deserialize)]
pub struct CreateJob {
    pub client_id: DbId,
    pub title: String,
    pub company: String,
    pub job_url: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub applied_at: Option<Timestamp>,
}

/// DTO for updating a job-application record. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub job_url: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub applied_at: Option<Timestamp>,
}

/// Query parameters for listing jobs.
#[derive(Debug, Deserialize)]
pub struct JobListQuery {
    pub client_id: Option<DbId>,
    /// Filter to a single reporting bucket (e.g. `interviewing`).
    pub bucket: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
