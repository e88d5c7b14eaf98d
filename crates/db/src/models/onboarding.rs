//! Onboarding workflow models and DTOs.

use opsdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An onboarding job row from the `onboarding_jobs` table (one per client).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OnboardingJob {
    pub id: DbId,
    pub client_id: DbId,
    /// Stored status string; parse via `opsdesk_core::workflow::OnboardingStatus`.
    pub status: String,
    pub resume_writer_id: Option<DbId>,
    pub linkedin_specialist_id: Option<DbId>,
    pub linkedin_phase_started: bool,
    pub attachments_json: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An immutable move-history row from the `onboarding_moves` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OnboardingMove {
    pub id: DbId,
    pub onboarding_job_id: DbId,
    pub from_status: String,
    pub to_status: String,
    pub moved_by: DbId,
    pub moved_at: Timestamp,
}

/// A comment row from the `onboarding_comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OnboardingComment {
    pub id: DbId,
    pub onboarding_job_id: DbId,
    pub author_id: DbId,
    pub body: String,
    pub created_at: Timestamp,
}

/// Request body for `PATCH /onboarding/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct MoveStatus {
    pub to_status: String,
}

/// Request body for adding a comment.
#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub body: String,
}
