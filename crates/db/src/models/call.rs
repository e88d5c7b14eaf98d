//! Call log model and DTOs.

use opsdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A call row from the `call_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CallLog {
    pub id: DbId,
    pub client_id: DbId,
    pub staff_id: DbId,
    pub scheduled_at: Timestamp,
    pub duration_mins: Option<i32>,
    /// e.g. `kickoff`, `check_in`, `interview_prep`.
    pub call_type: String,
    /// One of `scheduled`, `completed`, `cancelled`, `no_show`.
    pub status: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for scheduling a call.
#[derive(Debug, Deserialize)]
pub struct CreateCall {
    pub client_id: DbId,
    pub scheduled_at: Timestamp,
    pub call_type: String,
    pub notes: Option<String>,
}

/// DTO for updating a call. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateCall {
    pub scheduled_at: Option<Timestamp>,
    pub duration_mins: Option<i32>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Valid call statuses.
pub const CALL_STATUSES: &[&str] = &["scheduled", "completed", "cancelled", "no_show"];
