//! Client entity model and DTOs.

use opsdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A client row from the `clients` table.
///
/// `credentials_json` holds portal credential sub-documents as a JSON array;
/// the api layer treats it as opaque.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    /// Stored plan tier string; parse via `opsdesk_core::plan::Plan`.
    pub plan: String,
    pub amount_paid_cents: i64,
    pub is_active: bool,
    pub operator_id: Option<DbId>,
    pub welcome_email_sent: bool,
    pub kickoff_call_done: bool,
    pub resume_received: bool,
    pub credentials_json: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new client.
#[derive(Debug, Deserialize)]
pub struct CreateClient {
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub plan: String,
    pub operator_id: Option<DbId>,
}

/// DTO for updating an existing client. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateClient {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub operator_id: Option<DbId>,
    pub is_active: Option<bool>,
    pub welcome_email_sent: Option<bool>,
    pub kickoff_call_done: Option<bool>,
    pub resume_received: Option<bool>,
    pub credentials_json: Option<serde_json::Value>,
}
