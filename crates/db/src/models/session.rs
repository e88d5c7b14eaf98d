//! Staff session model and DTOs.

use opsdesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A session row from the `staff_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct StaffSession {
    pub id: DbId,
    pub staff_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new staff session.
pub struct CreateSession {
    pub staff_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}
