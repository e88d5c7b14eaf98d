//! Staff entity model and DTOs.

use opsdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full staff row from the `staff` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`StaffResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Staff {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub last_resume_assigned_at: Option<Timestamp>,
    pub last_linkedin_assigned_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe staff representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct StaffResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    /// Resolved role name (e.g. `"admin"`, `"operator"`).
    pub role: String,
    pub role_id: DbId,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a new staff member.
#[derive(Debug, Deserialize)]
pub struct CreateStaff {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
}

/// DTO for updating an existing staff member. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateStaff {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<DbId>,
    pub is_active: Option<bool>,
}
