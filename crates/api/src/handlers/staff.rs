//! Handlers for the `/staff` resource (staff directory management).
//!
//! Listing and fetching are open to any authenticated staff member; create,
//! update, and deactivate require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use opsdesk_core::error::CoreError;
use opsdesk_core::types::DbId;
use serde::Deserialize;

use opsdesk_db::models::staff::{CreateStaff, Staff, StaffResponse, UpdateStaff};
use opsdesk_db::repositories::{RoleRepo, SessionRepo, StaffRepo};

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /staff`.
#[derive(Debug, Deserialize)]
pub struct CreateStaffRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role_id: DbId,
}

/// Request body for `PUT /staff/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateStaffRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<DbId>,
    pub is_active: Option<bool>,
}

/// Request body for `PUT /staff/{id}/password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/staff
///
/// Create a new staff member. Validates password strength, hashes it, and
/// returns a safe [`StaffResponse`] with 201 Created.
pub async fn create_staff(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateStaffRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<StaffResponse>>)> {
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // The role must exist; a dangling role_id would otherwise surface as a
    // foreign-key error mapped to 500.
    if RoleRepo::find_by_id(&state.pool, input.role_id).await?.is_none() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role id {}",
            input.role_id
        ))));
    }

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateStaff {
        username: input.username,
        email: input.email,
        password_hash: hashed,
        role_id: input.role_id,
    };

    let staff = StaffRepo::create(&state.pool, &create_dto).await?;
    tracing::info!(staff_id = staff.id, "Staff member created");

    let response = staff_to_response(&state, &staff).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// GET /api/v1/staff
///
/// List staff with resolved role names. Pass `?include_inactive=true` to
/// include deactivated members.
pub async fn list_staff(
    State(state): State<AppState>,
    RequireAuth(_staff): RequireAuth,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<StaffResponse>>>> {
    let members = StaffRepo::list(&state.pool, params.include_inactive).await?;

    // Pre-fetch all roles to avoid N+1 queries.
    let roles = RoleRepo::list(&state.pool).await?;

    let responses: Vec<StaffResponse> = members
        .iter()
        .map(|s| {
            let role_name = roles
                .iter()
                .find(|r| r.id == s.role_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| "unknown".to_string());
            build_staff_response(s, role_name)
        })
        .collect();

    Ok(Json(DataResponse { data: responses }))
}

/// GET /api/v1/staff/{id}
///
/// Get a single staff member by ID.
pub async fn get_staff(
    State(state): State<AppState>,
    RequireAuth(_staff): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<StaffResponse>>> {
    let member = StaffRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Staff", id }))?;

    let response = staff_to_response(&state, &member).await?;
    Ok(Json(DataResponse { data: response }))
}

/// PUT /api/v1/staff/{id}
///
/// Update a staff member's profile fields (not password).
pub async fn update_staff(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStaffRequest>,
) -> AppResult<Json<DataResponse<StaffResponse>>> {
    // Same role check as creation: a dangling role_id would otherwise
    // surface as a foreign-key error mapped to 500.
    if let Some(role_id) = input.role_id {
        if RoleRepo::find_by_id(&state.pool, role_id).await?.is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown role id {role_id}"
            ))));
        }
    }

    let update_dto = UpdateStaff {
        username: input.username,
        email: input.email,
        role_id: input.role_id,
        is_active: input.is_active,
    };

    let member = StaffRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Staff", id }))?;

    let response = staff_to_response(&state, &member).await?;
    Ok(Json(DataResponse { data: response }))
}

/// PUT /api/v1/staff/{id}/password
///
/// Reset a staff member's password. All of the member's sessions are revoked
/// so stolen refresh tokens die with the old credential. Returns 204.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = StaffRepo::update_password(&state.pool, id, &hashed).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound { entity: "Staff", id }));
    }

    SessionRepo::revoke_all_for_staff(&state.pool, id).await?;
    tracing::info!(staff_id = id, "Password reset, sessions revoked");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/staff/{id}
///
/// Soft-deactivate a staff member. Returns 204 No Content.
pub async fn deactivate_staff(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = StaffRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound { entity: "Staff", id }));
    }

    tracing::info!(staff_id = id, "Staff member deactivated");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a [`StaffResponse`] by resolving the member's role name.
async fn staff_to_response(state: &AppState, staff: &Staff) -> AppResult<StaffResponse> {
    let role_name = RoleRepo::resolve_name(&state.pool, staff.role_id).await?;
    Ok(build_staff_response(staff, role_name))
}

fn build_staff_response(staff: &Staff, role: String) -> StaffResponse {
    StaffResponse {
        id: staff.id,
        username: staff.username.clone(),
        email: staff.email.clone(),
        role,
        role_id: staff.role_id,
        is_active: staff.is_active,
        last_login_at: staff.last_login_at,
        created_at: staff.created_at,
    }
}
