//! Handlers for the `/calls` resource (call scheduling).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use opsdesk_core::error::CoreError;
use opsdesk_core::types::DbId;
use serde::Deserialize;

use opsdesk_db::models::call::{CallLog, CreateCall, UpdateCall, CALL_STATUSES};
use opsdesk_db::repositories::{CallRepo, ClientRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /calls`.
#[derive(Debug, Deserialize)]
pub struct CallListQuery {
    pub client_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/calls
///
/// Schedule a call with a client. The authenticated staff member is recorded
/// as the call owner. Returns 201 with the created call.
pub async fn create_call(
    auth: AuthStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateCall>,
) -> AppResult<(StatusCode, Json<DataResponse<CallLog>>)> {
    if ClientRepo::find_by_id(&state.pool, input.client_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id: input.client_id,
        }));
    }

    if input.call_type.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Call type must not be empty".into(),
        )));
    }

    let call = CallRepo::create(&state.pool, auth.staff_id, &input).await?;

    tracing::info!(
        call_id = call.id,
        client_id = call.client_id,
        staff_id = auth.staff_id,
        "Call scheduled",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: call })))
}

/// GET /api/v1/calls
///
/// List calls by schedule order, optionally scoped with `?client_id=`.
pub async fn list_calls(
    _auth: AuthStaff,
    State(state): State<AppState>,
    Query(params): Query<CallListQuery>,
) -> AppResult<Json<DataResponse<Vec<CallLog>>>> {
    let calls = CallRepo::list(&state.pool, params.client_id, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: calls }))
}

/// GET /api/v1/calls/{id}
pub async fn get_call(
    _auth: AuthStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CallLog>>> {
    let call = CallRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Call", id }))?;
    Ok(Json(DataResponse { data: call }))
}

/// PUT /api/v1/calls/{id}
///
/// Partially update a call: reschedule, record the outcome, or attach notes.
/// The status, when given, must be one of the known call statuses.
pub async fn update_call(
    _auth: AuthStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCall>,
) -> AppResult<Json<DataResponse<CallLog>>> {
    if let Some(status) = input.status.as_deref() {
        if !CALL_STATUSES.contains(&status) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown call status '{status}' (expected one of: {})",
                CALL_STATUSES.join(", ")
            ))));
        }
    }

    let call = CallRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Call", id }))?;
    Ok(Json(DataResponse { data: call }))
}

/// DELETE /api/v1/calls/{id}
///
/// Remove a call from the schedule. Returns 204 No Content.
pub async fn delete_call(
    auth: AuthStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CallRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Call", id }));
    }

    tracing::info!(call_id = id, deleted_by = auth.staff_id, "Call removed");
    Ok(StatusCode::NO_CONTENT)
}
