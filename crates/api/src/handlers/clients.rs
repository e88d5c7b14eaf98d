//! Handlers for the `/clients` resource.
//!
//! Covers registration, listing, partial updates, plan upgrades, payment
//! history, and the cascading delete. Deletion requires the `admin` role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use opsdesk_core::error::CoreError;
use opsdesk_core::plan::{upgrade_delta_cents, Plan};
use opsdesk_core::types::DbId;
use serde::Deserialize;

use opsdesk_db::models::client::{Client, CreateClient, UpdateClient};
use opsdesk_db::models::payment::ClientPayment;
use opsdesk_db::repositories::{ClientRepo, PaymentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthStaff;
use crate::middleware::rbac::RequireAdmin;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /clients/{id}/plan`.
#[derive(Debug, Deserialize)]
pub struct ChangePlanRequest {
    pub plan: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/clients
///
/// Register a new client. The plan's price is recorded as the initial
/// payment. Duplicate emails get an explicit 409 here; the unique index
/// still backstops concurrent registrations.
pub async fn create_client(
    auth: AuthStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateClient>,
) -> AppResult<(StatusCode, Json<DataResponse<Client>>)> {
    if input.email.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Client email must not be empty".into(),
        )));
    }

    let plan: Plan = input.plan.parse().map_err(AppError::Core)?;

    if ClientRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A client with email {} already exists",
            input.email
        ))));
    }

    // The client row and its initial payment-history row commit together.
    let client = ClientRepo::create(&state.pool, &input, plan.price_cents()).await?;

    tracing::info!(
        client_id = client.id,
        plan = %plan,
        registered_by = auth.staff_id,
        "Client registered",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: client })))
}

/// GET /api/v1/clients
///
/// List clients, most recently registered first. Pass
/// `?include_inactive=true` to include deactivated clients.
pub async fn list_clients(
    _auth: AuthStaff,
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<Client>>>> {
    let clients = ClientRepo::list(
        &state.pool,
        params.include_inactive,
        params.limit,
        params.offset,
    )
    .await?;
    Ok(Json(DataResponse { data: clients }))
}

/// GET /api/v1/clients/{id}
pub async fn get_client(
    _auth: AuthStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Client>>> {
    let client = find_client(&state, id).await?;
    Ok(Json(DataResponse { data: client }))
}

/// PUT /api/v1/clients/{id}
///
/// Partially update a client: profile fields, checklist booleans, and
/// credential sub-documents.
pub async fn update_client(
    _auth: AuthStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateClient>,
) -> AppResult<Json<DataResponse<Client>>> {
    let client = ClientRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Client", id }))?;
    Ok(Json(DataResponse { data: client }))
}

/// POST /api/v1/clients/{id}/plan
///
/// Upgrade the client's plan. The new `amount_paid` is the previous amount
/// plus the price difference between the tiers; downgrades are rejected.
pub async fn change_plan(
    auth: AuthStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ChangePlanRequest>,
) -> AppResult<Json<DataResponse<Client>>> {
    let client = find_client(&state, id).await?;

    let current: Plan = client.plan.parse().map_err(AppError::Core)?;
    let target: Plan = input.plan.parse().map_err(AppError::Core)?;

    let delta = upgrade_delta_cents(current, target).map_err(AppError::Core)?;

    let updated = ClientRepo::upgrade_plan(&state.pool, id, target.as_str(), delta)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Client", id }))?;

    tracing::info!(
        client_id = id,
        from = %current,
        to = %target,
        delta_cents = delta,
        changed_by = auth.staff_id,
        "Client plan upgraded",
    );

    Ok(Json(DataResponse { data: updated }))
}

/// GET /api/v1/clients/{id}/payments
///
/// The client's append-only payment history, oldest first.
pub async fn list_payments(
    _auth: AuthStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ClientPayment>>>> {
    // 404 for unknown clients rather than an empty history.
    find_client(&state, id).await?;

    let payments = PaymentRepo::list_for_client(&state.pool, id).await?;
    Ok(Json(DataResponse { data: payments }))
}

/// DELETE /api/v1/clients/{id}
///
/// Delete the client and every dependent record (jobs, calls, payments,
/// onboarding artifacts) in one transaction. Returns 204 No Content.
pub async fn delete_client(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ClientRepo::cascade_delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Client", id }));
    }

    tracing::info!(client_id = id, deleted_by = admin.staff_id, "Client deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_client(state: &AppState, id: DbId) -> AppResult<Client> {
    ClientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Client", id }))
}
