//! Handlers for the `/onboarding` resource.
//!
//! Onboarding jobs are created one per client with an auto-assigned resume
//! writer. Status moves run through `opsdesk_core::workflow::check_transition`
//! (plan gating, privileged bypass, LinkedIn side channel, transition table)
//! and every accepted move lands in the append-only history.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use opsdesk_core::error::CoreError;
use opsdesk_core::plan::Plan;
use opsdesk_core::types::DbId;
use opsdesk_core::workflow::{self, OnboardingStatus};
use serde::Deserialize;

use opsdesk_db::models::client::Client;
use opsdesk_db::models::onboarding::{
    CreateComment, MoveStatus, OnboardingComment, OnboardingJob, OnboardingMove,
};
use opsdesk_db::repositories::{ClientRepo, OnboardingRepo, StaffRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthStaff;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /onboarding`.
#[derive(Debug, Deserialize)]
pub struct CreateOnboardingRequest {
    pub client_id: DbId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/onboarding
///
/// Open an onboarding job for a client, assigning the next resume writer in
/// round-robin order. One job per client: a second attempt gets an explicit
/// 409, with the unique index backstopping concurrent creates. Checking
/// before the assignment also keeps a doomed create from burning a
/// round-robin slot. Returns 201 with the created job.
pub async fn create_onboarding(
    auth: AuthStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateOnboardingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<OnboardingJob>>)> {
    // The client must exist and be active.
    let client = find_client(&state, input.client_id).await?;
    if !client.is_active {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot start onboarding for a deactivated client".into(),
        )));
    }

    if OnboardingRepo::find_by_client(&state.pool, client.id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Client {} already has an onboarding job",
            client.id
        ))));
    }

    let writer = StaffRepo::next_resume_writer(&state.pool)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "No active resume writer available for assignment".into(),
            ))
        })?;

    let job = OnboardingRepo::create(&state.pool, client.id, Some(writer.id)).await?;

    tracing::info!(
        onboarding_job_id = job.id,
        client_id = client.id,
        resume_writer_id = writer.id,
        created_by = auth.staff_id,
        "Onboarding job opened",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: job })))
}

/// GET /api/v1/onboarding
///
/// List all onboarding jobs, most recently opened first.
pub async fn list_onboarding(
    _auth: AuthStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<OnboardingJob>>>> {
    let jobs = OnboardingRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: jobs }))
}

/// GET /api/v1/onboarding/{id}
pub async fn get_onboarding(
    _auth: AuthStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<OnboardingJob>>> {
    let job = find_job(&state, id).await?;
    Ok(Json(DataResponse { data: job }))
}

/// PATCH /api/v1/onboarding/{id}/status
///
/// Move an onboarding job to a new status. The move is validated against
/// the client's plan tier, the mover's role, the LinkedIn side channel, and
/// the transition table, in that order. An accepted move and its history
/// row commit atomically.
pub async fn move_status(
    auth: AuthStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<MoveStatus>,
) -> AppResult<Json<DataResponse<OnboardingJob>>> {
    let job = find_job(&state, id).await?;
    let client = find_client(&state, job.client_id).await?;

    let from: OnboardingStatus = job.status.parse().map_err(AppError::Core)?;
    let to: OnboardingStatus = input.to_status.parse().map_err(AppError::Core)?;
    let plan: Plan = client.plan.parse().map_err(AppError::Core)?;

    workflow::check_transition(from, to, plan, &auth.role, job.linkedin_phase_started)
        .map_err(AppError::Core)?;

    let updated = OnboardingRepo::move_status(&state.pool, id, from, to, auth.staff_id)
        .await?
        .ok_or_else(|| {
            // The guarded update found a different current status, meaning a
            // concurrent move landed first.
            AppError::Core(CoreError::Conflict(
                "Onboarding status changed concurrently; re-fetch and retry".into(),
            ))
        })?;

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/onboarding/{id}/linkedin-phase
///
/// Start the LinkedIn sub-phase: requires the resume to be approved and a
/// plan tier that includes LinkedIn work. Assigns the next LinkedIn
/// specialist in round-robin order and sets `linkedin_phase_started`, which
/// unlocks the side-channel jump into `linkedin_in_progress`.
pub async fn start_linkedin_phase(
    auth: AuthStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<OnboardingJob>>> {
    let job = find_job(&state, id).await?;
    let client = find_client(&state, job.client_id).await?;

    let status: OnboardingStatus = job.status.parse().map_err(AppError::Core)?;
    let plan: Plan = client.plan.parse().map_err(AppError::Core)?;

    if !workflow::plan_allows(plan, OnboardingStatus::LinkedinInProgress) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "The LinkedIn phase is not available on the {plan} plan"
        ))));
    }

    if !status.has_reached(OnboardingStatus::ResumeApproved) {
        return Err(AppError::Core(CoreError::Validation(
            "The LinkedIn phase can only start once the resume is approved".into(),
        )));
    }

    let specialist = StaffRepo::next_linkedin_specialist(&state.pool)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "No active LinkedIn specialist available for assignment".into(),
            ))
        })?;

    let updated = OnboardingRepo::start_linkedin_phase(&state.pool, id, specialist.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OnboardingJob",
            id,
        }))?;

    tracing::info!(
        onboarding_job_id = id,
        linkedin_specialist_id = specialist.id,
        started_by = auth.staff_id,
        "LinkedIn phase started",
    );

    Ok(Json(DataResponse { data: updated }))
}

/// GET /api/v1/onboarding/{id}/history
///
/// The append-only move history, oldest first.
pub async fn get_history(
    _auth: AuthStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<OnboardingMove>>>> {
    find_job(&state, id).await?;
    let moves = OnboardingRepo::history(&state.pool, id).await?;
    Ok(Json(DataResponse { data: moves }))
}

/// GET /api/v1/onboarding/{id}/comments
pub async fn list_comments(
    _auth: AuthStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<OnboardingComment>>>> {
    find_job(&state, id).await?;
    let comments = OnboardingRepo::comments(&state.pool, id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/onboarding/{id}/comments
///
/// Add a comment. Returns 201 with the created comment.
pub async fn add_comment(
    auth: AuthStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<DataResponse<OnboardingComment>>)> {
    if input.body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Comment body must not be empty".into(),
        )));
    }

    find_job(&state, id).await?;
    let comment = OnboardingRepo::add_comment(&state.pool, id, auth.staff_id, &input.body).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_job(state: &AppState, id: DbId) -> AppResult<OnboardingJob> {
    OnboardingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OnboardingJob",
            id,
        }))
}

async fn find_client(state: &AppState, id: DbId) -> AppResult<Client> {
    ClientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Client", id }))
}
