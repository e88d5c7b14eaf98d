//! Handlers for the `/jobs` resource (job-application tracking).
//!
//! `status` is free text; listings and summaries classify it into reporting
//! buckets via `opsdesk_core::job_status`. Deleting a job is a soft delete
//! (the status is set to `deleted` and it drops out of default listings).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use opsdesk_core::error::CoreError;
use opsdesk_core::job_status::JobBucket;
use opsdesk_core::types::DbId;
use serde::Serialize;

use opsdesk_db::models::job::{CreateJob, Job, JobListQuery, UpdateJob};
use opsdesk_db::repositories::{ClientRepo, JobRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// One row of the `/jobs/summary` response.
#[derive(Debug, Serialize)]
pub struct BucketCount {
    pub bucket: JobBucket,
    pub count: usize,
}

/// POST /api/v1/jobs
///
/// Create a job-application record. The authenticated staff member is
/// recorded as the operator. Returns 201 with the created job.
pub async fn create_job(
    auth: AuthStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateJob>,
) -> AppResult<(StatusCode, Json<DataResponse<Job>>)> {
    // The client must exist; a dangling client_id would otherwise surface
    // as a foreign-key error mapped to 500.
    if ClientRepo::find_by_id(&state.pool, input.client_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id: input.client_id,
        }));
    }

    let job = JobRepo::create(&state.pool, auth.staff_id, &input).await?;

    tracing::info!(
        job_id = job.id,
        client_id = job.client_id,
        operator_id = auth.staff_id,
        "Job record created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: job })))
}

/// GET /api/v1/jobs
///
/// List jobs, optionally scoped with `?client_id=` and filtered with
/// `?bucket=`. Soft-deleted jobs only appear when `bucket=deleted` is
/// requested explicitly.
pub async fn list_jobs(
    _auth: AuthStaff,
    State(state): State<AppState>,
    Query(params): Query<JobListQuery>,
) -> AppResult<Json<DataResponse<Vec<Job>>>> {
    let bucket = parse_bucket(params.bucket.as_deref())?;

    let jobs = JobRepo::list(
        &state.pool,
        params.client_id,
        bucket,
        params.limit,
        params.offset,
    )
    .await?;

    Ok(Json(DataResponse { data: jobs }))
}

/// GET /api/v1/jobs/summary
///
/// Per-bucket counts, optionally scoped with `?client_id=`.
pub async fn job_summary(
    _auth: AuthStaff,
    State(state): State<AppState>,
    Query(params): Query<JobListQuery>,
) -> AppResult<Json<DataResponse<Vec<BucketCount>>>> {
    let counts = JobRepo::summary(&state.pool, params.client_id).await?;

    let data = counts
        .into_iter()
        .map(|(bucket, count)| BucketCount { bucket, count })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/jobs/{id}
pub async fn get_job(
    _auth: AuthStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Job>>> {
    let job = JobRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Job", id }))?;
    Ok(Json(DataResponse { data: job }))
}

/// PUT /api/v1/jobs/{id}
///
/// Partially update a job record, including its free-text status.
pub async fn update_job(
    _auth: AuthStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateJob>,
) -> AppResult<Json<DataResponse<Job>>> {
    let job = JobRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Job", id }))?;
    Ok(Json(DataResponse { data: job }))
}

/// DELETE /api/v1/jobs/{id}
///
/// Soft-delete a job record. Returns 204 No Content.
pub async fn delete_job(
    auth: AuthStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = JobRepo::soft_delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Job", id }));
    }

    tracing::info!(job_id = id, deleted_by = auth.staff_id, "Job soft-deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_bucket(raw: Option<&str>) -> AppResult<Option<JobBucket>> {
    raw.map(|s| s.parse::<JobBucket>().map_err(AppError::Core))
        .transpose()
}
