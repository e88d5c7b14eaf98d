//! Handlers for the `/campaigns` resource (marketing attribution codes).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use opsdesk_core::error::CoreError;

use opsdesk_db::models::campaign::{Campaign, CreateCampaign};
use opsdesk_db::repositories::CampaignRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/campaigns
///
/// Create a campaign. Codes are unique; a duplicate maps to 409 via the
/// unique index. Returns 201 with the created campaign.
pub async fn create_campaign(
    auth: AuthStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateCampaign>,
) -> AppResult<(StatusCode, Json<DataResponse<Campaign>>)> {
    if input.code.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Campaign code must not be empty".into(),
        )));
    }
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Campaign name must not be empty".into(),
        )));
    }

    let campaign = CampaignRepo::create(&state.pool, auth.staff_id, &input).await?;

    tracing::info!(
        campaign_id = campaign.id,
        code = %campaign.code,
        created_by = auth.staff_id,
        "Campaign created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: campaign })))
}

/// GET /api/v1/campaigns
///
/// List all campaigns, most recently created first.
pub async fn list_campaigns(
    _auth: AuthStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Campaign>>>> {
    let campaigns = CampaignRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: campaigns }))
}

/// GET /api/v1/campaigns/{code}
///
/// Look up a campaign by its unique code.
pub async fn get_campaign(
    _auth: AuthStaff,
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<DataResponse<Campaign>>> {
    let campaign = CampaignRepo::find_by_code(&state.pool, &code)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Campaign with code '{code}' not found")))?;
    Ok(Json(DataResponse { data: campaign }))
}
