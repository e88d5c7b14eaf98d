//! Route definitions for the `/onboarding` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Routes mounted at `/onboarding`.
///
/// ```text
/// GET    /                      -> list_onboarding
/// POST   /                      -> create_onboarding
/// GET    /{id}                  -> get_onboarding
/// PATCH  /{id}/status           -> move_status
/// POST   /{id}/linkedin-phase   -> start_linkedin_phase
/// GET    /{id}/history          -> get_history
/// GET    /{id}/comments         -> list_comments
/// POST   /{id}/comments         -> add_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(onboarding::list_onboarding).post(onboarding::create_onboarding),
        )
        .route("/{id}", get(onboarding::get_onboarding))
        .route("/{id}/status", patch(onboarding::move_status))
        .route("/{id}/linkedin-phase", post(onboarding::start_linkedin_phase))
        .route("/{id}/history", get(onboarding::get_history))
        .route(
            "/{id}/comments",
            get(onboarding::list_comments).post(onboarding::add_comment),
        )
}
