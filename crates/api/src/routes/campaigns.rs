//! Route definitions for the `/campaigns` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::campaigns;
use crate::state::AppState;

/// Routes mounted at `/campaigns`.
///
/// ```text
/// GET    /         -> list_campaigns
/// POST   /         -> create_campaign
/// GET    /{code}   -> get_campaign
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(campaigns::list_campaigns).post(campaigns::create_campaign),
        )
        .route("/{code}", get(campaigns::get_campaign))
}
