//! Route definitions for the `/calls` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::calls;
use crate::state::AppState;

/// Routes mounted at `/calls`.
///
/// ```text
/// GET    /       -> list_calls (?client_id, ?limit, ?offset)
/// POST   /       -> create_call
/// GET    /{id}   -> get_call
/// PUT    /{id}   -> update_call
/// DELETE /{id}   -> delete_call
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(calls::list_calls).post(calls::create_call))
        .route(
            "/{id}",
            get(calls::get_call)
                .put(calls::update_call)
                .delete(calls::delete_call),
        )
}
