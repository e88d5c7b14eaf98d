//! Route definitions for the `/clients` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::clients;
use crate::state::AppState;

/// Routes mounted at `/clients`.
///
/// ```text
/// GET    /               -> list_clients
/// POST   /               -> create_client
/// GET    /{id}           -> get_client
/// PUT    /{id}           -> update_client
/// DELETE /{id}           -> delete_client (admin only, cascades)
/// POST   /{id}/plan      -> change_plan
/// GET    /{id}/payments  -> list_payments
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(clients::list_clients).post(clients::create_client))
        .route(
            "/{id}",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        .route("/{id}/plan", post(clients::change_plan))
        .route("/{id}/payments", get(clients::list_payments))
}
