//! Route definitions for the `/staff` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::staff;
use crate::state::AppState;

/// Routes mounted at `/staff`.
///
/// ```text
/// GET    /       -> list_staff
/// POST   /       -> create_staff (admin only)
/// GET    /{id}            -> get_staff
/// PUT    /{id}            -> update_staff (admin only)
/// DELETE /{id}            -> deactivate_staff (admin only)
/// PUT    /{id}/password   -> reset_password (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(staff::list_staff).post(staff::create_staff))
        .route(
            "/{id}",
            get(staff::get_staff)
                .put(staff::update_staff)
                .delete(staff::deactivate_staff),
        )
        .route("/{id}/password", put(staff::reset_password))
}
