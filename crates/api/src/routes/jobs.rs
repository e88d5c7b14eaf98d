//! Route definitions for the `/jobs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// Routes mounted at `/jobs`.
///
/// ```text
/// GET    /          -> list_jobs (?client_id, ?bucket, ?limit, ?offset)
/// POST   /          -> create_job
/// GET    /summary   -> job_summary (?client_id)
/// GET    /{id}      -> get_job
/// PUT    /{id}      -> update_job
/// DELETE /{id}      -> delete_job (soft)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(jobs::list_jobs).post(jobs::create_job))
        .route("/summary", get(jobs::job_summary))
        .route(
            "/{id}",
            get(jobs::get_job).put(jobs::update_job).delete(jobs::delete_job),
        )
}
