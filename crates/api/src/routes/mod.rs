pub mod auth;
pub mod calls;
pub mod campaigns;
pub mod clients;
pub mod health;
pub mod jobs;
pub mod onboarding;
pub mod staff;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
///
/// /staff                               list, create (create is admin only)
/// /staff/{id}                          get, update, deactivate (mutations admin only)
/// /staff/{id}/password                 reset password (PUT, admin only)
///
/// /clients                             list, create
/// /clients/{id}                        get, update, delete (delete is admin only)
/// /clients/{id}/plan                   upgrade plan (POST)
/// /clients/{id}/payments               payment history (GET)
///
/// /jobs                                list, create
/// /jobs/summary                        per-bucket counts (GET)
/// /jobs/{id}                           get, update, soft-delete
///
/// /onboarding                          list, create
/// /onboarding/{id}                     get
/// /onboarding/{id}/status              move status (PATCH)
/// /onboarding/{id}/linkedin-phase      start LinkedIn phase (POST)
/// /onboarding/{id}/history             move history (GET)
/// /onboarding/{id}/comments            list, add
///
/// /calls                               list, create
/// /calls/{id}                          get, update, delete
///
/// /campaigns                           list, create
/// /campaigns/{code}                    get by code
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication: login, token refresh, logout.
        .nest("/auth", auth::router())
        // Staff directory and role assignment.
        .nest("/staff", staff::router())
        // Client accounts, plan upgrades, payment history.
        .nest("/clients", clients::router())
        // Job-application tracking and bucket summaries.
        .nest("/jobs", jobs::router())
        // Onboarding workflow: status moves, history, comments.
        .nest("/onboarding", onboarding::router())
        // Call scheduling.
        .nest("/calls", calls::router())
        // Marketing attribution codes.
        .nest("/campaigns", campaigns::router())
}
