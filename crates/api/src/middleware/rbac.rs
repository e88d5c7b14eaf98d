//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthStaff`] and rejects requests whose role does
//! not meet the minimum requirement, enforcing authorization at the type
//! level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use opsdesk_core::error::CoreError;
use opsdesk_core::roles::ROLE_ADMIN;

use super::auth::AuthStaff;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(staff): RequireAdmin) -> AppResult<Json<()>> {
///     // staff is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthStaff);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let staff = AuthStaff::from_request_parts(parts, state).await?;
        if staff.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(staff))
    }
}

/// Requires any authenticated staff member (any valid role).
///
/// Functionally equivalent to [`AuthStaff`] but named explicitly for use in
/// route definitions where the intent "this route requires authentication"
/// should be self-documenting.
pub struct RequireAuth(pub AuthStaff);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let staff = AuthStaff::from_request_parts(parts, state).await?;
        Ok(RequireAuth(staff))
    }
}
