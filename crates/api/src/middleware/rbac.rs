//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`]. Shop roles live in the `profiles`
//! table rather than in the token, so [`RequireAdmin`] looks the caller up.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use vitacart_core::error::CoreError;
use vitacart_core::roles::ROLE_ADMIN;
use vitacart_db::repositories::ProfileRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a profile with the `admin` role. Rejects with 403 otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let role = ProfileRepo::find_by_id(&state.pool, user.user_id)
            .await?
            .map(|p| p.role);

        if role.as_deref() != Some(ROLE_ADMIN) {
            tracing::warn!(user_id = %user.user_id, "Admin route denied");
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires any authenticated user.
///
/// Functionally equivalent to [`AuthUser`] but named explicitly so route
/// handlers read as "this route requires authentication".
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
