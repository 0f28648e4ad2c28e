//! Admin handlers for profiles and shop roles.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use vitacart_core::error::CoreError;
use vitacart_core::roles::{is_valid_role, ROLE_ADMIN, VALID_ROLES};
use vitacart_core::search::{clamp_limit, clamp_offset, MAX_PAGE_SIZE};
use vitacart_core::types::UserId;
use vitacart_db::models::profile::SetProfileRole;
use vitacart_db::repositories::ProfileRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default page size for the profile listing.
const DEFAULT_PROFILE_PAGE: i64 = 50;

/// GET /api/v1/admin/profiles
pub async fn list_profiles(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_PROFILE_PAGE, MAX_PAGE_SIZE);
    let offset = clamp_offset(params.offset);

    let profiles = ProfileRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: profiles }))
}

/// PUT /api/v1/admin/profiles/{id}/role
///
/// Grant or revoke a shop role. Admins cannot demote themselves.
pub async fn set_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(profile_id): Path<UserId>,
    Json(input): Json<SetProfileRole>,
) -> AppResult<impl IntoResponse> {
    if !is_valid_role(&input.role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid role '{}'. Must be one of: {VALID_ROLES:?}",
            input.role
        ))));
    }
    if profile_id == admin.user_id && input.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Conflict(
            "Admins cannot remove their own admin role".into(),
        )));
    }

    let profile = ProfileRepo::set_role(&state.pool, profile_id, &input.role)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {profile_id} not found")))?;

    tracing::info!(
        profile_id = %profile_id,
        role = %profile.role,
        user_id = %admin.user_id,
        "Profile role changed",
    );

    Ok(Json(DataResponse { data: profile }))
}
