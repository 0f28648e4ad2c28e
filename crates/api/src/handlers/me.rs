//! Handlers for the caller's own profile (`/me`).

use axum::extract::State;
use axum::Json;
use vitacart_db::models::profile::{Profile, UpdateProfile};
use vitacart_db::repositories::ProfileRepo;

use crate::error::{validate_input, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/me
///
/// Return the caller's profile, creating it on first sight.
pub async fn get_me(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = ensure_profile(&state, &user).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// PATCH /api/v1/me
///
/// Update the caller's display name.
pub async fn update_me(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<Profile>>> {
    validate_input(&input)?;
    ensure_profile(&state, &user).await?;

    let profile = ProfileRepo::update(&state.pool, user.user_id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", user.user_id)))?;

    tracing::info!(user_id = %user.user_id, "Profile updated");

    Ok(Json(DataResponse { data: profile }))
}

async fn ensure_profile(state: &AppState, user: &AuthUser) -> AppResult<Profile> {
    let email = user.email.as_deref().unwrap_or_default();
    Ok(ProfileRepo::ensure(&state.pool, user.user_id, email).await?)
}
