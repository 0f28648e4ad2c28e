//! Handlers for the `/auth` resource.
//!
//! Credentials are never stored here: each call is forwarded to the hosted
//! identity service and its session is returned as-is.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;
use vitacart_cloud::{AuthSession, CloudError};
use vitacart_core::error::CoreError;
use vitacart_db::repositories::ProfileRepo;

use crate::error::{validate_input, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 72))]
    pub password: String,
    #[validate(length(min = 1, max = 200))]
    pub full_name: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Register with email + password. Returns whatever the identity service
/// returns (a session, or a user pending email confirmation).
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignUpRequest>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;

    let created = state
        .identity
        .sign_up(&input.email, &input.password, input.full_name.as_deref())
        .await
        .map_err(|e| reject_client_error(e, AppError::BadRequest))?;

    tracing::info!(email = %input.email, "User signed up");

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// POST /api/v1/auth/login
///
/// Exchange email + password for a session and make sure the caller has a
/// profile row.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthSession>>> {
    validate_input(&input)?;

    let session = state
        .identity
        .sign_in_with_password(&input.email, &input.password)
        .await
        .map_err(|e| {
            reject_client_error(e, |_| {
                AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
            })
        })?;

    if let Some(user_id) = session_user_id(&session) {
        ProfileRepo::ensure(&state.pool, user_id, &input.email).await?;
        tracing::info!(user_id = %user_id, "User logged in");
    }

    Ok(Json(DataResponse { data: session }))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new session.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<DataResponse<AuthSession>>> {
    validate_input(&input)?;

    let session = state
        .identity
        .refresh_session(&input.refresh_token)
        .await
        .map_err(|e| {
            reject_client_error(e, |_| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid or expired refresh token".into(),
                ))
            })
        })?;

    Ok(Json(DataResponse { data: session }))
}

/// POST /api/v1/auth/logout
///
/// Revoke the caller's session. A session the identity service no longer
/// knows about counts as already signed out.
pub async fn logout(user: AuthUser, State(state): State<AppState>) -> AppResult<StatusCode> {
    match state.identity.sign_out(&user.access_token).await {
        Ok(()) => {}
        Err(e) if e.is_client_error() => {
            tracing::warn!(user_id = %user.user_id, error = %e, "Sign-out rejected, treating as signed out");
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!(user_id = %user.user_id, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Turn a 4xx from the identity service into `on_reject(message)`; any other
/// failure stays a hosted-service error (500).
fn reject_client_error(err: CloudError, on_reject: impl FnOnce(String) -> AppError) -> AppError {
    if !err.is_client_error() {
        return AppError::Cloud(err);
    }
    tracing::debug!(error = %err, "Identity service rejected request");
    on_reject(rejection_message(&err))
}

/// Best human-readable message from an identity error body.
fn rejection_message(err: &CloudError) -> String {
    let CloudError::Api { body, .. } = err else {
        return err.to_string();
    };
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["msg", "error_description", "message", "error"]
                .iter()
                .find_map(|key| v.get(*key).and_then(|m| m.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| "Request rejected by identity service".to_string())
}

fn session_user_id(session: &AuthSession) -> Option<Uuid> {
    session
        .user
        .get("id")
        .and_then(|v| v.as_str())
        .and_then(|s| Uuid::parse_str(s).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_message_prefers_msg_field() {
        let err = CloudError::Api {
            status: 422,
            body: r#"{"code":422,"msg":"User already registered"}"#.into(),
        };
        assert_eq!(rejection_message(&err), "User already registered");
    }

    #[test]
    fn rejection_message_falls_back_for_plain_bodies() {
        let err = CloudError::Api {
            status: 400,
            body: "nope".into(),
        };
        assert_eq!(rejection_message(&err), "Request rejected by identity service");
    }

    #[test]
    fn server_errors_are_not_rejections() {
        let err = CloudError::Api {
            status: 503,
            body: String::new(),
        };
        let mapped = reject_client_error(err, AppError::BadRequest);
        assert!(matches!(mapped, AppError::Cloud(_)));
    }
}
