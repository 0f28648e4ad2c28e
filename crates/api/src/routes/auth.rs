//! Route definitions for the auth pass-through and the caller's profile.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, me};
use crate::state::AppState;

/// Auth routes mounted at `/auth`.
///
/// ```text
/// POST /signup   -> signup
/// POST /login    -> login
/// POST /refresh  -> refresh
/// POST /logout   -> logout (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
}

/// Profile routes mounted at `/me`.
///
/// ```text
/// GET   /  -> get_me
/// PATCH /  -> update_me
/// ```
pub fn me_router() -> Router<AppState> {
    Router::new().route("/", get(me::get_me).patch(me::update_me))
}
