use std::sync::Arc;

use vitacart_cloud::{IdentityProvider, ObjectStorage};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vitacart_db::DbPool,
    /// Server configuration (JWT settings, pricing policy, ...).
    pub config: Arc<ServerConfig>,
    /// Product image storage.
    pub storage: Arc<dyn ObjectStorage>,
    /// Hosted identity service used by the `/auth` pass-through.
    pub identity: Arc<dyn IdentityProvider>,
}
