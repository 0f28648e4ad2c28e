//! Shared query parameter types for API handlers.

use serde::Deserialize;
use vitacart_core::types::DbId;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the handler via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Catalog listing parameters (`?category_id=&search=&limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct ProductListParams {
    pub category_id: Option<DbId>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Low-stock filter for the inventory listing (`?below=`).
#[derive(Debug, Deserialize)]
pub struct InventoryListParams {
    pub below: Option<i32>,
}
