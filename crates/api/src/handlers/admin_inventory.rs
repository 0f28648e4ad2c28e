//! Admin handlers for stock levels.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use vitacart_core::error::CoreError;
use vitacart_core::stock::validate_stock_level;
use vitacart_core::types::DbId;
use vitacart_db::models::inventory::{AdjustInventory, InventoryAdjustment, SetInventory};
use vitacart_db::repositories::{InventoryRepo, ProductRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::InventoryListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/inventory
///
/// Stock per product; `?below=N` keeps only levels under `N`.
pub async fn list_inventory(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<InventoryListParams>,
) -> AppResult<impl IntoResponse> {
    let levels = InventoryRepo::list(&state.pool, params.below).await?;
    Ok(Json(DataResponse { data: levels }))
}

/// GET /api/v1/admin/inventory/{product_id}
pub async fn get_inventory(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let level = InventoryRepo::find(&state.pool, product_id)
        .await?
        .ok_or(not_found(product_id))?;

    Ok(Json(DataResponse { data: level }))
}

/// PUT /api/v1/admin/inventory/{product_id}
///
/// Overwrite the stock level.
pub async fn set_inventory(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
    Json(input): Json<SetInventory>,
) -> AppResult<impl IntoResponse> {
    validate_stock_level(input.quantity)?;

    ProductRepo::find_by_id(&state.pool, product_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        }))?;

    let level = InventoryRepo::set(&state.pool, product_id, input.quantity).await?;

    tracing::info!(
        product_id,
        quantity = level.quantity,
        user_id = %admin.user_id,
        "Inventory set",
    );

    Ok(Json(DataResponse { data: level }))
}

/// POST /api/v1/admin/inventory/{product_id}/adjust
///
/// Add `delta` (positive or negative) to the stock level. An adjustment that
/// would leave negative stock is rejected with 409.
pub async fn adjust_inventory(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
    Json(input): Json<AdjustInventory>,
) -> AppResult<impl IntoResponse> {
    let level = match InventoryRepo::adjust(&state.pool, product_id, input.delta).await? {
        InventoryAdjustment::Applied(level) => level,
        InventoryAdjustment::NotFound => return Err(not_found(product_id)),
        InventoryAdjustment::WouldGoNegative { available } => {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Adjustment of {} would leave negative stock (available {available})",
                input.delta
            ))));
        }
    };

    tracing::info!(
        product_id,
        delta = input.delta,
        quantity = level.quantity,
        user_id = %admin.user_id,
        "Inventory adjusted",
    );

    Ok(Json(DataResponse { data: level }))
}

fn not_found(product_id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Inventory",
        id: product_id,
    })
}
