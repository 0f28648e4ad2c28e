//! Admin handlers for product management.
//!
//! Unlike the public catalog, these see inactive products.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vitacart_core::error::CoreError;
use vitacart_core::stock::validate_stock_level;
use vitacart_core::types::DbId;
use vitacart_core::validation::{resolve_slug, validate_price_pair, validate_slug};
use vitacart_db::models::product::{CreateProduct, UpdateProduct};
use vitacart_db::repositories::{ProductImageRepo, ProductRepo};

use crate::error::{validate_input, AppError, AppResult};
use crate::handlers::catalog::product_filter;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ProductListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/products
///
/// All products, including inactive ones.
pub async fn list_products(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> AppResult<impl IntoResponse> {
    let products = ProductRepo::list(&state.pool, &product_filter(params, false)).await?;
    Ok(Json(DataResponse { data: products }))
}

/// POST /api/v1/admin/products
///
/// Create a product together with its inventory row.
pub async fn create_product(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    validate_price_pair(input.price_cents, input.distributor_price_cents)?;
    if let Some(stock) = input.initial_stock {
        validate_stock_level(stock)?;
    }
    let slug = resolve_slug(input.slug.as_deref(), &input.name)?;

    let product = ProductRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(
        product_id = product.id,
        slug = %product.slug,
        initial_stock = input.initial_stock.unwrap_or(0),
        user_id = %admin.user_id,
        "Product created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// GET /api/v1/admin/products/{id}
pub async fn get_product(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = ProductRepo::find_detail(&state.pool, product_id, false)
        .await?
        .ok_or(not_found(product_id))?;

    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/admin/products/{id}
///
/// Partially update a product. When either price changes, the resulting
/// pair is validated against the stored one.
pub async fn update_product(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    if let Some(slug) = input.slug.as_deref() {
        validate_slug(slug)?;
    }

    if input.price_cents.is_some() || input.distributor_price_cents.is_some() {
        let current = ProductRepo::find_by_id(&state.pool, product_id)
            .await?
            .ok_or(not_found(product_id))?;
        validate_price_pair(
            input.price_cents.unwrap_or(current.price_cents),
            input
                .distributor_price_cents
                .unwrap_or(current.distributor_price_cents),
        )?;
    }

    let product = ProductRepo::update(&state.pool, product_id, &input)
        .await?
        .ok_or(not_found(product_id))?;

    tracing::info!(product_id, user_id = %admin.user_id, "Product updated");

    Ok(Json(DataResponse { data: product }))
}

/// DELETE /api/v1/admin/products/{id}
///
/// Images, inventory, and cart lines cascade. Stored image objects are
/// removed afterwards; a storage failure is logged, not returned.
pub async fn delete_product(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let paths = ProductImageRepo::storage_paths(&state.pool, product_id).await?;
    let deleted = ProductRepo::delete(&state.pool, product_id).await?;

    if !deleted {
        return Err(not_found(product_id));
    }

    if let Err(e) = state.storage.remove(&paths).await {
        tracing::warn!(product_id, error = %e, "Failed to remove product image objects");
    }

    tracing::info!(
        product_id,
        images = paths.len(),
        user_id = %admin.user_id,
        "Product deleted",
    );

    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    })
}
