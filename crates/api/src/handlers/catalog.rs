//! Public catalog handlers: categories and active products.

use axum::extract::{Path, Query, State};
use axum::Json;
use vitacart_core::error::CoreError;
use vitacart_core::search::{clamp_limit, clamp_offset, ilike_pattern, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use vitacart_core::types::DbId;
use vitacart_db::models::category::Category;
use vitacart_db::models::product::{ProductDetail, ProductFilter, ProductListing};
use vitacart_db::repositories::{CategoryRepo, ProductRepo};

use crate::error::{AppError, AppResult};
use crate::query::{PaginationParams, ProductListParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Category>>> {
    let category = find_category(&state, category_id).await?;
    Ok(Json(DataResponse { data: category }))
}

/// GET /api/v1/categories/{id}/products
///
/// Active products in one category.
pub async fn list_category_products(
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<ProductListing>>>> {
    find_category(&state, category_id).await?;

    let filter = product_filter(
        ProductListParams {
            category_id: Some(category_id),
            search: None,
            limit: params.limit,
            offset: params.offset,
        },
        true,
    );
    let products = ProductRepo::list(&state.pool, &filter).await?;

    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/products
///
/// Active products, optionally filtered by `category_id` and a free-text
/// `search` over name and description.
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> AppResult<Json<DataResponse<Vec<ProductListing>>>> {
    let products = ProductRepo::list(&state.pool, &product_filter(params, true)).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/products/{id}
///
/// Product detail with category, images, and stock. Inactive products are
/// reported as missing.
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProductDetail>>> {
    let detail = ProductRepo::find_detail(&state.pool, product_id, true)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        }))?;

    Ok(Json(DataResponse { data: detail }))
}

/// Translate listing query parameters into a repository filter.
pub(crate) fn product_filter(params: ProductListParams, active_only: bool) -> ProductFilter {
    ProductFilter {
        category_id: params.category_id,
        search_pattern: params.search.as_deref().and_then(ilike_pattern),
        active_only,
        limit: clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
        offset: clamp_offset(params.offset),
    }
}

async fn find_category(state: &AppState, category_id: DbId) -> AppResult<Category> {
    CategoryRepo::find_by_id(&state.pool, category_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: category_id,
        }))
}
