//! Public catalog routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Category routes mounted at `/categories`.
///
/// ```text
/// GET /                -> list_categories
/// GET /{id}            -> get_category
/// GET /{id}/products   -> list_category_products
/// ```
pub fn categories_router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_categories))
        .route("/{id}", get(catalog::get_category))
        .route("/{id}/products", get(catalog::list_category_products))
}

/// Product routes mounted at `/products`.
///
/// ```text
/// GET /       -> list_products
/// GET /{id}   -> get_product
/// ```
pub fn products_router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_products))
        .route("/{id}", get(catalog::get_product))
}
