//! Admin route definitions (all require the `admin` role).

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{
    admin_categories, admin_images, admin_inventory, admin_products, admin_profiles,
};
use crate::state::AppState;

/// Admin routes mounted at `/admin`.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/categories", categories_router())
        .nest("/products", products_router())
        .nest("/inventory", inventory_router())
        .nest("/profiles", profiles_router())
}

/// ```text
/// GET    /        -> list_categories
/// POST   /        -> create_category
/// GET    /{id}    -> get_category
/// PUT    /{id}    -> update_category
/// DELETE /{id}    -> delete_category
/// ```
fn categories_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(admin_categories::list_categories).post(admin_categories::create_category),
        )
        .route(
            "/{id}",
            get(admin_categories::get_category)
                .put(admin_categories::update_category)
                .delete(admin_categories::delete_category),
        )
}

/// ```text
/// GET    /                              -> list_products
/// POST   /                              -> create_product
/// GET    /{id}                          -> get_product
/// PUT    /{id}                          -> update_product
/// DELETE /{id}                          -> delete_product
/// POST   /{id}/images/upload-url        -> create_upload_url
/// GET    /{id}/images                   -> list_images
/// POST   /{id}/images                   -> create_image
/// PUT    /{id}/images/{image_id}        -> update_image
/// DELETE /{id}/images/{image_id}        -> delete_image
/// ```
fn products_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(admin_products::list_products).post(admin_products::create_product),
        )
        .route(
            "/{id}",
            get(admin_products::get_product)
                .put(admin_products::update_product)
                .delete(admin_products::delete_product),
        )
        .route(
            "/{id}/images/upload-url",
            post(admin_images::create_upload_url),
        )
        .route(
            "/{id}/images",
            get(admin_images::list_images).post(admin_images::create_image),
        )
        .route(
            "/{id}/images/{image_id}",
            put(admin_images::update_image).delete(admin_images::delete_image),
        )
}

/// ```text
/// GET  /                        -> list_inventory
/// GET  /{product_id}            -> get_inventory
/// PUT  /{product_id}            -> set_inventory
/// POST /{product_id}/adjust     -> adjust_inventory
/// ```
fn inventory_router() -> Router<AppState> {
    Router::new()
        .route("/", get(admin_inventory::list_inventory))
        .route(
            "/{product_id}",
            get(admin_inventory::get_inventory).put(admin_inventory::set_inventory),
        )
        .route(
            "/{product_id}/adjust",
            post(admin_inventory::adjust_inventory),
        )
}

/// ```text
/// GET /              -> list_profiles
/// PUT /{id}/role     -> set_role
/// ```
fn profiles_router() -> Router<AppState> {
    Router::new()
        .route("/", get(admin_profiles::list_profiles))
        .route("/{id}/role", put(admin_profiles::set_role))
}
