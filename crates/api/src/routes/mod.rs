pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                          service + db health
///
/// /auth/signup                                     sign up (public)
/// /auth/login                                      password sign-in (public)
/// /auth/refresh                                    token refresh (public)
/// /auth/logout                                     sign out (requires auth)
///
/// /me                                              get, patch own profile (auth)
///
/// /categories                                      list (public)
/// /categories/{id}                                 get (public)
/// /categories/{id}/products                        active products (public)
/// /products                                        list active, filter, search (public)
/// /products/{id}                                   detail (public)
///
/// /cart                                            get, clear (auth)
/// /cart/summary                                    pricing summary (auth)
/// /cart/items                                      add (auth)
/// /cart/items/{product_id}                         set quantity, remove (auth)
///
/// /admin/categories                                list, create (admin only)
/// /admin/categories/{id}                           get, update, delete
/// /admin/products                                  list (incl. inactive), create
/// /admin/products/{id}                             get, update, delete
/// /admin/products/{id}/images/upload-url           signed upload URL (POST)
/// /admin/products/{id}/images                      list, register
/// /admin/products/{id}/images/{image_id}           update, delete
/// /admin/inventory                                 list (?below=)
/// /admin/inventory/{product_id}                    get, set
/// /admin/inventory/{product_id}/adjust             adjust by delta (POST)
/// /admin/profiles                                  list
/// /admin/profiles/{id}/role                        set role (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/auth", auth::router())
        .nest("/me", auth::me_router())
        .nest("/categories", catalog::categories_router())
        .nest("/products", catalog::products_router())
        .nest("/cart", cart::router())
        .nest("/admin", admin::router())
}
