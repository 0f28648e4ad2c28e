use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::cart;
use crate::state::AppState;

/// Cart routes mounted at `/cart` (all require auth).
///
/// ```text
/// GET    /                      -> get_cart
/// DELETE /                      -> clear_cart
/// GET    /summary               -> get_summary
/// POST   /items                 -> add_item
/// PUT    /items/{product_id}    -> update_item
/// DELETE /items/{product_id}    -> remove_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::get_cart).delete(cart::clear_cart))
        .route("/summary", get(cart::get_summary))
        .route("/items", post(cart::add_item))
        .route(
            "/items/{product_id}",
            put(cart::update_item).delete(cart::remove_item),
        )
}
