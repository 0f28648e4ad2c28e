//! HTTP-level tests for the cart, tiered pricing, and stock validation.
//!
//! The test app uses a distributor threshold of 100.00 and a minimum order
//! of 6 items.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_customer, deactivate_product, delete_auth, get, get_auth, post_json_auth,
    put_json_auth, seed_product,
};
use sqlx::PgPool;

async fn add(
    app: axum::Router,
    token: &str,
    product_id: i64,
    quantity: i32,
) -> axum::http::Response<axum::body::Body> {
    let body = serde_json::json!({ "product_id": product_id, "quantity": quantity });
    post_json_auth(app, "/api/v1/cart/items", body, token).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cart_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/cart").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_cart_is_retail_and_below_minimum(pool: PgPool) {
    let (_, token) = create_customer(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/cart", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["cart_id"].is_null());
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 0);
    assert_eq!(json["data"]["summary"]["tier"], "retail");
    assert_eq!(json["data"]["summary"]["subtotal_cents"], 0);
    assert_eq!(json["data"]["summary"]["meets_minimum"], false);
    assert_eq!(json["data"]["summary"]["items_to_minimum"], 6);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn adding_items_merges_lines_and_prices_at_retail(pool: PgPool) {
    let (_, token) = create_customer(&pool).await;
    let product = seed_product(&pool, "creatine", 2_000, 1_500, 10, None).await;
    let app = common::build_test_app(pool);

    assert_eq!(add(app.clone(), &token, product, 2).await.status(), StatusCode::CREATED);
    let response = add(app, &token, product, 1).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 3);
    assert_eq!(items[0]["unit_price_cents"], 2_000);
    assert_eq!(items[0]["line_total_cents"], 6_000);
    assert_eq!(json["data"]["summary"]["tier"], "retail");
    assert_eq!(json["data"]["summary"]["remaining_to_distributor_cents"], 4_000);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reaching_threshold_switches_to_distributor_pricing(pool: PgPool) {
    let (_, token) = create_customer(&pool).await;
    let product = seed_product(&pool, "whey", 2_000, 1_500, 10, None).await;
    let app = common::build_test_app(pool);

    // 5 x 20.00 = 100.00 retail: exactly the threshold.
    let json = body_json(add(app, &token, product, 5).await).await;

    let summary = &json["data"]["summary"];
    assert_eq!(summary["tier"], "distributor");
    assert_eq!(summary["retail_subtotal_cents"], 10_000);
    assert_eq!(summary["subtotal_cents"], 7_500);
    assert_eq!(summary["savings_cents"], 2_500);
    assert_eq!(json["data"]["items"][0]["unit_price_cents"], 1_500);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn minimum_order_counts_item_quantities(pool: PgPool) {
    let (_, token) = create_customer(&pool).await;
    let a = seed_product(&pool, "a-product", 100, 90, 10, None).await;
    let b = seed_product(&pool, "b-product", 100, 90, 10, None).await;
    let app = common::build_test_app(pool);

    add(app.clone(), &token, a, 4).await;
    add(app.clone(), &token, b, 1).await;
    let summary = body_json(get_auth(app.clone(), "/api/v1/cart/summary", &token).await).await;
    assert_eq!(summary["data"]["item_count"], 5);
    assert_eq!(summary["data"]["meets_minimum"], false);

    add(app.clone(), &token, b, 1).await;
    let summary = body_json(get_auth(app, "/api/v1/cart/summary", &token).await).await;
    assert_eq!(summary["data"]["item_count"], 6);
    assert_eq!(summary["data"]["meets_minimum"], true);
    assert_eq!(summary["data"]["items_to_minimum"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn adding_beyond_stock_returns_409(pool: PgPool) {
    let (_, token) = create_customer(&pool).await;
    let product = seed_product(&pool, "omega-3", 1_000, 800, 3, None).await;
    let app = common::build_test_app(pool);

    add(app.clone(), &token, product, 2).await;
    let response = add(app, &token, product, 2).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["error"],
        "Insufficient stock: requested 4, available 3"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn adding_missing_or_inactive_products_is_rejected(pool: PgPool) {
    let (_, token) = create_customer(&pool).await;
    let product = seed_product(&pool, "retired", 1_000, 800, 3, None).await;
    deactivate_product(&pool, product).await;
    let app = common::build_test_app(pool);

    assert_eq!(add(app.clone(), &token, 999_999, 1).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(add(app, &token, product, 1).await.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_quantities_return_400(pool: PgPool) {
    let (_, token) = create_customer(&pool).await;
    let product = seed_product(&pool, "zinc", 1_000, 800, 3, None).await;
    let app = common::build_test_app(pool);

    assert_eq!(add(app.clone(), &token, product, 0).await.status(), StatusCode::BAD_REQUEST);
    assert_eq!(add(app, &token, product, 1_000).await.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn setting_quantity_checks_stock_and_zero_removes(pool: PgPool) {
    let (_, token) = create_customer(&pool).await;
    let product = seed_product(&pool, "magnesium", 1_000, 800, 4, None).await;
    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/cart/items/{product}");

    add(app.clone(), &token, product, 1).await;

    let body = serde_json::json!({ "quantity": 4 });
    let response = put_json_auth(app.clone(), &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["items"][0]["quantity"], 4);

    let body = serde_json::json!({ "quantity": 5 });
    let response = put_json_auth(app.clone(), &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = put_json_auth(app, &uri, serde_json::json!({ "quantity": 0 }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"]["items"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn setting_quantity_of_missing_line_returns_404(pool: PgPool) {
    let (_, token) = create_customer(&pool).await;
    let product = seed_product(&pool, "iron", 1_000, 800, 4, None).await;
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/cart/items/{product}");
    let response = put_json_auth(app, &uri, serde_json::json!({ "quantity": 2 }), &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn removing_a_line_returns_204_then_404(pool: PgPool) {
    let (_, token) = create_customer(&pool).await;
    let product = seed_product(&pool, "calcium", 1_000, 800, 4, None).await;
    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/cart/items/{product}");

    add(app.clone(), &token, product, 2).await;

    assert_eq!(delete_auth(app.clone(), &uri, &token).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(delete_auth(app, &uri, &token).await.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn clearing_the_cart_empties_it(pool: PgPool) {
    let (_, token) = create_customer(&pool).await;
    let product = seed_product(&pool, "biotin", 1_000, 800, 4, None).await;
    let app = common::build_test_app(pool);

    add(app.clone(), &token, product, 2).await;
    let response = delete_auth(app.clone(), "/api/v1/cart", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get_auth(app, "/api/v1/cart", &token).await).await;
    assert!(json["data"]["cart_id"].is_number());
    assert!(json["data"]["items"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn carts_are_per_user(pool: PgPool) {
    let (_, alice) = create_customer(&pool).await;
    let (_, bob) = create_customer(&pool).await;
    let product = seed_product(&pool, "collagen", 1_000, 800, 10, None).await;
    let app = common::build_test_app(pool);

    add(app.clone(), &alice, product, 3).await;

    let json = body_json(get_auth(app, "/api/v1/cart", &bob).await).await;
    assert!(json["data"]["items"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rejected_add_does_not_create_a_cart(pool: PgPool) {
    let (_, token) = create_customer(&pool).await;
    let product = seed_product(&pool, "scarce", 1_000, 800, 1, None).await;
    let app = common::build_test_app(pool);

    assert_eq!(add(app.clone(), &token, product, 2).await.status(), StatusCode::CONFLICT);
    assert_eq!(add(app.clone(), &token, 424_242, 1).await.status(), StatusCode::NOT_FOUND);

    let json = body_json(get_auth(app, "/api/v1/cart", &token).await).await;
    assert!(json["data"]["cart_id"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_lines_drop_out_of_pricing(pool: PgPool) {
    let (_, token) = create_customer(&pool).await;
    let kept = seed_product(&pool, "kept", 1_000, 800, 10, None).await;
    let retired = seed_product(&pool, "retired", 2_000, 1_500, 10, None).await;
    let app = common::build_test_app(pool.clone());

    add(app.clone(), &token, kept, 1).await;
    add(app.clone(), &token, retired, 6).await;
    deactivate_product(&pool, retired).await;

    let json = body_json(get_auth(app, "/api/v1/cart", &token).await).await;
    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["is_active"], false);
    assert_eq!(items[1]["line_total_cents"], 0);

    let summary = &json["data"]["summary"];
    assert_eq!(summary["tier"], "retail");
    assert_eq!(summary["item_count"], 1);
    assert_eq!(summary["subtotal_cents"], 1_000);
    assert_eq!(summary["meets_minimum"], false);
}
