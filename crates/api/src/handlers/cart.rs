//! Handlers for the caller's shopping cart.
//!
//! Every cart response carries the tier-priced lines plus the pricing
//! summary, so clients never recompute totals themselves.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use vitacart_core::error::CoreError;
use vitacart_core::pricing::{quote, PriceLine, PriceQuote, PricingPolicy};
use vitacart_core::stock::{insufficient_stock, MAX_LINE_QUANTITY};
use vitacart_core::types::{Cents, DbId, UserId};
use vitacart_db::models::cart::{AddCartItem, CartItem, CartLine, CartMutation, UpdateCartItem};
use vitacart_db::repositories::CartRepo;

use crate::error::{validate_input, AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// One cart line priced under the cart's tier.
#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub item_id: DbId,
    pub product_id: DbId,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub quantity: i32,
    pub stock_quantity: i32,
    pub price_cents: Cents,
    pub distributor_price_cents: Cents,
    /// Per-unit price under the applied tier.
    pub unit_price_cents: Cents,
    pub line_total_cents: Cents,
}

/// The full cart: priced lines and the pricing summary.
#[derive(Debug, Serialize)]
pub struct CartView {
    /// `None` until the caller first adds an item.
    pub cart_id: Option<DbId>,
    pub items: Vec<CartLineView>,
    pub summary: PriceQuote,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/cart
pub async fn get_cart(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<CartView>>> {
    let view = load_view(&state, user.user_id).await?;
    Ok(Json(DataResponse { data: view }))
}

/// GET /api/v1/cart/summary
///
/// Pricing summary only: tier, subtotals, and minimum-order status.
pub async fn get_summary(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<PriceQuote>>> {
    let view = load_view(&state, user.user_id).await?;
    Ok(Json(DataResponse { data: view.summary }))
}

/// POST /api/v1/cart/items
///
/// Add units of a product. An existing line for the product is increased;
/// the resulting quantity must be in stock. The cart is created by the first
/// add that succeeds.
pub async fn add_item(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<AddCartItem>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;

    let outcome =
        CartRepo::add_item(&state.pool, user.user_id, input.product_id, input.quantity).await?;
    let item = applied(outcome, input.product_id)?;

    tracing::info!(
        user_id = %user.user_id,
        product_id = input.product_id,
        quantity = item.map(|i| i.quantity),
        "Cart item added",
    );

    let view = load_view(&state, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

/// PUT /api/v1/cart/items/{product_id}
///
/// Set a line's quantity. Zero removes the line.
pub async fn update_item(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
    Json(input): Json<UpdateCartItem>,
) -> AppResult<Json<DataResponse<CartView>>> {
    validate_input(&input)?;

    let cart = CartRepo::find_by_user(&state.pool, user.user_id)
        .await?
        .ok_or(item_not_found(product_id))?;
    let outcome =
        CartRepo::set_item_quantity(&state.pool, cart.id, product_id, input.quantity).await?;
    applied(outcome, product_id)?;

    tracing::info!(
        user_id = %user.user_id,
        product_id,
        quantity = input.quantity,
        "Cart item quantity set",
    );

    let view = load_view(&state, user.user_id).await?;
    Ok(Json(DataResponse { data: view }))
}

/// DELETE /api/v1/cart/items/{product_id}
pub async fn remove_item(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = match CartRepo::find_by_user(&state.pool, user.user_id).await? {
        Some(cart) => CartRepo::remove_item(&state.pool, cart.id, product_id).await?,
        None => false,
    };
    if !removed {
        return Err(item_not_found(product_id));
    }

    tracing::info!(user_id = %user.user_id, product_id, "Cart item removed");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/cart
///
/// Remove every line. Clearing an empty or missing cart succeeds.
pub async fn clear_cart(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<StatusCode> {
    if let Some(cart) = CartRepo::find_by_user(&state.pool, user.user_id).await? {
        let removed = CartRepo::clear(&state.pool, cart.id).await?;
        tracing::info!(user_id = %user.user_id, removed, "Cart cleared");
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_view(state: &AppState, user_id: UserId) -> AppResult<CartView> {
    let Some(cart) = CartRepo::find_by_user(&state.pool, user_id).await? else {
        return Ok(build_view(&state.config.pricing, None, Vec::new()));
    };
    let lines = CartRepo::lines(&state.pool, cart.id).await?;
    Ok(build_view(&state.config.pricing, Some(cart.id), lines))
}

/// Price cart lines and attach per-line tier prices.
///
/// Lines whose product has been deactivated stay visible but are not priced:
/// they count toward neither the tier nor the minimum order, and their line
/// total is zero.
pub fn build_view(policy: &PricingPolicy, cart_id: Option<DbId>, lines: Vec<CartLine>) -> CartView {
    let price_lines: Vec<PriceLine> = lines
        .iter()
        .filter(|line| line.is_active)
        .map(CartLine::price_line)
        .collect();
    let summary = quote(policy, &price_lines);

    let items = lines
        .into_iter()
        .map(|line| {
            let priced = line.price_line();
            let line_total_cents = if line.is_active {
                priced.line_total_cents(summary.tier)
            } else {
                0
            };
            CartLineView {
                item_id: line.item_id,
                product_id: line.product_id,
                name: line.name,
                slug: line.slug,
                image_url: line.image_url,
                is_active: line.is_active,
                quantity: line.quantity,
                stock_quantity: line.stock_quantity,
                price_cents: line.price_cents,
                distributor_price_cents: line.distributor_price_cents,
                unit_price_cents: priced.unit_price_cents(summary.tier),
                line_total_cents,
            }
        })
        .collect();

    CartView {
        cart_id,
        items,
        summary,
    }
}

/// Map a cart mutation outcome to the written item (if any) or an error.
fn applied(outcome: CartMutation, product_id: DbId) -> AppResult<Option<CartItem>> {
    match outcome {
        CartMutation::Updated(item) => Ok(Some(item)),
        CartMutation::Removed => Ok(None),
        CartMutation::ProductNotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        })),
        CartMutation::ProductInactive => Err(AppError::Core(CoreError::Conflict(format!(
            "Product {product_id} is not available"
        )))),
        CartMutation::ItemNotFound => Err(item_not_found(product_id)),
        CartMutation::QuantityTooLarge { requested } => {
            Err(AppError::Core(CoreError::Validation(format!(
                "Line quantity {requested} exceeds the maximum of {MAX_LINE_QUANTITY}"
            ))))
        }
        CartMutation::InsufficientStock {
            requested,
            available,
        } => Err(AppError::Core(insufficient_stock(requested, available))),
    }
}

fn item_not_found(product_id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "CartItem",
        id: product_id,
    })
}
