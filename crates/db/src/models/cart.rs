//! Cart models, DTOs, and mutation outcomes.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vitacart_core::pricing::PriceLine;
use vitacart_core::types::{Cents, DbId, Timestamp, UserId};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `carts` table. Each user has at most one cart.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Cart {
    pub id: DbId,
    pub user_id: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `cart_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartItem {
    pub id: DbId,
    pub cart_id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart item joined with its product, current stock, and primary image.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartLine {
    pub item_id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
    pub name: String,
    pub slug: String,
    pub price_cents: Cents,
    pub distributor_price_cents: Cents,
    pub is_active: bool,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
}

impl CartLine {
    /// The view of this line used by the pricing calculation.
    pub fn price_line(&self) -> PriceLine {
        PriceLine {
            product_id: self.product_id,
            quantity: i64::from(self.quantity),
            price_cents: self.price_cents,
            distributor_price_cents: self.distributor_price_cents,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for adding units of a product to the cart.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddCartItem {
    pub product_id: DbId,
    #[validate(range(min = 1, max = 999))]
    pub quantity: i32,
}

/// DTO for setting a line's quantity. Zero removes the line.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCartItem {
    #[validate(range(min = 0, max = 999))]
    pub quantity: i32,
}

// ---------------------------------------------------------------------------
// Mutation outcomes
// ---------------------------------------------------------------------------

/// Outcome of a stock-checked cart mutation.
#[derive(Debug, Clone)]
pub enum CartMutation {
    Updated(CartItem),
    Removed,
    ProductNotFound,
    ProductInactive,
    ItemNotFound,
    /// The resulting line quantity exceeds the per-line maximum.
    QuantityTooLarge { requested: i32 },
    InsufficientStock { requested: i32, available: i32 },
}
