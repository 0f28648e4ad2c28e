//! Inventory models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitacart_core::types::{DbId, Timestamp};

/// A row from the `inventory` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InventoryLevel {
    pub product_id: DbId,
    pub quantity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An inventory row joined with the product it counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InventoryListing {
    pub product_id: DbId,
    pub product_name: String,
    pub product_slug: String,
    pub is_active: bool,
    pub quantity: i32,
    pub updated_at: Timestamp,
}

/// DTO for setting an absolute stock level. Checked with
/// `vitacart_core::stock::validate_stock_level`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetInventory {
    pub quantity: i32,
}

/// DTO for a relative stock adjustment (restock or write-off).
#[derive(Debug, Clone, Deserialize)]
pub struct AdjustInventory {
    pub delta: i32,
}

/// Result of an atomic relative adjustment.
#[derive(Debug, Clone)]
pub enum InventoryAdjustment {
    Applied(InventoryLevel),
    NotFound,
    /// The adjustment would take stock below zero; nothing was written.
    WouldGoNegative { available: i32 },
}
