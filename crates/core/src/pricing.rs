//! Tiered cart pricing.
//!
//! A cart is always priced at retail first. When the retail subtotal reaches
//! the distributor threshold the whole cart is re-priced at the distributor
//! price of every line, and that becomes the charged subtotal. Independently,
//! a cart is eligible for checkout only once its total item count reaches the
//! minimum order size.

use serde::Serialize;

use crate::types::{Cents, DbId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default retail subtotal (in cents) at which distributor pricing applies.
pub const DEFAULT_DISTRIBUTOR_THRESHOLD_CENTS: Cents = 50_000;

/// Default minimum number of items (sum of line quantities) for checkout.
pub const DEFAULT_MIN_ORDER_ITEMS: i64 = 6;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Thresholds that drive the tier decision and the minimum-order rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    pub distributor_threshold_cents: Cents,
    pub min_order_items: i64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            distributor_threshold_cents: DEFAULT_DISTRIBUTOR_THRESHOLD_CENTS,
            min_order_items: DEFAULT_MIN_ORDER_ITEMS,
        }
    }
}

/// The price tier applied to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    Retail,
    Distributor,
}

impl PriceTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Retail => "retail",
            Self::Distributor => "distributor",
        }
    }
}

/// One cart line as seen by the pricing calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceLine {
    pub product_id: DbId,
    pub quantity: i64,
    pub price_cents: Cents,
    pub distributor_price_cents: Cents,
}

impl PriceLine {
    /// Per-unit price under the given tier.
    pub fn unit_price_cents(&self, tier: PriceTier) -> Cents {
        match tier {
            PriceTier::Retail => self.price_cents,
            PriceTier::Distributor => self.distributor_price_cents,
        }
    }

    /// Line total under the given tier.
    pub fn line_total_cents(&self, tier: PriceTier) -> Cents {
        self.unit_price_cents(tier).saturating_mul(self.quantity)
    }
}

/// Result of pricing a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    pub tier: PriceTier,
    pub item_count: i64,
    pub retail_subtotal_cents: Cents,
    pub distributor_subtotal_cents: Cents,
    /// The subtotal actually charged (retail or distributor).
    pub subtotal_cents: Cents,
    pub savings_cents: Cents,
    pub distributor_threshold_cents: Cents,
    pub remaining_to_distributor_cents: Cents,
    pub min_order_items: i64,
    pub items_to_minimum: i64,
    pub meets_minimum: bool,
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Price a set of cart lines under `policy`.
pub fn quote(policy: &PricingPolicy, lines: &[PriceLine]) -> PriceQuote {
    let item_count = lines
        .iter()
        .fold(0i64, |acc, l| acc.saturating_add(l.quantity));
    let retail = subtotal(lines, PriceTier::Retail);
    let distributor = subtotal(lines, PriceTier::Distributor);

    let tier = select_tier(policy, retail);
    let charged = match tier {
        PriceTier::Retail => retail,
        PriceTier::Distributor => distributor,
    };

    PriceQuote {
        tier,
        item_count,
        retail_subtotal_cents: retail,
        distributor_subtotal_cents: distributor,
        subtotal_cents: charged,
        savings_cents: retail.saturating_sub(charged),
        distributor_threshold_cents: policy.distributor_threshold_cents,
        remaining_to_distributor_cents: (policy.distributor_threshold_cents - retail).max(0),
        min_order_items: policy.min_order_items,
        items_to_minimum: (policy.min_order_items - item_count).max(0),
        meets_minimum: item_count >= policy.min_order_items,
    }
}

/// Distributor pricing applies once the retail subtotal reaches the threshold.
pub fn select_tier(policy: &PricingPolicy, retail_subtotal_cents: Cents) -> PriceTier {
    if retail_subtotal_cents >= policy.distributor_threshold_cents {
        PriceTier::Distributor
    } else {
        PriceTier::Retail
    }
}

fn subtotal(lines: &[PriceLine], tier: PriceTier) -> Cents {
    lines
        .iter()
        .fold(0, |acc: Cents, l| acc.saturating_add(l.line_total_cents(tier)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
