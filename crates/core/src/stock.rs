//! Stock guards applied to cart lines and inventory adjustments.

use crate::error::CoreError;

/// Largest quantity a single cart line may hold.
pub const MAX_LINE_QUANTITY: i32 = 999;

/// Reject line quantities outside `1..=MAX_LINE_QUANTITY`.
pub fn validate_line_quantity(quantity: i32) -> Result<(), CoreError> {
    if !(1..=MAX_LINE_QUANTITY).contains(&quantity) {
        return Err(CoreError::Validation(format!(
            "Line quantity must be between 1 and {MAX_LINE_QUANTITY}, got {quantity}"
        )));
    }
    Ok(())
}

/// Reject a requested line quantity that exceeds what is in stock.
pub fn check_requested(requested: i32, available: i32) -> Result<(), CoreError> {
    if requested > available {
        return Err(insufficient_stock(requested, available));
    }
    Ok(())
}

/// The conflict reported when stock cannot cover a request.
pub fn insufficient_stock(requested: i32, available: i32) -> CoreError {
    CoreError::Conflict(format!(
        "Insufficient stock: requested {requested}, available {available}"
    ))
}

/// Reject stock levels below zero.
pub fn validate_stock_level(quantity: i32) -> Result<(), CoreError> {
    if quantity < 0 {
        return Err(CoreError::Validation(format!(
            "Stock quantity must not be negative, got {quantity}"
        )));
    }
    Ok(())
}
