//! Cart pricing and aggregation
//!
//! Pure functions over cart lines. Every operation returns a fresh list and
//! leaves its input alone; the order total is always summed from the lines
//! in hand rather than patched.

use super::models::CartLine;
use crate::error::{Result, StorefrontError};

/// Price of one cart line: `final_price * quantity`. No rounding is applied.
pub fn compute_line_total(final_price: f64, quantity: u32) -> f64 {
    final_price * f64::from(quantity)
}

/// Sum of every line total.
pub fn compute_order_total(lines: &[CartLine]) -> f64 {
    lines.iter().map(CartLine::item_total).sum()
}

/// Sets the quantity of the line for `product_id`.
///
/// A quantity below 1 is rejected, never clamped. On any error the caller's
/// lines are untouched.
pub fn apply_quantity_change(
    lines: &[CartLine],
    product_id: &str,
    new_quantity: u32,
) -> Result<Vec<CartLine>> {
    if new_quantity < 1 {
        return Err(StorefrontError::InvalidQuantity(new_quantity));
    }
    if !lines.iter().any(|l| l.product_id() == product_id) {
        return Err(StorefrontError::LineNotFound(product_id.to_string()));
    }

    lines
        .iter()
        .map(|line| {
            if line.product_id() == product_id {
                line.with_quantity(new_quantity)
            } else {
                Ok(line.clone())
            }
        })
        .collect()
}

/// Drops the line for `product_id`. Unknown ids leave the lines as they are.
pub fn apply_removal(lines: &[CartLine], product_id: &str) -> Vec<CartLine> {
    lines
        .iter()
        .filter(|l| l.product_id() != product_id)
        .cloned()
        .collect()
}

/// Adds `incoming` to the lines.
///
/// A product already in the cart has its quantity increased and takes the
/// incoming grams and unit price; anything else is appended.
pub fn apply_addition(lines: &[CartLine], incoming: CartLine) -> Result<Vec<CartLine>> {
    let mut next = lines.to_vec();

    match next
        .iter_mut()
        .find(|l| l.product_id() == incoming.product_id())
    {
        Some(existing) => {
            let quantity = existing.quantity().saturating_add(incoming.quantity());
            *existing = CartLine::new(
                incoming.product().clone(),
                quantity,
                incoming.grams(),
                incoming.final_price(),
            )?;
        }
        None => next.push(incoming),
    }

    Ok(next)
}
