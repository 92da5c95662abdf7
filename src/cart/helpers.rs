//! Shopping Cart Business Logic Helpers
//!
//! This module contains helper functions for stored cart entries and
//! formatting.

use super::models::CartEntry;

/// Merges `incoming` into `entries`.
///
/// # Behaviour
///
/// * If an entry for the same product already exists, its `quantity` is
///   increased by the incoming quantity and it adopts the incoming `grams`
///   and `final_price` (the latest weight choice wins).
/// * Otherwise the entry is appended, preserving insertion order.
///
/// This function mutates `entries` in-place.
pub fn merge_entry(entries: &mut Vec<CartEntry>, incoming: CartEntry) {
    if let Some(existing) = entries
        .iter_mut()
        .find(|e| e.product_id == incoming.product_id)
    {
        existing.quantity = existing.quantity.saturating_add(incoming.quantity);
        existing.grams = incoming.grams;
        existing.final_price = incoming.final_price;
    } else {
        entries.push(incoming);
    }
}

/// Produces a human-readable one-line summary for a list of cart entries.
///
/// Example output: `"2x ring-1 (5g), 1x chain-9 (10g)"`.
pub fn format_cart_summary(entries: &[CartEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{}x {} ({}g)", e.quantity, e.product_id, e.grams))
        .collect::<Vec<_>>()
        .join(", ")
}
