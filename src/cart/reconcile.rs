//! Rebuilding priced cart lines from a fetched cart record

use super::models::{CartLine, CartRecord};
use crate::catalog::Product;
use crate::error::Result;
use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::{debug, warn};

/// Resolves a product id to its catalog entry.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    async fn product(&self, product_id: &str) -> Result<Product>;
}

/// Joins every id in `record` with its product and prices the result.
///
/// Lookups run concurrently and all of them settle before this returns.
/// Lines come back in record order. A line whose product cannot be resolved,
/// or whose stored values are unusable, is dropped on its own; the rest of the
/// cart survives.
///
/// Per line, with `i` the position in `product_ids`:
/// * quantity is `quantities[i]`, or 1 when absent or null;
/// * grams is `grams[i]` when positive, else the product weight, else 1;
/// * the unit price is `final_prices[i]` as stored. It is only derived from
///   `price * grams` when the record has none for that line.
pub async fn reconcile_after_fetch<L>(record: &CartRecord, lookup: &L) -> Vec<CartLine>
where
    L: ProductLookup + ?Sized,
{
    let pending = record
        .product_ids
        .iter()
        .enumerate()
        .filter(|(_, id)| !id.trim().is_empty())
        .map(|(index, id)| async move {
            let product = match lookup.product(id).await {
                Ok(product) => product,
                Err(err) => {
                    warn!("Skipping cart line {} ({}): {}", index, id, err);
                    return None;
                }
            };

            match line_at(record, index, product) {
                Ok(line) => Some(line),
                Err(err) => {
                    warn!("Skipping malformed cart line {} ({}): {}", index, id, err);
                    None
                }
            }
        });

    let lines: Vec<CartLine> = join_all(pending).await.into_iter().flatten().collect();

    debug!(
        "Reconciled {} of {} cart line(s)",
        lines.len(),
        record.product_ids.len()
    );
    lines
}

fn line_at(record: &CartRecord, index: usize, product: Product) -> Result<CartLine> {
    let quantity = record.quantities.get(index).copied().flatten().unwrap_or(1);
    let grams = record
        .grams
        .get(index)
        .copied()
        .flatten()
        .filter(|g| g.is_finite() && *g > 0.0)
        .unwrap_or_else(|| product.default_grams());
    let final_price = record
        .final_prices
        .get(index)
        .copied()
        .flatten()
        .unwrap_or_else(|| product.price_for(grams));

    CartLine::new(product, quantity, grams, final_price)
}
