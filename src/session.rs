//! Shopper cart session
//!
//! A [`CartSession`] is the view-side state of one logged-in shopper: who
//! they are and the priced lines currently shown. Logging in creates one,
//! logging out consumes it. Every mutation goes to the backend first and is
//! then applied to the local lines, so the cart is not re-fetched after each
//! change.

use crate::cart::{
    apply_addition, apply_quantity_change, apply_removal, compute_order_total,
    reconcile_after_fetch, AddToCart, CartLine,
};
use crate::catalog::Product;
use crate::client::StorefrontApi;
use crate::error::{Result, StorefrontError};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

pub struct CartSession {
    api: Arc<dyn StorefrontApi>,
    user_id: String,
    lines: Vec<CartLine>,
}

impl fmt::Debug for CartSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartSession")
            .field("user_id", &self.user_id)
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}

impl CartSession {
    /// Opens a session for `user_id` with an empty view. Call
    /// [`load`](Self::load) to fill it.
    pub fn login(api: Arc<dyn StorefrontApi>, user_id: impl Into<String>) -> Result<Self> {
        let user_id: String = user_id.into();
        let user_id = user_id.trim().to_string();
        if user_id.is_empty() {
            return Err(StorefrontError::InvalidInput(
                "Please log in to view your cart.".into(),
            ));
        }

        info!("Session opened for {}", user_id);
        Ok(Self {
            api,
            user_id,
            lines: Vec::new(),
        })
    }

    /// Ends the session, dropping the view state. Returns the user id.
    pub fn logout(self) -> String {
        info!("Session closed for {}", self.user_id);
        self.user_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Order total, summed from the current lines.
    pub fn total(&self) -> f64 {
        compute_order_total(&self.lines)
    }

    /// Fetches the cart and rebuilds the lines.
    ///
    /// Lines whose product cannot be resolved are left out. If the cart
    /// itself cannot be fetched the view becomes empty and the transport
    /// error is returned.
    pub async fn load(&mut self) -> Result<&[CartLine]> {
        let record = match self.api.cart(&self.user_id).await {
            Ok(record) => record,
            Err(err) => {
                warn!("Failed to load cart for {}: {}", self.user_id, err);
                self.lines.clear();
                return Err(err);
            }
        };

        self.lines = reconcile_after_fetch(&record, &*self.api).await;
        Ok(&self.lines)
    }

    /// Adds one unit of `product` at `grams` (product weight, then 1, when
    /// not given). The unit price is `price * grams`.
    pub async fn add(&mut self, product: &Product, grams: Option<f64>) -> Result<()> {
        let grams = grams
            .filter(|g| *g > 0.0)
            .unwrap_or_else(|| product.default_grams());
        let final_price = product.price_for(grams);
        let line = CartLine::new(product.clone(), 1, grams, final_price)?;

        let request = AddToCart {
            user_id: self.user_id.clone(),
            product_id: product.id.clone(),
            quantity: Some(1),
            grams: Some(grams),
            final_price: Some(final_price),
        };
        self.api.add_to_cart(&request).await?;

        self.lines = apply_addition(&self.lines, line)?;
        Ok(())
    }

    /// Changes a line's quantity. Quantities below 1 are rejected before
    /// anything is sent.
    pub async fn change_quantity(&mut self, product_id: &str, quantity: u32) -> Result<()> {
        let next = apply_quantity_change(&self.lines, product_id, quantity)?;
        self.api
            .update_quantity(&self.user_id, product_id, quantity)
            .await?;
        self.lines = next;
        Ok(())
    }

    pub async fn remove(&mut self, product_id: &str) -> Result<()> {
        self.api
            .remove_from_cart(&self.user_id, product_id)
            .await?;
        self.lines = apply_removal(&self.lines, product_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{AppState, CartRecord, ProductLookup};
    use crate::catalog::test_support::priced;
    use crate::catalog::ProductQuery;
    use crate::error::ErrorKind;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Wraps the in-process state and can be told to fail like an unreachable
    /// backend.
    struct Flaky {
        inner: AppState,
        down: AtomicBool,
        updates: AtomicUsize,
    }

    impl Flaky {
        fn check(&self) -> Result<()> {
            if self.down.load(Ordering::SeqCst) {
                return Err(StorefrontError::UnexpectedStatus {
                    status: 503,
                    body: "unavailable".into(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ProductLookup for Flaky {
        async fn product(&self, product_id: &str) -> Result<Product> {
            self.check()?;
            self.inner.product(product_id).await
        }
    }

    #[async_trait]
    impl StorefrontApi for Flaky {
        async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>> {
            self.check()?;
            self.inner.products(query).await
        }

        async fn cart(&self, user_id: &str) -> Result<CartRecord> {
            self.check()?;
            StorefrontApi::cart(&self.inner, user_id).await
        }

        async fn add_to_cart(&self, request: &AddToCart) -> Result<()> {
            self.check()?;
            StorefrontApi::add_to_cart(&self.inner, request).await
        }

        async fn update_quantity(&self, user_id: &str, product_id: &str, quantity: u32) -> Result<()> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            self.check()?;
            StorefrontApi::update_quantity(&self.inner, user_id, product_id, quantity).await
        }

        async fn remove_from_cart(&self, user_id: &str, product_id: &str) -> Result<()> {
            self.check()?;
            StorefrontApi::remove_from_cart(&self.inner, user_id, product_id).await
        }
    }

    const USER: &str = "shopper@example.com";

    /// Backend holding A (finalPrice 500 x2) and B (finalPrice 300 x1).
    fn backend() -> Arc<Flaky> {
        let inner = AppState::new();
        inner.catalog.insert(priced("A", 100.0)).unwrap();
        inner.catalog.insert(priced("B", 30.0)).unwrap();
        for (id, quantity, grams, price) in [("A", 2, 5.0, 500.0), ("B", 1, 10.0, 300.0)] {
            inner
                .add_to_cart(AddToCart {
                    user_id: USER.into(),
                    product_id: id.into(),
                    quantity: Some(quantity),
                    grams: Some(grams),
                    final_price: Some(price),
                })
                .unwrap();
        }
        Arc::new(Flaky {
            inner,
            down: AtomicBool::new(false),
            updates: AtomicUsize::new(0),
        })
    }

    async fn loaded(api: &Arc<Flaky>) -> CartSession {
        let mut session = CartSession::login(api.clone(), USER).unwrap();
        session.load().await.unwrap();
        session
    }

    #[test]
    fn login_requires_a_user() {
        let api: Arc<dyn StorefrontApi> = Arc::new(AppState::new());
        assert!(CartSession::login(api.clone(), "   ").is_err());

        let session = CartSession::login(api, " me@x.com ").unwrap();
        assert_eq!(session.user_id(), "me@x.com");
        assert_eq!(session.logout(), "me@x.com");
    }

    #[tokio::test]
    async fn load_reconciles_the_backend_cart() {
        let api = backend();
        let session = loaded(&api).await;

        assert_eq!(session.lines().len(), 2);
        assert_eq!(session.total(), 1300.0);
    }

    #[tokio::test]
    async fn quantity_change_updates_backend_and_view() {
        let api = backend();
        let mut session = loaded(&api).await;

        session.change_quantity("A", 3).await.unwrap();

        assert_eq!(session.lines()[0].item_total(), 1500.0);
        assert_eq!(session.total(), 1800.0);
        assert_eq!(api.inner.cart_record(USER).quantities, vec![Some(3), Some(1)]);
    }

    #[tokio::test]
    async fn quantity_zero_is_rejected_locally() {
        let api = backend();
        let mut session = loaded(&api).await;

        let err = session.change_quantity("A", 0).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.user_message(), "Quantity must be at least 1.");
        assert_eq!(api.updates.load(Ordering::SeqCst), 0);
        assert_eq!(session.total(), 1300.0);
    }

    #[tokio::test]
    async fn transport_failure_leaves_view_untouched() {
        let api = backend();
        let mut session = loaded(&api).await;
        api.down.store(true, Ordering::SeqCst);

        let err = session.change_quantity("A", 5).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(session.total(), 1300.0);

        assert!(session.remove("B").await.is_err());
        assert_eq!(session.lines().len(), 2);
    }

    #[tokio::test]
    async fn failed_load_degrades_to_empty_cart() {
        let api = backend();
        let mut session = loaded(&api).await;
        api.down.store(true, Ordering::SeqCst);

        let err = session.load().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(session.lines().is_empty());
        assert_eq!(session.total(), 0.0);
    }

    #[tokio::test]
    async fn remove_and_add_keep_totals_consistent() {
        let api = backend();
        let mut session = loaded(&api).await;

        session.remove("A").await.unwrap();
        assert_eq!(session.total(), 300.0);

        let mut bracelet = priced("C", 20.0);
        bracelet.weight = Some(2.5);
        api.inner.catalog.insert(bracelet.clone()).unwrap();

        session.add(&bracelet, None).await.unwrap();
        session.add(&bracelet, Some(4.0)).await.unwrap();

        let line = &session.lines()[1];
        assert_eq!(line.quantity(), 2);
        assert_eq!(line.final_price(), 80.0);
        assert_eq!(session.total(), 300.0 + 160.0);

        // The backend agrees after a fresh load.
        session.load().await.unwrap();
        assert_eq!(session.total(), 460.0);
    }
}
