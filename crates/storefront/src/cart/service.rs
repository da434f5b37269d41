//! Async facade over the cart store.
//!
//! The storefront models backend latency with a short delay before each
//! mutation commits. Per-line edits are keyed by product id: a newer intent
//! for the same product aborts any in-flight commit for it (last write
//! wins), while edits to other products proceed independently. Failures
//! surface through the notification channel, never as panics.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::AbortHandle;
use tracing::instrument;

use scoop_core::{ProductId, UserId};

use super::store::{CartLine, CartStore};
use crate::catalog::Product;
use crate::config::StoreConfig;
use crate::notify::Notifier;
use crate::orders::{CheckoutError, NewOrder, Order, OrderStore, OrderTotals, ShippingAddress};
use crate::pricing::{PricingPolicy, PricingSnapshot};
use crate::promo::{self, PromoError};
use crate::storage::StorageError;

/// Handle to the cart service. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct CartService {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    store: Mutex<CartStore>,
    pending: Mutex<HashMap<ProductId, Pending>>,
    epochs: AtomicU64,
    notifier: Notifier,
    orders: Arc<dyn OrderStore>,
    policy: PricingPolicy,
    commit_delay: Duration,
    promo_delay: Duration,
}

/// An in-flight commit for one product key.
struct Pending {
    epoch: u64,
    handle: AbortHandle,
}

impl CartService {
    /// Build the service around a loaded store.
    #[must_use]
    pub fn new(
        store: CartStore,
        notifier: Notifier,
        orders: Arc<dyn OrderStore>,
        config: &StoreConfig,
    ) -> Self {
        Self {
            inner: Arc::new(ServiceInner {
                store: Mutex::new(store),
                pending: Mutex::new(HashMap::new()),
                epochs: AtomicU64::new(0),
                notifier,
                orders,
                policy: config.pricing.clone(),
                commit_delay: config.commit_delay,
                promo_delay: config.promo_delay,
            }),
        }
    }

    /// Schedule a quantity change for `product` (replace semantics; 0
    /// deletes the line). Returns immediately; the commit lands after the
    /// configured delay unless a newer intent for the same product
    /// supersedes it.
    pub fn set_quantity(&self, product: &Product, quantity: u32) {
        let inner = Arc::clone(&self.inner);
        let product = product.clone();
        let product_id = product.id;
        let epoch = self.next_epoch();

        let task = tokio::spawn(async move {
            tokio::time::sleep(inner.commit_delay).await;
            let outcome = {
                let mut store = inner.store.lock().unwrap_or_else(PoisonError::into_inner);
                store.upsert(&product, quantity)
            };
            match outcome {
                Ok(()) => {
                    if quantity == 0 {
                        inner.notifier.success("Item removed from cart");
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, product = %product_id, "cart update failed");
                    inner.notifier.error("Failed to update cart");
                }
            }
            Self::finish(&inner, product_id, epoch);
        });

        self.supersede(product_id, epoch, task.abort_handle());
    }

    /// Schedule removal of the line for `product_id`. Supersedes any
    /// in-flight quantity change for the same product.
    pub fn remove(&self, product_id: ProductId) {
        let inner = Arc::clone(&self.inner);
        let epoch = self.next_epoch();

        let task = tokio::spawn(async move {
            tokio::time::sleep(inner.commit_delay).await;
            let outcome = {
                let mut store = inner.store.lock().unwrap_or_else(PoisonError::into_inner);
                store.remove(product_id)
            };
            match outcome {
                Ok(()) => inner.notifier.success("Item removed from cart"),
                Err(e) => {
                    tracing::error!(error = %e, product = %product_id, "cart removal failed");
                    inner.notifier.error("Failed to remove item");
                }
            }
            Self::finish(&inner, product_id, epoch);
        });

        self.supersede(product_id, epoch, task.abort_handle());
    }

    /// Empty the cart and reset the active discount. Supersedes every
    /// in-flight per-line commit.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persisting the empty state fails; the
    /// failure is also posted as a notification.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.abort_all();
        tokio::time::sleep(self.inner.commit_delay).await;

        let outcome = {
            let mut store = self
                .inner
                .store
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            store.clear()
        };
        match &outcome {
            Ok(()) => self.inner.notifier.success("Cart cleared successfully"),
            Err(e) => {
                tracing::error!(error = %e, "cart clear failed");
                self.inner.notifier.error("Failed to clear cart");
            }
        }
        outcome
    }

    /// Validate a promo code and, when valid, make it the active discount.
    /// A rejected code leaves the previous discount unchanged.
    ///
    /// # Errors
    ///
    /// Returns `PromoError` for blank or unknown codes; the rejection is
    /// also posted as a notification.
    #[instrument(skip(self))]
    pub async fn apply_promo(&self, code: &str) -> Result<u8, PromoError> {
        tokio::time::sleep(self.inner.promo_delay).await;

        match promo::validate(code) {
            Ok(percent) => {
                let mut store = self
                    .inner
                    .store
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                store.apply_discount(percent);
                drop(store);
                self.inner
                    .notifier
                    .success(format!("Promo code applied! {percent}% off"));
                Ok(percent)
            }
            Err(e) => {
                self.inner.notifier.error("Invalid promo code");
                Err(e)
            }
        }
    }

    /// Freeze the cart into an order, store it, and empty the cart.
    /// Supersedes every in-flight per-line commit.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` when there is nothing to order,
    /// or the underlying storage/order-store failure.
    #[instrument(skip(self, address), fields(user = ?user))]
    pub async fn checkout(
        &self,
        user: Option<UserId>,
        address: ShippingAddress,
    ) -> Result<Order, CheckoutError> {
        self.abort_all();
        tokio::time::sleep(self.inner.commit_delay).await;

        let placed = {
            let mut store = self
                .inner
                .store
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if store.is_empty() {
                drop(store);
                self.inner.notifier.error("Your cart is empty");
                return Err(CheckoutError::EmptyCart);
            }

            let totals = store.totals(&self.inner.policy);
            let order = self.inner.orders.add(NewOrder {
                user,
                lines: store.lines().to_vec(),
                totals: OrderTotals::from(&totals),
                shipping_address: address,
            })?;
            store.clear()?;
            order
        };

        self.inner
            .notifier
            .success(format!("Order {} placed!", placed.id));
        Ok(placed)
    }

    /// Derived totals for the current contents and discount.
    #[must_use]
    pub fn snapshot(&self) -> PricingSnapshot {
        let store = self
            .inner
            .store
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        store.totals(&self.inner.policy)
    }

    /// Current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        let store = self
            .inner
            .store
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        store.lines().to_vec()
    }

    /// The committed line for `product_id`, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<CartLine> {
        let store = self
            .inner
            .store
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        store.get(product_id).cloned()
    }

    /// Number of distinct committed lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        let store = self
            .inner
            .store
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        store.count()
    }

    /// The active discount percent.
    #[must_use]
    pub fn discount_percent(&self) -> u8 {
        let store = self
            .inner
            .store
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        store.discount_percent()
    }

    fn next_epoch(&self) -> u64 {
        self.inner.epochs.fetch_add(1, Ordering::Relaxed)
    }

    /// Register a commit for `product_id`, aborting any older one.
    fn supersede(&self, product_id: ProductId, epoch: u64, handle: AbortHandle) {
        let mut pending = self
            .inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.insert(product_id, Pending { epoch, handle }) {
            previous.handle.abort();
        }
    }

    /// Abort every in-flight per-line commit.
    fn abort_all(&self) {
        let mut pending = self
            .inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for (_, entry) in pending.drain() {
            entry.handle.abort();
        }
    }

    /// Drop the pending entry for a finished commit, unless a newer
    /// commit has already taken the key.
    fn finish(inner: &ServiceInner, product_id: ProductId, epoch: u64) {
        let mut pending = inner.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if pending.get(&product_id).is_some_and(|p| p.epoch == epoch) {
            pending.remove(&product_id);
        }
    }
}
