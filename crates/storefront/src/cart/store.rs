//! The authoritative cart store.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use scoop_core::{Price, ProductId};

use crate::catalog::Product;
use crate::pricing::{self, PricingPolicy, PricingSnapshot};
use crate::storage::{KeyValueStore, StorageError, keys};

/// One product's entry in the cart.
///
/// Name, price, and image are denormalized from the catalog at add time;
/// the price is locked in and never re-queried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Key into the catalog.
    pub product_id: ProductId,
    /// Product name at add time.
    pub name: String,
    /// Unit price at add time.
    pub unit_price: Price,
    /// Image path at add time.
    pub image: Option<String>,
    /// Always at least 1 in stored form; a line whose quantity reaches 0
    /// is deleted, never kept.
    pub quantity: u32,
}

impl CartLine {
    /// Build a line from a catalog product, copying the denormalized
    /// fields.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            image: product.image.clone(),
            quantity,
        }
    }

    /// Price x quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.amount() * Decimal::from(self.quantity)
    }
}

/// The authoritative cart state.
///
/// Lines are kept in insertion order with at most one line per product.
/// Every mutation persists the serialized collection before the in-memory
/// state is swapped, so a storage failure leaves the cart unchanged.
///
/// `count` is the number of distinct lines. An earlier cart variant summed
/// quantities instead; [`PricingSnapshot::item_count`] carries that figure
/// for the order summary.
pub struct CartStore {
    storage: Arc<dyn KeyValueStore>,
    lines: Vec<CartLine>,
    count: u32,
    discount_percent: u8,
}

impl CartStore {
    /// Rebuild the cart from the persistence collaborator.
    ///
    /// Absent keys start an empty cart. The active discount is
    /// session-scoped and always starts at zero.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Corrupt` if the stored collection is not
    /// valid JSON, or any backend read error.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Result<Self, StorageError> {
        let lines: Vec<CartLine> = match storage.get(keys::CART_ITEMS)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
                key: keys::CART_ITEMS.to_string(),
                source,
            })?,
            None => Vec::new(),
        };
        let count = u32::try_from(lines.len()).unwrap_or(u32::MAX);

        Ok(Self {
            storage,
            lines,
            count,
            discount_percent: 0,
        })
    }

    /// Insert or update the line for `product`.
    ///
    /// The merge rule is replace, not add: an existing line's quantity is
    /// set to `quantity`. A quantity of 0 deletes the line (or no-ops when
    /// no line exists).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persisting fails; the cart is unchanged
    /// in that case.
    pub fn upsert(&mut self, product: &Product, quantity: u32) -> Result<(), StorageError> {
        let mut next = self.lines.clone();
        match next.iter_mut().find(|line| line.product_id == product.id) {
            Some(line) => line.quantity = quantity,
            None => {
                if quantity == 0 {
                    return Ok(());
                }
                next.push(CartLine::from_product(product, quantity));
            }
        }
        if quantity == 0 {
            next.retain(|line| line.product_id != product.id);
        }
        self.commit(next)
    }

    /// Delete the line for `product_id`; missing lines are a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persisting fails; the cart is unchanged
    /// in that case.
    pub fn remove(&mut self, product_id: ProductId) -> Result<(), StorageError> {
        if !self.lines.iter().any(|line| line.product_id == product_id) {
            return Ok(());
        }
        let mut next = self.lines.clone();
        next.retain(|line| line.product_id != product_id);
        self.commit(next)
    }

    /// Empty the cart and reset the active discount.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persisting fails; the cart and discount
    /// are unchanged in that case.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.commit(Vec::new())?;
        self.discount_percent = 0;
        Ok(())
    }

    /// Replace the active discount percent. Overwrites, never stacks.
    pub fn apply_discount(&mut self, percent: u8) {
        self.discount_percent = percent;
    }

    /// The active discount percent.
    #[must_use]
    pub const fn discount_percent(&self) -> u8 {
        self.discount_percent
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `product_id`, if present.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Compute the derived totals for the current contents and discount.
    #[must_use]
    pub fn totals(&self, policy: &PricingPolicy) -> PricingSnapshot {
        pricing::compute_totals(&self.lines, self.discount_percent, policy)
    }

    /// Persist `next` and swap it in. Storage is written first so a
    /// failure leaves the in-memory state untouched.
    fn commit(&mut self, next: Vec<CartLine>) -> Result<(), StorageError> {
        let serialized =
            serde_json::to_string(&next).map_err(|source| StorageError::Serialize {
                key: keys::CART_ITEMS.to_string(),
                source,
            })?;
        let count = u32::try_from(next.len()).unwrap_or(u32::MAX);

        self.storage.set(keys::CART_ITEMS, &serialized)?;
        self.storage.set(keys::CART_COUNT, &count.to_string())?;

        self.lines = next;
        self.count = count;
        tracing::debug!(count, "cart committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::storage::MemoryStore;

    fn fixture() -> (Catalog, CartStore, Arc<MemoryStore>) {
        let catalog = Catalog::seed().expect("seed");
        let storage = Arc::new(MemoryStore::new());
        let store = CartStore::load(Arc::clone(&storage) as Arc<dyn KeyValueStore>)
            .expect("load empty cart");
        (catalog, store, storage)
    }

    fn product(catalog: &Catalog, id: i32) -> &Product {
        catalog.get(ProductId::new(id)).expect("product exists")
    }

    #[test]
    fn test_upsert_inserts_new_line() {
        let (catalog, mut cart, _) = fixture();
        cart.upsert(product(&catalog, 1), 2).expect("upsert");

        assert_eq!(cart.count(), 1);
        let line = cart.get(ProductId::new(1)).expect("line present");
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price, Price::from_cents(1299));
    }

    #[test]
    fn test_upsert_replaces_quantity() {
        let (catalog, mut cart, _) = fixture();
        cart.upsert(product(&catalog, 1), 3).expect("first upsert");
        cart.upsert(product(&catalog, 1), 5).expect("second upsert");

        // Replace, not add: one line at the later quantity
        assert_eq!(cart.count(), 1);
        assert_eq!(cart.get(ProductId::new(1)).expect("line").quantity, 5);
    }

    #[test]
    fn test_upsert_zero_removes_line() {
        let (catalog, mut cart, _) = fixture();
        cart.upsert(product(&catalog, 1), 2).expect("upsert");
        cart.upsert(product(&catalog, 1), 0).expect("upsert zero");

        assert!(cart.is_empty());
        assert!(cart.get(ProductId::new(1)).is_none());
    }

    #[test]
    fn test_upsert_zero_on_absent_line_is_noop() {
        let (catalog, mut cart, storage) = fixture();
        cart.upsert(product(&catalog, 1), 0).expect("upsert zero");

        assert!(cart.is_empty());
        // Nothing was persisted either
        assert!(storage.get(keys::CART_ITEMS).expect("get").is_none());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let (_, mut cart, _) = fixture();
        cart.remove(ProductId::new(42)).expect("remove on empty cart");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_count_is_distinct_lines_not_quantities() {
        let (catalog, mut cart, _) = fixture();
        cart.upsert(product(&catalog, 1), 4).expect("upsert");
        cart.upsert(product(&catalog, 2), 3).expect("upsert");

        assert_eq!(cart.count(), 2);
        let totals = cart.totals(&PricingPolicy::default());
        assert_eq!(totals.item_count, 7);
    }

    #[test]
    fn test_clear_resets_lines_and_discount() {
        let (catalog, mut cart, storage) = fixture();
        cart.upsert(product(&catalog, 1), 2).expect("upsert");
        cart.apply_discount(20);
        cart.clear().expect("clear");

        assert!(cart.is_empty());
        assert_eq!(cart.discount_percent(), 0);
        assert_eq!(
            storage.get(keys::CART_ITEMS).expect("get").as_deref(),
            Some("[]")
        );
        assert_eq!(
            storage.get(keys::CART_COUNT).expect("get").as_deref(),
            Some("0")
        );
    }

    #[test]
    fn test_applying_new_discount_overwrites() {
        let (_, mut cart, _) = fixture();
        cart.apply_discount(10);
        cart.apply_discount(15);
        assert_eq!(cart.discount_percent(), 15);
    }

    #[test]
    fn test_mutations_persist_across_reload() {
        let (catalog, mut cart, storage) = fixture();
        cart.upsert(product(&catalog, 1), 2).expect("upsert");
        cart.upsert(product(&catalog, 3), 1).expect("upsert");

        let reloaded =
            CartStore::load(Arc::clone(&storage) as Arc<dyn KeyValueStore>).expect("reload");
        assert_eq!(reloaded.lines(), cart.lines());
        assert_eq!(reloaded.count(), 2);
    }

    #[test]
    fn test_load_rejects_corrupt_collection() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(keys::CART_ITEMS, "{not json").expect("set");

        let result = CartStore::load(storage as Arc<dyn KeyValueStore>);
        assert!(matches!(result, Err(StorageError::Corrupt { .. })));
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let (catalog, mut cart, _) = fixture();
        for id in [3, 1, 5] {
            cart.upsert(product(&catalog, id), 1).expect("upsert");
        }
        let order: Vec<i32> = cart
            .lines()
            .iter()
            .map(|line| line.product_id.as_i32())
            .collect();
        assert_eq!(order, vec![3, 1, 5]);
    }
}
