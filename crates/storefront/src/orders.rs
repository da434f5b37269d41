//! Order records and the order-store collaborator.
//!
//! Orders are frozen at checkout: the cart's lines and computed totals are
//! copied in and never recomputed, so later catalog or policy changes do
//! not rewrite history.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use scoop_core::{OrderId, OrderStatus, UserId};

use crate::cart::CartLine;
use crate::pricing::PricingSnapshot;
use crate::storage::StorageError;

/// Errors raised by the order-store collaborator.
#[derive(Debug, Error)]
pub enum OrderStoreError {
    #[error("order {0} not found")]
    NotFound(OrderId),
    #[error("order backend failed: {0}")]
    Backend(String),
}

/// Errors raised by checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout on a cart with no lines.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// Clearing the cart after placing the order failed.
    #[error("storage error during checkout: {0}")]
    Storage(#[from] StorageError),

    /// The order collaborator rejected the order.
    #[error("order store error: {0}")]
    Orders(#[from] OrderStoreError),
}

/// Delivery address captured by the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

/// Totals frozen onto an order at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

impl From<&PricingSnapshot> for OrderTotals {
    fn from(snapshot: &PricingSnapshot) -> Self {
        Self {
            subtotal: snapshot.subtotal,
            discount: snapshot.discount,
            tax: snapshot.tax,
            shipping: snapshot.shipping,
            total: snapshot.total,
        }
    }
}

/// An order awaiting an id from the order store.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user: Option<UserId>,
    pub lines: Vec<CartLine>,
    pub totals: OrderTotals,
    pub shipping_address: ShippingAddress,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user: Option<UserId>,
    pub placed_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub lines: Vec<CartLine>,
    pub totals: OrderTotals,
    pub shipping_address: ShippingAddress,
}

/// Document-store collaborator for order history.
pub trait OrderStore: Send + Sync {
    /// Persist a new order, assigning its id. New orders start at
    /// `OrderStatus::Processing`.
    ///
    /// # Errors
    ///
    /// Returns `OrderStoreError::Backend` if the store cannot be written.
    fn add(&self, order: NewOrder) -> Result<Order, OrderStoreError>;

    /// Fetch an order by id.
    ///
    /// # Errors
    ///
    /// Returns `OrderStoreError::NotFound` for unknown ids.
    fn get(&self, id: OrderId) -> Result<Order, OrderStoreError>;

    /// All orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `OrderStoreError::Backend` if the store cannot be read.
    fn list(&self) -> Result<Vec<Order>, OrderStoreError>;

    /// Orders placed by `user`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `OrderStoreError::Backend` if the store cannot be read.
    fn list_for(&self, user: UserId) -> Result<Vec<Order>, OrderStoreError>;
}

/// In-memory order store.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: Mutex<Vec<Order>>,
    next_id: AtomicI32,
}

impl MemoryOrderStore {
    /// Create an empty order store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

impl OrderStore for MemoryOrderStore {
    fn add(&self, order: NewOrder) -> Result<Order, OrderStoreError> {
        let id = OrderId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let placed = Order {
            id,
            user: order.user,
            placed_at: Utc::now(),
            status: OrderStatus::Processing,
            lines: order.lines,
            totals: order.totals,
            shipping_address: order.shipping_address,
        };

        let mut orders = self.orders.lock().unwrap_or_else(PoisonError::into_inner);
        orders.push(placed.clone());
        Ok(placed)
    }

    fn get(&self, id: OrderId) -> Result<Order, OrderStoreError> {
        let orders = self.orders.lock().unwrap_or_else(PoisonError::into_inner);
        orders
            .iter()
            .find(|order| order.id == id)
            .cloned()
            .ok_or(OrderStoreError::NotFound(id))
    }

    fn list(&self) -> Result<Vec<Order>, OrderStoreError> {
        let orders = self.orders.lock().unwrap_or_else(PoisonError::into_inner);
        let mut all: Vec<Order> = orders.clone();
        all.reverse();
        Ok(all)
    }

    fn list_for(&self, user: UserId) -> Result<Vec<Order>, OrderStoreError> {
        let orders = self.orders.lock().unwrap_or_else(PoisonError::into_inner);
        let mut mine: Vec<Order> = orders
            .iter()
            .filter(|order| order.user == Some(user))
            .cloned()
            .collect();
        mine.reverse();
        Ok(mine)
    }
}
