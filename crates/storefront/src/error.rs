//! Unified error handling for the storefront core.
//!
//! Each module defines its own error enum; `StoreError` aggregates them so
//! embedders can hold one error type. Nothing in this subsystem is fatal to
//! the process: validation errors are reported through the notification
//! channel, storage failures leave cart state untouched.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::orders::{CheckoutError, OrderStoreError};
use crate::promo::PromoError;
use crate::storage::StorageError;

/// Application-level error type for the storefront core.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Persistence collaborator failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog seed data failed validation.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Promo code was rejected.
    #[error("Promo error: {0}")]
    Promo(#[from] PromoError),

    /// Checkout could not complete.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Order collaborator failed.
    #[error("Order store error: {0}")]
    Orders(#[from] OrderStoreError),
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
