//! Scoop Shop Storefront - cart and pricing core.
//!
//! This crate implements the storefront's shopping subsystem: the product
//! catalog, the cart store with its persistence, the pricing engine, promo
//! code validation, and the transient notification channel. The view layer
//! renders snapshots of this state and issues intents to it; rendering,
//! transport, and the identity provider itself live elsewhere.
//!
//! # Architecture
//!
//! - [`catalog`] - Seeded, immutable product records
//! - [`cart`] - The cart store (sync core) and the async [`cart::CartService`]
//!   facade that models commit latency with per-product supersession
//! - [`pricing`] - Pure totals computation (subtotal, discount, tax, shipping)
//! - [`promo`] - Promo code table and validation
//! - [`notify`] - Auto-expiring user-facing notices
//! - [`storage`] - Key-value persistence collaborator (memory and JSON file)
//! - [`orders`] - Order records and the checkout path
//! - [`identity`] - Current-user collaborator, consumed only for greetings
//! - [`state`] - [`state::AppState`], the dependency-injected container
//! - [`telemetry`] - Tracing subscriber setup for embedders
//!
//! All collaborators are traits at the seams; nothing in this crate reaches
//! for ambient globals.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod identity;
pub mod notify;
pub mod orders;
pub mod pricing;
pub mod promo;
pub mod state;
pub mod storage;
pub mod telemetry;

pub use error::{Result, StoreError};
pub use state::AppState;
