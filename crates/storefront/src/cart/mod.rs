//! Cart state: the synchronous store and its async service facade.
//!
//! [`CartStore`] holds the authoritative line collection and persists it
//! through the key-value collaborator. [`CartService`] wraps the store with
//! the storefront's simulated commit latency and per-product supersession.

mod service;
mod store;

pub use service::CartService;
pub use store::{CartLine, CartStore};
