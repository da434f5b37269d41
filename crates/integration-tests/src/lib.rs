//! Integration tests for Scoop Shop.
//!
//! # Test Categories
//!
//! - `shopping_flow` - Browse, cart, promo, and checkout journeys
//! - `persistence` - Cart state surviving reloads
//! - `notifications` - Notice lifecycle around cart mutations
//!
//! The [`TestContext`] wires an [`AppState`] to in-memory collaborators and
//! keeps handles to them so tests can reach behind the state.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use scoop_core::{Email, ProductId, UserId};
use scoop_storefront::AppState;
use scoop_storefront::catalog::Product;
use scoop_storefront::config::StoreConfig;
use scoop_storefront::identity::{CurrentUser, IdentityProvider, Role, StaticIdentity};
use scoop_storefront::orders::{MemoryOrderStore, OrderStore};
use scoop_storefront::storage::{KeyValueStore, MemoryStore};

/// A fully wired in-memory storefront.
pub struct TestContext {
    pub state: AppState,
    pub storage: Arc<MemoryStore>,
    pub identity: Arc<StaticIdentity>,
    pub orders: Arc<MemoryOrderStore>,
}

impl TestContext {
    /// Build a fresh storefront with empty collaborators.
    ///
    /// # Panics
    ///
    /// Panics if state construction fails; test-only code.
    #[must_use]
    pub fn new() -> Self {
        let storage = Arc::new(MemoryStore::new());
        let identity = Arc::new(StaticIdentity::new());
        let orders = Arc::new(MemoryOrderStore::new());
        let state = AppState::new(
            StoreConfig::default(),
            Arc::clone(&storage) as Arc<dyn KeyValueStore>,
            Arc::clone(&identity) as Arc<dyn IdentityProvider>,
            Arc::clone(&orders) as Arc<dyn OrderStore>,
        )
        .expect("app state");

        Self {
            state,
            storage,
            identity,
            orders,
        }
    }

    /// Rebuild the state over the same collaborators, as a process
    /// restart would.
    ///
    /// # Panics
    ///
    /// Panics if state construction fails; test-only code.
    #[must_use]
    pub fn reload(&self) -> AppState {
        AppState::new(
            StoreConfig::default(),
            Arc::clone(&self.storage) as Arc<dyn KeyValueStore>,
            Arc::clone(&self.identity) as Arc<dyn IdentityProvider>,
            Arc::clone(&self.orders) as Arc<dyn OrderStore>,
        )
        .expect("app state")
    }

    /// Fetch a seeded product by raw id.
    ///
    /// # Panics
    ///
    /// Panics on unknown ids; test-only code.
    #[must_use]
    pub fn product(&self, id: i32) -> Product {
        self.state
            .catalog()
            .get(ProductId::new(id))
            .expect("seeded product")
            .clone()
    }

    /// Sign in a fixture customer and return their id.
    ///
    /// # Panics
    ///
    /// Panics if the fixture email fails to parse; test-only code.
    pub fn sign_in(&self) -> UserId {
        let id = UserId::new(1);
        self.identity.login(CurrentUser {
            id,
            name: "Alice".to_string(),
            email: Email::parse("alice@example.com").expect("valid email"),
            role: Role::Customer,
        });
        id
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
