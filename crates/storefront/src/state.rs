//! Application state shared across the storefront.

use std::sync::Arc;

use crate::cart::{CartService, CartStore};
use crate::catalog::Catalog;
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::identity::{self, IdentityProvider};
use crate::notify::Notifier;
use crate::orders::OrderStore;
use crate::storage::KeyValueStore;

/// Application state shared across the storefront.
///
/// This struct is cheaply cloneable via `Arc` and is the single place
/// collaborators are wired together; construct it once at session start
/// and pass it down explicitly.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StoreConfig,
    catalog: Catalog,
    cart: CartService,
    notifier: Notifier,
    identity: Arc<dyn IdentityProvider>,
    orders: Arc<dyn OrderStore>,
}

impl AppState {
    /// Create the application state.
    ///
    /// Seeds the catalog, reloads the persisted cart from `storage`, and
    /// wires the cart service to the notifier and order store.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog seed fails validation or the
    /// persisted cart cannot be loaded.
    pub fn new(
        config: StoreConfig,
        storage: Arc<dyn KeyValueStore>,
        identity: Arc<dyn IdentityProvider>,
        orders: Arc<dyn OrderStore>,
    ) -> Result<Self, StoreError> {
        let catalog = Catalog::seed()?;
        let notifier = Notifier::new(config.notice_ttl);
        let store = CartStore::load(storage)?;
        let cart = CartService::new(store, notifier.clone(), Arc::clone(&orders), &config);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart,
                notifier,
                identity,
                orders,
            }),
        })
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the cart service.
    #[must_use]
    pub fn cart(&self) -> &CartService {
        &self.inner.cart
    }

    /// Get a reference to the notification channel.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    /// Get a reference to the identity collaborator.
    #[must_use]
    pub fn identity(&self) -> &dyn IdentityProvider {
        self.inner.identity.as_ref()
    }

    /// Get a reference to the order store.
    #[must_use]
    pub fn orders(&self) -> &dyn OrderStore {
        self.inner.orders.as_ref()
    }

    /// Greeting line for the current session.
    #[must_use]
    pub fn greeting(&self) -> String {
        identity::greeting(self.inner.identity.current_user().as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::StaticIdentity;
    use crate::orders::MemoryOrderStore;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_state_wires_collaborators() {
        let state = AppState::new(
            StoreConfig::default(),
            Arc::new(MemoryStore::new()),
            Arc::new(StaticIdentity::new()),
            Arc::new(MemoryOrderStore::new()),
        )
        .expect("state");

        assert_eq!(state.catalog().len(), 5);
        assert_eq!(state.cart().count(), 0);
        assert_eq!(state.greeting(), "Welcome to Scoop Shop!");
    }
}
