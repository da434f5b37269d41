//! Identity collaborator.
//!
//! The storefront core reads the current user only to personalize
//! greetings; identity never gates pricing or cart behavior. The provider
//! itself (sign-in flows, tokens) lives outside this crate.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use scoop_core::{Email, UserId};

/// User role as reported by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

/// The signed-in user, as supplied by the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
}

/// Source of the current user.
pub trait IdentityProvider: Send + Sync {
    /// The signed-in user, or `None` for a guest session.
    fn current_user(&self) -> Option<CurrentUser>;
}

/// In-memory identity provider for tests and local sessions.
#[derive(Debug, Default)]
pub struct StaticIdentity {
    user: Mutex<Option<CurrentUser>>,
}

impl StaticIdentity {
    /// Start as a guest session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign a user in, replacing any previous session.
    pub fn login(&self, user: CurrentUser) {
        let mut slot = self.user.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(user);
    }

    /// Sign the current user out.
    pub fn logout(&self) {
        let mut slot = self.user.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<CurrentUser> {
        self.user
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Greeting line for the storefront header.
#[must_use]
pub fn greeting(user: Option<&CurrentUser>) -> String {
    user.map_or_else(
        || "Welcome to Scoop Shop!".to_string(),
        |user| format!("Welcome back, {}!", user.name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> CurrentUser {
        CurrentUser {
            id: UserId::new(1),
            name: "Alice".to_string(),
            email: Email::parse("alice@example.com").expect("valid email"),
            role: Role::Customer,
        }
    }

    #[test]
    fn test_login_logout_cycle() {
        let identity = StaticIdentity::new();
        assert!(identity.current_user().is_none());

        identity.login(alice());
        assert_eq!(identity.current_user().map(|u| u.name), Some("Alice".to_string()));

        identity.logout();
        assert!(identity.current_user().is_none());
    }

    #[test]
    fn test_greeting_personalization() {
        assert_eq!(greeting(None), "Welcome to Scoop Shop!");
        assert_eq!(greeting(Some(&alice())), "Welcome back, Alice!");
    }
}
