//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the route guard and user-aware components to coordinate login
//! redirects and identity-dependent rendering.
//!
//! DESIGN
//! ======
//! "Not checked yet", "checked and signed out", and "provider unreachable"
//! are distinct variants so the guard never confuses a pending check or an
//! outage with a logged-out user.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
    /// The initial identity check is still outstanding.
    #[default]
    Pending,
    SignedOut,
    SignedIn(User),
    /// The identity provider could not be reached.
    Unavailable(String),
}

/// Push notification from the identity provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    Changed(Option<User>),
    ProviderFailed(String),
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::SignedIn(user) => Some(user),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }

    /// Fold one provider event into the state.
    pub fn apply(&mut self, event: AuthEvent) {
        *self = match event {
            AuthEvent::Changed(Some(user)) => Self::SignedIn(user),
            AuthEvent::Changed(None) => Self::SignedOut,
            AuthEvent::ProviderFailed(message) => Self::Unavailable(message),
        };
    }
}
