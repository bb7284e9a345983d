//! Session lifecycle: owns the auth signal and the identity subscription.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` starts one `Session` at mount, provides it through context, and
//! tears it down on cleanup. Everything that needs the current user or the
//! identity operations reads it via `expect_context::<Session>()`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;

use crate::net::identity::{AuthEvents, IdentityProvider};
use crate::state::auth::{AuthEvent, AuthState};

#[derive(Clone)]
pub struct Session {
    pub auth: RwSignal<AuthState>,
    identity: IdentityProvider,
}

impl Session {
    /// Subscribe to the identity provider and drive `auth` from its events.
    pub fn start(identity: IdentityProvider) -> Self {
        let auth = RwSignal::new(AuthState::Pending);
        let events = identity.subscribe();

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(pump(events, move |event| auth.update(|state| state.apply(event))));
        #[cfg(not(feature = "hydrate"))]
        drop(events);

        Self { auth, identity }
    }

    pub fn identity(&self) -> &IdentityProvider {
        &self.identity
    }

    /// Re-run the identity check after a provider outage.
    pub fn retry(&self) {
        self.auth.set(AuthState::Pending);
        self.identity.check_session();
    }

    /// Close the subscription. The pump loop ends once the stream drains.
    pub fn teardown(&self) {
        self.identity.unsubscribe();
    }
}

/// Feed every event from `events` into `sink` until the stream closes.
pub async fn pump<F>(mut events: AuthEvents, mut sink: F)
where
    F: FnMut(AuthEvent),
{
    while let Some(event) = events.next().await {
        sink(event);
    }
}
