//! Route guard: decides, for every navigation, whether a page may render.
//!
//! SYSTEM CONTEXT
//! ==============
//! All routes share one policy, applied by `components::auth_gate::AuthGate`
//! around every routed page. Pages never redirect on their own.
//!
//! POLICY
//! ======
//! | state \ route | landing  | auth     | protected | other  |
//! |---------------|----------|----------|-----------|--------|
//! | pending       | render   | wait     | wait      | render |
//! | signed out    | render   | render   | → login   | render |
//! | signed in     | → home   | → home   | render    | render |
//! | unavailable   | render   | render   | notice    | render |

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

pub const LANDING_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const PROTECTED_PREFIX: &str = "/dashboard";
/// Where signed-in users land when they hit the landing or an auth page.
pub const DEFAULT_PROTECTED_PATH: &str = "/dashboard";
pub const NEW_CHAT_PATH: &str = "/dashboard/new-chat";
pub const HISTORY_PATH: &str = "/dashboard/history";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteKind {
    Landing,
    Auth,
    Protected,
    Public,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    /// Block rendering behind a wait indicator.
    Wait,
    Redirect(&'static str),
    /// Identity provider is down; block protected content without redirecting.
    Unavailable,
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { LANDING_PATH } else { trimmed }
}

pub fn classify(path: &str) -> RouteKind {
    let path = normalize(path);
    if path == LANDING_PATH {
        RouteKind::Landing
    } else if path == LOGIN_PATH || path == SIGNUP_PATH {
        RouteKind::Auth
    } else if path.starts_with(PROTECTED_PREFIX) {
        RouteKind::Protected
    } else {
        RouteKind::Public
    }
}

pub fn decide(state: &AuthState, path: &str) -> GuardDecision {
    let kind = classify(path);
    match (state, kind) {
        (AuthState::Pending, RouteKind::Protected | RouteKind::Auth) => GuardDecision::Wait,
        (AuthState::SignedOut, RouteKind::Protected) => GuardDecision::Redirect(LOGIN_PATH),
        (AuthState::SignedIn(_), RouteKind::Landing | RouteKind::Auth) => {
            GuardDecision::Redirect(DEFAULT_PROTECTED_PATH)
        }
        (AuthState::Unavailable(_), RouteKind::Protected) => GuardDecision::Unavailable,
        _ => GuardDecision::Render,
    }
}

/// Navigate whenever the decision for the current path is a redirect.
pub fn install_route_guard<F>(decision: Memo<GuardDecision>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let GuardDecision::Redirect(target) = decision.get() {
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
