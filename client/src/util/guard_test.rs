use super::*;
use crate::net::types::User;

fn signed_in() -> AuthState {
    AuthState::SignedIn(User {
        uid: "u1".to_owned(),
        email: Some("alice@example.com".to_owned()),
        display_name: None,
        photo_url: None,
    })
}

const PROTECTED: [&str; 5] =
    ["/dashboard", "/dashboard/", "/dashboard/new-chat", "/dashboard/history", "/dashboard/anything/deeper"];
const AUTH_AND_LANDING: [&str; 4] = ["/", "/login", "/signup", "/login/"];

// =============================================================
// classify
// =============================================================

#[test]
fn classify_known_paths() {
    assert_eq!(classify("/"), RouteKind::Landing);
    assert_eq!(classify(""), RouteKind::Landing);
    assert_eq!(classify("/login"), RouteKind::Auth);
    assert_eq!(classify("/signup/"), RouteKind::Auth);
    assert_eq!(classify("/dashboard/history"), RouteKind::Protected);
    assert_eq!(classify("/about"), RouteKind::Public);
}

// =============================================================
// decide
// =============================================================

#[test]
fn signed_out_on_protected_always_redirects_to_login() {
    for path in PROTECTED {
        assert_eq!(decide(&AuthState::SignedOut, path), GuardDecision::Redirect(LOGIN_PATH), "{path}");
    }
}

#[test]
fn signed_in_on_auth_or_landing_redirects_home() {
    for path in AUTH_AND_LANDING {
        assert_eq!(decide(&signed_in(), path), GuardDecision::Redirect(DEFAULT_PROTECTED_PATH), "{path}");
    }
}

#[test]
fn signed_in_renders_protected_pages() {
    for path in PROTECTED {
        assert_eq!(decide(&signed_in(), path), GuardDecision::Render, "{path}");
    }
}

#[test]
fn signed_out_renders_auth_and_landing() {
    for path in AUTH_AND_LANDING {
        assert_eq!(decide(&AuthState::SignedOut, path), GuardDecision::Render, "{path}");
    }
}

#[test]
fn pending_blocks_protected_and_auth_pages() {
    for path in PROTECTED.iter().chain(["/login", "/signup"].iter()) {
        assert_eq!(decide(&AuthState::Pending, path), GuardDecision::Wait, "{path}");
    }
}

#[test]
fn pending_renders_landing() {
    assert_eq!(decide(&AuthState::Pending, "/"), GuardDecision::Render);
}

#[test]
fn public_paths_always_render() {
    for state in [AuthState::Pending, AuthState::SignedOut, signed_in(), AuthState::Unavailable("x".to_owned())] {
        assert_eq!(decide(&state, "/about"), GuardDecision::Render);
    }
}

#[test]
fn outage_does_not_redirect_protected_pages() {
    let state = AuthState::Unavailable("offline".to_owned());
    for path in PROTECTED {
        assert_eq!(decide(&state, path), GuardDecision::Unavailable, "{path}");
    }
    assert_eq!(decide(&state, "/login"), GuardDecision::Render);
}
