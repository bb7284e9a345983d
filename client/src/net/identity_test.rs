use std::cell::RefCell;
use std::collections::VecDeque;

use super::*;
use futures::executor::block_on;

fn config(api_key: Option<&str>) -> IdentityConfig {
    IdentityConfig {
        api_key: api_key.map(str::to_owned),
        accounts_url: "https://identitytoolkit.googleapis.com/v1".to_owned(),
        token_url: "https://securetoken.googleapis.com/v1".to_owned(),
    }
}

fn alice() -> User {
    User { uid: "u1".to_owned(), email: Some("alice@example.com".to_owned()), display_name: None, photo_url: None }
}

// =============================================================
// Error code mapping
// =============================================================

#[test]
fn email_exists_maps_to_distinct_code_and_message() {
    let err = parse_error_body(r#"{"error":{"code":400,"message":"EMAIL_EXISTS","errors":[]}}"#);
    assert_eq!(err.code, IdentityErrorCode::EmailAlreadyInUse);
    assert_eq!(err.code.as_str(), "auth/email-already-in-use");
    assert_eq!(err.user_message(), "This email address is already in use.");
}

#[test]
fn credential_failures_map_to_invalid_credentials() {
    for raw in ["EMAIL_NOT_FOUND", "INVALID_PASSWORD", "INVALID_LOGIN_CREDENTIALS"] {
        assert_eq!(IdentityErrorCode::from_provider(raw), IdentityErrorCode::InvalidCredentials, "{raw}");
    }
}

#[test]
fn malformed_email_has_its_own_code_and_message() {
    let err = parse_error_body(r#"{"error":{"code":400,"message":"INVALID_EMAIL"}}"#);
    assert_eq!(err.code, IdentityErrorCode::InvalidEmail);
    assert_eq!(err.code.as_str(), "auth/invalid-email");
    assert_eq!(err.user_message(), "Invalid email address.");
}

#[test]
fn weak_password_uses_provider_detail() {
    let err = parse_error_body(
        r#"{"error":{"code":400,"message":"WEAK_PASSWORD : Password should be at least 6 characters"}}"#,
    );
    assert_eq!(err.code, IdentityErrorCode::WeakPassword);
    assert_eq!(err.user_message(), "Password should be at least 6 characters");
}

#[test]
fn token_failures_map_to_session_expired() {
    for raw in ["TOKEN_EXPIRED", "INVALID_ID_TOKEN", "INVALID_REFRESH_TOKEN", "USER_NOT_FOUND"] {
        assert_eq!(IdentityErrorCode::from_provider(raw), IdentityErrorCode::SessionExpired, "{raw}");
    }
}

#[test]
fn unknown_provider_message_is_kept_raw() {
    let err = parse_error_body(r#"{"error":{"code":400,"message":"OPERATION_NOT_ALLOWED"}}"#);
    assert_eq!(err.code, IdentityErrorCode::Other("OPERATION_NOT_ALLOWED".to_owned()));
    assert_eq!(err.code.as_str(), "OPERATION_NOT_ALLOWED");
    assert_eq!(err.user_message(), "OPERATION_NOT_ALLOWED");
}

#[test]
fn unparseable_error_body_gets_generic_message() {
    let err = parse_error_body("<html>502</html>");
    assert_eq!(err.user_message(), "An unexpected error occurred.");
}

#[test]
fn identity_error_display_includes_code() {
    let err = IdentityError::new(IdentityErrorCode::EmailAlreadyInUse, "EMAIL_EXISTS");
    assert_eq!(err.to_string(), "auth/email-already-in-use: EMAIL_EXISTS");
}

// =============================================================
// Endpoints
// =============================================================

#[test]
fn accounts_endpoint_appends_method_and_key() {
    let url = accounts_endpoint(&config(Some("abc")), "signInWithPassword").unwrap();
    assert_eq!(url, "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword?key=abc");
}

#[test]
fn token_endpoint_appends_key() {
    let url = token_endpoint(&config(Some("abc"))).unwrap();
    assert_eq!(url, "https://securetoken.googleapis.com/v1/token?key=abc");
}

#[test]
fn endpoints_require_api_key() {
    let err = accounts_endpoint(&config(None), "signUp").unwrap_err();
    assert_eq!(err.code, IdentityErrorCode::NotConfigured);
    assert_eq!(token_endpoint(&config(None)).unwrap_err().code, IdentityErrorCode::NotConfigured);
}

// =============================================================
// Wire parsing
// =============================================================

#[test]
fn credential_response_becomes_stored_session() {
    let resp: CredentialResponse = serde_json::from_str(
        r#"{"kind":"identitytoolkit#SignupNewUserResponse","idToken":"id-1","email":"alice@example.com",
            "refreshToken":"rt-1","expiresIn":"3600","localId":"u1","displayName":""}"#,
    )
    .unwrap();
    let session = resp.into_session();
    assert_eq!(session.user, alice());
    assert_eq!(session.id_token, "id-1");
    assert_eq!(session.refresh_token, "rt-1");
}

#[test]
fn lookup_response_yields_first_user() {
    let resp: LookupResponse = serde_json::from_str(
        r#"{"users":[{"localId":"u1","email":"alice@example.com","photoUrl":"https://img/a.png"}]}"#,
    )
    .unwrap();
    let user = resp.into_user().unwrap();
    assert_eq!(user.uid, "u1");
    assert_eq!(user.photo_url.as_deref(), Some("https://img/a.png"));
}

#[test]
fn lookup_response_without_users_is_expired_session() {
    let resp: LookupResponse = serde_json::from_str("{}").unwrap();
    assert_eq!(resp.into_user().unwrap_err().code, IdentityErrorCode::SessionExpired);
}

// =============================================================
// Recovery policy
// =============================================================

#[test]
fn expired_session_is_refreshed() {
    let err = IdentityError::new(IdentityErrorCode::SessionExpired, "TOKEN_EXPIRED");
    assert_eq!(recovery_action(&err), RecoveryAction::Refresh);
}

#[test]
fn network_failure_is_reported_not_cleared() {
    let err = IdentityError::new(IdentityErrorCode::Network, "Failed to fetch");
    assert!(matches!(recovery_action(&err), RecoveryAction::Report(_)));
}

#[test]
fn disabled_user_is_cleared() {
    let err = IdentityError::new(IdentityErrorCode::UserDisabled, "USER_DISABLED");
    assert_eq!(recovery_action(&err), RecoveryAction::Clear);
}

#[test]
fn second_expiry_after_refresh_is_cleared() {
    let err = IdentityError::new(IdentityErrorCode::SessionExpired, "INVALID_REFRESH_TOKEN");
    assert_eq!(recovery_after_refresh(&err), RecoveryAction::Clear);
}

#[test]
fn network_failure_after_refresh_is_still_reported() {
    let err = IdentityError::network("Failed to fetch");
    assert!(matches!(recovery_after_refresh(&err), RecoveryAction::Report(_)));
}

// =============================================================
// Stored-session verification
// =============================================================

/// Verifier that replays canned provider answers in call order.
struct ScriptedVerifier {
    lookups: RefCell<VecDeque<Result<User, IdentityError>>>,
    refreshes: RefCell<VecDeque<Result<RefreshResponse, IdentityError>>>,
    looked_up_with: RefCell<Vec<String>>,
}

impl ScriptedVerifier {
    fn new(
        lookups: Vec<Result<User, IdentityError>>,
        refreshes: Vec<Result<RefreshResponse, IdentityError>>,
    ) -> Self {
        Self {
            lookups: RefCell::new(lookups.into()),
            refreshes: RefCell::new(refreshes.into()),
            looked_up_with: RefCell::new(Vec::new()),
        }
    }
}

impl SessionVerifier for ScriptedVerifier {
    async fn lookup(&self, id_token: &str) -> Result<User, IdentityError> {
        self.looked_up_with.borrow_mut().push(id_token.to_owned());
        self.lookups.borrow_mut().pop_front().expect("unexpected lookup")
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<RefreshResponse, IdentityError> {
        self.refreshes.borrow_mut().pop_front().expect("unexpected refresh")
    }
}

fn stored() -> StoredSession {
    StoredSession { user: alice(), id_token: "old-id".to_owned(), refresh_token: "old-refresh".to_owned() }
}

fn new_tokens() -> RefreshResponse {
    RefreshResponse { id_token: "new-id".to_owned(), refresh_token: "new-refresh".to_owned() }
}

fn expired() -> IdentityError {
    IdentityError::new(IdentityErrorCode::SessionExpired, "TOKEN_EXPIRED")
}

#[test]
fn valid_session_is_verified_without_refresh() {
    let verifier = ScriptedVerifier::new(vec![Ok(alice())], vec![]);
    assert_eq!(block_on(verify_session(&verifier, stored())), Verification::Verified(stored()));
}

#[test]
fn expired_session_is_verified_with_refreshed_tokens() {
    let verifier = ScriptedVerifier::new(vec![Err(expired()), Ok(alice())], vec![Ok(new_tokens())]);
    let outcome = block_on(verify_session(&verifier, stored()));
    let Verification::Verified(session) = outcome else {
        panic!("expected verified session, got {outcome:?}");
    };
    assert_eq!(session.id_token, "new-id");
    assert_eq!(session.refresh_token, "new-refresh");
    assert_eq!(*verifier.looked_up_with.borrow(), vec!["old-id".to_owned(), "new-id".to_owned()]);
}

#[test]
fn outage_after_refresh_keeps_refreshed_session() {
    let verifier = ScriptedVerifier::new(
        vec![Err(expired()), Err(IdentityError::network("Failed to fetch"))],
        vec![Ok(new_tokens())],
    );
    let outcome = block_on(verify_session(&verifier, stored()));
    let Verification::Unreachable { message, session } = outcome else {
        panic!("expected unreachable, got {outcome:?}");
    };
    assert_eq!(message, "Could not reach the authentication service. Check your connection.");
    assert_eq!(session.id_token, "new-id");
    assert_eq!(session.user, alice());
}

#[test]
fn rate_limit_after_refresh_is_reported() {
    let verifier = ScriptedVerifier::new(
        vec![Err(expired()), Err(IdentityError::new(IdentityErrorCode::TooManyRequests, "TOO_MANY_ATTEMPTS_TRY_LATER"))],
        vec![Ok(new_tokens())],
    );
    assert!(matches!(block_on(verify_session(&verifier, stored())), Verification::Unreachable { .. }));
}

#[test]
fn expiry_after_refresh_rejects_session() {
    let verifier = ScriptedVerifier::new(vec![Err(expired()), Err(expired())], vec![Ok(new_tokens())]);
    assert_eq!(block_on(verify_session(&verifier, stored())), Verification::Rejected(expired()));
}

#[test]
fn outage_during_refresh_keeps_stored_session() {
    let verifier =
        ScriptedVerifier::new(vec![Err(expired())], vec![Err(IdentityError::network("Failed to fetch"))]);
    let outcome = block_on(verify_session(&verifier, stored()));
    assert!(matches!(outcome, Verification::Unreachable { ref session, .. } if *session == stored()));
}

#[test]
fn rejected_refresh_token_rejects_session() {
    let revoked = IdentityError::new(IdentityErrorCode::SessionExpired, "INVALID_REFRESH_TOKEN");
    let verifier = ScriptedVerifier::new(vec![Err(expired())], vec![Err(revoked.clone())]);
    assert_eq!(block_on(verify_session(&verifier, stored())), Verification::Rejected(revoked));
}

#[test]
fn disabled_user_is_rejected_without_refresh() {
    let disabled = IdentityError::new(IdentityErrorCode::UserDisabled, "USER_DISABLED");
    let verifier = ScriptedVerifier::new(vec![Err(disabled.clone())], vec![]);
    assert_eq!(block_on(verify_session(&verifier, stored())), Verification::Rejected(disabled));
}

// =============================================================
// Subscription
// =============================================================

#[test]
fn published_events_reach_the_subscriber() {
    let provider = IdentityProvider::new(config(Some("k")));
    let mut events = provider.subscribe();
    provider.publish(AuthEvent::Changed(Some(alice())));
    provider.publish(AuthEvent::Changed(None));
    assert_eq!(block_on(events.next()), Some(AuthEvent::Changed(Some(alice()))));
    assert_eq!(block_on(events.next()), Some(AuthEvent::Changed(None)));
}

#[test]
fn resubscribing_closes_the_previous_stream() {
    let provider = IdentityProvider::new(config(Some("k")));
    let mut first = provider.subscribe();
    let mut second = provider.subscribe();
    provider.publish(AuthEvent::Changed(None));
    assert_eq!(block_on(first.next()), None);
    assert_eq!(block_on(second.next()), Some(AuthEvent::Changed(None)));
}

#[test]
fn unsubscribe_ends_the_stream() {
    let provider = IdentityProvider::new(config(Some("k")));
    let mut events = provider.subscribe();
    provider.unsubscribe();
    provider.publish(AuthEvent::Changed(None));
    assert_eq!(block_on(events.next()), None);
}

#[test]
fn publish_without_subscriber_is_a_no_op() {
    let provider = IdentityProvider::new(config(None));
    provider.publish(AuthEvent::Changed(None));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn sign_out_publishes_signed_out() {
    let provider = IdentityProvider::new(config(Some("k")));
    let mut events = provider.subscribe();
    block_on(provider.sign_out()).unwrap();
    assert_eq!(block_on(events.next()), Some(AuthEvent::Changed(None)));
}

#[test]
fn sign_in_without_api_key_is_not_configured() {
    let provider = IdentityProvider::new(config(None));
    let err = block_on(provider.sign_in("alice@example.com", "password1")).unwrap_err();
    assert_eq!(err.code, IdentityErrorCode::NotConfigured);
    assert_eq!(err.user_message(), "Authentication is not configured.");
}
