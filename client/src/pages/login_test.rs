use super::*;
use crate::net::identity::IdentityErrorCode;

fn user(email: &str) -> User {
    User { uid: "u-1".to_owned(), email: Some(email.to_owned()), display_name: None, photo_url: None }
}

#[test]
fn login_toast_welcomes_user_on_success() {
    let (title, description, variant) = login_toast(&Ok(user("a@b.com")));
    assert_eq!(title, "Login Successful");
    assert_eq!(description, "Welcome back, a@b.com!");
    assert_eq!(variant, ToastVariant::Default);
}

#[test]
fn login_toast_uses_friendly_message_on_bad_credentials() {
    let err = IdentityError::new(IdentityErrorCode::InvalidCredentials, "INVALID_LOGIN_CREDENTIALS");
    let (title, description, variant) = login_toast(&Err(err));
    assert_eq!(title, "Login Failed");
    assert_eq!(description, "Invalid email or password.");
    assert_eq!(variant, ToastVariant::Destructive);
}
