use super::*;
use crate::net::identity::IdentityErrorCode;

#[test]
fn signup_toast_asks_user_to_login_on_success() {
    let user = User { uid: "u-1".to_owned(), email: Some("a@b.com".to_owned()), display_name: None, photo_url: None };
    let (title, description, variant) = signup_toast(&Ok(user));
    assert_eq!(title, "Signup Successful");
    assert_eq!(description, "Your account has been created. Please login.");
    assert_eq!(variant, ToastVariant::Default);
}

#[test]
fn signup_toast_reports_email_in_use() {
    let err = IdentityError::new(IdentityErrorCode::EmailAlreadyInUse, "EMAIL_EXISTS");
    let (title, description, variant) = signup_toast(&Err(err));
    assert_eq!(title, "Signup Failed");
    assert_eq!(description, "This email address is already in use.");
    assert_eq!(variant, ToastVariant::Destructive);
}

#[test]
fn signup_toast_falls_back_for_unknown_errors() {
    let err = IdentityError::new(IdentityErrorCode::Other("OPERATION_NOT_ALLOWED".to_owned()), "");
    let (_, description, _) = signup_toast(&Err(err));
    assert_eq!(description, "An unexpected error occurred.");
}
