//! Signup page: account creation with local validation.
//!
//! Creating an account also signs it in. The page still sends the user to
//! `/login`, where the route gate forwards the signed-in session on to the
//! dashboard.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::forms::{FieldErrors, SignupForm};
use crate::net::identity::IdentityError;
use crate::net::types::User;
use crate::state::session::Session;
use crate::state::toast::{ToastState, ToastVariant};
use crate::util::guard::LOGIN_PATH;

/// Toast `(title, description, variant)` for a finished signup attempt.
pub fn signup_toast(result: &Result<User, IdentityError>) -> (&'static str, String, ToastVariant) {
    match result {
        Ok(_) => (
            "Signup Successful",
            "Your account has been created. Please login.".to_owned(),
            ToastVariant::Default,
        ),
        Err(e) => ("Signup Failed", e.user_message(), ToastVariant::Destructive),
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = leptos_router::hooks::use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::default());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let form = SignupForm { email: email.get(), password: password.get(), confirm_password: confirm_password.get() };
        let (email_value, password_value) = match form.credentials() {
            Ok(pair) => pair,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        errors.set(FieldErrors::default());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let identity = session.identity().clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = identity.create_account(&email_value, &password_value).await;
                match &result {
                    Ok(user) => log::info!("account created: {}", user.uid),
                    Err(e) => log::warn!("signup failed: {e}"),
                }
                let (title, description, variant) = signup_toast(&result);
                crate::components::toaster::notify(toasts, title, description, variant);
                busy.set(false);
                if result.is_ok() {
                    navigate(LOGIN_PATH, leptos_router::NavigateOptions::default());
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (email_value, password_value, &session, toasts, &navigate);
    };

    let field_error = move |field: &'static str| {
        move || errors.with(|e| e.get(field).map(|msg| view! { <p class="field__error">{msg.to_owned()}</p> }))
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1 class="auth-card__title">"Create Account"</h1>
                <p class="auth-card__subtitle">"Join ZScraper to unlock web insights."</p>
                <form class="auth-form" on:submit=on_submit novalidate=true>
                    <label class="field">
                        <span class="field__label">"Email"</span>
                        <input
                            class="field__input"
                            type="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        {field_error("email")}
                    </label>
                    <label class="field">
                        <span class="field__label">"Password"</span>
                        <input
                            class="field__input"
                            type="password"
                            placeholder="•••••••• (min. 8 characters)"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        {field_error("password")}
                    </label>
                    <label class="field">
                        <span class="field__label">"Confirm Password"</span>
                        <input
                            class="field__input"
                            type="password"
                            placeholder="••••••••"
                            prop:value=move || confirm_password.get()
                            on:input=move |ev| confirm_password.set(event_target_value(&ev))
                        />
                        {field_error("confirm_password")}
                    </label>
                    <button class="button button--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Sign Up" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Already have an account? "
                    <A href=LOGIN_PATH>"Log in"</A>
                </p>
            </div>
        </div>
    }
}
