//! Login page: email + password sign-in against the identity provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! Input is validated locally with `forms::LoginForm` before the provider is
//! called. On success the session stream flips to signed-in and the route
//! gate forwards the user to the dashboard.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::forms::{FieldErrors, LoginForm};
use crate::net::identity::IdentityError;
use crate::net::types::User;
use crate::state::session::Session;
use crate::state::toast::{ToastState, ToastVariant};
use crate::util::guard::SIGNUP_PATH;

/// Toast `(title, description, variant)` for a finished sign-in attempt.
pub fn login_toast(result: &Result<User, IdentityError>) -> (&'static str, String, ToastVariant) {
    match result {
        Ok(user) => ("Login Successful", format!("Welcome back, {}!", user.label()), ToastVariant::Default),
        Err(e) => ("Login Failed", e.user_message(), ToastVariant::Destructive),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::default());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let form = LoginForm { email: email.get(), password: password.get() };
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
            leptos::task::spawn_local(async move {
                let result = identity.sign_in(&email_value, &password_value).await;
                if let Err(e) = &result {
                    log::warn!("sign-in failed: {e}");
                }
                let (title, description, variant) = login_toast(&result);
                crate::components::toaster::notify(toasts, title, description, variant);
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (email_value, password_value, &session, toasts);
    };

    let field_error = move |field: &'static str| {
        move || errors.with(|e| e.get(field).map(|msg| view! { <p class="field__error">{msg.to_owned()}</p> }))
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1 class="auth-card__title">"Welcome Back"</h1>
                <p class="auth-card__subtitle">"Log in to continue to ZScraper."</p>
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
                            placeholder="••••••••"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        {field_error("password")}
                    </label>
                    <button class="button button--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Logging in..." } else { "Log In" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Don't have an account? "
                    <A href=SIGNUP_PATH>"Sign up"</A>
                </p>
            </div>
        </div>
    }
}
