//! Route wrapper that applies the session guard to its page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every routed page is mounted inside `AuthGate`. The gate evaluates
//! `util::guard::decide` for the current path and auth state, performs the
//! redirect when one is due, and only mounts the page on `Render`.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::spinner::FullPageSpinner;
use crate::state::session::Session;
use crate::util::guard::{GuardDecision, decide, install_route_guard};

#[component]
pub fn AuthGate(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<Session>();
    let auth = session.auth;
    let location = use_location();

    let decision = Memo::new(move |_| decide(&auth.get(), &location.pathname.get()));
    install_route_guard(decision, use_navigate());

    move || match decision.get() {
        GuardDecision::Render => children().into_any(),
        GuardDecision::Wait => view! { <FullPageSpinner/> }.into_any(),
        GuardDecision::Redirect(_) => view! { <FullPageSpinner label="Redirecting..."/> }.into_any(),
        GuardDecision::Unavailable => {
            let session = session.clone();
            view! { <ProviderOutage on_retry=Callback::new(move |()| session.retry())/> }.into_any()
        }
    }
}

/// Shown on protected pages when the identity provider cannot be reached.
#[component]
fn ProviderOutage(on_retry: Callback<()>) -> impl IntoView {
    let session = expect_context::<Session>();
    let reason = move || match session.auth.get() {
        crate::state::auth::AuthState::Unavailable(reason) => reason,
        _ => String::new(),
    };

    view! {
        <div class="wait-screen wait-screen--error" role="alert">
            <h2>"Sign-in service unavailable"</h2>
            <p>{reason}</p>
            <button class="button" on:click=move |_| on_retry.run(())>
                "Retry"
            </button>
        </div>
    }
}
