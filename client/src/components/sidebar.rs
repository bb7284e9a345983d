//! Dashboard sidebar: navigation, signed-in user badge, and logout.

#[cfg(test)]
#[path = "sidebar_test.rs"]
mod sidebar_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::auth::AuthState;
use crate::state::session::Session;
use crate::state::toast::ToastState;
use crate::util::guard::{DEFAULT_PROTECTED_PATH, HISTORY_PATH, NEW_CHAT_PATH};

/// Two-letter avatar fallback derived from an email address.
///
/// `"jane.doe@x.io"` -> `"JD"`, `"sam@x.io"` -> `"SA"`, no email -> `"ZS"`.
pub fn initials(email: Option<&str>) -> String {
    let Some(email) = email.filter(|e| !e.is_empty()) else {
        return "ZS".to_owned();
    };
    let name = email.split('@').next().unwrap_or_default();
    let letters: String = if name.contains('.') {
        name.split('.').take(2).filter_map(|part| part.chars().next()).collect()
    } else {
        name.chars().take(2).collect()
    };
    letters.to_uppercase()
}

fn nav_class(active: bool) -> &'static str {
    if active { "sidebar__link sidebar__link--active" } else { "sidebar__link" }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let session = expect_context::<Session>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let location = use_location();
    let navigate = use_navigate();
    let auth = session.auth;

    let is_active = move |path: &'static str| location.pathname.get() == path;
    let user_label = move || auth.with(|state| state.user().map(|u| u.label().to_owned()).unwrap_or_default());
    let user_initials = move || auth.with(|state| initials(state.user().and_then(|u| u.email.as_deref())));
    let photo_url = move || auth.with(|state| state.user().and_then(|u| u.photo_url.clone()));

    let on_logout = move |_| {
        let identity = session.identity().clone();
        let navigate = navigate.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match identity.sign_out().await {
                Ok(()) => navigate(crate::util::guard::LOGIN_PATH, leptos_router::NavigateOptions::default()),
                Err(e) => {
                    log::error!("logout failed: {e}");
                    crate::components::toaster::notify(
                        toasts,
                        "Logout failed",
                        e.user_message(),
                        crate::state::toast::ToastVariant::Destructive,
                    );
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (identity, navigate, toasts);
    };

    view! {
        <aside class="sidebar">
            <A href=DEFAULT_PROTECTED_PATH attr:class="sidebar__brand">
                <span class="sidebar__brand-mark">"Z"</span>
                <span class="sidebar__brand-name">"ZScraper"</span>
            </A>
            <nav class="sidebar__nav">
                <A href=NEW_CHAT_PATH attr:class=move || nav_class(is_active(NEW_CHAT_PATH))>
                    "New Chat"
                </A>
                <A href=HISTORY_PATH attr:class=move || nav_class(is_active(HISTORY_PATH))>
                    "History"
                </A>
            </nav>
            <footer class="sidebar__footer">
                <Show when=move || auth.with(AuthState::is_signed_in)>
                    <div class="sidebar__user">
                        {move || match photo_url() {
                            Some(src) => view! { <img class="avatar" src=src alt=user_label()/> }.into_any(),
                            None => view! { <span class="avatar avatar--fallback">{user_initials()}</span> }.into_any(),
                        }}
                        <p class="sidebar__user-name">{user_label}</p>
                    </div>
                </Show>
                <button class="button button--ghost sidebar__logout" on:click=on_logout>
                    "Logout"
                </button>
            </footer>
        </aside>
    }
}
