//! Toast viewport and the `notify` helper used by pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` provides one `RwSignal<ToastState>`; any page calls `notify` to
//! surface a transient message. In the browser each toast dismisses itself
//! after `TOAST_DURATION_MS`.

use leptos::prelude::*;

use crate::state::toast::{ToastState, ToastVariant};

/// Push a toast and schedule its dismissal.
pub fn notify(
    toasts: RwSignal<ToastState>,
    title: impl Into<String>,
    description: impl Into<String>,
    variant: ToastVariant,
) {
    let mut id = 0;
    toasts.update(|state| id = state.push(title, description, variant));

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(std::time::Duration::from_millis(crate::state::toast::TOAST_DURATION_MS)).await;
        toasts.update(|state| state.dismiss(id));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = id;
}

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <ol class="toaster" aria-live="assertive">
            <For
                each=move || toasts.with(|state| state.toasts().to_vec())
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = match toast.variant {
                        ToastVariant::Default => "toast",
                        ToastVariant::Destructive => "toast toast--destructive",
                    };
                    view! {
                        <li class=class>
                            <div class="toast__body">
                                <p class="toast__title">{toast.title}</p>
                                <p class="toast__description">{toast.description}</p>
                            </div>
                            <button
                                class="toast__close"
                                aria-label="Dismiss"
                                on:click=move |_| toasts.update(|state| state.dismiss(id))
                            >
                                "×"
                            </button>
                        </li>
                    }
                }
            />
        </ol>
    }
}
