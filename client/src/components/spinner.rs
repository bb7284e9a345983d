//! Blocking wait indicators.

use leptos::prelude::*;

/// Full-height spinner shown while a page is blocked (auth check, redirect).
#[component]
pub fn FullPageSpinner(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="wait-screen" role="status" aria-live="polite">
            <span class="spinner spinner--large" aria-hidden="true"></span>
            {label.map(|text| view! { <p class="wait-screen__label">{text}</p> })}
        </div>
    }
}

/// Inline spinner for buttons and response cards.
#[component]
pub fn Spinner() -> impl IntoView {
    view! { <span class="spinner" aria-hidden="true"></span> }
}
