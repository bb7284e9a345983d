//! Public landing page.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::util::guard::LOGIN_PATH;

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <main class="landing">
            <h1 class="landing__title">
                <span class="landing__mark">"Z"</span>
                "Scraper"
            </h1>
            <p class="landing__lede">
                "Unlock web data and get AI-powered insights instantly. Scrape any URL, ask questions, and get answers from top LLMs."
            </p>
            <A href=LOGIN_PATH attr:class="button button--primary button--large">
                "Try Now"
            </A>
            <p class="landing__footnote">"Powered by cutting-edge AI."</p>
        </main>
    }
}
