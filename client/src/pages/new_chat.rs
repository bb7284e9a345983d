//! `/dashboard/new-chat`: the query submission screen.

use leptos::prelude::*;

use crate::components::chat_interface::ChatInterface;

#[component]
pub fn NewChatPage() -> impl IntoView {
    view! {
        <div class="page">
            <header class="page__header">
                <h1 class="page__title">"New Chat"</h1>
                <p class="page__subtitle">
                    "Enter a URL to scrape, ask a question, and get AI-powered answers."
                </p>
            </header>
            <ChatInterface/>
        </div>
    }
}
