//! `/dashboard/history`: placeholder until sessions are persisted.

use leptos::prelude::*;

#[component]
pub fn HistoryPage() -> impl IntoView {
    view! {
        <div class="page">
            <header class="page__header">
                <h1 class="page__title">"Scraping History"</h1>
                <p class="page__subtitle">"Review your past web scraping and AI query sessions."</p>
            </header>
            <div class="card card--empty">
                <h3>"No History Yet"</h3>
                <p>"Your past scraping sessions will appear here."</p>
                <p class="card__note">"(This feature is under development)"</p>
            </div>
        </div>
    }
}
