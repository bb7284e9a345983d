//! Query submission form and response card.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted by the new-chat page. Input is validated through
//! `ChatState::prepare` before `net::api::ask` is called, and the submit
//! button stays disabled while a request is in flight.

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::forms::ChatForm;
use crate::net::types::LlmModel;
use crate::state::chat::ChatState;
use crate::state::toast::ToastState;

const PENDING_MESSAGE: &str = "AI is analyzing the content and formulating a response...";

#[component]
pub fn ChatInterface() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let url = RwSignal::new(String::new());
    let question = RwSignal::new(String::new());
    let model = RwSignal::new(LlmModel::default().label().to_owned());
    let chat = RwSignal::new(ChatState::default());

    let busy = move || chat.with(ChatState::is_busy);
    let field_error = move |field: &'static str| chat.with(|c| c.field_errors.get(field).map(str::to_owned));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = ChatForm { url: url.get(), question: question.get(), model: model.get() };
        let mut request = None;
        chat.update(|c| request = c.prepare(form));
        let Some(request) = request else {
            return;
        };

        #[cfg(feature = "hydrate")]
        {
            use crate::components::toaster::notify;
            use crate::state::toast::ToastVariant;

            let config = config.clone();
            leptos::task::spawn_local(async move {
                log::debug!("ask: model={} url={}", request.model().wire_name(), request.url());
                let result = crate::net::api::ask(&config, &request).await;
                match &result {
                    Ok(_) => notify(toasts, "AI Responded", "Your question has been answered.", ToastVariant::Default),
                    Err(e) => {
                        log::warn!("ask failed: {e}");
                        notify(toasts, "Processing Error", e.user_message(), ToastVariant::Destructive);
                    }
                }
                chat.update(|c| c.finish(result));
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (request, &config, toasts);
    };

    view! {
        <section class="chat">
            <form class="chat__form" on:submit=on_submit novalidate=true>
                <label class="field">
                    <span class="field__label">"Website URL"</span>
                    <input
                        class="field__input"
                        type="url"
                        placeholder="https://example.com"
                        prop:value=move || url.get()
                        on:input=move |ev| url.set(event_target_value(&ev))
                    />
                    {move || field_error("url").map(|msg| view! { <p class="field__error">{msg}</p> })}
                </label>
                <label class="field">
                    <span class="field__label">"Your Question"</span>
                    <textarea
                        class="field__input field__input--multiline"
                        rows="4"
                        placeholder="What would you like to know about this page?"
                        prop:value=move || question.get()
                        on:input=move |ev| question.set(event_target_value(&ev))
                    ></textarea>
                    {move || field_error("question").map(|msg| view! { <p class="field__error">{msg}</p> })}
                </label>
                <label class="field">
                    <span class="field__label">"Model"</span>
                    <select
                        class="field__input"
                        prop:value=move || model.get()
                        on:change=move |ev| model.set(event_target_value(&ev))
                    >
                        {LlmModel::ALL
                            .iter()
                            .map(|m| view! { <option value=m.label()>{m.display_label()}</option> })
                            .collect_view()}
                    </select>
                    {move || field_error("model").map(|msg| view! { <p class="field__error">{msg}</p> })}
                </label>
                <button class="button button--primary" type="submit" disabled=busy>
                    {move || if busy() { "Processing..." } else { "Scrape & Ask AI" }}
                </button>
            </form>

            {move || {
                if busy() {
                    Some(
                        view! {
                            <div class="chat__response chat__response--pending">
                                <crate::components::spinner::Spinner/>
                                <p>{PENDING_MESSAGE}</p>
                            </div>
                        }
                            .into_any(),
                    )
                } else {
                    chat.with(ChatState::rendered_response)
                        .map(|text| {
                            view! {
                                <div class="chat__response">
                                    <h3 class="chat__response-title">"AI Response"</h3>
                                    <p class="chat__response-body">{text}</p>
                                </div>
                            }
                                .into_any()
                        })
                }
            }}
        </section>
    }
}
