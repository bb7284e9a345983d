//! Root component, HTML shell, and route table.
//!
//! SYSTEM CONTEXT
//! ==============
//! `shell` is rendered by the Axum server for every page request. It embeds
//! the runtime client config as `<meta>` tags so the browser bundle picks up
//! the same backend and identity endpoints the server was started with.
//! `App` provides the process-wide context (config, session, toasts) and
//! mounts each route behind `AuthGate`.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{ParentRoute, Route, Router, Routes};
use leptos_router::path;

use crate::components::auth_gate::AuthGate;
use crate::components::toaster::Toaster;
use crate::config::ClientConfig;
use crate::net::identity::IdentityProvider;
use crate::pages::dashboard::{DashboardIndex, DashboardLayout};
use crate::pages::history::HistoryPage;
use crate::pages::landing::LandingPage;
use crate::pages::login::LoginPage;
use crate::pages::new_chat::NewChatPage;
use crate::pages::signup::SignupPage;
use crate::state::session::Session;
use crate::state::toast::ToastState;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    let config = ClientConfig::load();
    let config_meta = config
        .meta_entries()
        .into_iter()
        .map(|(name, content)| view! { <meta name=name content=content/> })
        .collect_view();

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                {config_meta}
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::load();
    let session = Session::start(IdentityProvider::new(config.identity.clone()));
    let toasts = RwSignal::new(ToastState::default());

    #[cfg(feature = "hydrate")]
    log::info!("backend: {}", config.backend_base_url);

    provide_context(config);
    provide_context(session.clone());
    provide_context(toasts);

    on_cleanup(move || session.teardown());

    view! {
        <Stylesheet id="leptos" href="/pkg/zscraper.css"/>
        <Title text="ZScraper"/>
        <Router>
            <Routes fallback=|| view! { <p class="not-found">"Page not found."</p> }>
                <Route path=path!("/") view=|| view! { <AuthGate><LandingPage/></AuthGate> }/>
                <Route path=path!("/login") view=|| view! { <AuthGate><LoginPage/></AuthGate> }/>
                <Route path=path!("/signup") view=|| view! { <AuthGate><SignupPage/></AuthGate> }/>
                <ParentRoute
                    path=path!("/dashboard")
                    view=|| view! { <AuthGate><DashboardLayout/></AuthGate> }
                >
                    <Route path=path!("") view=DashboardIndex/>
                    <Route path=path!("new-chat") view=NewChatPage/>
                    <Route path=path!("history") view=HistoryPage/>
                </ParentRoute>
            </Routes>
        </Router>
        <Toaster/>
    }
}
