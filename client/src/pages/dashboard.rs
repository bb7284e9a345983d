//! Dashboard shell and its index route.
//!
//! SYSTEM CONTEXT
//! ==============
//! `DashboardLayout` is the parent route for everything under `/dashboard`:
//! sidebar on the left, the active child page in the outlet. The bare
//! `/dashboard` index forwards to the new-chat page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Outlet;
use leptos_router::hooks::use_navigate;

use crate::components::sidebar::Sidebar;
use crate::components::spinner::FullPageSpinner;
use crate::util::guard::NEW_CHAT_PATH;

#[component]
pub fn DashboardLayout() -> impl IntoView {
    view! {
        <div class="dashboard">
            <Sidebar/>
            <main class="dashboard__content">
                <Outlet/>
            </main>
        </div>
    }
}

/// `/dashboard` itself: forward to the new-chat page.
#[component]
pub fn DashboardIndex() -> impl IntoView {
    let navigate = use_navigate();
    Effect::new(move || {
        navigate(NEW_CHAT_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
    });

    view! { <FullPageSpinner label="Loading chat..."/> }
}
