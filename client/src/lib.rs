//! ZScraper browser client.
//!
//! ARCHITECTURE
//! ============
//! - `state`: auth session, chat submission, and toast state.
//! - `net`: backend `/ask` client and identity provider REST client.
//! - `util`: route guard policy and `localStorage` helpers.
//! - `forms`: local validation for every form.
//! - `components` / `pages`: Leptos views.
//!
//! Built twice: `hydrate` for the WASM bundle, `ssr` for the Axum server.

pub mod app;
pub mod components;
pub mod config;
pub mod forms;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
