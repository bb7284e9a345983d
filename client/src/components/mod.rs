//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render page chrome (sidebar, toasts, wait screens), the route
//! gate, and the chat form, reading shared state from Leptos context.

pub mod auth_gate;
pub mod chat_interface;
pub mod sidebar;
pub mod spinner;
pub mod toaster;
