//! Reactive application state.
//!
//! DESIGN
//! ======
//! Plain structs/enums with pure transition methods, wrapped in `RwSignal`
//! by pages and `App`. Keeping transitions pure keeps them testable without a
//! browser.

pub mod auth;
pub mod chat;
pub mod session;
pub mod toast;
