//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Access control lives in `components::auth_gate`, not in
//! the pages.

pub mod dashboard;
pub mod history;
pub mod landing;
pub mod login;
pub mod new_chat;
pub mod signup;
