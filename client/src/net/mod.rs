//! Networking modules for the question backend and the identity provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` talks to the scraping/answering backend, `identity` talks to the
//! identity provider, and `types` defines the shared wire schema.

pub mod api;
pub mod identity;
pub mod types;
