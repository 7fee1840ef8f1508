//! Service-layer flows orchestrating handlers and `doable_core`.

pub mod auth;
