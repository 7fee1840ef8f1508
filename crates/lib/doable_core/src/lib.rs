//! # doable_core
//!
//! Core domain logic for Doable.

pub mod auth;
pub mod db;
pub mod migrate;
pub mod models;
pub mod todos;
pub mod uuid;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
