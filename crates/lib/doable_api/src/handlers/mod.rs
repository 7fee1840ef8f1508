//! Request handlers.

pub mod todos;
pub mod users;
