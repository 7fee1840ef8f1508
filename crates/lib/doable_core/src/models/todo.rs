//! Todo domain model and partial-update payload.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A todo item, owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub completed: bool,
    /// Epoch milliseconds; `Some` exactly when `completed` is true.
    pub completed_at: Option<i64>,
    pub owner_id: String,
}

/// Statically-typed partial update. These are the only mutable fields; any
/// other incoming key is ignored by deserialization rather than applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    /// Derive the stored completion pair from this patch.
    ///
    /// `completed: true` stamps the current time; anything else — including
    /// an absent field — clears completion state rather than being rejected.
    pub fn completion(&self) -> (bool, Option<i64>) {
        match self.completed {
            Some(true) => (true, Some(Utc::now().timestamp_millis())),
            _ => (false, None),
        }
    }
}
