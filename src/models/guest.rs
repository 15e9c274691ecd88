//! Guestbook entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single guestbook message. Append-only until deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GuestEntry {
    pub id: String,
    pub name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl GuestEntry {
    /// Create an entry with a fresh id and the current timestamp.
    /// Callers validate name/message before constructing.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}
