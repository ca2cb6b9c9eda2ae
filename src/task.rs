//! Task data structure.
//!
//! A task is a card on the board: a title, an optional free-text description,
//! a status (its column), and a creation timestamp. The serde field names are
//! the storage wire format.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fields::Status;

/// A single card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique id, immutable once created.
    pub id: String,
    pub title: String,
    #[serde(rename = "desc", default)]
    pub desc: String,
    pub status: Status,
    /// Creation instant, epoch milliseconds. Immutable.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl Task {
    /// Build a fresh task in the To Do column. Caller is responsible for
    /// title validation; both fields are trimmed here.
    pub fn new(title: &str, desc: &str) -> Self {
        Task {
            id: Uuid::new_v4().to_string(),
            title: title.trim().to_string(),
            desc: desc.trim().to_string(),
            status: Status::Todo,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Human-readable creation time in the local timezone.
    pub fn created_display(&self) -> String {
        match Local.timestamp_millis_opt(self.created_at).single() {
            Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            None => "-".to_string(),
        }
    }

    /// First 8 characters of the id, for table output.
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}
