//! Status enumeration and the fixed column set.
//!
//! The board has exactly three columns, one per status value, always in the
//! same order. The serialized names ("todo", "inprogress", "done") are the
//! on-disk wire format and must not change.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Lifecycle stage of a task; doubles as the column partition key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Todo,
    #[value(name = "inprogress", alias = "in-progress")]
    InProgress,
    Done,
}

/// Column order for rendering: To Do, In Progress, Done. Fixed.
pub const COLUMN_ORDER: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

impl Status {
    /// Display title of the column holding this status.
    pub fn column_title(self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }

    /// Index of this status within [`COLUMN_ORDER`].
    pub fn column_index(self) -> usize {
        match self {
            Status::Todo => 0,
            Status::InProgress => 1,
            Status::Done => 2,
        }
    }

    /// The column to the left, if any.
    pub fn prev(self) -> Option<Status> {
        match self {
            Status::Todo => None,
            Status::InProgress => Some(Status::Todo),
            Status::Done => Some(Status::InProgress),
        }
    }

    /// The column to the right, if any.
    pub fn next(self) -> Option<Status> {
        match self {
            Status::Todo => Some(Status::InProgress),
            Status::InProgress => Some(Status::Done),
            Status::Done => None,
        }
    }
}

/// Format a status for table output.
pub fn format_status(s: Status) -> &'static str {
    match s {
        Status::Todo => "todo",
        Status::InProgress => "inprogress",
        Status::Done => "done",
    }
}
