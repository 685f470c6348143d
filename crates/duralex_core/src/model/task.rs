//! Task record.
//!
//! # Invariants
//! - `id` is generated at creation and never reused.
//! - `title` is non-empty after trimming; enforced by [`Task::new`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable task identifier.
pub type TaskId = Uuid;

/// User-created to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
}

impl Task {
    /// Creates an incomplete task with a fresh id.
    ///
    /// Returns `None` when `title` is blank after trimming. Title and
    /// description are stored trimmed.
    pub fn new(title: &str, description: &str) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.trim().to_string(),
            is_completed: false,
        })
    }

    /// Flips completion state.
    pub fn toggle(&mut self) {
        self.is_completed = !self.is_completed;
    }
}
