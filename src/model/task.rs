use chrono::Local;
use serde::{Deserialize, Serialize};

/// A single task belonging to one category of the work log.
///
/// Tasks keep their insertion position for display; completing a task never
/// moves it. The `id` is an opaque string unique within the owning work log
/// for the task's entire lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique id, e.g. `team_a_003`
    pub id: String,
    /// Display title; blank titles are rejected before creation
    pub title: String,
    /// ISO-8601 creation timestamp
    pub created_at: String,
    /// Whether the task has been marked complete
    #[serde(default)]
    pub completed: bool,
    /// Free-text notes attached to the task
    #[serde(default)]
    pub notes: String,
}

impl Task {
    /// Create a new incomplete task stamped with the current local time.
    pub fn new(id: String, title: String) -> Self {
        Task {
            id,
            title,
            created_at: Local::now().to_rfc3339(),
            completed: false,
            notes: String::new(),
        }
    }
}
