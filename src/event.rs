//! Typed state-change events emitted by the core.
//!
//! The Presentation Layer drains these after each intent and reacts; the
//! core never references presentation types.

use crate::layout::{Geometry, LayoutMode};
use crate::linkify::RichText;

/// A state change the host may want to reflect on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreEvent {
    TaskAdded {
        category: String,
        task_id: String,
    },
    TaskSelected {
        category: String,
        task_id: String,
    },
    TaskCompleted {
        category: String,
        task_id: String,
    },
    TaskRemoved {
        category: String,
        task_id: String,
    },
    /// The active category's note buffer changed; carries the linkified form.
    NoteBufferChanged {
        category: String,
        rich: RichText,
    },
    /// Target window mode/geometry changed. `silent` marks startup state
    /// applied from persisted configuration (no animation expected).
    LayoutChanged {
        mode: LayoutMode,
        geometry: Geometry,
        silent: bool,
    },
    /// One second elapsed; carries the formatted `HH:MM:SS` display.
    ClockTick {
        formatted: String,
    },
    /// The category set changed (added, renamed, or removed).
    CategoriesChanged,
    WorklogSaved,
    SnapshotExported {
        category: String,
    },
}
