//! Per-category ordered task collection with a single "current task" cursor.
//!
//! The cursor is a stable task id resolved on each access, so it can never
//! dangle when the underlying list mutates. The in-progress note edit lives
//! in a buffer here and is flushed into the selected task's notes before
//! anything that could lose it (reselect, complete, snapshot).

use crate::model::task::Task;

/// Task collection for one category.
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    /// Display name of the owning category
    name: String,
    /// Lowercased, underscore-joined form of the name, used as the id prefix
    slug: String,
    tasks: Vec<Task>,
    /// Highest id number issued under the current prefix; deleting a task
    /// never frees its number for reuse within the session
    issued: usize,
    /// Id of the currently selected task, if any
    selected: Option<String>,
    /// In-progress note text for the selected task
    edit_buffer: String,
}

impl TaskRegistry {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        TaskRegistry {
            name,
            slug,
            ..Default::default()
        }
    }

    /// Build a registry over tasks loaded from the work log.
    pub fn with_tasks(name: impl Into<String>, tasks: Vec<Task>) -> Self {
        let mut registry = TaskRegistry::new(name);
        registry.tasks = tasks;
        registry
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the owning category. Existing task ids keep their old prefix;
    /// only newly added tasks use the new one.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.set_id_prefix(slugify(&self.name));
    }

    /// The prefix new task ids are minted under.
    pub fn id_prefix(&self) -> &str {
        &self.slug
    }

    /// Override the id prefix. Used when two category names slugify to the
    /// same prefix and ids would collide across registries.
    pub(crate) fn set_id_prefix(&mut self, slug: impl Into<String>) {
        self.slug = slug.into();
        self.issued = 0;
    }

    /// Ordered task sequence, insertion order unchanged. Completed tasks
    /// stay where they were inserted; styling them is the caller's concern.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    /// The selected task, resolved by id on each access.
    pub fn current(&self) -> Option<&Task> {
        let id = self.selected.as_deref()?;
        self.tasks.iter().find(|t| t.id == id)
    }

    /// The note text currently being edited.
    pub fn edit_buffer(&self) -> &str {
        &self.edit_buffer
    }

    /// Replace the edit buffer with text from the editing widget.
    pub fn set_edit_buffer(&mut self, text: impl Into<String>) {
        self.edit_buffer = text.into();
    }

    /// Add a task titled with the trimmed input, appended to the end of the
    /// sequence. Blank input (after trimming) is ignored. Returns the new
    /// task's id.
    pub fn add(&mut self, title: &str) -> Option<String> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let next = self.next_id_number();
        let id = format!("{}_{:03}", self.slug, next);
        self.issued = next;
        self.tasks.push(Task::new(id.clone(), title.to_string()));
        Some(id)
    }

    /// Select the task with the given id and expose its notes for editing.
    /// A pending edit for a previously selected task is flushed first, so
    /// switching selection never loses note text. Unknown ids are ignored.
    /// Returns whether the selection changed to the requested task.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.tasks.iter().any(|t| t.id == id) {
            return false;
        }
        self.flush_edit_buffer();
        self.selected = Some(id.to_string());
        self.edit_buffer = self
            .current()
            .map(|t| t.notes.clone())
            .unwrap_or_default();
        true
    }

    /// Mark the selected task complete, keeping the cursor on it. The edit
    /// buffer is flushed into its notes first. No selection, no-op.
    pub fn complete_current(&mut self) -> Option<&Task> {
        self.flush_edit_buffer();
        let id = self.selected.clone()?;
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = true;
        self.current()
    }

    /// Remove the selected task from the sequence, clearing the cursor and
    /// the edit buffer. No selection, no-op. Returns the removed task's id.
    pub fn delete_current(&mut self) -> Option<String> {
        let id = self.selected.take()?;
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        self.tasks.remove(idx);
        self.edit_buffer.clear();
        Some(id)
    }

    /// Flush any pending edit into the selected task's notes, then return
    /// the full ordered sequence. Used before persistence.
    pub fn snapshot(&mut self) -> &[Task] {
        self.flush_edit_buffer();
        &self.tasks
    }

    /// Write the edit buffer into the selected task's notes, if any.
    fn flush_edit_buffer(&mut self) {
        if let Some(id) = self.selected.as_deref() {
            if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                task.notes = self.edit_buffer.clone();
            }
        }
    }

    /// Next id number: one past the highest numeric suffix among existing
    /// ids with this registry's prefix, or past the high-water mark of ids
    /// already issued this session, whichever is larger. A deleted task's
    /// number is never handed out again to a live listener holding its id.
    /// Ids from older schemes (timestamp suffixes and the like) don't parse
    /// and are skipped, so new ids never collide with them by construction
    /// of the prefix scan.
    fn next_id_number(&self) -> usize {
        let prefix = format!("{}_", self.slug);
        let mut max = self.issued;
        for task in &self.tasks {
            if let Some(suffix) = task.id.strip_prefix(&prefix) {
                if let Ok(n) = suffix.parse::<usize>() {
                    max = max.max(n);
                }
            }
        }
        max + 1
    }
}

pub(crate) fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}
