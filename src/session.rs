//! Session facade: owns all core state and maps Presentation Layer intents
//! onto it.
//!
//! Every mutation happens on the single control path that calls into this
//! type; persistence is explicit (save/export/close) plus the load at open.
//! State changes the host should reflect are queued as [`CoreEvent`]s and
//! drained after each intent. Invalid intents and invalid layout
//! transitions are silent no-ops; nothing here panics or surfaces an error.

use indexmap::IndexMap;
use log::debug;

use crate::clock::SessionClock;
use crate::event::CoreEvent;
use crate::io::store::Store;
use crate::layout::{Geometry, LayoutChange, LayoutState};
use crate::linkify::{RichText, linkify};
use crate::model::config::{AppConfig, CategoryConfig, palette};
use crate::model::worklog::WorkLog;
use crate::registry::{TaskRegistry, slugify};

/// A running widget session.
#[derive(Debug)]
pub struct Session {
    store: Store,
    worklog: WorkLog,
    config: AppConfig,
    /// One registry per configured category, in display order
    registries: IndexMap<String, TaskRegistry>,
    /// Name of the category whose tab is in front
    active: Option<String>,
    clock: SessionClock,
    layout: LayoutState,
    events: Vec<CoreEvent>,
}

impl Session {
    /// Load both documents from the store and assemble the session.
    ///
    /// Registries are built from the configured categories: worklog
    /// categories with no config entry stay inert in the document, config
    /// categories with no worklog entry start empty. Neither mismatch is
    /// repaired. A persisted collapsed-notes preference is applied as a
    /// silent layout change.
    pub fn open(store: Store) -> Self {
        let worklog = store.load_worklog();
        let config = store.load_config();

        let mut registries = IndexMap::new();
        for category in &config.categories {
            let tasks = worklog
                .categories
                .get(&category.name)
                .cloned()
                .unwrap_or_default();
            let mut reg = TaskRegistry::with_tasks(category.name.clone(), tasks);
            reg.set_id_prefix(unique_slug(&registries, &category.name));
            registries.insert(category.name.clone(), reg);
        }
        let active = registries.keys().next().cloned();

        let (layout, startup_change) = LayoutState::from_config(&config);
        let mut session = Session {
            store,
            worklog,
            config,
            registries,
            active,
            clock: SessionClock::new(),
            layout,
            events: Vec::new(),
        };
        if let Some(change) = startup_change {
            session.emit_layout(change);
        }
        session
    }

    /// Queued state-change events since the last drain.
    pub fn drain_events(&mut self) -> Vec<CoreEvent> {
        std::mem::take(&mut self.events)
    }

    // -----------------------------------------------------------------------
    // Read surface
    // -----------------------------------------------------------------------

    /// Configured categories with their display colors, in order.
    pub fn categories(&self) -> &[CategoryConfig] {
        &self.config.categories
    }

    pub fn active_category(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Ordered tasks for one category, or `None` if it isn't configured.
    pub fn tasks(&self, category: &str) -> Option<&[crate::model::Task]> {
        self.registries.get(category).map(TaskRegistry::list)
    }

    /// The active category's note buffer, linkified.
    pub fn note_buffer(&self) -> RichText {
        match self.active_registry() {
            Some(reg) => linkify(reg.edit_buffer()),
            None => RichText::default(),
        }
    }

    /// Formatted elapsed working time, `HH:MM:SS`.
    pub fn clock_display(&self) -> String {
        self.clock.format()
    }

    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    pub fn worklog(&self) -> &WorkLog {
        &self.worklog
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Task intents (routed to the active category)
    // -----------------------------------------------------------------------

    /// Add a task to the active category. Blank titles are ignored.
    pub fn add_task(&mut self, title: &str) -> Option<String> {
        let category = self.active.clone()?;
        let id = self.registries.get_mut(&category)?.add(title)?;
        self.events.push(CoreEvent::TaskAdded {
            category,
            task_id: id.clone(),
        });
        Some(id)
    }

    /// Select a task in the active category, exposing its notes.
    pub fn select_task(&mut self, task_id: &str) {
        let Some(category) = self.active.clone() else {
            return;
        };
        let Some(reg) = self.registries.get_mut(&category) else {
            return;
        };
        if reg.select(task_id) {
            let rich = linkify(reg.edit_buffer());
            self.events.push(CoreEvent::TaskSelected {
                category: category.clone(),
                task_id: task_id.to_string(),
            });
            self.events
                .push(CoreEvent::NoteBufferChanged { category, rich });
        }
    }

    /// Mark the selected task complete. No selection, no-op.
    pub fn complete_current(&mut self) {
        let Some(category) = self.active.clone() else {
            return;
        };
        let Some(reg) = self.registries.get_mut(&category) else {
            return;
        };
        if let Some(task) = reg.complete_current() {
            let task_id = task.id.clone();
            self.events
                .push(CoreEvent::TaskCompleted { category, task_id });
        }
    }

    /// Remove the selected task. No selection, no-op.
    pub fn delete_current(&mut self) {
        let Some(category) = self.active.clone() else {
            return;
        };
        let Some(reg) = self.registries.get_mut(&category) else {
            return;
        };
        if let Some(task_id) = reg.delete_current() {
            self.events.push(CoreEvent::TaskRemoved {
                category: category.clone(),
                task_id,
            });
            self.events.push(CoreEvent::NoteBufferChanged {
                category,
                rich: RichText::default(),
            });
        }
    }

    /// Replace the active category's note buffer with widget text.
    pub fn edit_note_buffer(&mut self, text: &str) {
        let Some(category) = self.active.clone() else {
            return;
        };
        let Some(reg) = self.registries.get_mut(&category) else {
            return;
        };
        reg.set_edit_buffer(text);
        self.events.push(CoreEvent::NoteBufferChanged {
            category,
            rich: linkify(text),
        });
    }

    /// Bring a different category's tab to the front.
    pub fn set_active_category(&mut self, name: &str) {
        if !self.registries.contains_key(name) {
            return;
        }
        self.active = Some(name.to_string());
        let rich = self.note_buffer();
        self.events.push(CoreEvent::NoteBufferChanged {
            category: name.to_string(),
            rich,
        });
    }

    // -----------------------------------------------------------------------
    // Category management
    // -----------------------------------------------------------------------

    /// Add a category with the default new-category color. Blank or
    /// duplicate names are ignored.
    pub fn add_category(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() || self.registries.contains_key(name) {
            return;
        }
        self.config
            .categories
            .push(CategoryConfig::new(name, palette::BLUE));
        let mut reg = TaskRegistry::new(name);
        reg.set_id_prefix(unique_slug(&self.registries, name));
        self.registries.insert(name.to_string(), reg);
        if self.active.is_none() {
            self.active = Some(name.to_string());
        }
        self.events.push(CoreEvent::CategoriesChanged);
    }

    /// Rename a category in place, preserving its position and tasks. The
    /// old worklog entry (if any) stays in the document untouched.
    pub fn rename_category(&mut self, old: &str, new: &str) {
        let new = new.trim();
        if new.is_empty() || old == new || self.registries.contains_key(new) {
            return;
        }
        let Some(entry) = self.config.categories.iter_mut().find(|c| c.name == old) else {
            return;
        };
        entry.name = new.to_string();

        let registries = std::mem::take(&mut self.registries);
        self.registries = registries
            .into_iter()
            .map(|(name, mut reg)| {
                if name == old {
                    reg.set_name(new);
                    (new.to_string(), reg)
                } else {
                    (name, reg)
                }
            })
            .collect();

        let slug = unique_slug(&self.registries, new);
        if let Some(reg) = self.registries.get_mut(new) {
            reg.set_id_prefix(slug);
        }

        if self.active.as_deref() == Some(old) {
            self.active = Some(new.to_string());
        }
        self.events.push(CoreEvent::CategoriesChanged);
    }

    /// Remove a category. At least one category must remain, so removing
    /// the last one is silently refused.
    pub fn remove_category(&mut self, name: &str) {
        if self.registries.len() <= 1 || !self.registries.contains_key(name) {
            return;
        }
        self.registries.shift_remove(name);
        self.config.categories.retain(|c| c.name != name);
        if self.active.as_deref() == Some(name) {
            self.active = self.registries.keys().next().cloned();
        }
        self.events.push(CoreEvent::CategoriesChanged);
    }

    // -----------------------------------------------------------------------
    // Clock and layout intents
    // -----------------------------------------------------------------------

    /// Advance the session clock one second.
    pub fn tick(&mut self) {
        self.clock.tick();
        self.events.push(CoreEvent::ClockTick {
            formatted: self.clock.format(),
        });
    }

    /// Reset the session clock to zero.
    pub fn reset_clock(&mut self) {
        self.clock.reset();
        self.events.push(CoreEvent::ClockTick {
            formatted: self.clock.format(),
        });
    }

    pub fn toggle_notes(&mut self) {
        if let Some(change) = self.layout.toggle_notes() {
            self.emit_layout(change);
        }
    }

    pub fn enter_presentation(&mut self) {
        if let Some(change) = self.layout.enter_presentation() {
            self.emit_layout(change);
        }
    }

    pub fn exit_presentation(&mut self) {
        if let Some(change) = self.layout.exit_presentation() {
            self.emit_layout(change);
        }
    }

    /// Record a host-side window resize/move.
    pub fn window_resized(&mut self, geometry: Geometry) {
        self.layout.window_resized(geometry);
    }

    // -----------------------------------------------------------------------
    // Persistence intents
    // -----------------------------------------------------------------------

    /// Snapshot every registry into the work log and overwrite the document.
    pub fn save(&mut self) {
        for (name, reg) in &mut self.registries {
            self.worklog
                .categories
                .insert(name.clone(), reg.snapshot().to_vec());
        }
        self.store.save_worklog(&self.worklog);
        self.events.push(CoreEvent::WorklogSaved);
    }

    /// Export the active category's note buffer verbatim to a timestamped
    /// text file.
    pub fn export(&mut self) {
        let Some(category) = self.active.clone() else {
            return;
        };
        let Some(reg) = self.registries.get(&category) else {
            return;
        };
        let buffer = reg.edit_buffer().to_string();
        if self.store.export_snapshot(&category, &buffer).is_some() {
            self.events.push(CoreEvent::SnapshotExported { category });
        }
    }

    /// Save everything and fold layout state back into the configuration.
    /// Called once on shutdown; the write completes before this returns.
    pub fn close(&mut self) {
        self.save();
        self.layout.write_config(&mut self.config);
        self.store.save_config(&self.config);
        debug!("session closed after {}", self.clock.format());
    }

    fn active_registry(&self) -> Option<&TaskRegistry> {
        self.registries.get(self.active.as_deref()?)
    }

    fn emit_layout(&mut self, change: LayoutChange) {
        self.events.push(CoreEvent::LayoutChanged {
            mode: change.mode,
            geometry: change.geometry,
            silent: change.silent,
        });
    }
}

/// An id prefix for `name` that no other registry is minting under. Names
/// that differ only by case or spacing ("Team A" / "team a") slugify
/// identically; the later one gets a numbered prefix so task ids stay
/// unique across the whole work log.
fn unique_slug(registries: &IndexMap<String, TaskRegistry>, name: &str) -> String {
    let taken = |slug: &str| {
        registries
            .values()
            .any(|r| r.name() != name && r.id_prefix() == slug)
    };
    let base = slugify(name);
    if !taken(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
