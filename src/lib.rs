//! State and persistence core for a desktop workday widget.
//!
//! The crate owns everything non-visual: the task/category data model and
//! its legacy-format migration, the JSON load/save contract for the work
//! log and configuration documents, the per-category task registries, the
//! URL linkifier applied to note text, the session clock, and the layout
//! state machine that computes the target window footprint. Rendering,
//! styling, and window chrome belong to the host application, which feeds
//! intents into [`session::Session`] and drains [`event::CoreEvent`]s back.

pub mod clock;
pub mod event;
pub mod io;
pub mod layout;
pub mod linkify;
pub mod model;
pub mod registry;
pub mod session;

pub use clock::SessionClock;
pub use event::CoreEvent;
pub use layout::{Geometry, LayoutMode, LayoutState};
pub use linkify::{RichText, Span, linkify, linkify_with_cursor};
pub use model::{AppConfig, CategoryConfig, Task, WorkLog};
pub use registry::TaskRegistry;
pub use session::Session;
