pub mod config;
pub mod task;
pub mod worklog;

pub use config::*;
pub use task::*;
pub use worklog::*;
