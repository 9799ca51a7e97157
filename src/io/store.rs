use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::{debug, warn};

use crate::model::config::AppConfig;
use crate::model::worklog::WorkLog;

const WORKLOG_FILE: &str = "tasks.json";
const CONFIG_FILE: &str = "config.json";
const DEFAULT_DATA_DIR: &str = ".workday_widget";

/// Error type for store operations. These never cross the public load/save
/// surface: loads fall back to defaults and saves drop the write, with a
/// diagnostic logged either way.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed document {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize document: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Reads and writes the two persisted JSON documents (work log and
/// configuration) plus one-off export snapshots, all under a single data
/// directory.
///
/// All operations are synchronous whole-document reads/overwrites with a
/// single attempt: no retry, no atomic rename, no fsync. The fallback to
/// default values on a failed load is the only recovery mechanism.
#[derive(Debug, Clone)]
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    /// Open a store rooted at `data_dir`, creating the directory if needed.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        if let Err(e) = fs::create_dir_all(&data_dir) {
            warn!("could not create data dir {}: {}", data_dir.display(), e);
        }
        Store { data_dir }
    }

    /// Open a store at the default location, `~/.workday_widget`.
    pub fn open_default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Store::new(home.join(DEFAULT_DATA_DIR))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn worklog_path(&self) -> PathBuf {
        self.data_dir.join(WORKLOG_FILE)
    }

    fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    /// Load the work log. A missing file, unreadable file, or malformed
    /// document all yield a fresh log with `session_start` stamped now;
    /// legacy-format migration happens during deserialization.
    pub fn load_worklog(&self) -> WorkLog {
        let path = self.worklog_path();
        if !path.exists() {
            debug!("no work log at {}, starting fresh", path.display());
            return WorkLog::fresh();
        }
        match read_json::<WorkLog>(&path) {
            Ok(log) => log,
            Err(e) => {
                warn!("falling back to a fresh work log: {}", e);
                WorkLog::fresh()
            }
        }
    }

    /// Overwrite the work log document. A failed write is dropped.
    pub fn save_worklog(&self, log: &WorkLog) {
        if let Err(e) = write_json(&self.worklog_path(), log) {
            warn!("work log not saved: {}", e);
        }
    }

    /// Load the configuration. Missing or corrupt documents yield the full
    /// defaults (three fixed categories, default geometry).
    pub fn load_config(&self) -> AppConfig {
        let path = self.config_path();
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return AppConfig::default();
        }
        match read_json::<AppConfig>(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("falling back to default config: {}", e);
                AppConfig::default()
            }
        }
    }

    /// Overwrite the configuration document. A failed write is dropped.
    pub fn save_config(&self, config: &AppConfig) {
        if let Err(e) = write_json(&self.config_path(), config) {
            warn!("config not saved: {}", e);
        }
    }

    /// Write `text` verbatim to `<label>_<YYYYMMDD_HHMMSS>.txt` in the data
    /// directory, with spaces in the label replaced by underscores. Returns
    /// the path written, or `None` if the write failed.
    ///
    /// Known limitation: two exports for the same label within the same
    /// second target the same file and the last write wins.
    pub fn export_snapshot(&self, label: &str, text: &str) -> Option<PathBuf> {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let name = format!("{}_{}.txt", label.replace(' ', "_"), stamp);
        let path = self.data_dir.join(name);
        match fs::write(&path, text) {
            Ok(()) => {
                debug!("exported snapshot to {}", path.display());
                Some(path)
            }
            Err(e) => {
                warn!("snapshot not exported to {}: {}", path.display(), e);
                None
            }
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let text = fs::read_to_string(path).map_err(|e| StoreError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| StoreError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text).map_err(|e| StoreError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}
