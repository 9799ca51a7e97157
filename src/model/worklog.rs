use std::collections::HashMap;

use chrono::Local;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::task::Task;

/// Legacy single-category document keys from the pre-`teams` schema, paired
/// with the category name each one migrates to.
const LEGACY_KEYS: [(&str, &str); 3] = [
    ("team_a", "Team A"),
    ("team_b", "Team B"),
    ("sap_project", "SAP Project"),
];

/// The persisted work log (tasks.json).
///
/// Category order is insertion order and is significant for display, hence
/// the `IndexMap`. The wire key is `teams` for compatibility with existing
/// documents; legacy single-category keys are migrated on deserialization
/// (see [`WorkLogDoc`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "WorkLogDoc")]
pub struct WorkLog {
    #[serde(rename = "teams")]
    pub categories: IndexMap<String, Vec<Task>>,
    pub session_notes: HashMap<String, String>,
    /// ISO-8601 timestamp, set once when the log is first created
    pub session_start: String,
}

impl WorkLog {
    /// A fresh, empty log with `session_start` stamped now.
    pub fn fresh() -> Self {
        WorkLog {
            session_start: Local::now().to_rfc3339(),
            ..Default::default()
        }
    }

    /// Total number of tasks across all categories.
    pub fn task_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }
}

/// Raw document shape accepted on load. Migration rules, preserved exactly
/// from the historical behavior:
///
/// 1. The `teams` mapping seeds the categories.
/// 2. Legacy keys (`team_a`, `team_b`, `sap_project`), if present, overwrite
///    any same-named category already seeded from `teams`. Legacy wins.
/// 3. If no categories result, the three default category names are seeded
///    with empty task lists.
#[derive(Debug, Deserialize)]
struct WorkLogDoc {
    #[serde(default)]
    teams: IndexMap<String, Vec<Task>>,
    #[serde(default)]
    team_a: Option<Vec<Task>>,
    #[serde(default)]
    team_b: Option<Vec<Task>>,
    #[serde(default)]
    sap_project: Option<Vec<Task>>,
    #[serde(default)]
    session_notes: HashMap<String, String>,
    #[serde(default)]
    session_start: String,
}

impl From<WorkLogDoc> for WorkLog {
    fn from(doc: WorkLogDoc) -> Self {
        let mut categories = doc.teams;

        let legacy = [doc.team_a, doc.team_b, doc.sap_project];
        for ((_, name), tasks) in LEGACY_KEYS.iter().zip(legacy) {
            if let Some(tasks) = tasks {
                categories.insert((*name).to_string(), tasks);
            }
        }

        if categories.is_empty() {
            for (_, name) in LEGACY_KEYS {
                categories.insert(name.to_string(), Vec::new());
            }
        }

        WorkLog {
            categories,
            session_notes: doc.session_notes,
            session_start: doc.session_start,
        }
    }
}
