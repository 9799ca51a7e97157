use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

use workday_core::io::Store;
use workday_core::{Session, WorkLog};

/// A full save/reopen cycle through the store preserves every task field.
#[test]
fn session_survives_restart() {
    let dir = TempDir::new().unwrap();

    let mut session = Session::open(Store::new(dir.path()));
    let first = session.add_task("write the report").unwrap();
    session.add_task("review PRs").unwrap();
    session.select_task(&first);
    session.edit_note_buffer("draft at https://docs.example/report");
    session.complete_current();

    session.set_active_category("Team B");
    session.add_task("plan sprint").unwrap();
    session.close();

    let reopened = Session::open(Store::new(dir.path()));
    let team_a = reopened.tasks("Team A").unwrap();
    assert_eq!(team_a.len(), 2);
    assert_eq!(team_a[0].title, "write the report");
    assert!(team_a[0].completed);
    assert_eq!(team_a[0].notes, "draft at https://docs.example/report");
    assert!(!team_a[1].completed);
    assert_eq!(reopened.tasks("Team B").unwrap()[0].title, "plan sprint");

    // The clock is never persisted
    assert_eq!(reopened.clock_display(), "00:00:00");
}

/// Loading a legacy-format document migrates it; the migrated categories
/// are what the session sees and what the next save writes out.
#[test]
fn legacy_document_migrates_through_session() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tasks.json"),
        r#"{
            "teams": {
                "Team A": [{"id":"new1","title":"from teams","created_at":"2025-01-01T09:00:00"}]
            },
            "team_a": [{"id":"old1","title":"from legacy","created_at":"2024-01-01T09:00:00"}],
            "team_b": [],
            "session_start": "2024-01-01T08:00:00"
        }"#,
    )
    .unwrap();

    let mut session = Session::open(Store::new(dir.path()));
    // Legacy key wins over the teams entry of the same name (historical rule)
    assert_eq!(session.tasks("Team A").unwrap()[0].title, "from legacy");
    session.save();

    let saved: WorkLog =
        serde_json::from_str(&fs::read_to_string(dir.path().join("tasks.json")).unwrap()).unwrap();
    assert_eq!(saved.categories["Team A"][0].title, "from legacy");
    assert_eq!(saved.session_start, "2024-01-01T08:00:00");
}

/// Worklog categories with no config entry are inert: invisible to the
/// session but carried through saves untouched.
#[test]
fn unconfigured_worklog_category_is_preserved() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tasks.json"),
        r#"{
            "teams": {
                "Team A": [],
                "Ghost": [{"id":"g1","title":"orphan","created_at":"2024-05-05T09:00:00"}]
            }
        }"#,
    )
    .unwrap();

    let mut session = Session::open(Store::new(dir.path()));
    assert!(session.tasks("Ghost").is_none());
    session.add_task("visible work").unwrap();
    session.save();

    let saved: WorkLog =
        serde_json::from_str(&fs::read_to_string(dir.path().join("tasks.json")).unwrap()).unwrap();
    assert_eq!(saved.categories["Ghost"][0].title, "orphan");
    assert_eq!(saved.categories["Team A"][0].title, "visible work");
}

/// The exported snapshot file holds the note buffer verbatim.
#[test]
fn export_writes_buffer_verbatim() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::open(Store::new(dir.path()));
    let id = session.add_task("task").unwrap();
    session.select_task(&id);
    session.edit_note_buffer("line one\nsee http://x.co/a now\n");
    session.export();

    let exported: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".txt"))
        .collect();
    assert_eq!(exported.len(), 1);
    let name = exported[0].file_name().to_string_lossy().into_owned();
    assert!(name.starts_with("Team_A_"), "unexpected name {name}");
    assert_eq!(
        fs::read_to_string(exported[0].path()).unwrap(),
        "line one\nsee http://x.co/a now\n"
    );
}

/// Closing while presenting keeps the collapsed-notes preference that was
/// active before presentation was entered.
#[test]
fn collapsed_preference_survives_close_from_presentation() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::open(Store::new(dir.path()));
    session.toggle_notes();
    session.enter_presentation();
    session.close();

    let config = Store::new(dir.path()).load_config();
    assert!(config.notes_collapsed);

    let reopened = Session::open(Store::new(dir.path()));
    assert_eq!(
        reopened.layout().mode(),
        workday_core::LayoutMode::Collapsed
    );
}

/// Presentation mode is persisted as a flag on close but never restored as
/// the active startup state.
#[test]
fn presentation_flag_round_trip_without_restore() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::open(Store::new(dir.path()));
    session.enter_presentation();
    session.close();

    let config = Store::new(dir.path()).load_config();
    assert!(config.presentation_mode);

    let reopened = Session::open(Store::new(dir.path()));
    assert_ne!(
        reopened.layout().mode(),
        workday_core::LayoutMode::Presentation
    );
}
