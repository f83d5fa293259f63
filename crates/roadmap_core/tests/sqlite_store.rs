use roadmap_core::{
    KeyValueStore, Roadmap, RoadmapSession, SqliteKvStore, StoreError, TaskBinding,
    TreeRenderTarget, CUSTOM_TASKS_KEY, PROGRESS_KEY,
};
use serde_json::{json, Value};

fn read_json(store: &SqliteKvStore, key: &str) -> Value {
    let raw = store.get(key).unwrap().expect("key should be stored");
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn session_state_survives_reopening_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roadmap.sqlite3");

    {
        let store = SqliteKvStore::open(&path).unwrap();
        let mut session =
            RoadmapSession::open(store, TreeRenderTarget::new(), Roadmap::default_months());
        session.add_task(0, "Write outline");
        session.add_task(0, "Draft chapter");
        session.add_task(5, "Publish");
        session.set_checked(TaskBinding::new(0, 1), true);
    }

    let store = SqliteKvStore::open(&path).unwrap();
    assert_eq!(
        read_json(&store, CUSTOM_TASKS_KEY),
        json!({"0": ["Write outline", "Draft chapter"], "5": ["Publish"]})
    );
    assert_eq!(
        read_json(&store, PROGRESS_KEY),
        json!({"0": {"0": false, "1": true}, "5": {"0": false}})
    );

    let session = RoadmapSession::open(store, TreeRenderTarget::new(), Roadmap::default_months());
    let view = session.target().snapshot();
    assert!(view.months[0].tasks[1].checked);
    assert!(view.months[5].tasks[0].deletable);
    assert_eq!(session.progress().percent, 33);
}

#[test]
fn foreign_rows_in_database_do_not_break_loading() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roadmap.sqlite3");
    {
        let mut store = SqliteKvStore::open(&path).unwrap();
        store
            .set(CUSTOM_TASKS_KEY, r#"{"1": ["ok"], "1.5": ["bad"], "7": 3}"#)
            .unwrap();
        store.set(PROGRESS_KEY, "not json").unwrap();
        store.set("unrelated", "value").unwrap();
    }

    let store = SqliteKvStore::open(&path).unwrap();
    let session = RoadmapSession::open(store, TreeRenderTarget::new(), Roadmap::default_months());
    assert_eq!(session.roadmap().total_tasks(), 1);
    assert_eq!(session.progress().percent, 0);
    assert_eq!(
        session.store().keys().unwrap(),
        vec![
            CUSTOM_TASKS_KEY.to_string(),
            PROGRESS_KEY.to_string(),
            "unrelated".to_string()
        ]
    );
}

#[test]
fn opening_directory_path_reports_db_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SqliteKvStore::open(dir.path()).err().expect("directory is not a database");
    assert!(matches!(err, StoreError::Db(_)));
    assert_eq!(err.code(), "store_db_error");
}
