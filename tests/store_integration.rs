use mapty::database::{KvStorage, SqliteStorage};
use mapty::render::{LogMap, TextList};
use mapty::store::STORAGE_KEY;
use mapty::{
    Error, Position, SessionConfig, SessionController, WorkoutForm, WorkoutRecord, WorkoutStore,
    WorkoutType,
};
use std::path::Path;

const LONDON: Position = Position::new(51.5, -0.1);

fn open(path: &Path) -> WorkoutStore<SqliteStorage> {
    WorkoutStore::hydrate(SqliteStorage::open(path).unwrap())
}

#[test]
fn workouts_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("mapty.sqlite3");

    let mut store = open(&db);
    assert!(store.is_empty());
    store
        .add(WorkoutRecord::running(5.0, 25.0, LONDON, 178.0).unwrap())
        .unwrap();
    store
        .add(WorkoutRecord::cycling(20.0, 60.0, LONDON, 400.0).unwrap())
        .unwrap();
    let before = store.all().to_vec();
    drop(store);

    let store = open(&db);
    assert_eq!(store.all(), before.as_slice());
    assert_eq!(store.all()[0].kind().metric(), 5.0);
    assert_eq!(store.all()[1].kind().metric(), 20.0);
    assert_eq!(store.all()[1].workout_type(), WorkoutType::Cycling);
}

#[test]
fn corrupted_storage_recovers_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("mapty.sqlite3");
    {
        let mut kv = SqliteStorage::open(&db).unwrap();
        kv.set(STORAGE_KEY, "[{\"id\": 12, oops").unwrap();
    }

    let mut store = open(&db);
    assert!(store.is_empty());

    // the store is still usable and overwrites the garbage
    store
        .add(WorkoutRecord::running(3.0, 18.0, LONDON, 165.0).unwrap())
        .unwrap();
    assert_eq!(open(&db).len(), 1);
}

#[test]
fn invalid_distance_leaves_stored_list_alone() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("mapty.sqlite3");

    let mut session = SessionController::new(
        open(&db),
        LogMap::default(),
        TextList::new(false),
        SessionConfig::default(),
    );
    session.on_map_ready(LONDON);
    session.on_map_click(LONDON);

    let form = WorkoutForm {
        workout_type: WorkoutType::Running,
        distance: 0.0,
        duration: 25.0,
        cadence: 178.0,
        elevation_gain: 0.0,
    };
    let err = session.submit(&form).unwrap_err();
    assert!(matches!(err, Error::InvalidMeasurement { field: "distance", .. }));
    assert_eq!(session.view().notices().len(), 1);
    assert!(session.store().storage().get(STORAGE_KEY).unwrap().is_none());
}

#[test]
fn session_round_trip_through_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("mapty.sqlite3");

    let mut session = SessionController::new(
        open(&db),
        LogMap::default(),
        TextList::new(true),
        SessionConfig::default(),
    );
    session.on_map_ready(LONDON);

    session.on_map_click(Position::new(51.51, -0.12));
    let run = session
        .submit(&WorkoutForm {
            workout_type: WorkoutType::Running,
            distance: 5.0,
            duration: 25.0,
            cadence: 178.0,
            elevation_gain: 0.0,
        })
        .unwrap();

    session.on_map_click(Position::new(51.45, -0.2));
    let ride = session
        .submit(&WorkoutForm {
            workout_type: WorkoutType::Cycling,
            distance: 20.0,
            duration: 60.0,
            cadence: 0.0,
            elevation_gain: 400.0,
        })
        .unwrap();
    assert_ne!(run, ride);
    assert_eq!(session.map().marker_count(), 2);
    assert_eq!(session.view().lines().len(), 2);
    assert_eq!(
        session.map().center(),
        Some((Position::new(51.45, -0.2), 16))
    );

    session.on_list_click(&run, true).unwrap();
    session.on_list_click(&run, true).unwrap();
    assert_eq!(session.map().marker_count(), 1);
    assert_eq!(session.view().lines().len(), 1);

    let store = open(&db);
    assert_eq!(store.len(), 1);
    assert_eq!(store.all()[0].id(), ride);
    assert!(matches!(store.get(&run), Err(Error::RecordNotFound(_))));
}

#[test]
fn clear_erases_the_file_copy() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("mapty.sqlite3");

    let mut store = open(&db);
    store
        .add(WorkoutRecord::running(5.0, 25.0, LONDON, 178.0).unwrap())
        .unwrap();
    store.clear().unwrap();

    let kv = SqliteStorage::open(&db).unwrap();
    assert!(kv.get(STORAGE_KEY).unwrap().is_none());
    assert!(open(&db).is_empty());
}
