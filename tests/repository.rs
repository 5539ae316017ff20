use chrono::NaiveDate;
use tempfile::TempDir;

use fitness_tracker::{LogMetrics, NewExercise, Repository, Store, TrackerError};

const DB_FILE: &str = "fitness_tracker.db";

fn setup() -> (TempDir, Repository) {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path().join(DB_FILE));
    store.initialize_schema().unwrap();
    (dir, Repository::new(store))
}

fn add(repo: &Repository, name: &str) -> i64 {
    repo.add_exercise(&NewExercise {
        name,
        description: "test",
        image_ref: "",
        animation_ref: "",
    })
    .unwrap()
}

fn count(dir: &TempDir, sql: &str) -> i64 {
    let conn = rusqlite::Connection::open(dir.path().join(DB_FILE)).unwrap();
    conn.query_row(sql, [], |row| row.get(0)).unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

#[test]
fn registered_user_can_authenticate() {
    let (_dir, repo) = setup();
    for (username, password) in [("ana", "pw"), ("Bob Smith", "s3cret!"), ("ünï", "ç")] {
        let id = repo.register_user(username, password).unwrap();
        let identity = repo
            .authenticate_user(username, password)
            .unwrap()
            .expect("credentials should match");
        assert_eq!(identity.id, id);
        assert_eq!(identity.username, username);
    }
}

#[test]
fn wrong_password_is_not_an_error() {
    let (_dir, repo) = setup();
    repo.register_user("ana", "pw").unwrap();
    assert_eq!(repo.authenticate_user("ana", "PW").unwrap(), None);
    assert_eq!(repo.authenticate_user("nobody", "pw").unwrap(), None);
}

#[test]
fn duplicate_username_keeps_first_account() {
    let (dir, repo) = setup();
    let first = repo.register_user("ana", "first").unwrap();

    let err = repo.register_user("ana", "second").unwrap_err();
    assert!(matches!(err, TrackerError::DuplicateUsername(ref name) if name == "ana"));
    assert!(err.is_conflict());

    assert_eq!(repo.authenticate_user("ana", "first").unwrap().unwrap().id, first);
    assert_eq!(repo.authenticate_user("ana", "second").unwrap(), None);
    assert_eq!(count(&dir, "SELECT COUNT(*) FROM users"), 1);
}

#[test]
fn exercise_lookup_by_id() {
    let (_dir, repo) = setup();
    let plank = add(&repo, "Plank");

    let found = repo.get_exercise(plank).unwrap().expect("known id");
    assert_eq!(found.id, plank);
    assert_eq!(found.name, "Plank");
    assert_eq!(found.description, "test");

    assert_eq!(repo.get_exercise(plank + 100).unwrap(), None);
}

#[test]
fn workout_keeps_submitted_order() {
    let (_dir, repo) = setup();
    let user = repo.register_user("ana", "pw").unwrap();
    let squats = add(&repo, "Squats");
    let lunges = add(&repo, "Lunges");
    let plank = add(&repo, "Plank");

    let workout = repo
        .create_workout(user, "Leg Day", &[plank, squats, lunges])
        .unwrap();

    let ids: Vec<i64> = repo
        .get_workout_exercises(workout)
        .unwrap()
        .into_iter()
        .map(|exercise| exercise.id)
        .collect();
    assert_eq!(ids, vec![plank, squats, lunges]);

    let workouts = repo.list_user_workouts(user).unwrap();
    assert_eq!(workouts.len(), 1);
    assert_eq!(workouts[0].name, "Leg Day");
}

#[test]
fn workouts_are_scoped_to_their_owner() {
    let (_dir, repo) = setup();
    let ana = repo.register_user("ana", "pw").unwrap();
    let bob = repo.register_user("bob", "pw").unwrap();
    let plank = add(&repo, "Plank");
    repo.create_workout(ana, "Core", &[plank]).unwrap();
    repo.create_workout(ana, "Core Again", &[plank]).unwrap();

    let names: Vec<String> = repo
        .list_user_workouts(ana)
        .unwrap()
        .into_iter()
        .map(|w| w.name)
        .collect();
    assert_eq!(names, vec!["Core", "Core Again"]);
    assert!(repo.list_user_workouts(bob).unwrap().is_empty());
    assert!(repo.get_workout_exercises(999).unwrap().is_empty());
}

#[test]
fn failed_workout_leaves_no_rows() {
    let (dir, repo) = setup();
    let user = repo.register_user("ana", "pw").unwrap();
    let squats = add(&repo, "Squats");

    let err = repo
        .create_workout(user, "Broken", &[squats, 9999])
        .unwrap_err();
    assert!(matches!(err, TrackerError::MissingReference(_)));

    assert_eq!(
        count(&dir, "SELECT COUNT(*) FROM workouts WHERE name = 'Broken'"),
        0
    );
    assert_eq!(count(&dir, "SELECT COUNT(*) FROM workout_exercises"), 0);
}

#[test]
fn logs_come_back_newest_date_first() {
    let (_dir, repo) = setup();
    let user = repo.register_user("ana", "pw").unwrap();
    let plank = add(&repo, "Plank");

    for d in [1, 3, 2] {
        repo.log_exercise(user, plank, &LogMetrics::default(), day(d))
            .unwrap();
    }

    let dates: Vec<NaiveDate> = repo
        .list_user_logs(user)
        .unwrap()
        .into_iter()
        .map(|entry| entry.log_date)
        .collect();
    assert_eq!(dates, vec![day(3), day(2), day(1)]);
}

#[test]
fn same_day_logs_keep_insertion_order() {
    let (_dir, repo) = setup();
    let user = repo.register_user("ana", "pw").unwrap();
    let squats = add(&repo, "Squats");
    let plank = add(&repo, "Plank");

    let metrics = LogMetrics {
        sets: Some(3),
        reps: Some(10),
        weight: Some(42.5),
        ..LogMetrics::default()
    };
    repo.log_exercise(user, squats, &metrics, day(5)).unwrap();
    repo.log_exercise(user, plank, &LogMetrics::default(), day(5))
        .unwrap();

    let logs = repo.list_user_logs(user).unwrap();
    let names: Vec<&str> = logs.iter().map(|e| e.exercise_name.as_str()).collect();
    assert_eq!(names, vec!["Squats", "Plank"]);
    assert_eq!(logs[0].metrics, metrics);
    assert_eq!(logs[1].metrics, LogMetrics::default());
}

#[test]
fn logs_are_private_to_each_user() {
    let (_dir, repo) = setup();
    let ana = repo.register_user("ana", "pw").unwrap();
    let bob = repo.register_user("bob", "pw").unwrap();
    let plank = add(&repo, "Plank");
    repo.log_exercise(ana, plank, &LogMetrics::default(), day(1))
        .unwrap();

    assert_eq!(repo.list_user_logs(ana).unwrap().len(), 1);
    assert!(repo.list_user_logs(bob).unwrap().is_empty());
}

#[test]
fn data_survives_reopening_the_store() {
    let (dir, repo) = setup();
    repo.register_user("ana", "pw").unwrap();
    add(&repo, "Plank");
    drop(repo);

    let store = Store::open(dir.path().join(DB_FILE));
    store.initialize_schema().unwrap();
    let repo = Repository::new(store);
    assert!(repo.authenticate_user("ana", "pw").unwrap().is_some());
    assert_eq!(repo.list_exercises().unwrap().len(), 1);
}
