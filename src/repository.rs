//! Typed operations over the [`Store`]. This is where the entity invariants
//! live: blank-field validation, unique usernames and exercise names,
//! all-or-nothing workout composition, and the ordering of query results.
//! Screens call into this module and never touch the store directly.

use std::collections::HashSet;

use chrono::NaiveDate;
use rusqlite::Error as SqlError;
use tracing::{debug, error, info, warn};

use crate::db::{self, constraint_violation, Constraint, Store};
use crate::error::{Result, TrackerError};
use crate::models::{Exercise, Identity, LogEntry, LogMetrics, NewExercise, WorkoutSummary};

#[derive(Debug, Clone)]
pub struct Repository {
    store: Store,
}

impl Repository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Register a new account and return its id.
    pub fn register_user(&self, username: &str, password: &str) -> Result<i64> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(TrackerError::validation(
                "Username and password cannot be empty.",
            ));
        }

        let conn = self.store.connect()?;
        let id = db::insert_user(&conn, username, password).map_err(|err| {
            match constraint_violation(&err) {
                Some(Constraint::Unique) => TrackerError::DuplicateUsername(username.to_string()),
                _ => persistence_failure("register user", err),
            }
        })?;
        info!(user_id = id, username, "registered user");
        Ok(id)
    }

    /// Return the matching identity, or `None` when the credentials do not
    /// match any account. A mismatch is an ordinary outcome, not an error.
    pub fn authenticate_user(&self, username: &str, password: &str) -> Result<Option<Identity>> {
        let conn = self.store.connect()?;
        let identity = db::find_user(&conn, username, password)?;
        if identity.is_none() {
            debug!(username, "authentication mismatch");
        }
        Ok(identity)
    }

    /// Add a catalog entry and return its id.
    pub fn add_exercise(&self, exercise: &NewExercise<'_>) -> Result<i64> {
        if exercise.name.trim().is_empty() {
            return Err(TrackerError::validation("Exercise name cannot be empty."));
        }

        let conn = self.store.connect()?;
        let id = db::insert_exercise(&conn, exercise).map_err(|err| {
            match constraint_violation(&err) {
                Some(Constraint::Unique) => {
                    TrackerError::DuplicateExerciseName(exercise.name.to_string())
                }
                _ => persistence_failure("add exercise", err),
            }
        })?;
        debug!(exercise_id = id, name = exercise.name, "added exercise");
        Ok(id)
    }

    /// The whole catalog sorted by name.
    pub fn list_exercises(&self) -> Result<Vec<Exercise>> {
        let conn = self.store.connect()?;
        Ok(db::fetch_exercises(&conn)?)
    }

    pub fn get_exercise(&self, id: i64) -> Result<Option<Exercise>> {
        let conn = self.store.connect()?;
        Ok(db::fetch_exercise(&conn, id)?)
    }

    pub fn exercise_count(&self) -> Result<i64> {
        let conn = self.store.connect()?;
        Ok(db::count_exercises(&conn)?)
    }

    /// Create a workout together with its ordered exercise list. Each
    /// exercise's sequence is its zero-based position in `exercise_ids`. The
    /// workout row and all sequence rows commit together or not at all.
    pub fn create_workout(&self, user_id: i64, name: &str, exercise_ids: &[i64]) -> Result<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::validation("Workout name cannot be empty."));
        }
        if exercise_ids.is_empty() {
            return Err(TrackerError::validation(
                "Please add exercises to your workout.",
            ));
        }
        let mut seen = HashSet::with_capacity(exercise_ids.len());
        if let Some(dup) = exercise_ids.iter().find(|id| !seen.insert(**id)) {
            return Err(TrackerError::validation(format!(
                "Exercise {dup} is listed more than once."
            )));
        }

        let mut conn = self.store.connect()?;
        let tx = conn.transaction()?;

        let workout_id = db::insert_workout(&tx, user_id, name).map_err(|err| {
            reference_or_failure("create workout", err, || format!("User {user_id}"))
        })?;

        for (sequence, exercise_id) in exercise_ids.iter().enumerate() {
            db::insert_workout_exercise(&tx, workout_id, *exercise_id, sequence as i64).map_err(
                |err| {
                    reference_or_failure("create workout", err, || {
                        format!("Exercise {exercise_id}")
                    })
                },
            )?;
        }

        // An early return above drops `tx`, which rolls the whole workout back.
        tx.commit()?;
        info!(
            workout_id,
            user_id,
            exercises = exercise_ids.len(),
            "created workout"
        );
        Ok(workout_id)
    }

    /// A user's workouts in creation order.
    pub fn list_user_workouts(&self, user_id: i64) -> Result<Vec<WorkoutSummary>> {
        let conn = self.store.connect()?;
        Ok(db::fetch_workouts_for_user(&conn, user_id)?)
    }

    /// Exercises of a workout ordered by their stored sequence. Unknown ids
    /// yield an empty list.
    pub fn get_workout_exercises(&self, workout_id: i64) -> Result<Vec<Exercise>> {
        let conn = self.store.connect()?;
        Ok(db::fetch_workout_exercises(&conn, workout_id)?)
    }

    /// Record one performed exercise. Numeric fields arrive already parsed;
    /// no range checks happen here.
    pub fn log_exercise(
        &self,
        user_id: i64,
        exercise_id: i64,
        metrics: &LogMetrics,
        log_date: NaiveDate,
    ) -> Result<i64> {
        let conn = self.store.connect()?;
        let id = db::insert_log(&conn, user_id, exercise_id, log_date, metrics).map_err(|err| {
            reference_or_failure("log exercise", err, || {
                format!("User {user_id} or exercise {exercise_id}")
            })
        })?;
        debug!(log_id = id, user_id, exercise_id, %log_date, "logged exercise");
        Ok(id)
    }

    /// The user's history, most recent date first. Same-day entries keep
    /// their insertion order.
    pub fn list_user_logs(&self, user_id: i64) -> Result<Vec<LogEntry>> {
        let conn = self.store.connect()?;
        Ok(db::fetch_logs_for_user(&conn, user_id)?)
    }
}

/// Foreign-key violations become [`TrackerError::MissingReference`]; every
/// other store error is logged and reported as a persistence failure.
fn reference_or_failure<F>(operation: &str, err: SqlError, subject: F) -> TrackerError
where
    F: FnOnce() -> String,
{
    match constraint_violation(&err) {
        Some(Constraint::ForeignKey) => {
            let subject = subject();
            warn!(operation, %subject, "rejected write with missing reference");
            TrackerError::MissingReference(subject)
        }
        _ => persistence_failure(operation, err),
    }
}

fn persistence_failure(operation: &str, err: SqlError) -> TrackerError {
    error!(operation, error = %err, "persistence failure");
    TrackerError::Persistence(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> (tempfile::TempDir, Repository) {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::open(tmp.path().join("repo.db"));
        store.initialize_schema().unwrap();
        (tmp, Repository::new(store))
    }

    fn exercise(repo: &Repository, name: &str) -> i64 {
        repo.add_exercise(&NewExercise {
            name,
            description: "",
            image_ref: "",
            animation_ref: "",
        })
        .unwrap()
    }

    #[test]
    fn blank_credentials_are_rejected_before_writing() {
        let (_tmp, repo) = repo();
        assert!(repo.register_user("", "pw").unwrap_err().is_validation());
        assert!(repo.register_user("ana", "").unwrap_err().is_validation());
        assert!(repo.register_user("   ", "pw").unwrap_err().is_validation());
        assert_eq!(repo.authenticate_user("", "pw").unwrap(), None);
    }

    #[test]
    fn duplicate_exercise_name_is_a_conflict() {
        let (_tmp, repo) = repo();
        exercise(&repo, "Plank");
        let err = repo
            .add_exercise(&NewExercise {
                name: "Plank",
                description: "again",
                image_ref: "",
                animation_ref: "",
            })
            .unwrap_err();
        assert!(matches!(err, TrackerError::DuplicateExerciseName(ref n) if n == "Plank"));
        assert_eq!(repo.exercise_count().unwrap(), 1);
    }

    #[test]
    fn workout_rejects_empty_list_and_repeats() {
        let (_tmp, repo) = repo();
        let user = repo.register_user("ana", "pw").unwrap();
        let plank = exercise(&repo, "Plank");

        assert!(repo.create_workout(user, "Core", &[]).unwrap_err().is_validation());
        assert!(repo.create_workout(user, "  ", &[plank]).unwrap_err().is_validation());
        assert!(repo
            .create_workout(user, "Core", &[plank, plank])
            .unwrap_err()
            .is_validation());
        assert!(repo.list_user_workouts(user).unwrap().is_empty());
    }

    #[test]
    fn workout_for_unknown_user_is_a_missing_reference() {
        let (_tmp, repo) = repo();
        let plank = exercise(&repo, "Plank");
        let err = repo.create_workout(99, "Core", &[plank]).unwrap_err();
        assert!(matches!(err, TrackerError::MissingReference(_)));
    }

    #[test]
    fn log_for_unknown_exercise_is_rejected() {
        let (_tmp, repo) = repo();
        let user = repo.register_user("ana", "pw").unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let err = repo
            .log_exercise(user, 42, &LogMetrics::default(), day)
            .unwrap_err();
        assert!(matches!(err, TrackerError::MissingReference(_)));
        assert!(repo.list_user_logs(user).unwrap().is_empty());
    }

    #[test]
    fn absent_metrics_round_trip_as_none() {
        let (_tmp, repo) = repo();
        let user = repo.register_user("ana", "pw").unwrap();
        let squat = exercise(&repo, "Squats");
        let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let metrics = LogMetrics {
            sets: Some(0),
            notes: Some("felt good".into()),
            ..LogMetrics::default()
        };
        repo.log_exercise(user, squat, &metrics, day).unwrap();

        let logs = repo.list_user_logs(user).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].metrics, metrics);
        assert_eq!(logs[0].exercise_name, "Squats");
        assert_eq!(logs[0].log_date, day);
    }
}
