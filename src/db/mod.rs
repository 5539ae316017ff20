//! Persistence module split across logical submodules. The helpers here are
//! raw parameterized statements over a borrowed connection; they report
//! constraint violations as errors and leave business rules to the repository.

mod connection;
mod exercises;
mod logs;
mod users;
mod workouts;

use rusqlite::{ffi, Error as SqlError, ErrorCode};

pub use connection::Store;
pub use exercises::{count_exercises, fetch_exercise, fetch_exercises, insert_exercise};
pub use logs::{fetch_logs_for_user, insert_log};
pub use users::{find_user, insert_user};
pub use workouts::{
    fetch_workout_exercises, fetch_workouts_for_user, insert_workout, insert_workout_exercise,
};

/// Which constraint a failed statement tripped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Unique,
    PrimaryKey,
    ForeignKey,
    Other,
}

/// Classify a SQLite error by its extended result code. Returns `None` when
/// the error is not a constraint violation at all.
pub fn constraint_violation(err: &SqlError) -> Option<Constraint> {
    let SqlError::SqliteFailure(failure, _) = err else {
        return None;
    };
    if failure.code != ErrorCode::ConstraintViolation {
        return None;
    }
    Some(match failure.extended_code {
        ffi::SQLITE_CONSTRAINT_UNIQUE => Constraint::Unique,
        ffi::SQLITE_CONSTRAINT_PRIMARYKEY => Constraint::PrimaryKey,
        ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Constraint::ForeignKey,
        _ => Constraint::Other,
    })
}
