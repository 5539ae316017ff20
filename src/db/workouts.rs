use rusqlite::{params, Connection, Result};

use super::exercises::exercise_from_row;
use crate::models::{Exercise, WorkoutSummary};

pub fn insert_workout(conn: &Connection, user_id: i64, name: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO workouts (user_id, name) VALUES (?1, ?2)",
        params![user_id, name],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Link an exercise into a workout at the given zero-based position.
pub fn insert_workout_exercise(
    conn: &Connection,
    workout_id: i64,
    exercise_id: i64,
    sequence: i64,
) -> Result<()> {
    conn.execute(
        "INSERT INTO workout_exercises (workout_id, exercise_id, sequence) VALUES (?1, ?2, ?3)",
        params![workout_id, exercise_id, sequence],
    )?;
    Ok(())
}

/// A user's workouts in creation order.
pub fn fetch_workouts_for_user(conn: &Connection, user_id: i64) -> Result<Vec<WorkoutSummary>> {
    let mut stmt = conn.prepare("SELECT id, name FROM workouts WHERE user_id = ?1 ORDER BY id ASC")?;
    let workouts = stmt
        .query_map([user_id], |row| {
            Ok(WorkoutSummary {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;
    Ok(workouts)
}

/// The exercises composing a workout, in stored sequence order.
pub fn fetch_workout_exercises(conn: &Connection, workout_id: i64) -> Result<Vec<Exercise>> {
    let mut stmt = conn.prepare(
        "SELECT e.id, e.name, e.description, e.image_path, e.gif_path
         FROM workout_exercises we
         INNER JOIN exercises e ON we.exercise_id = e.id
         WHERE we.workout_id = ?1
         ORDER BY we.sequence ASC",
    )?;
    let exercises = stmt
        .query_map([workout_id], exercise_from_row)?
        .collect::<Result<Vec<_>>>()?;
    Ok(exercises)
}
