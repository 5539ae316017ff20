use rusqlite::{params, Connection, OptionalExtension, Result, Row};

use crate::models::{Exercise, NewExercise};

const EXERCISE_COLUMNS: &str = "id, name, description, image_path, gif_path";

/// Map a row selected with [`EXERCISE_COLUMNS`]. The three descriptive
/// columns are nullable in the schema, so absent values read as empty text.
pub(super) fn exercise_from_row(row: &Row<'_>) -> Result<Exercise> {
    Ok(Exercise {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        image_ref: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        animation_ref: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}

/// Insert a catalog entry and return its id. Fails on a duplicate name.
pub fn insert_exercise(conn: &Connection, exercise: &NewExercise<'_>) -> Result<i64> {
    conn.execute(
        "INSERT INTO exercises (name, description, image_path, gif_path) VALUES (?1, ?2, ?3, ?4)",
        params![
            exercise.name,
            exercise.description,
            exercise.image_ref,
            exercise.animation_ref
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Every catalog entry sorted by name.
pub fn fetch_exercises(conn: &Connection) -> Result<Vec<Exercise>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {EXERCISE_COLUMNS} FROM exercises ORDER BY name ASC"
    ))?;
    let exercises = stmt
        .query_map([], exercise_from_row)?
        .collect::<Result<Vec<_>>>()?;
    Ok(exercises)
}

pub fn fetch_exercise(conn: &Connection, id: i64) -> Result<Option<Exercise>> {
    conn.query_row(
        &format!("SELECT {EXERCISE_COLUMNS} FROM exercises WHERE id = ?1"),
        [id],
        exercise_from_row,
    )
    .optional()
}

pub fn count_exercises(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM exercises", [], |row| row.get(0))
}
