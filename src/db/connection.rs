use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::Result;

/// Handle to the on-disk database. It stores only the location; every
/// operation calls [`Store::connect`] and the connection is dropped when that
/// operation returns, whichever way it exits.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Open a fresh connection with `PRAGMA foreign_keys = ON`, so writes that
    /// reference missing users, exercises, or workouts are rejected.
    pub fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(conn)
    }

    /// Create the five relations if they are missing. Safe on every start.
    pub fn initialize_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(
            "BEGIN;
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL,
                description TEXT,
                image_path TEXT,
                gif_path TEXT
            );
            CREATE TABLE IF NOT EXISTS workouts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(id)
            );
            CREATE TABLE IF NOT EXISTS workout_exercises (
                workout_id INTEGER NOT NULL,
                exercise_id INTEGER NOT NULL,
                sequence INTEGER NOT NULL,
                PRIMARY KEY (workout_id, exercise_id),
                UNIQUE (workout_id, sequence),
                FOREIGN KEY (workout_id) REFERENCES workouts(id),
                FOREIGN KEY (exercise_id) REFERENCES exercises(id)
            );
            CREATE TABLE IF NOT EXISTS exercise_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                exercise_id INTEGER NOT NULL,
                log_date TEXT NOT NULL,
                sets INTEGER,
                reps INTEGER,
                weight REAL,
                duration_minutes REAL,
                calories_burned REAL,
                notes TEXT,
                FOREIGN KEY (user_id) REFERENCES users(id),
                FOREIGN KEY (exercise_id) REFERENCES exercises(id)
            );
            COMMIT;",
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(store: &Store) -> Vec<String> {
        let conn = store.connect().unwrap();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
            .unwrap();
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        names
    }

    #[test]
    fn schema_creation_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::open(tmp.path().join("schema.db"));

        store.initialize_schema().unwrap();
        store.initialize_schema().unwrap();

        assert_eq!(
            table_names(&store),
            vec![
                "exercise_logs",
                "exercises",
                "users",
                "workout_exercises",
                "workouts"
            ]
        );
    }

    #[test]
    fn connections_enforce_foreign_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::open(tmp.path().join("fk.db"));
        store.initialize_schema().unwrap();

        let conn = store.connect().unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
