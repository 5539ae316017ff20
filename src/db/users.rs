use rusqlite::{params, Connection, OptionalExtension, Result};

use crate::models::Identity;

/// Insert a user row and return its id. Fails on a duplicate username.
pub fn insert_user(conn: &Connection, username: &str, password: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO users (username, password) VALUES (?1, ?2)",
        params![username, password],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Look up the identity matching both credentials.
pub fn find_user(conn: &Connection, username: &str, password: &str) -> Result<Option<Identity>> {
    conn.query_row(
        "SELECT id, username FROM users WHERE username = ?1 AND password = ?2",
        params![username, password],
        |row| {
            Ok(Identity {
                id: row.get(0)?,
                username: row.get(1)?,
            })
        },
    )
    .optional()
}
