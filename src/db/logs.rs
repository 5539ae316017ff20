use chrono::NaiveDate;
use rusqlite::{params, Connection, Result};

use crate::models::{LogEntry, LogMetrics};

pub fn insert_log(
    conn: &Connection,
    user_id: i64,
    exercise_id: i64,
    log_date: NaiveDate,
    metrics: &LogMetrics,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO exercise_logs
            (user_id, exercise_id, log_date, sets, reps, weight, duration_minutes, calories_burned, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            user_id,
            exercise_id,
            log_date,
            metrics.sets,
            metrics.reps,
            metrics.weight,
            metrics.duration_minutes,
            metrics.calories_burned,
            metrics.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// A user's history, newest date first. Entries sharing a date come back in
/// insertion order.
pub fn fetch_logs_for_user(conn: &Connection, user_id: i64) -> Result<Vec<LogEntry>> {
    let mut stmt = conn.prepare(
        "SELECT el.id, el.log_date, e.name, el.sets, el.reps, el.weight,
                el.duration_minutes, el.calories_burned, el.notes
         FROM exercise_logs el
         INNER JOIN exercises e ON el.exercise_id = e.id
         WHERE el.user_id = ?1
         ORDER BY el.log_date DESC, el.id ASC",
    )?;
    let logs = stmt
        .query_map([user_id], |row| {
            Ok(LogEntry {
                id: row.get(0)?,
                log_date: row.get(1)?,
                exercise_name: row.get(2)?,
                metrics: LogMetrics {
                    sets: row.get(3)?,
                    reps: row.get(4)?,
                    weight: row.get(5)?,
                    duration_minutes: row.get(6)?,
                    calories_burned: row.get(7)?,
                    notes: row.get(8)?,
                },
            })
        })?
        .collect::<Result<Vec<_>>>()?;
    Ok(logs)
}
