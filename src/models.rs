//! Domain models that mirror the SQLite schema and get passed throughout the
//! TUI. They stay plain data holders so the store, repository, and screens can
//! share them without conversion layers.

use std::fmt;

use chrono::NaiveDate;

/// The `{id, username}` pair representing an authenticated user. Credentials
/// never leave the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub username: String,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)
    }
}

/// Catalog entry. The two references are relative asset paths such as
/// `images/plank.png` and `gifs/plank.gif`.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image_ref: String,
    pub animation_ref: String,
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Input for a catalog insertion.
#[derive(Debug, Clone)]
pub struct NewExercise<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub image_ref: &'a str,
    pub animation_ref: &'a str,
}

/// Summary row for a user's saved workout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutSummary {
    pub id: i64,
    pub name: String,
}

impl fmt::Display for WorkoutSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Measurements captured for one exercise. Every field is optional and `None`
/// is stored as SQL `NULL`, never as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogMetrics {
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
    pub duration_minutes: Option<f64>,
    pub calories_burned: Option<f64>,
    pub notes: Option<String>,
}

/// One line of the progress history, joined with the exercise name.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub id: i64,
    pub log_date: NaiveDate,
    pub exercise_name: String,
    pub metrics: LogMetrics,
}

impl LogEntry {
    /// Render the entry as the indented block shown on the progress screen.
    /// Absent measurements are omitted rather than printed as zero.
    pub fn detail_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Date: {}", self.log_date.format("%Y-%m-%d")),
            format!("  Exercise: {}", self.exercise_name),
        ];
        let m = &self.metrics;
        if let Some(sets) = m.sets {
            lines.push(format!("  Sets: {sets}"));
        }
        if let Some(reps) = m.reps {
            lines.push(format!("  Reps: {reps}"));
        }
        if let Some(weight) = m.weight {
            lines.push(format!("  Weight: {weight:.1} kg"));
        }
        if let Some(duration) = m.duration_minutes {
            lines.push(format!("  Duration: {duration:.1} min"));
        }
        if let Some(calories) = m.calories_burned {
            lines.push(format!("  Calories: {calories:.1} kcal"));
        }
        if let Some(notes) = m.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            lines.push(format!("  Notes: {notes}"));
        }
        lines
    }
}
