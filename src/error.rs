//! Error taxonomy shared by the store, repository, and navigation layers.
//!
//! Every core operation reports failure through [`TrackerError`]. The terminal
//! front-end converts these into footer notifications (or a modal dialog for
//! navigation defects), so nothing here ever needs to panic.

use thiserror::Error;

use crate::navigation::ScreenName;

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, TrackerError>;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// Input rejected before any write happened.
    #[error("{0}")]
    Validation(String),

    #[error("Username '{0}' is already taken.")]
    DuplicateUsername(String),

    #[error("An exercise named '{0}' already exists.")]
    DuplicateExerciseName(String),

    /// A foreign key pointed at a row that does not exist.
    #[error("{0} does not exist.")]
    MissingReference(String),

    #[error("database operation failed: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("filesystem operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Screen '{0}' not found.")]
    UnknownScreen(String),

    #[error("Please log in to open {0}.")]
    SessionRequired(ScreenName),
}

impl TrackerError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        TrackerError::Validation(message.into())
    }

    /// Unique-key collisions the user can resolve by picking another value.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            TrackerError::DuplicateUsername(_) | TrackerError::DuplicateExerciseName(_)
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, TrackerError::Validation(_))
    }

    /// Navigation failures point at a wiring defect rather than bad input.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            TrackerError::UnknownScreen(_) | TrackerError::SessionRequired(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_variants_are_flagged() {
        assert!(TrackerError::DuplicateUsername("ana".into()).is_conflict());
        assert!(TrackerError::DuplicateExerciseName("Plank".into()).is_conflict());
        assert!(!TrackerError::validation("empty").is_conflict());
    }

    #[test]
    fn messages_are_user_facing() {
        let err = TrackerError::DuplicateUsername("ana".into());
        assert_eq!(err.to_string(), "Username 'ana' is already taken.");

        let err = TrackerError::UnknownScreen("settings".into());
        assert_eq!(err.to_string(), "Screen 'settings' not found.");
        assert!(err.is_navigation());
    }
}
