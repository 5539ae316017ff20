//! Core library surface for the fitness tracker.
//!
//! Persistence, session state, and navigation live here so the terminal
//! front-end in [`ui`] and the integration tests drive the same code.
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod navigation;
pub mod repository;
pub mod seed;
pub mod session;
pub mod ui;

pub use config::AppConfig;
pub use context::AppContext;
pub use db::Store;
pub use error::{Result, TrackerError};
pub use models::{Exercise, Identity, LogEntry, LogMetrics, NewExercise, WorkoutSummary};
pub use navigation::{Navigator, Screen, ScreenName};
pub use repository::Repository;
pub use session::Session;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
