//! Ratatui front-end. Screens own their widgets and input handling; the
//! [`App`] routes keys to whichever screen the navigator has active and
//! renders notifications around it.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
