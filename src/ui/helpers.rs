use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use tracing::error;

use crate::error::TrackerError;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Pick the message a user should see for a failed action. Input problems and
/// conflicts are shown verbatim; store failures are logged and replaced by
/// `fallback`.
pub(crate) fn surface_error(err: &TrackerError, fallback: &str) -> String {
    match err {
        TrackerError::Validation(_)
        | TrackerError::DuplicateUsername(_)
        | TrackerError::DuplicateExerciseName(_)
        | TrackerError::UnknownScreen(_)
        | TrackerError::SessionRequired(_) => err.to_string(),
        _ => {
            error!(error = %err, "{fallback}");
            fallback.to_string()
        }
    }
}

/// Footer hint line built from `(key, action)` pairs.
pub(crate) fn key_hints(pairs: &[(&str, &str)]) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (key, action) in pairs {
        spans.push(Span::styled(format!("[{key}]"), key_style));
        spans.push(Span::raw(format!(" {action}   ")));
    }
    Line::from(spans)
}

/// Move a list cursor by `offset`, clamped to `[0, len)`.
pub(crate) fn step_selection(selected: usize, len: usize, offset: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let max = len as isize - 1;
    (selected as isize + offset).clamp(0, max) as usize
}
