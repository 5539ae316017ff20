use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::error::{Result, TrackerError};
use crate::models::{Exercise, LogMetrics};

/// Single-line text input. Masked inputs render one `*` per character.
#[derive(Default, Clone)]
pub(crate) struct TextInput {
    pub(crate) value: String,
    masked: bool,
}

impl TextInput {
    pub(crate) fn masked() -> Self {
        Self {
            value: String::new(),
            masked: true,
        }
    }

    /// Append a character. Control characters are ignored.
    pub(crate) fn push_char(&mut self, ch: char) {
        if !ch.is_control() {
            self.value.push(ch);
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    pub(crate) fn clear(&mut self) {
        self.value.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub(crate) fn display(&self) -> String {
        if self.masked {
            "*".repeat(self.len())
        } else {
            self.value.clone()
        }
    }

    /// Render `label: value`, highlighting the focused input and showing a
    /// placeholder when empty.
    pub(crate) fn build_line(&self, label: &str, placeholder: &str, focused: bool) -> Line<'static> {
        let display = if self.value.is_empty() {
            placeholder.to_string()
        } else {
            self.display()
        };

        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else if self.value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(display, style),
        ])
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum LoginField {
    #[default]
    Username,
    Password,
}

/// Username/password pair shown on the login screen.
#[derive(Clone)]
pub(crate) struct LoginForm {
    pub(crate) username: TextInput,
    pub(crate) password: TextInput,
    pub(crate) active: LoginField,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username: TextInput::default(),
            password: TextInput::masked(),
            active: LoginField::Username,
        }
    }
}

impl LoginForm {
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    fn active_input(&mut self) -> &mut TextInput {
        match self.active {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) {
        self.active_input().push_char(ch);
    }

    pub(crate) fn backspace(&mut self) {
        self.active_input().backspace();
    }

    pub(crate) fn clear(&mut self) {
        self.username.clear();
        self.password.clear();
        self.active = LoginField::Username;
    }

    /// Both fields must be filled before registering.
    pub(crate) fn parse_registration(&self) -> Result<(String, String)> {
        if self.username.value.is_empty() || self.password.value.is_empty() {
            return Err(TrackerError::validation(
                "Username and password cannot be empty.",
            ));
        }
        Ok((self.username.value.clone(), self.password.value.clone()))
    }
}

/// Inputs collected per exercise on the log screen.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum LogField {
    Sets,
    Reps,
    Weight,
    Duration,
    Calories,
    Notes,
}

impl LogField {
    pub(crate) const ALL: [LogField; 6] = [
        LogField::Sets,
        LogField::Reps,
        LogField::Weight,
        LogField::Duration,
        LogField::Calories,
        LogField::Notes,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            LogField::Sets => "Sets",
            LogField::Reps => "Reps",
            LogField::Weight => "Weight (kg)",
            LogField::Duration => "Duration (min)",
            LogField::Calories => "Calories Burned",
            LogField::Notes => "Notes",
        }
    }

    fn index(self) -> usize {
        LogField::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0)
    }
}

/// The six optional inputs for one exercise of the selected workout.
#[derive(Clone)]
pub(crate) struct ExerciseLogForm {
    pub(crate) exercise: Exercise,
    inputs: [TextInput; 6],
    pub(crate) active: LogField,
}

impl ExerciseLogForm {
    pub(crate) fn new(exercise: Exercise) -> Self {
        Self {
            exercise,
            inputs: Default::default(),
            active: LogField::Sets,
        }
    }

    pub(crate) fn input(&self, field: LogField) -> &TextInput {
        &self.inputs[field.index()]
    }

    pub(crate) fn next_field(&mut self) {
        let next = (self.active.index() + 1) % LogField::ALL.len();
        self.active = LogField::ALL[next];
    }

    pub(crate) fn previous_field(&mut self) {
        let len = LogField::ALL.len();
        let previous = (self.active.index() + len - 1) % len;
        self.active = LogField::ALL[previous];
    }

    pub(crate) fn push_char(&mut self, ch: char) {
        self.inputs[self.active.index()].push_char(ch);
    }

    pub(crate) fn backspace(&mut self) {
        self.inputs[self.active.index()].backspace();
    }

    /// Convert the raw inputs into metrics. Blank inputs become `None`; sets
    /// and reps must be whole numbers, the rest decimals.
    pub(crate) fn parse_metrics(&self) -> Result<LogMetrics> {
        let invalid = || {
            TrackerError::validation(format!(
                "Invalid numeric input for {}. Please use numbers.",
                self.exercise.name
            ))
        };

        let whole = |field: LogField| -> Result<Option<i64>> {
            let raw = self.input(field).value.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            raw.parse::<i64>().map(Some).map_err(|_| invalid())
        };
        let decimal = |field: LogField| -> Result<Option<f64>> {
            let raw = self.input(field).value.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            match raw.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(Some(value)),
                _ => Err(invalid()),
            }
        };

        let notes = self.input(LogField::Notes).value.trim();
        Ok(LogMetrics {
            sets: whole(LogField::Sets)?,
            reps: whole(LogField::Reps)?,
            weight: decimal(LogField::Weight)?,
            duration_minutes: decimal(LogField::Duration)?,
            calories_burned: decimal(LogField::Calories)?,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }

    pub(crate) fn build_lines(&self, selected: bool) -> Vec<Line<'static>> {
        LogField::ALL
            .iter()
            .map(|field| {
                let focused = selected && *field == self.active;
                self.input(*field).build_line(field.label(), "-", focused)
            })
            .collect()
    }
}
