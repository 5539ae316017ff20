use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::Result;
use crate::models::{Exercise, LogMetrics, WorkoutSummary};
use crate::navigation::{Navigator, Screen, ScreenName};

use super::app::StatusMessage;
use super::forms::{ExerciseLogForm, LoginField, LoginForm, TextInput};
use super::helpers::{key_hints, step_selection, surface_error};

/// What the application should do after a screen handled a key.
pub(crate) enum Action {
    Stay,
    Notify(StatusMessage),
    Navigate {
        to: ScreenName,
        status: Option<StatusMessage>,
    },
    Quit,
}

impl Action {
    fn info<S: Into<String>>(text: S) -> Self {
        Action::Notify(StatusMessage::info(text))
    }

    fn error<S: Into<String>>(text: S) -> Self {
        Action::Notify(StatusMessage::error(text))
    }

    fn go(to: ScreenName) -> Self {
        Action::Navigate { to, status: None }
    }

    fn go_with(to: ScreenName, status: StatusMessage) -> Self {
        Action::Navigate {
            to,
            status: Some(status),
        }
    }
}

/// F2 or Ctrl-S submits forms on every screen that has one.
fn is_submit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::F(2))
        || (key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Plain character input, ignoring chords such as Ctrl-S.
fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(ch)
        }
        _ => None,
    }
}

fn highlight_list<'a>(items: Vec<ListItem<'a>>, title: &'a str, focused: bool) -> List<'a> {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .highlight_style(Style::default().fg(Color::Yellow))
        .highlight_symbol("> ")
}

fn list_state(selected: usize, len: usize) -> ListState {
    let mut state = ListState::default();
    if len > 0 {
        state.select(Some(selected.min(len - 1)));
    }
    state
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[derive(Default)]
pub(crate) struct LoginScreen {
    form: LoginForm,
}

impl LoginScreen {
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut AppContext) -> Action {
        if let Some(ch) = typed_char(&key) {
            self.form.push_char(ch);
            return Action::Stay;
        }
        match key.code {
            KeyCode::Esc => Action::Quit,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.form.toggle_field();
                Action::Stay
            }
            KeyCode::Backspace => {
                self.form.backspace();
                Action::Stay
            }
            KeyCode::Enter => self.login(ctx),
            KeyCode::F(2) => self.register(ctx),
            _ => Action::Stay,
        }
    }

    fn login(&mut self, ctx: &mut AppContext) -> Action {
        let username = self.form.username.value.clone();
        let password = self.form.password.value.clone();
        match ctx.repo.authenticate_user(&username, &password) {
            Ok(Some(identity)) => {
                ctx.session.login(identity);
                self.form.clear();
                Action::go_with(
                    ScreenName::Home,
                    StatusMessage::info(format!("Welcome, {username}!")),
                )
            }
            Ok(None) => Action::error("Invalid username or password."),
            Err(err) => Action::error(surface_error(&err, "Login failed.")),
        }
    }

    fn register(&mut self, ctx: &mut AppContext) -> Action {
        let (username, password) = match self.form.parse_registration() {
            Ok(credentials) => credentials,
            Err(err) => return Action::error(err.to_string()),
        };
        match ctx.repo.register_user(&username, &password) {
            Ok(_) => {
                self.form.clear();
                Action::info("Registration successful! Please login.")
            }
            Err(err) => Action::error(surface_error(
                &err,
                "Registration failed. Username might exist.",
            )),
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title("Login").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::from(Span::styled(
                "Fitness Tracker",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            self.form.username.build_line(
                "Username",
                "<required>",
                self.form.active == LoginField::Username,
            ),
            self.form.password.build_line(
                "Password",
                "<required>",
                self.form.active == LoginField::Password,
            ),
        ];
        frame.render_widget(Paragraph::new(lines), inner);

        let (prefix, len, row) = match self.form.active {
            LoginField::Username => ("Username: ", self.form.username.len(), 2),
            LoginField::Password => ("Password: ", self.form.password.len(), 3),
        };
        frame.set_cursor_position((
            inner.x + prefix.len() as u16 + len as u16,
            inner.y + row,
        ));
    }

    fn key_hints(&self) -> Line<'static> {
        key_hints(&[
            ("Tab", "Switch field"),
            ("Enter", "Login"),
            ("F2", "Register"),
            ("Esc", "Quit"),
        ])
    }
}

impl Screen for LoginScreen {
    fn activate(&mut self) {}

    /// Never leave a typed password behind a hidden screen.
    fn deactivate(&mut self) {
        self.form.password.clear();
    }

    fn refresh(&mut self, _ctx: &AppContext) -> Result<()> {
        self.form.active = LoginField::Username;
        Ok(())
    }

    fn requires_session(&self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

const HOME_MENU: [(&str, Option<ScreenName>); 5] = [
    ("Browse Exercises", Some(ScreenName::ExerciseBrowser)),
    ("Create Workout", Some(ScreenName::WorkoutCreator)),
    ("Log Workout", Some(ScreenName::LogWorkout)),
    ("Track Progress", Some(ScreenName::ProgressTracking)),
    ("Logout", None),
];

pub(crate) struct HomeScreen {
    greeting: String,
    selected: usize,
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self {
            greeting: "Welcome!".to_string(),
            selected: 0,
        }
    }
}

impl HomeScreen {
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut AppContext) -> Action {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Up => {
                self.selected = step_selection(self.selected, HOME_MENU.len(), -1);
                Action::Stay
            }
            KeyCode::Down => {
                self.selected = step_selection(self.selected, HOME_MENU.len(), 1);
                Action::Stay
            }
            KeyCode::Enter => self.choose(self.selected, ctx),
            KeyCode::Char(ch @ '1'..='5') => {
                let index = ch as usize - '1' as usize;
                self.selected = index;
                self.choose(index, ctx)
            }
            _ => Action::Stay,
        }
    }

    fn choose(&mut self, index: usize, ctx: &mut AppContext) -> Action {
        match HOME_MENU.get(index) {
            Some((_, Some(target))) => Action::go(*target),
            Some((_, None)) => {
                ctx.session.logout();
                Action::go_with(
                    ScreenName::Login,
                    StatusMessage::info("Logged out successfully."),
                )
            }
            None => Action::Stay,
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let greeting = Paragraph::new(Span::styled(
            self.greeting.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(greeting, chunks[0]);

        let items: Vec<ListItem> = HOME_MENU
            .iter()
            .enumerate()
            .map(|(index, (label, _))| ListItem::new(format!("{}. {label}", index + 1)))
            .collect();
        let mut state = list_state(self.selected, HOME_MENU.len());
        frame.render_stateful_widget(highlight_list(items, "Menu", true), chunks[1], &mut state);
    }

    fn key_hints(&self) -> Line<'static> {
        key_hints(&[("↑↓", "Navigate"), ("Enter/1-5", "Open"), ("q", "Quit")])
    }
}

impl Screen for HomeScreen {
    fn activate(&mut self) {}

    fn deactivate(&mut self) {}

    fn refresh(&mut self, ctx: &AppContext) -> Result<()> {
        self.greeting = match ctx.session.current_user() {
            Some(user) => format!("Welcome, {}!", user.username),
            None => "Welcome!".to_string(),
        };
        self.selected = 0;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Exercise browser
// ---------------------------------------------------------------------------

pub(crate) struct ExerciseBrowserScreen {
    exercises: Vec<Exercise>,
    index: usize,
    config: AppConfig,
}

impl ExerciseBrowserScreen {
    pub(crate) fn new(config: &AppConfig) -> Self {
        Self {
            exercises: Vec::new(),
            index: 0,
            config: config.clone(),
        }
    }

    fn current(&self) -> Option<&Exercise> {
        self.exercises.get(self.index)
    }

    /// Step through the catalog, wrapping at both ends.
    fn cycle(&mut self, offset: isize) {
        let len = self.exercises.len() as isize;
        if len == 0 {
            return;
        }
        self.index = (self.index as isize + offset).rem_euclid(len) as usize;
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::go(ScreenName::Home),
            KeyCode::Left | KeyCode::Char('p') => {
                self.cycle(-1);
                Action::Stay
            }
            KeyCode::Right | KeyCode::Char('n') => {
                self.cycle(1);
                Action::Stay
            }
            _ => Action::Stay,
        }
    }

    fn asset_line(&self, label: &str, reference: &str) -> Line<'static> {
        let (state, style) = if reference.is_empty() {
            ("none".to_string(), Style::default().fg(Color::DarkGray))
        } else if self.config.asset_path(reference).exists() {
            (reference.to_string(), Style::default().fg(Color::Green))
        } else {
            (
                format!("{reference} (not found)"),
                Style::default().fg(Color::DarkGray),
            )
        };
        Line::from(vec![Span::raw(format!("{label}: ")), Span::styled(state, style)])
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Exercise Browser")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(exercise) = self.current() else {
            frame.render_widget(
                Paragraph::new("No exercises found.").alignment(Alignment::Center),
                inner,
            );
            return;
        };

        let lines = vec![
            Line::from(Span::styled(
                exercise.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{} of {}", self.index + 1, self.exercises.len()),
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            Line::from(exercise.description.clone()),
            Line::from(""),
            self.asset_line("Image", &exercise.image_ref),
            self.asset_line("Animation", &exercise.animation_ref),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            inner,
        );
    }

    fn key_hints(&self) -> Line<'static> {
        key_hints(&[("←", "Previous"), ("→", "Next"), ("Esc", "Home")])
    }
}

impl Screen for ExerciseBrowserScreen {
    fn activate(&mut self) {}

    // Assets are listed, not animated, so there is no timer to cancel.
    fn deactivate(&mut self) {}

    fn refresh(&mut self, ctx: &AppContext) -> Result<()> {
        self.exercises = ctx.repo.list_exercises()?;
        self.index = 0;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Workout creator
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, PartialEq, Eq)]
enum CreatorFocus {
    Name,
    Available,
    Pending,
}

pub(crate) struct WorkoutCreatorScreen {
    name: TextInput,
    catalog: Vec<Exercise>,
    pending: Vec<Exercise>,
    focus: CreatorFocus,
    available_selected: usize,
    pending_selected: usize,
}

impl Default for WorkoutCreatorScreen {
    fn default() -> Self {
        Self {
            name: TextInput::default(),
            catalog: Vec::new(),
            pending: Vec::new(),
            focus: CreatorFocus::Name,
            available_selected: 0,
            pending_selected: 0,
        }
    }
}

impl WorkoutCreatorScreen {
    /// Catalog entries not yet in the pending list, in catalog order.
    fn available(&self) -> Vec<&Exercise> {
        self.catalog
            .iter()
            .filter(|exercise| !self.pending.iter().any(|p| p.id == exercise.id))
            .collect()
    }

    fn add_selected(&mut self) {
        let chosen = self.available().get(self.available_selected).map(|e| (*e).clone());
        if let Some(exercise) = chosen {
            self.pending.push(exercise);
            let remaining = self.available().len();
            self.available_selected = step_selection(self.available_selected, remaining, 0);
        }
    }

    fn remove_selected(&mut self) {
        if self.pending_selected < self.pending.len() {
            self.pending.remove(self.pending_selected);
            self.pending_selected = step_selection(self.pending_selected, self.pending.len(), 0);
        }
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut AppContext) -> Action {
        if is_submit(&key) {
            return self.save(ctx);
        }
        match key.code {
            KeyCode::Esc => return Action::go(ScreenName::Home),
            KeyCode::Tab => {
                self.focus = match self.focus {
                    CreatorFocus::Name => CreatorFocus::Available,
                    CreatorFocus::Available => CreatorFocus::Pending,
                    CreatorFocus::Pending => CreatorFocus::Name,
                };
                return Action::Stay;
            }
            KeyCode::BackTab => {
                self.focus = match self.focus {
                    CreatorFocus::Name => CreatorFocus::Pending,
                    CreatorFocus::Available => CreatorFocus::Name,
                    CreatorFocus::Pending => CreatorFocus::Available,
                };
                return Action::Stay;
            }
            _ => {}
        }

        match self.focus {
            CreatorFocus::Name => {
                if let Some(ch) = typed_char(&key) {
                    self.name.push_char(ch);
                } else if key.code == KeyCode::Backspace {
                    self.name.backspace();
                }
            }
            CreatorFocus::Available => {
                let len = self.available().len();
                match key.code {
                    KeyCode::Up => {
                        self.available_selected = step_selection(self.available_selected, len, -1)
                    }
                    KeyCode::Down => {
                        self.available_selected = step_selection(self.available_selected, len, 1)
                    }
                    KeyCode::Enter | KeyCode::Right => self.add_selected(),
                    _ => {}
                }
            }
            CreatorFocus::Pending => {
                let len = self.pending.len();
                match key.code {
                    KeyCode::Up => {
                        self.pending_selected = step_selection(self.pending_selected, len, -1)
                    }
                    KeyCode::Down => {
                        self.pending_selected = step_selection(self.pending_selected, len, 1)
                    }
                    KeyCode::Enter | KeyCode::Left | KeyCode::Delete | KeyCode::Backspace => {
                        self.remove_selected()
                    }
                    _ => {}
                }
            }
        }
        Action::Stay
    }

    fn save(&mut self, ctx: &mut AppContext) -> Action {
        let Some(user_id) = ctx.session.current_user().map(|user| user.id) else {
            return Action::error("Please log in to save a workout.");
        };
        let name = self.name.value.trim().to_string();
        let exercise_ids: Vec<i64> = self.pending.iter().map(|exercise| exercise.id).collect();

        match ctx.repo.create_workout(user_id, &name, &exercise_ids) {
            Ok(_) => Action::go_with(
                ScreenName::Home,
                StatusMessage::info(format!("Workout '{name}' saved successfully!")),
            ),
            Err(err) => Action::error(surface_error(&err, "Failed to save workout.")),
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let name_focused = self.focus == CreatorFocus::Name;
        let name_block = Block::default()
            .title("Create New Workout")
            .borders(Borders::ALL);
        let name_inner = name_block.inner(rows[0]);
        frame.render_widget(
            Paragraph::new(self.name.build_line("Workout Name", "<required>", name_focused))
                .block(name_block),
            rows[0],
        );
        if name_focused {
            frame.set_cursor_position((
                name_inner.x + "Workout Name: ".len() as u16 + self.name.len() as u16,
                name_inner.y,
            ));
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        let available = self.available();
        let items: Vec<ListItem> = available
            .iter()
            .map(|exercise| ListItem::new(exercise.name.clone()))
            .collect();
        let mut state = list_state(self.available_selected, available.len());
        frame.render_stateful_widget(
            highlight_list(
                items,
                "Available Exercises",
                self.focus == CreatorFocus::Available,
            ),
            columns[0],
            &mut state,
        );

        let items: Vec<ListItem> = self
            .pending
            .iter()
            .enumerate()
            .map(|(position, exercise)| ListItem::new(format!("{}. {}", position + 1, exercise.name)))
            .collect();
        let mut state = list_state(self.pending_selected, self.pending.len());
        frame.render_stateful_widget(
            highlight_list(
                items,
                "Workout Exercises",
                self.focus == CreatorFocus::Pending,
            ),
            columns[1],
            &mut state,
        );
    }

    fn key_hints(&self) -> Line<'static> {
        key_hints(&[
            ("Tab", "Switch panel"),
            ("Enter", "Add/Remove"),
            ("F2", "Save"),
            ("Esc", "Home"),
        ])
    }
}

impl Screen for WorkoutCreatorScreen {
    fn activate(&mut self) {}

    fn deactivate(&mut self) {}

    fn refresh(&mut self, ctx: &AppContext) -> Result<()> {
        self.name.clear();
        self.pending.clear();
        self.focus = CreatorFocus::Name;
        self.available_selected = 0;
        self.pending_selected = 0;
        self.catalog = ctx.repo.list_exercises()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Log workout
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, PartialEq, Eq)]
enum LogFocus {
    Workouts,
    Entries,
}

pub(crate) struct LogWorkoutScreen {
    workouts: Vec<WorkoutSummary>,
    workout_selected: usize,
    forms: Vec<ExerciseLogForm>,
    form_selected: usize,
    focus: LogFocus,
}

impl Default for LogWorkoutScreen {
    fn default() -> Self {
        Self {
            workouts: Vec::new(),
            workout_selected: 0,
            forms: Vec::new(),
            form_selected: 0,
            focus: LogFocus::Workouts,
        }
    }
}

impl LogWorkoutScreen {
    fn clear_entries(&mut self) {
        self.forms.clear();
        self.form_selected = 0;
        self.focus = LogFocus::Workouts;
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut AppContext) -> Action {
        if is_submit(&key) {
            return self.submit(ctx);
        }
        match self.focus {
            LogFocus::Workouts => match key.code {
                KeyCode::Esc => Action::go(ScreenName::Home),
                KeyCode::Up => {
                    self.workout_selected =
                        step_selection(self.workout_selected, self.workouts.len(), -1);
                    Action::Stay
                }
                KeyCode::Down => {
                    self.workout_selected =
                        step_selection(self.workout_selected, self.workouts.len(), 1);
                    Action::Stay
                }
                KeyCode::Enter => self.open_selected(ctx),
                _ => Action::Stay,
            },
            LogFocus::Entries => {
                if let Some(ch) = typed_char(&key) {
                    if let Some(form) = self.forms.get_mut(self.form_selected) {
                        form.push_char(ch);
                    }
                    return Action::Stay;
                }
                match key.code {
                    KeyCode::Esc => self.focus = LogFocus::Workouts,
                    KeyCode::Up => {
                        self.form_selected = step_selection(self.form_selected, self.forms.len(), -1)
                    }
                    KeyCode::Down => {
                        self.form_selected = step_selection(self.form_selected, self.forms.len(), 1)
                    }
                    KeyCode::Tab => {
                        if let Some(form) = self.forms.get_mut(self.form_selected) {
                            form.next_field();
                        }
                    }
                    KeyCode::BackTab => {
                        if let Some(form) = self.forms.get_mut(self.form_selected) {
                            form.previous_field();
                        }
                    }
                    KeyCode::Backspace => {
                        if let Some(form) = self.forms.get_mut(self.form_selected) {
                            form.backspace();
                        }
                    }
                    _ => {}
                }
                Action::Stay
            }
        }
    }

    fn open_selected(&mut self, ctx: &AppContext) -> Action {
        let Some(workout) = self.workouts.get(self.workout_selected) else {
            return Action::error("No workouts created yet.");
        };
        match ctx.repo.get_workout_exercises(workout.id) {
            Ok(exercises) if exercises.is_empty() => {
                self.clear_entries();
                Action::error("This workout has no exercises.")
            }
            Ok(exercises) => {
                self.forms = exercises.into_iter().map(ExerciseLogForm::new).collect();
                self.form_selected = 0;
                self.focus = LogFocus::Entries;
                Action::Stay
            }
            Err(err) => Action::error(surface_error(&err, "Failed to load workout.")),
        }
    }

    /// Validate every entry first so a typo never leaves a half-logged
    /// workout, then record one log row per exercise for today.
    fn submit(&mut self, ctx: &mut AppContext) -> Action {
        let Some(user_id) = ctx.session.current_user().map(|user| user.id) else {
            return Action::error("Please log in to submit a workout.");
        };
        if self.forms.is_empty() {
            return Action::error("Select a workout to log exercises.");
        }

        let mut parsed: Vec<(&Exercise, LogMetrics)> = Vec::with_capacity(self.forms.len());
        for form in &self.forms {
            match form.parse_metrics() {
                Ok(metrics) => parsed.push((&form.exercise, metrics)),
                Err(err) => return Action::error(err.to_string()),
            }
        }

        let today = Local::now().date_naive();
        for (exercise, metrics) in &parsed {
            if let Err(err) = ctx.repo.log_exercise(user_id, exercise.id, metrics, today) {
                return Action::error(surface_error(
                    &err,
                    &format!("Failed to log exercise: {}", exercise.name),
                ));
            }
        }

        Action::go_with(
            ScreenName::Home,
            StatusMessage::info("Workout logged successfully!"),
        )
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(0)])
            .split(area);

        let workouts_focused = self.focus == LogFocus::Workouts;
        if self.workouts.is_empty() {
            frame.render_widget(
                Paragraph::new("No workouts created yet.").block(
                    Block::default()
                        .title("Select a Workout")
                        .borders(Borders::ALL),
                ),
                rows[0],
            );
        } else {
            let items: Vec<ListItem> = self
                .workouts
                .iter()
                .map(|workout| ListItem::new(workout.name.clone()))
                .collect();
            let mut state = list_state(self.workout_selected, self.workouts.len());
            frame.render_stateful_widget(
                highlight_list(items, "Select a Workout", workouts_focused),
                rows[0],
                &mut state,
            );
        }

        if self.forms.is_empty() {
            frame.render_widget(
                Paragraph::new("Select a workout to log exercises.")
                    .block(Block::default().title("Log").borders(Borders::ALL)),
                rows[1],
            );
            return;
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(rows[1]);

        let items: Vec<ListItem> = self
            .forms
            .iter()
            .map(|form| ListItem::new(form.exercise.name.clone()))
            .collect();
        let mut state = list_state(self.form_selected, self.forms.len());
        frame.render_stateful_widget(
            highlight_list(items, "Exercises", !workouts_focused),
            columns[0],
            &mut state,
        );

        if let Some(form) = self.forms.get(self.form_selected) {
            let title = form.exercise.name.clone();
            let paragraph = Paragraph::new(form.build_lines(!workouts_focused))
                .block(Block::default().title(title).borders(Borders::ALL));
            frame.render_widget(paragraph, columns[1]);
        }
    }

    fn key_hints(&self) -> Line<'static> {
        match self.focus {
            LogFocus::Workouts => key_hints(&[
                ("↑↓", "Choose workout"),
                ("Enter", "Open"),
                ("Esc", "Home"),
            ]),
            LogFocus::Entries => key_hints(&[
                ("↑↓", "Exercise"),
                ("Tab", "Field"),
                ("F2", "Submit"),
                ("Esc", "Workouts"),
            ]),
        }
    }
}

impl Screen for LogWorkoutScreen {
    fn activate(&mut self) {}

    /// Unsubmitted entries are discarded when leaving the screen.
    fn deactivate(&mut self) {
        self.clear_entries();
    }

    fn refresh(&mut self, ctx: &AppContext) -> Result<()> {
        self.clear_entries();
        self.workout_selected = 0;
        self.workouts = match ctx.session.current_user() {
            Some(user) => ctx.repo.list_user_workouts(user.id)?,
            None => Vec::new(),
        };
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Progress tracking
// ---------------------------------------------------------------------------

#[derive(Default)]
pub(crate) struct ProgressScreen {
    lines: Vec<String>,
    scroll: u16,
}

impl ProgressScreen {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        let max = u16::try_from(self.lines.len().saturating_sub(1)).unwrap_or(u16::MAX);
        match key.code {
            KeyCode::Esc => return Action::go(ScreenName::Home),
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1).min(max),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10).min(max),
            KeyCode::Home => self.scroll = 0,
            _ => {}
        }
        Action::Stay
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self.lines.iter().map(|l| Line::from(l.clone())).collect();
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Your Progress").borders(Borders::ALL))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn key_hints(&self) -> Line<'static> {
        key_hints(&[("↑↓/PgUp/PgDn", "Scroll"), ("Esc", "Home")])
    }
}

impl Screen for ProgressScreen {
    fn activate(&mut self) {}

    fn deactivate(&mut self) {}

    fn refresh(&mut self, ctx: &AppContext) -> Result<()> {
        self.scroll = 0;
        self.lines.clear();

        let Some(user) = ctx.session.current_user() else {
            self.lines
                .push("Please log in to view your progress.".to_string());
            return Ok(());
        };

        let logs = ctx.repo.list_user_logs(user.id)?;
        if logs.is_empty() {
            self.lines
                .push("No exercise logs found yet. Start logging your workouts!".to_string());
            return Ok(());
        }

        self.lines.push("--- Your Exercise Log ---".to_string());
        self.lines.push(String::new());
        for entry in &logs {
            self.lines.extend(entry.detail_lines());
            self.lines.push("------------------------".to_string());
            self.lines.push(String::new());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Every screen the application can show, dispatched by variant.
pub(crate) enum AppScreen {
    Login(LoginScreen),
    Home(HomeScreen),
    ExerciseBrowser(ExerciseBrowserScreen),
    WorkoutCreator(WorkoutCreatorScreen),
    LogWorkout(LogWorkoutScreen),
    Progress(ProgressScreen),
}

macro_rules! on_screen {
    ($value:expr, $screen:ident => $body:expr) => {
        match $value {
            AppScreen::Login($screen) => $body,
            AppScreen::Home($screen) => $body,
            AppScreen::ExerciseBrowser($screen) => $body,
            AppScreen::WorkoutCreator($screen) => $body,
            AppScreen::LogWorkout($screen) => $body,
            AppScreen::Progress($screen) => $body,
        }
    };
}

impl AppScreen {
    pub(crate) fn title(&self) -> &'static str {
        match self {
            AppScreen::Login(_) => "Login",
            AppScreen::Home(_) => "Home",
            AppScreen::ExerciseBrowser(_) => "Exercise Browser",
            AppScreen::WorkoutCreator(_) => "Create Workout",
            AppScreen::LogWorkout(_) => "Log Workout",
            AppScreen::Progress(_) => "Track Progress",
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent, ctx: &mut AppContext) -> Action {
        match self {
            AppScreen::Login(screen) => screen.handle_key(key, ctx),
            AppScreen::Home(screen) => screen.handle_key(key, ctx),
            AppScreen::ExerciseBrowser(screen) => screen.handle_key(key),
            AppScreen::WorkoutCreator(screen) => screen.handle_key(key, ctx),
            AppScreen::LogWorkout(screen) => screen.handle_key(key, ctx),
            AppScreen::Progress(screen) => screen.handle_key(key),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame, area: Rect) {
        on_screen!(self, screen => screen.draw(frame, area))
    }

    pub(crate) fn key_hints(&self) -> Line<'static> {
        on_screen!(self, screen => screen.key_hints())
    }
}

impl Screen for AppScreen {
    fn activate(&mut self) {
        on_screen!(self, screen => screen.activate())
    }

    fn deactivate(&mut self) {
        on_screen!(self, screen => screen.deactivate())
    }

    fn refresh(&mut self, ctx: &AppContext) -> Result<()> {
        on_screen!(self, screen => screen.refresh(ctx))
    }

    fn requires_session(&self) -> bool {
        on_screen!(self, screen => screen.requires_session())
    }
}

/// Wire every screen into a navigator under its name.
pub(crate) fn build_navigator(config: &AppConfig) -> Navigator<AppScreen> {
    Navigator::new()
        .with_screen(ScreenName::Login, AppScreen::Login(LoginScreen::default()))
        .with_screen(ScreenName::Home, AppScreen::Home(HomeScreen::default()))
        .with_screen(
            ScreenName::ExerciseBrowser,
            AppScreen::ExerciseBrowser(ExerciseBrowserScreen::new(config)),
        )
        .with_screen(
            ScreenName::WorkoutCreator,
            AppScreen::WorkoutCreator(WorkoutCreatorScreen::default()),
        )
        .with_screen(
            ScreenName::LogWorkout,
            AppScreen::LogWorkout(LogWorkoutScreen::default()),
        )
        .with_screen(
            ScreenName::ProgressTracking,
            AppScreen::Progress(ProgressScreen::default()),
        )
}
