use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::navigation::{Navigator, ScreenName};
use crate::repository::Repository;
use crate::session::Session;

use super::helpers::{centered_rect, key_hints, surface_error};
use super::screens::{build_navigator, Action, AppScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
const HEADER_HEIGHT: u16 = 3;
/// Notifications disappear on their own after this long.
pub(crate) const STATUS_TIMEOUT: Duration = Duration::from_millis(3000);

/// Holds the footer message text plus its severity.
pub(crate) struct StatusMessage {
    pub(crate) text: String,
    pub(crate) kind: StatusKind,
    shown_at: Instant,
}

impl StatusMessage {
    pub(crate) fn info<S: Into<String>>(text: S) -> Self {
        Self::new(text, StatusKind::Info)
    }

    pub(crate) fn error<S: Into<String>>(text: S) -> Self {
        Self::new(text, StatusKind::Error)
    }

    fn new<S: Into<String>>(text: S, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            shown_at: Instant::now(),
        }
    }

    fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= STATUS_TIMEOUT
    }
}

/// Severity levels shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state: services, the navigator, and transient
/// feedback shown on top of whichever screen is active.
pub struct App {
    ctx: AppContext,
    navigator: Navigator<AppScreen>,
    status: Option<StatusMessage>,
    dialog: Option<String>,
}

impl App {
    /// Build every screen and enter the login screen.
    pub fn new(repo: Repository, config: &AppConfig) -> Result<Self> {
        let mut app = Self {
            ctx: AppContext::new(repo),
            navigator: build_navigator(config),
            status: None,
            dialog: None,
        };
        app.navigator.start(&app.ctx)?;
        Ok(app)
    }

    pub fn active_screen(&self) -> Option<ScreenName> {
        self.navigator.active_name()
    }

    pub fn session(&self) -> &Session {
        &self.ctx.session
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    pub fn dialog_text(&self) -> Option<&str> {
        self.dialog.as_deref()
    }

    /// Route a key press. Returns `true` once the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        if self.dialog.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.dialog = None;
            }
            return false;
        }

        let action = match self.navigator.active_mut() {
            Some(screen) => screen.handle_key(key, &mut self.ctx),
            None => Action::Stay,
        };
        self.apply(action)
    }

    /// Expire notifications. Called once per event-loop iteration.
    pub fn tick(&mut self) {
        self.expire_status(Instant::now());
    }

    fn expire_status(&mut self, now: Instant) {
        if self.status.as_ref().is_some_and(|status| status.expired(now)) {
            self.status = None;
        }
    }

    fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Stay => {}
            Action::Notify(status) => self.status = Some(status),
            Action::Navigate { to, status } => {
                self.status = status;
                self.navigate(to);
            }
            Action::Quit => {
                info!("quit requested");
                return true;
            }
        }
        false
    }

    /// Navigation errors block with a dialog; anything a screen hit while
    /// loading its data is reported in the footer instead.
    fn navigate(&mut self, to: ScreenName) {
        match self.navigator.go(to, &self.ctx) {
            Ok(_) => {}
            Err(err) if err.is_navigation() => {
                warn!(screen = %to, error = %err, "navigation rejected");
                self.dialog = Some(err.to_string());
            }
            Err(err) => {
                let text = surface_error(&err, "Failed to load screen data.");
                self.status = Some(StatusMessage::error(text));
            }
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT.min(area.height)),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT.min(area.height)),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);
        if let Some(screen) = self.navigator.active() {
            screen.draw(frame, chunks[1]);
        }
        self.draw_footer(frame, chunks[2]);

        if let Some(message) = &self.dialog {
            self.draw_dialog(frame, area, message);
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let title = self
            .navigator
            .active()
            .map(AppScreen::title)
            .unwrap_or_default();
        let mut spans = vec![
            Span::styled(
                "Fitness Tracker",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  |  {title}")),
        ];
        if let Some(user) = self.ctx.session.current_user() {
            spans.push(Span::styled(
                format!("  |  {}", user.username),
                Style::default().fg(Color::Cyan),
            ));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM)),
            area,
        );
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = if self.dialog.is_some() {
            key_hints(&[("Enter/Esc", "Dismiss")])
        } else {
            self.navigator
                .active()
                .map(AppScreen::key_hints)
                .unwrap_or_default()
        };

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_dialog(&self, frame: &mut Frame, area: Rect, message: &str) {
        let popup_area = centered_rect(50, 25, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Error")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        let paragraph = Paragraph::new(vec![
            Line::from(message.to_string()),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to continue",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
        frame.render_widget(paragraph, popup_area);
    }
}
