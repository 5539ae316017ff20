//! Single-active-screen state machine. Transitions are absolute jumps between
//! a fixed set of named screens; there is no history stack, so "back" is just
//! another explicit target.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::context::AppContext;
use crate::error::{Result, TrackerError};

/// High-level navigation states known at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenName {
    Login,
    Home,
    ExerciseBrowser,
    WorkoutCreator,
    LogWorkout,
    ProgressTracking,
}

impl ScreenName {
    pub const ALL: [ScreenName; 6] = [
        ScreenName::Login,
        ScreenName::Home,
        ScreenName::ExerciseBrowser,
        ScreenName::WorkoutCreator,
        ScreenName::LogWorkout,
        ScreenName::ProgressTracking,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScreenName::Login => "login",
            ScreenName::Home => "home",
            ScreenName::ExerciseBrowser => "exercise_browser",
            ScreenName::WorkoutCreator => "workout_creator",
            ScreenName::LogWorkout => "log_workout",
            ScreenName::ProgressTracking => "progress_tracking",
        }
    }
}

impl fmt::Display for ScreenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenName {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        ScreenName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| TrackerError::UnknownScreen(s.to_string()))
    }
}

/// Lifecycle hooks every screen exposes to the navigator.
pub trait Screen {
    /// Attach to the display and start receiving input.
    fn activate(&mut self);

    /// Detach from the display. Screens owning timers or other per-frame
    /// resources must cancel them here.
    fn deactivate(&mut self);

    /// Re-pull data from the repository and session. Called exactly once per
    /// transition, right before [`Screen::activate`].
    fn refresh(&mut self, ctx: &AppContext) -> Result<()>;

    /// Whether a logged-in session is needed to open this screen.
    fn requires_session(&self) -> bool {
        true
    }
}

pub struct Navigator<S> {
    screens: HashMap<ScreenName, S>,
    active: Option<ScreenName>,
}

impl<S: Screen> Default for Navigator<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Screen> Navigator<S> {
    /// Screen shown when the application starts.
    pub const INITIAL: ScreenName = ScreenName::Login;

    pub fn new() -> Self {
        Self {
            screens: HashMap::new(),
            active: None,
        }
    }

    pub fn register(&mut self, name: ScreenName, screen: S) {
        self.screens.insert(name, screen);
    }

    pub fn with_screen(mut self, name: ScreenName, screen: S) -> Self {
        self.register(name, screen);
        self
    }

    /// Enter the initial screen.
    pub fn start(&mut self, ctx: &AppContext) -> Result<ScreenName> {
        self.go(Self::INITIAL, ctx)
    }

    pub fn active_name(&self) -> Option<ScreenName> {
        self.active
    }

    pub fn active(&self) -> Option<&S> {
        self.active.and_then(|name| self.screens.get(&name))
    }

    pub fn active_mut(&mut self) -> Option<&mut S> {
        let name = self.active?;
        self.screens.get_mut(&name)
    }

    pub fn screen(&self, name: ScreenName) -> Option<&S> {
        self.screens.get(&name)
    }

    /// Jump to the screen registered under `target`.
    ///
    /// Unknown names fail with [`TrackerError::UnknownScreen`] and a target
    /// that needs a login fails with [`TrackerError::SessionRequired`] while
    /// logged out; in both cases the current screen stays active untouched.
    /// Otherwise the current screen is deactivated, the target is refreshed
    /// and then activated. A failed refresh still activates the target and the
    /// error is returned for the caller to report.
    pub fn transition_to(&mut self, target: &str, ctx: &AppContext) -> Result<ScreenName> {
        let name = target.parse::<ScreenName>()?;
        self.go(name, ctx)
    }

    pub fn go(&mut self, name: ScreenName, ctx: &AppContext) -> Result<ScreenName> {
        let Some(target) = self.screens.get(&name) else {
            warn!(screen = %name, "no screen registered");
            return Err(TrackerError::UnknownScreen(name.to_string()));
        };
        if target.requires_session() && !ctx.session.is_logged_in() {
            warn!(screen = %name, "blocked transition without session");
            return Err(TrackerError::SessionRequired(name));
        }

        if let Some(current) = self.active.take() {
            if let Some(screen) = self.screens.get_mut(&current) {
                screen.deactivate();
            }
        }

        let refreshed = match self.screens.get_mut(&name) {
            Some(screen) => {
                let refreshed = screen.refresh(ctx);
                screen.activate();
                refreshed
            }
            None => return Err(TrackerError::UnknownScreen(name.to_string())),
        };
        self.active = Some(name);
        debug!(screen = %name, "screen active");

        refreshed.map(|()| name)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::db::Store;
    use crate::models::Identity;
    use crate::repository::Repository;

    type Journal = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        name: &'static str,
        journal: Journal,
        gated: bool,
        fail_refresh: bool,
        active: bool,
    }

    impl Recorder {
        fn new(name: &'static str, journal: &Journal) -> Self {
            Self {
                name,
                journal: Rc::clone(journal),
                gated: name != "login",
                fail_refresh: false,
                active: false,
            }
        }
    }

    impl Screen for Recorder {
        fn activate(&mut self) {
            self.active = true;
            self.journal.borrow_mut().push(format!("{}:activate", self.name));
        }

        fn deactivate(&mut self) {
            self.active = false;
            self.journal.borrow_mut().push(format!("{}:deactivate", self.name));
        }

        fn refresh(&mut self, _ctx: &AppContext) -> Result<()> {
            self.journal.borrow_mut().push(format!("{}:refresh", self.name));
            if self.fail_refresh {
                return Err(TrackerError::validation("boom"));
            }
            Ok(())
        }

        fn requires_session(&self) -> bool {
            self.gated
        }
    }

    fn logged_in_ctx() -> AppContext {
        let mut ctx = AppContext::new(Repository::new(Store::open("unused.db")));
        ctx.session.login(Identity {
            id: 1,
            username: "ana".into(),
        });
        ctx
    }

    fn navigator(journal: &Journal) -> Navigator<Recorder> {
        Navigator::new()
            .with_screen(ScreenName::Login, Recorder::new("login", journal))
            .with_screen(ScreenName::Home, Recorder::new("home", journal))
    }

    #[test]
    fn names_round_trip_through_strings() {
        for name in ScreenName::ALL {
            assert_eq!(name.as_str().parse::<ScreenName>().unwrap(), name);
        }
        assert!(matches!(
            "settings".parse::<ScreenName>(),
            Err(TrackerError::UnknownScreen(ref s)) if s == "settings"
        ));
    }

    #[test]
    fn start_opens_login_without_session() {
        let journal = Journal::default();
        let mut nav = navigator(&journal);
        let ctx = AppContext::new(Repository::new(Store::open("unused.db")));

        assert_eq!(nav.start(&ctx).unwrap(), ScreenName::Login);
        assert_eq!(nav.active_name(), Some(ScreenName::Login));
        assert_eq!(*journal.borrow(), vec!["login:refresh", "login:activate"]);
    }

    #[test]
    fn transition_deactivates_then_refreshes_then_activates() {
        let journal = Journal::default();
        let mut nav = navigator(&journal);
        let ctx = logged_in_ctx();
        nav.start(&ctx).unwrap();
        journal.borrow_mut().clear();

        nav.transition_to("home", &ctx).unwrap();

        assert_eq!(
            *journal.borrow(),
            vec!["login:deactivate", "home:refresh", "home:activate"]
        );
        assert!(nav.active().unwrap().active);
        assert!(!nav.screen(ScreenName::Login).unwrap().active);
    }

    #[test]
    fn unknown_screen_leaves_current_active() {
        let journal = Journal::default();
        let mut nav = navigator(&journal);
        let ctx = logged_in_ctx();
        nav.start(&ctx).unwrap();
        journal.borrow_mut().clear();

        let err = nav.transition_to("nonexistent", &ctx).unwrap_err();
        assert!(matches!(err, TrackerError::UnknownScreen(_)));

        // Known name but never registered.
        let err = nav.transition_to("progress_tracking", &ctx).unwrap_err();
        assert!(matches!(err, TrackerError::UnknownScreen(_)));

        assert_eq!(nav.active_name(), Some(ScreenName::Login));
        assert!(nav.active().unwrap().active);
        assert!(journal.borrow().is_empty());
    }

    #[test]
    fn gated_screen_requires_login() {
        let journal = Journal::default();
        let mut nav = navigator(&journal);
        let ctx = AppContext::new(Repository::new(Store::open("unused.db")));
        nav.start(&ctx).unwrap();
        journal.borrow_mut().clear();

        let err = nav.go(ScreenName::Home, &ctx).unwrap_err();
        assert!(matches!(err, TrackerError::SessionRequired(ScreenName::Home)));
        assert_eq!(nav.active_name(), Some(ScreenName::Login));
        assert!(journal.borrow().is_empty());
    }

    #[test]
    fn failed_refresh_still_activates_target() {
        let journal = Journal::default();
        let mut home = Recorder::new("home", &journal);
        home.fail_refresh = true;
        let mut nav = Navigator::new()
            .with_screen(ScreenName::Login, Recorder::new("login", &journal))
            .with_screen(ScreenName::Home, home);
        let ctx = logged_in_ctx();
        nav.start(&ctx).unwrap();

        assert!(nav.go(ScreenName::Home, &ctx).is_err());
        assert_eq!(nav.active_name(), Some(ScreenName::Home));
        assert!(nav.active().unwrap().active);
    }
}
