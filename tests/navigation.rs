use std::cell::RefCell;
use std::rc::Rc;

use tempfile::TempDir;

use fitness_tracker::{
    AppContext, Navigator, Repository, Screen, ScreenName, Session, Store, TrackerError,
};

type Calls = Rc<RefCell<Vec<(ScreenName, &'static str)>>>;

struct Probe {
    name: ScreenName,
    calls: Calls,
}

impl Screen for Probe {
    fn activate(&mut self) {
        self.calls.borrow_mut().push((self.name, "activate"));
    }

    fn deactivate(&mut self) {
        self.calls.borrow_mut().push((self.name, "deactivate"));
    }

    fn refresh(&mut self, _ctx: &AppContext) -> fitness_tracker::Result<()> {
        self.calls.borrow_mut().push((self.name, "refresh"));
        Ok(())
    }

    fn requires_session(&self) -> bool {
        self.name != ScreenName::Login
    }
}

fn context() -> (TempDir, AppContext) {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path().join("nav.db"));
    store.initialize_schema().unwrap();
    let repo = Repository::new(store);
    repo.register_user("ana", "pw").unwrap();
    (dir, AppContext::new(repo))
}

fn navigator(calls: &Calls) -> Navigator<Probe> {
    let mut nav = Navigator::new();
    for name in ScreenName::ALL {
        nav.register(
            name,
            Probe {
                name,
                calls: Rc::clone(calls),
            },
        );
    }
    nav
}

fn log_in(ctx: &mut AppContext) {
    let identity = ctx.repo.authenticate_user("ana", "pw").unwrap().unwrap();
    ctx.session.login(identity);
}

#[test]
fn login_to_home_runs_hooks_once_in_order() {
    let calls = Calls::default();
    let mut nav = navigator(&calls);
    let (_dir, mut ctx) = context();
    nav.start(&ctx).unwrap();
    log_in(&mut ctx);
    calls.borrow_mut().clear();

    assert_eq!(nav.transition_to("home", &ctx).unwrap(), ScreenName::Home);
    assert_eq!(
        *calls.borrow(),
        vec![
            (ScreenName::Login, "deactivate"),
            (ScreenName::Home, "refresh"),
            (ScreenName::Home, "activate"),
        ]
    );
    assert_eq!(nav.active_name(), Some(ScreenName::Home));
}

#[test]
fn unknown_target_keeps_current_screen() {
    let calls = Calls::default();
    let mut nav = navigator(&calls);
    let (_dir, mut ctx) = context();
    nav.start(&ctx).unwrap();
    log_in(&mut ctx);
    nav.transition_to("home", &ctx).unwrap();
    calls.borrow_mut().clear();

    let err = nav.transition_to("nonexistent", &ctx).unwrap_err();
    assert!(matches!(err, TrackerError::UnknownScreen(ref name) if name == "nonexistent"));
    assert_eq!(nav.active_name(), Some(ScreenName::Home));
    assert!(calls.borrow().is_empty());
}

#[test]
fn every_inner_screen_is_gated_until_login() {
    let calls = Calls::default();
    let mut nav = navigator(&calls);
    let (_dir, mut ctx) = context();
    nav.start(&ctx).unwrap();

    for name in &ScreenName::ALL[1..] {
        let err = nav.go(*name, &ctx).unwrap_err();
        assert!(matches!(err, TrackerError::SessionRequired(n) if n == *name));
        assert_eq!(nav.active_name(), Some(ScreenName::Login));
    }

    log_in(&mut ctx);
    for name in &ScreenName::ALL[1..] {
        assert_eq!(nav.go(*name, &ctx).unwrap(), *name);
    }
}

#[test]
fn logout_is_idempotent() {
    let (_dir, mut ctx) = context();
    log_in(&mut ctx);
    assert!(ctx.session.is_logged_in());

    ctx.session.logout();
    let once = ctx.session.current_user().cloned();
    ctx.session.logout();
    assert_eq!(ctx.session.current_user().cloned(), once);
    assert!(once.is_none());

    let mut fresh = Session::new();
    fresh.logout();
    assert!(!fresh.is_logged_in());
}
