use crate::repository::Repository;
use crate::session::Session;

/// Services a screen may use while refreshing or reacting to input. Owned by
/// the top-level application and lent out per call.
#[derive(Debug)]
pub struct AppContext {
    pub repo: Repository,
    pub session: Session,
}

impl AppContext {
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            session: Session::new(),
        }
    }
}
