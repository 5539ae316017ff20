//! Authentication state for the running process. The application controller
//! owns one [`Session`] and lends it to screens; nothing is global and
//! nothing is persisted, so every start begins logged out.

use tracing::info;

use crate::models::Identity;

#[derive(Debug, Default)]
pub struct Session {
    current: Option<Identity>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session with `identity`. Any previous login is overwritten.
    pub fn login(&mut self, identity: Identity) {
        info!(user_id = identity.id, username = %identity.username, "logged in");
        self.current = Some(identity);
    }

    /// Clear the session. Logging out twice is the same as once.
    pub fn logout(&mut self) {
        if let Some(previous) = self.current.take() {
            info!(user_id = previous.id, "logged out");
        }
    }

    pub fn current_user(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }
}
