//! Signed-in user and the logout confirmation

use super::Store;
use crate::reactive::{batch, Computed, Observable, ReadOnly};
use crate::types::SessionUser;

pub struct SessionStore {
    user: Observable<Option<SessionUser>>,
    logout_open: Observable<bool>,
    signed_in: Computed<bool>,
}

impl Store for SessionStore {
    const NAME: &'static str = "session";
}

impl SessionStore {
    pub fn new() -> Self {
        let user = Observable::new(None);
        let signed_in = Computed::from_observable(&user, Option::is_some);
        Self {
            user,
            logout_open: Observable::new(false),
            signed_in,
        }
    }

    /// Called once the auth collaborator has a user.
    pub fn sign_in(&self, user: SessionUser) {
        tracing::debug!(store = Self::NAME, user = %user.id, "Signed in");
        self.user.set(Some(user));
    }

    /// Forget the user and dismiss the logout confirmation.
    pub fn sign_out(&self) {
        tracing::debug!(store = Self::NAME, "Signed out");
        batch(|| {
            self.user.set(None);
            self.logout_open.set(false);
        });
    }

    pub fn open_logout(&self) {
        tracing::debug!(store = Self::NAME, "Logout confirmation opened");
        self.logout_open.set(true);
    }

    pub fn close_logout(&self) {
        tracing::debug!(store = Self::NAME, "Logout confirmation closed");
        self.logout_open.set(false);
    }

    pub fn logout_open(&self) -> ReadOnly<bool> {
        self.logout_open.read_only()
    }

    pub fn user(&self) -> ReadOnly<Option<SessionUser>> {
        self.user.read_only()
    }

    pub fn signed_in(&self) -> bool {
        self.signed_in.get()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
