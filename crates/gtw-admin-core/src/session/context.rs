//! Process-wide session state

use super::SessionOracle;
use crate::{Error, Result};
use gtw_admin_types::{AdminUser, UserRecord};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Whether a session was found once startup resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An admin is signed in
    Authenticated(AdminUser),
    /// Nobody is signed in
    Anonymous,
}

/// Lifecycle of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Startup has not looked at storage yet
    Pending,
    /// Storage was checked; never goes back to pending
    Resolved(Resolution),
}

/// Read model handed to views and the route guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    /// Signed-in admin, if any
    pub user: Option<UserRecord>,
    /// True until startup resolution ran
    pub loading: bool,
}

impl SessionView {
    /// Whether an admin is signed in
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Shared handle on the session; clones observe the same state
#[derive(Debug, Clone)]
pub struct SessionContext {
    oracle: SessionOracle,
    state: Arc<RwLock<SessionState>>,
}

impl SessionContext {
    /// Create a context in the pending state
    #[must_use]
    pub fn new(oracle: SessionOracle) -> Self {
        Self {
            oracle,
            state: Arc::new(RwLock::new(SessionState::Pending)),
        }
    }

    /// Resolve the pending state from storage. Later calls do nothing.
    pub fn init(&self) -> SessionView {
        let mut state = self.state.write();
        if matches!(*state, SessionState::Pending) {
            let resolution = if self.oracle.is_authenticated() {
                self.oracle
                    .current_user()
                    .and_then(|user| AdminUser::try_from(user).ok())
                    .map_or(Resolution::Anonymous, Resolution::Authenticated)
            } else {
                Resolution::Anonymous
            };
            debug!(
                authenticated = matches!(resolution, Resolution::Authenticated(_)),
                "Session resolved"
            );
            *state = SessionState::Resolved(resolution);
        }
        view_of(&state)
    }

    /// Sign in `candidate`; only admins are accepted
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthorized`] for any other role, leaving the state
    /// untouched.
    pub fn login(&self, candidate: UserRecord) -> Result<AdminUser> {
        let admin = AdminUser::try_from(candidate).map_err(|rejected| {
            warn!(user_id = %rejected.id, role = %rejected.role, "Rejected non-admin login");
            Error::NotAuthorized
        })?;
        info!(user_id = %admin.record().id, "Admin signed in");
        *self.state.write() = SessionState::Resolved(Resolution::Authenticated(admin.clone()));
        Ok(admin)
    }

    /// Forget the session in storage and in memory. Safe to call repeatedly.
    pub fn logout(&self) {
        self.oracle.tokens().clear_logged();
        let mut state = self.state.write();
        if matches!(*state, SessionState::Resolved(Resolution::Authenticated(_))) {
            info!("Admin signed out");
        }
        *state = SessionState::Resolved(Resolution::Anonymous);
    }

    /// Current read model
    #[must_use]
    pub fn view(&self) -> SessionView {
        view_of(&self.state.read())
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.read().clone()
    }

    /// The oracle this context resolves from
    #[must_use]
    pub const fn oracle(&self) -> &SessionOracle {
        &self.oracle
    }
}

fn view_of(state: &SessionState) -> SessionView {
    match state {
        SessionState::Pending => SessionView {
            user: None,
            loading: true,
        },
        SessionState::Resolved(Resolution::Authenticated(admin)) => SessionView {
            user: Some(admin.record().clone()),
            loading: false,
        },
        SessionState::Resolved(Resolution::Anonymous) => SessionView {
            user: None,
            loading: false,
        },
    }
}
