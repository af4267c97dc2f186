//! Current route and the reaction to expired sessions

use crate::Error;
use crate::session::SessionContext;
use gtw_admin_types::Route;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

/// What the boundary did after an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Nothing changes
    Stay,
    /// The view moved to the given route
    Redirect(Route),
}

/// Tracks the route being shown; clones share it
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Arc<RwLock<Route>>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Dashboard)
    }
}

impl Navigator {
    /// Start at `route`
    #[must_use]
    pub fn new(route: Route) -> Self {
        Self {
            current: Arc::new(RwLock::new(route)),
        }
    }

    /// Route currently shown
    #[must_use]
    pub fn current(&self) -> Route {
        *self.current.read()
    }

    /// Move to `route`
    pub fn navigate(&self, route: Route) {
        let mut current = self.current.write();
        if *current != route {
            debug!(from = %*current, to = %route, "Navigating");
            *current = route;
        }
    }

    /// React to an error returned by the gateway
    ///
    /// An expired session signs the admin out and sends the view to the login
    /// route. Every other error leaves the view where it is.
    pub fn react(&self, error: &Error, session: &SessionContext) -> Navigation {
        if !error.is_session_expired() {
            return Navigation::Stay;
        }
        warn!(route = %self.current(), "Session expired, returning to login");
        session.logout();
        self.navigate(Route::Login);
        Navigation::Redirect(Route::Login)
    }
}
