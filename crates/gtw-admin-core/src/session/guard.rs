//! Route guard

use super::SessionView;
use gtw_admin_types::Route;

/// What the boundary should do with a requested route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session not resolved yet; show a loading placeholder
    Placeholder,
    /// Not signed in; go to the target instead
    Redirect(Route),
    /// Show the requested route
    Render(Route),
}

/// Decide whether `route` may be shown for `view`
///
/// Public routes always render. Protected routes wait for resolution, then
/// send anonymous and non-admin callers to the login route. The requested route is not
/// remembered.
#[must_use]
pub const fn guard(view: &SessionView, route: Route) -> GuardOutcome {
    if route.is_public() {
        return GuardOutcome::Render(route);
    }
    if view.loading {
        return GuardOutcome::Placeholder;
    }
    match &view.user {
        Some(user) if user.is_admin() => GuardOutcome::Render(route),
        _ => GuardOutcome::Redirect(Route::Login),
    }
}
