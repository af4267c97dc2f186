//! Route table of the console

use std::fmt;

/// Every view the console can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Sign-in view
    Login,
    /// Three-step password reset
    ForgotPassword,
    /// Counts and recent activity
    Dashboard,
    /// Get-started form submissions
    GetStartedForms,
    /// Join-team applications
    JoinTeam,
    /// Agency partnership requests
    AgencyPartnership,
    /// Newsletter subscriptions
    Subscriptions,
    /// Framework PDF download requests
    FrameworkPdf,
    /// Case study editor
    CaseStudies,
    /// Success story editor
    SuccessStories,
}

impl Route {
    /// All routes, public ones first
    pub const ALL: [Self; 10] = [
        Self::Login,
        Self::ForgotPassword,
        Self::Dashboard,
        Self::GetStartedForms,
        Self::JoinTeam,
        Self::AgencyPartnership,
        Self::Subscriptions,
        Self::FrameworkPdf,
        Self::CaseStudies,
        Self::SuccessStories,
    ];

    /// Path of the route
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::ForgotPassword => "/forgot-password",
            Self::Dashboard => "/",
            Self::GetStartedForms => "/get-started-forms",
            Self::JoinTeam => "/join-team",
            Self::AgencyPartnership => "/agency-partnership",
            Self::Subscriptions => "/subscriptions",
            Self::FrameworkPdf => "/framework-pdf",
            Self::CaseStudies => "/case-studies",
            Self::SuccessStories => "/success-stories",
        }
    }

    /// Resolve a path. Unknown paths fall into the protected catch-all,
    /// which lands on the dashboard.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        let normalized = if trimmed.len() > 1 { trimmed.trim_end_matches('/') } else { trimmed };
        Self::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
            .unwrap_or(Self::Dashboard)
    }

    /// Reachable without a session
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Login | Self::ForgotPassword)
    }

    /// Heading shown for the view
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Login => "GTW Admin Login",
            Self::ForgotPassword => "Reset Password",
            Self::Dashboard => "GTW Admin Dashboard",
            Self::GetStartedForms => "Get Started Forms",
            Self::JoinTeam => "Join Team Applications",
            Self::AgencyPartnership => "Agency Partnerships",
            Self::Subscriptions => "Newsletter Subscriptions",
            Self::FrameworkPdf => "Framework PDF Downloads",
            Self::CaseStudies => "Case Studies",
            Self::SuccessStories => "Success Stories",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_paths_resolve_to_their_route() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    #[rstest]
    #[case("/login/", Route::Login)]
    #[case("/subscriptions?page=2", Route::Subscriptions)]
    #[case("/no-such-page", Route::Dashboard)]
    #[case("", Route::Dashboard)]
    fn test_from_path_edge_cases(#[case] path: &str, #[case] expected: Route) {
        assert_eq!(Route::from_path(path), expected);
    }

    #[test]
    fn test_only_login_and_reset_are_public() {
        let public: Vec<_> = Route::ALL.into_iter().filter(|r| r.is_public()).collect();
        assert_eq!(public, vec![Route::Login, Route::ForgotPassword]);
    }
}
