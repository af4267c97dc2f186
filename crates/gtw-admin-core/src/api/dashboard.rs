//! Dashboard totals and recent activity

use super::submissions::{SubmissionSource, SubmissionsApi};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use gtw_admin_types::format::NOT_AVAILABLE;
use gtw_admin_types::{AgencyPartnership, GetStartedForm, JoinTeamApplication};
use std::cmp::Reverse;
use tracing::warn;

/// Rows taken from each source for the activity feed
pub const RECENT_PER_SOURCE: usize = 5;
/// Rows shown in the activity feed
pub const RECENT_LIMIT: usize = 10;

/// One row of the activity feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityItem {
    /// Backend identifier
    pub id: String,
    /// Source label ("Get Started", "Join Team", "Agency")
    pub kind: &'static str,
    /// Person or agency name
    pub name: String,
    /// Email or website
    pub contact: String,
    /// Creation time
    pub date: Option<DateTime<Utc>>,
}

/// Everything the dashboard shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Number of get-started forms
    pub total_get_started: usize,
    /// Number of join-team applications
    pub total_join_team: usize,
    /// Number of agency partnership requests
    pub total_agency_partnership: usize,
    /// Newest submissions across all sources
    pub recent_activity: Vec<ActivityItem>,
}

impl DashboardSummary {
    /// Sum of all three sources
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total_get_started + self.total_join_team + self.total_agency_partnership
    }
}

/// Aggregates the submission sources
#[derive(Debug, Clone)]
pub struct DashboardApi {
    submissions: SubmissionsApi,
}

impl DashboardApi {
    /// Create the service
    #[must_use]
    pub const fn new(submissions: SubmissionsApi) -> Self {
        Self { submissions }
    }

    /// Fetch all three sources concurrently
    ///
    /// A failing source counts as empty.
    ///
    /// # Errors
    ///
    /// Only [`Error::SessionExpired`] is returned; every other failure is
    /// logged and absorbed.
    pub async fn summary(&self) -> Result<DashboardSummary> {
        let (forms, applications, partnerships) = tokio::join!(
            self.submissions.list::<GetStartedForm>(),
            self.submissions.list::<JoinTeamApplication>(),
            self.submissions.list::<AgencyPartnership>(),
        );

        let forms = settle::<GetStartedForm>(forms)?;
        let applications = settle::<JoinTeamApplication>(applications)?;
        let partnerships = settle::<AgencyPartnership>(partnerships)?;

        let mut recent: Vec<ActivityItem> = forms
            .iter()
            .take(RECENT_PER_SOURCE)
            .map(activity)
            .chain(applications.iter().take(RECENT_PER_SOURCE).map(activity))
            .chain(partnerships.iter().take(RECENT_PER_SOURCE).map(activity))
            .collect();
        sort_recent(&mut recent);

        Ok(DashboardSummary {
            total_get_started: forms.len(),
            total_join_team: applications.len(),
            total_agency_partnership: partnerships.len(),
            recent_activity: recent,
        })
    }
}

fn settle<T: SubmissionSource>(result: Result<Vec<T>>) -> Result<Vec<T>> {
    match result {
        Ok(items) => Ok(items),
        Err(e @ Error::SessionExpired { .. }) => Err(e),
        Err(e) => {
            warn!(kind = T::KIND, error = %e, "Dashboard source failed, counting as empty");
            Ok(Vec::new())
        }
    }
}

fn activity<T: SubmissionSource>(item: &T) -> ActivityItem {
    ActivityItem {
        id: item.id().to_string(),
        kind: T::KIND,
        name: item.headline().unwrap_or(NOT_AVAILABLE).to_string(),
        contact: item.contact().unwrap_or(NOT_AVAILABLE).to_string(),
        date: item.created_at().copied(),
    }
}

/// Newest first, rows without a date last, then keep [`RECENT_LIMIT`]
fn sort_recent(items: &mut Vec<ActivityItem>) {
    items.sort_by_key(|item| Reverse(item.date));
    items.truncate(RECENT_LIMIT);
}
