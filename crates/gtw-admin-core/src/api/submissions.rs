//! Multi-step form submissions: get-started forms, join-team applications
//! and agency partnerships

use crate::Result;
use crate::gateway::AuthGateway;
use gtw_admin_types::{
    AgencyPartnership, CompletionCounts, CompletionFilter, DataEnvelope, GetStartedForm,
    JoinTeamApplication, Submission,
};
use serde::de::DeserializeOwned;
use tracing::debug;

/// A submission type with its own collection endpoint
pub trait SubmissionSource: Submission + DeserializeOwned + Send {
    /// Collection path, relative to the base endpoint
    const PATH: &'static str;
}

impl SubmissionSource for GetStartedForm {
    const PATH: &'static str = "/form";
}

impl SubmissionSource for JoinTeamApplication {
    const PATH: &'static str = "/join-team";
}

impl SubmissionSource for AgencyPartnership {
    const PATH: &'static str = "/agency-partnership";
}

/// Read access to the submission collections
#[derive(Debug, Clone)]
pub struct SubmissionsApi {
    gateway: AuthGateway,
}

impl SubmissionsApi {
    /// Create the service
    #[must_use]
    pub const fn new(gateway: AuthGateway) -> Self {
        Self { gateway }
    }

    /// Every submission of type `T`, in backend order
    pub async fn list<T: SubmissionSource>(&self) -> Result<Vec<T>> {
        let envelope: DataEnvelope<T> = self.gateway.get(T::PATH).await?;
        debug!(kind = T::KIND, count = envelope.data.len(), "Fetched submissions");
        Ok(envelope.data)
    }

    /// The submission with backend id `id`, looked up in the full list
    pub async fn find_by_id<T: SubmissionSource>(&self, id: &str) -> Result<Option<T>> {
        Ok(self
            .list::<T>()
            .await?
            .into_iter()
            .find(|submission| submission.id() == id))
    }
}

/// Submissions kept by `filter`, in input order
pub fn filter_submissions<T: Submission>(items: &[T], filter: CompletionFilter) -> Vec<&T> {
    items
        .iter()
        .filter(|item| filter.matches(item.is_completed()))
        .collect()
}

/// Totals for the filter buttons
pub fn completion_counts<T: Submission>(items: &[T]) -> CompletionCounts {
    CompletionCounts::tally(items.iter().map(Submission::is_completed))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn form(id: &str, completed: bool) -> GetStartedForm {
        GetStartedForm {
            id: id.to_string(),
            is_completed: completed,
            ..GetStartedForm::default()
        }
    }

    #[test]
    fn test_filter_keeps_order() {
        let forms = vec![form("a", true), form("b", false), form("c", true)];
        let completed: Vec<_> = filter_submissions(&forms, CompletionFilter::Completed)
            .into_iter()
            .map(Submission::id)
            .collect();
        assert_eq!(completed, vec!["a", "c"]);
        assert_eq!(filter_submissions(&forms, CompletionFilter::All).len(), 3);
    }

    #[test]
    fn test_counts() {
        let forms = vec![form("a", true), form("b", false)];
        let counts = completion_counts(&forms);
        assert_eq!((counts.all, counts.completed, counts.incomplete), (2, 1, 1));
    }

    #[test]
    fn test_paths() {
        assert_eq!(GetStartedForm::PATH, "/form");
        assert_eq!(JoinTeamApplication::PATH, "/join-team");
        assert_eq!(AgencyPartnership::PATH, "/agency-partnership");
    }
}
