//! Services over the GTW backend, one per console view
//!
//! Every service wraps a clone of the shared [`AuthGateway`], so bearer
//! headers and session expiry are handled in one place.

pub mod auth;
pub mod case_studies;
pub mod dashboard;
pub mod framework_pdf;
pub mod submissions;
pub mod subscriptions;
pub mod success_stories;

pub use auth::{AuthApi, PasswordReset};
pub use case_studies::CaseStudiesApi;
pub use dashboard::{ActivityItem, DashboardApi, DashboardSummary};
pub use framework_pdf::FrameworkPdfApi;
pub use submissions::{SubmissionSource, SubmissionsApi, completion_counts, filter_submissions};
pub use subscriptions::{SubscriptionPage, SubscriptionsApi};
pub use success_stories::SuccessStoriesApi;

use crate::gateway::AuthGateway;

/// All services built over one gateway
#[derive(Debug, Clone)]
pub struct AdminApi {
    /// Sign-in and password reset
    pub auth: AuthApi,
    /// Submission collections
    pub submissions: SubmissionsApi,
    /// Dashboard aggregation
    pub dashboard: DashboardApi,
    /// Newsletter subscriptions
    pub subscriptions: SubscriptionsApi,
    /// Framework PDF requests
    pub framework_pdf: FrameworkPdfApi,
    /// Case studies
    pub case_studies: CaseStudiesApi,
    /// Success stories
    pub success_stories: SuccessStoriesApi,
}

impl AdminApi {
    /// Build every service over `gateway`
    #[must_use]
    pub fn new(gateway: &AuthGateway) -> Self {
        let submissions = SubmissionsApi::new(gateway.clone());
        Self {
            auth: AuthApi::new(gateway.clone()),
            dashboard: DashboardApi::new(submissions.clone()),
            submissions,
            subscriptions: SubscriptionsApi::new(gateway.clone()),
            framework_pdf: FrameworkPdfApi::new(gateway.clone()),
            case_studies: CaseStudiesApi::new(gateway.clone()),
            success_stories: SuccessStoriesApi::new(gateway.clone()),
        }
    }
}
