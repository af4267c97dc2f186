//! Pure data types for the GTW admin console
//!
//! Everything in this crate is plain data plus validation: user records and
//! the credential bundle that make up a session, the route table of the
//! console, and the records served by the GTW backend. No I/O happens here.

#![forbid(unsafe_code)]

pub mod content;
pub mod error;
pub mod format;
pub mod listing;
pub mod records;
pub mod route;
pub mod user;

pub use content::{
    CaseStudy, CaseStudyDraft, CaseStudyPayload, ListItem, Section, SimpleListItem, SuccessStory,
    SuccessStoryDraft, parse_tags,
};
pub use error::{TypesError, TypesResult};
pub use listing::{
    Acknowledgement, CompletionCounts, CompletionFilter, DataEnvelope, Pagination,
    SubscriptionFilter,
};
pub use records::{
    AgencyPartnership, FrameworkPdfEntry, GetStartedForm, JoinTeamApplication, StepBadge,
    Submission, Subscription,
};
pub use route::Route;
pub use user::{AdminUser, CredentialBundle, LoginResponse, Role, UserRecord, UserValidation};
