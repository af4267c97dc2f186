//! Records listed by the console views

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Read any JSON scalar as text; the backend is not consistent about
/// numbers versus strings in free-form answers.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// A multi-step submission collected by one of the public site forms
pub trait Submission {
    /// Label used in the dashboard activity feed
    const KIND: &'static str;

    /// Backend identifier
    fn id(&self) -> &str;
    /// Whether the visitor reached the last step
    fn is_completed(&self) -> bool;
    /// Last step the visitor reached
    fn current_step(&self) -> Option<u8>;
    /// Creation time
    fn created_at(&self) -> Option<&DateTime<Utc>>;
    /// Primary column: person or agency name
    fn headline(&self) -> Option<&str>;
    /// Secondary column: email or website
    fn contact(&self) -> Option<&str>;
}

/// Progress badge derived from the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepBadge {
    /// All five steps done
    Complete,
    /// Step three or four
    Advanced,
    /// Steps one and two, or unknown
    Early,
}

impl StepBadge {
    /// Badge for a step number
    #[must_use]
    pub const fn for_step(step: Option<u8>) -> Self {
        match step {
            Some(5..=u8::MAX) => Self::Complete,
            Some(3 | 4) => Self::Advanced,
            _ => Self::Early,
        }
    }
}

/// Submission of the "get started" project intake form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetStartedForm {
    /// Backend identifier
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Contact name
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    /// Contact email
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    /// Chosen project track
    #[serde(default, deserialize_with = "lenient_text")]
    pub project_type: Option<String>,
    /// Company name
    #[serde(default, deserialize_with = "lenient_text")]
    pub company_name: Option<String>,
    /// Company type
    #[serde(default, deserialize_with = "lenient_text")]
    pub company_type: Option<String>,
    /// Budget bracket
    #[serde(default, deserialize_with = "lenient_text")]
    pub budget_range: Option<String>,
    /// Desired start
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_time: Option<String>,
    /// Whether post-launch support is wanted
    #[serde(default, deserialize_with = "lenient_text")]
    pub post_launch_support: Option<String>,
    /// Free-form notes
    #[serde(default, deserialize_with = "lenient_text")]
    pub additional_notes: Option<String>,
    /// Uploaded documents as returned by the backend
    #[serde(default)]
    pub documents: Vec<Value>,
    /// Answers specific to the chosen track
    #[serde(default)]
    pub track_specific_answers: BTreeMap<String, Value>,
    /// Last step reached
    #[serde(default)]
    pub current_step: Option<u8>,
    /// Whether all steps were submitted
    #[serde(default)]
    pub is_completed: bool,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Final submission time
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Application sent through the "join the team" form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinTeamApplication {
    /// Backend identifier
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Applicant name
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    /// Applicant email
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    /// Applicant phone
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    /// Position applied for
    #[serde(default, deserialize_with = "lenient_text")]
    pub role: Option<String>,
    /// Years or level of experience
    #[serde(default, deserialize_with = "lenient_text")]
    pub experience: Option<String>,
    /// Listed skills
    #[serde(default)]
    pub skills: Vec<String>,
    /// Resume link
    #[serde(default, deserialize_with = "lenient_text")]
    pub resume_url: Option<String>,
    /// Portfolio or GitHub link
    #[serde(default, deserialize_with = "lenient_text")]
    pub portfolio_or_github: Option<String>,
    /// `LinkedIn` profile
    #[serde(default, deserialize_with = "lenient_text")]
    pub linkedin_profile: Option<String>,
    /// Where the applicant lives
    #[serde(default, deserialize_with = "lenient_text")]
    pub current_location: Option<String>,
    /// Relocation preference
    #[serde(default)]
    pub willing_to_relocate: Option<bool>,
    /// Freelance preference
    #[serde(default)]
    pub open_to_freelance: Option<bool>,
    /// Earliest start
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_time: Option<String>,
    /// Project the applicant is proudest of
    #[serde(default, deserialize_with = "lenient_text")]
    pub proud_project: Option<String>,
    /// Motivation
    #[serde(rename = "whyJoinGTW", default, deserialize_with = "lenient_text")]
    pub why_join_gtw: Option<String>,
    /// Terms accepted
    #[serde(default)]
    pub agreed_to_terms: Option<bool>,
    /// Last step reached
    #[serde(default)]
    pub current_step: Option<u8>,
    /// Whether all steps were submitted
    #[serde(default)]
    pub is_completed: bool,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Final submission time
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Partnership request sent by an agency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgencyPartnership {
    /// Backend identifier
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Agency name
    #[serde(default, deserialize_with = "lenient_text")]
    pub agency_name: Option<String>,
    /// Agency website
    #[serde(default, deserialize_with = "lenient_text")]
    pub website_url: Option<String>,
    /// Agency location
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    /// Team size bracket
    #[serde(default, deserialize_with = "lenient_text")]
    pub team_size: Option<String>,
    /// Portfolio link
    #[serde(default, deserialize_with = "lenient_text")]
    pub portfolio_url: Option<String>,
    /// Working time zone
    #[serde(default, deserialize_with = "lenient_text")]
    pub time_zone: Option<String>,
    /// Kind of collaboration sought
    #[serde(default, deserialize_with = "lenient_text")]
    pub collaboration_type: Option<String>,
    /// Areas of expertise
    #[serde(default)]
    pub specializations: Vec<String>,
    /// Accepted engagement models
    #[serde(default)]
    pub engagement_models: Vec<String>,
    /// Recent projects, free form
    #[serde(default)]
    pub recent_projects: Option<Value>,
    /// Social media links, free form
    #[serde(default)]
    pub social_media: Option<Value>,
    /// Referral source
    #[serde(default, deserialize_with = "lenient_text")]
    pub how_found_us: Option<String>,
    /// Work the agency does not take on
    #[serde(default, deserialize_with = "lenient_text")]
    pub what_not_do: Option<String>,
    /// Prior experience with development partners
    #[serde(default, deserialize_with = "lenient_text")]
    pub worked_with_dev_partners: Option<String>,
    /// Terms accepted
    #[serde(default)]
    pub agreed_to_terms: Option<bool>,
    /// Last step reached
    #[serde(default)]
    pub current_step: Option<u8>,
    /// Whether all steps were submitted
    #[serde(default)]
    pub is_completed: bool,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Final submission time
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

macro_rules! impl_submission {
    ($ty:ty, $kind:literal, $headline:ident, $contact:ident) => {
        impl Submission for $ty {
            const KIND: &'static str = $kind;

            fn id(&self) -> &str {
                &self.id
            }

            fn is_completed(&self) -> bool {
                self.is_completed
            }

            fn current_step(&self) -> Option<u8> {
                self.current_step
            }

            fn created_at(&self) -> Option<&DateTime<Utc>> {
                self.created_at.as_ref()
            }

            fn headline(&self) -> Option<&str> {
                self.$headline.as_deref()
            }

            fn contact(&self) -> Option<&str> {
                self.$contact.as_deref()
            }
        }
    };
}

impl_submission!(GetStartedForm, "Get Started", name, email);
impl_submission!(JoinTeamApplication, "Join Team", name, email);
impl_submission!(AgencyPartnership, "Agency", agency_name, website_url);

/// Newsletter subscription
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Backend identifier
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Subscriber email
    pub email: String,
    /// Still subscribed
    #[serde(default)]
    pub is_active: bool,
    /// Subscription time
    #[serde(default)]
    pub subscribed_at: Option<DateTime<Utc>>,
    /// Unsubscription time
    #[serde(default)]
    pub unsubscribed_at: Option<DateTime<Utc>>,
    /// Where the subscription came from
    #[serde(default, deserialize_with = "lenient_text")]
    pub source: Option<String>,
}

/// Visitor who requested the framework PDF
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkPdfEntry {
    /// Backend identifier
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Visitor name
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    /// Visitor email
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    /// Visitor phone
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    /// Request time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
