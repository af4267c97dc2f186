//! Filters, pagination and response envelopes shared by the list views

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Completion filter used by the submission tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompletionFilter {
    /// Every submission
    #[default]
    All,
    /// Submissions that reached the last step
    Completed,
    /// Submissions still in progress
    Incomplete,
}

impl CompletionFilter {
    /// Whether a submission with the given completion flag is kept
    #[must_use]
    pub const fn matches(self, is_completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Completed => is_completed,
            Self::Incomplete => !is_completed,
        }
    }
}

impl FromStr for CompletionFilter {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "completed" => Ok(Self::Completed),
            "incomplete" | "in-progress" => Ok(Self::Incomplete),
            other => Err(TypesError::UnknownFilter(other.to_string())),
        }
    }
}

/// Totals shown on the filter buttons of a submission table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionCounts {
    /// Every submission
    pub all: usize,
    /// Completed submissions
    pub completed: usize,
    /// Submissions in progress
    pub incomplete: usize,
}

impl CompletionCounts {
    /// Count completion flags
    pub fn tally(flags: impl IntoIterator<Item = bool>) -> Self {
        flags.into_iter().fold(Self::default(), |mut counts, completed| {
            counts.all += 1;
            if completed {
                counts.completed += 1;
            } else {
                counts.incomplete += 1;
            }
            counts
        })
    }
}

/// Status filter of the subscription table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubscriptionFilter {
    /// Every subscription
    #[default]
    All,
    /// Currently subscribed
    Active,
    /// Unsubscribed
    Inactive,
}

impl SubscriptionFilter {
    /// Value of the `isActive` query parameter, absent for [`Self::All`]
    #[must_use]
    pub const fn is_active(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Active => Some(true),
            Self::Inactive => Some(false),
        }
    }
}

impl FromStr for SubscriptionFilter {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(TypesError::UnknownFilter(other.to_string())),
        }
    }
}

/// Server-side pagination state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page, 1-based
    #[serde(default = "first_page")]
    pub page: u32,
    /// Page size
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Total number of records
    #[serde(default)]
    pub total: u64,
    /// Total number of pages
    #[serde(default)]
    pub pages: u32,
}

const fn first_page() -> u32 {
    1
}

const fn default_limit() -> u32 {
    20
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: first_page(),
            limit: default_limit(),
            total: 0,
            pages: 0,
        }
    }
}

impl Pagination {
    /// A previous page exists
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// A next page exists
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.pages
    }

    /// The pagination bar is only shown with more than one page
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        self.pages > 1
    }
}

/// `{success, data, message}` envelope used by most list endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct DataEnvelope<T> {
    /// Backend success flag, missing on some endpoints
    #[serde(default)]
    pub success: Option<bool>,
    /// Records; a missing or null list reads as empty
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub data: Vec<T>,
    /// Optional server message
    #[serde(default)]
    pub message: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// `{success, message}` acknowledgement returned by mutating endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Acknowledgement {
    /// Backend success flag
    #[serde(default)]
    pub success: bool,
    /// Optional server message
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(CompletionFilter::All, true, true)]
    #[case(CompletionFilter::All, false, true)]
    #[case(CompletionFilter::Completed, true, true)]
    #[case(CompletionFilter::Completed, false, false)]
    #[case(CompletionFilter::Incomplete, false, true)]
    #[case(CompletionFilter::Incomplete, true, false)]
    fn test_completion_filter(
        #[case] filter: CompletionFilter,
        #[case] completed: bool,
        #[case] kept: bool,
    ) {
        assert_eq!(filter.matches(completed), kept);
    }

    #[test]
    fn test_completion_counts() {
        let counts = CompletionCounts::tally([true, false, false, true, true]);
        assert_eq!(
            counts,
            CompletionCounts {
                all: 5,
                completed: 3,
                incomplete: 2
            }
        );
    }

    #[test]
    fn test_subscription_filter_query_value() {
        assert_eq!(SubscriptionFilter::All.is_active(), None);
        assert_eq!(SubscriptionFilter::Active.is_active(), Some(true));
        assert_eq!(SubscriptionFilter::Inactive.is_active(), Some(false));
        assert!("pending".parse::<SubscriptionFilter>().is_err());
    }

    #[test]
    fn test_pagination_navigation() {
        let pagination = Pagination {
            page: 1,
            limit: 20,
            total: 45,
            pages: 3,
        };
        assert!(!pagination.has_previous());
        assert!(pagination.has_next());
        assert!(pagination.is_paginated());
        assert!(!Pagination::default().is_paginated());
    }

    #[test]
    fn test_envelope_with_null_data() {
        let envelope: DataEnvelope<u32> =
            serde_json::from_str(r#"{"success": true, "data": null}"#).unwrap();
        assert!(envelope.data.is_empty());
        assert_eq!(envelope.success, Some(true));

        let envelope: DataEnvelope<u32> = serde_json::from_str("{}").unwrap();
        assert!(envelope.data.is_empty());
    }
}
