//! Newsletter subscriptions

use crate::Result;
use crate::gateway::AuthGateway;
use gtw_admin_types::{Acknowledgement, Pagination, Subscription, SubscriptionFilter};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Serialize)]
struct ListQuery {
    page: u32,
    limit: u32,
    #[serde(rename = "isActive", skip_serializing_if = "Option::is_none")]
    is_active: Option<bool>,
}

#[derive(Serialize)]
struct EmailBody<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    data: Option<Vec<Subscription>>,
    #[serde(default)]
    pagination: Option<Pagination>,
}

/// One page of subscriptions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionPage {
    /// Rows of the page
    pub subscriptions: Vec<Subscription>,
    /// Requested page and size with the backend totals
    pub pagination: Pagination,
}

/// Subscription management
#[derive(Debug, Clone)]
pub struct SubscriptionsApi {
    gateway: AuthGateway,
}

impl SubscriptionsApi {
    /// Create the service
    #[must_use]
    pub const fn new(gateway: AuthGateway) -> Self {
        Self { gateway }
    }

    /// `GET /subscriptions?page&limit[&isActive]`
    pub async fn list(
        &self,
        page: u32,
        limit: u32,
        filter: SubscriptionFilter,
    ) -> Result<SubscriptionPage> {
        let page = page.max(1);
        let query = ListQuery {
            page,
            limit,
            is_active: filter.is_active(),
        };
        let response: ListResponse = self
            .gateway
            .get_with_query("/subscriptions", &query)
            .await?;

        let totals = response.pagination.unwrap_or_default();
        let subscriptions = response.data.unwrap_or_default();
        debug!(page, count = subscriptions.len(), total = totals.total, "Fetched subscriptions");

        Ok(SubscriptionPage {
            subscriptions,
            pagination: Pagination {
                page,
                limit,
                total: totals.total,
                pages: totals.pages,
            },
        })
    }

    /// `POST /subscriptions/unsubscribe`
    pub async fn unsubscribe(&self, email: &str) -> Result<Acknowledgement> {
        info!(email, "Unsubscribing");
        self.gateway
            .post("/subscriptions/unsubscribe", &EmailBody { email })
            .await
    }

    /// `DELETE /subscriptions/{email}`
    pub async fn delete(&self, email: &str) -> Result<Acknowledgement> {
        info!(email, "Deleting subscription");
        self.gateway
            .delete(&subscription_path(email))
            .await
    }
}

fn subscription_path(email: &str) -> String {
    format!("/subscriptions/{}", urlencoding::encode(email))
}
