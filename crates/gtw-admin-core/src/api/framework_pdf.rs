//! Framework PDF download requests

use crate::Result;
use crate::gateway::AuthGateway;
use gtw_admin_types::{Acknowledgement, FrameworkPdfEntry};
use serde::Deserialize;
use tracing::info;

#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    forms: Option<Vec<FrameworkPdfEntry>>,
}

/// Visitors who requested the framework PDF
#[derive(Debug, Clone)]
pub struct FrameworkPdfApi {
    gateway: AuthGateway,
}

impl FrameworkPdfApi {
    /// Create the service
    #[must_use]
    pub const fn new(gateway: AuthGateway) -> Self {
        Self { gateway }
    }

    /// `GET /framework-pdf`; the rows come under `forms`
    pub async fn list(&self) -> Result<Vec<FrameworkPdfEntry>> {
        let response: ListResponse = self.gateway.get("/framework-pdf").await?;
        Ok(response.forms.unwrap_or_default())
    }

    /// `DELETE /forms/{id}`, the route the backend serves deletes on
    pub async fn delete(&self, id: &str) -> Result<Acknowledgement> {
        info!(id, "Deleting framework PDF request");
        self.gateway
            .delete(&format!("/forms/{}", urlencoding::encode(id)))
            .await
    }
}
