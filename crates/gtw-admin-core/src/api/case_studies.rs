//! Case study editor endpoints

use crate::Result;
use crate::gateway::AuthGateway;
use gtw_admin_types::{CaseStudy, CaseStudyDraft};
use serde::de::IgnoredAny;
use tracing::info;

/// Case study CRUD
#[derive(Debug, Clone)]
pub struct CaseStudiesApi {
    gateway: AuthGateway,
}

impl CaseStudiesApi {
    /// Create the service
    #[must_use]
    pub const fn new(gateway: AuthGateway) -> Self {
        Self { gateway }
    }

    /// `GET /case-studies`; the backend answers with a bare array
    pub async fn list(&self) -> Result<Vec<CaseStudy>> {
        let studies: Option<Vec<CaseStudy>> = self.gateway.get("/case-studies").await?;
        Ok(studies.unwrap_or_default())
    }

    /// Case study with backend id `id`, looked up in the full list
    pub async fn find_by_id(&self, id: &str) -> Result<Option<CaseStudy>> {
        Ok(self.list().await?.into_iter().find(|study| study.id == id))
    }

    /// `POST /case-studies`
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] for an incomplete draft before any
    /// request is sent.
    pub async fn create(&self, draft: CaseStudyDraft) -> Result<()> {
        let payload = draft.into_payload()?;
        info!(slug = %payload.slug, "Creating case study");
        let _: IgnoredAny = self.gateway.post("/case-studies", &payload).await?;
        Ok(())
    }

    /// `PUT /case-studies/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] for an incomplete draft before any
    /// request is sent.
    pub async fn update(&self, id: &str, draft: CaseStudyDraft) -> Result<()> {
        let payload = draft.into_payload()?;
        info!(id, slug = %payload.slug, "Updating case study");
        let _: IgnoredAny = self.gateway.put(&item_path(id), &payload).await?;
        Ok(())
    }

    /// `DELETE /case-studies/{id}`
    pub async fn delete(&self, id: &str) -> Result<()> {
        info!(id, "Deleting case study");
        let _: IgnoredAny = self.gateway.delete(&item_path(id)).await?;
        Ok(())
    }
}

fn item_path(id: &str) -> String {
    format!("/case-studies/{}", urlencoding::encode(id))
}
