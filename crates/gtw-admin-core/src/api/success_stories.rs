//! Success story editor endpoints

use crate::Result;
use crate::gateway::AuthGateway;
use gtw_admin_types::{SuccessStory, SuccessStoryDraft};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::de::IgnoredAny;
use std::path::Path;
use tracing::info;

/// Success story CRUD; writes are multipart uploads
#[derive(Debug, Clone)]
pub struct SuccessStoriesApi {
    gateway: AuthGateway,
}

impl SuccessStoriesApi {
    /// Create the service
    #[must_use]
    pub const fn new(gateway: AuthGateway) -> Self {
        Self { gateway }
    }

    /// `GET /success-stories`; the backend answers with a bare array
    pub async fn list(&self) -> Result<Vec<SuccessStory>> {
        let stories: Option<Vec<SuccessStory>> = self.gateway.get("/success-stories").await?;
        Ok(stories.unwrap_or_default())
    }

    /// `POST /success-stories`
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] for a draft without founder name
    /// and [`crate::Error::Io`] when an image cannot be read.
    pub async fn create(&self, draft: &SuccessStoryDraft) -> Result<()> {
        draft.validate()?;
        let form = story_form(draft).await?;
        info!(founder = %draft.founder_name, "Creating success story");
        let _: IgnoredAny = self
            .gateway
            .send_multipart(Method::POST, "/success-stories", form)
            .await?;
        Ok(())
    }

    /// `PUT /success-stories/{id}`; images left out keep their current value
    ///
    /// # Errors
    ///
    /// Same as [`SuccessStoriesApi::create`].
    pub async fn update(&self, id: &str, draft: &SuccessStoryDraft) -> Result<()> {
        draft.validate()?;
        let form = story_form(draft).await?;
        info!(id, founder = %draft.founder_name, "Updating success story");
        let _: IgnoredAny = self
            .gateway
            .send_multipart(Method::PUT, &item_path(id), form)
            .await?;
        Ok(())
    }

    /// `DELETE /success-stories/{id}`
    pub async fn delete(&self, id: &str) -> Result<()> {
        info!(id, "Deleting success story");
        let _: IgnoredAny = self.gateway.delete(&item_path(id)).await?;
        Ok(())
    }
}

fn item_path(id: &str) -> String {
    format!("/success-stories/{}", urlencoding::encode(id))
}

async fn story_form(draft: &SuccessStoryDraft) -> Result<Form> {
    let mut form = Form::new()
        .text("founderName", draft.founder_name.clone())
        .text("founderPost", draft.founder_post.clone())
        .text("description", draft.description.clone());

    if let Some(photo) = &draft.photo {
        form = form.part("photo", file_part(photo).await?);
    }
    if let Some(logo) = &draft.logo {
        form = form.part("logo", file_part(logo).await?);
    }
    Ok(form)
}

async fn file_part(path: &Path) -> Result<Part> {
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
    let part = Part::bytes(bytes).file_name(name);
    Ok(match image_mime(path) {
        Some(mime) => part.mime_str(mime)?,
        None => part,
    })
}

fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_image_mime_by_extension() {
        assert_eq!(image_mime(Path::new("founder.JPG")), Some("image/jpeg"));
        assert_eq!(image_mime(Path::new("logo.svg")), Some("image/svg+xml"));
        assert_eq!(image_mime(Path::new("notes.txt")), None);
        assert_eq!(image_mime(Path::new("no_extension")), None);
    }

    #[test]
    fn test_item_path_encodes_id() {
        assert_eq!(item_path("a/b"), "/success-stories/a%2Fb");
    }
}
