//! Editable site content: case studies and success stories

use crate::error::{TypesError, TypesResult};
use crate::records::lenient_text;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Two-level bullet of a `list` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    /// Bullet text
    #[serde(default)]
    pub listing: String,
    /// Nested text
    #[serde(rename = "sub-listing", default)]
    pub sub_listing: String,
}

/// Bullet of a `list2` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleListItem {
    /// Bullet text
    #[serde(default)]
    pub listing: String,
}

/// Block of a case study body, tagged by `type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Section {
    /// Heading and paragraph
    Text {
        /// Heading
        #[serde(default)]
        head: String,
        /// Paragraph
        #[serde(default)]
        content: String,
    },
    /// Image with caption
    Image {
        /// Image URL
        #[serde(rename = "imageSrc", default)]
        image_src: String,
        /// Alternative text
        #[serde(rename = "imageAlt", default)]
        image_alt: String,
        /// Caption
        #[serde(default)]
        content: String,
    },
    /// Heading and two-level bullet list
    List {
        /// Heading
        #[serde(default)]
        head: String,
        /// Bullets
        #[serde(default)]
        content: Vec<ListItem>,
    },
    /// Heading and flat bullet list
    List2 {
        /// Heading
        #[serde(default)]
        head: String,
        /// Bullets
        #[serde(default)]
        content: Vec<SimpleListItem>,
    },
    /// Client quote
    Testimonial {
        /// Quote
        #[serde(default)]
        quote: String,
        /// Who said it
        #[serde(default)]
        author: String,
        /// Their position
        #[serde(default)]
        position: String,
    },
    /// A section type this console does not edit
    #[serde(other)]
    Unknown,
}

impl Section {
    /// Empty section of the named type; unknown names give an empty text section
    #[must_use]
    pub fn empty(kind: &str) -> Self {
        match kind {
            "image" => Self::Image {
                image_src: String::new(),
                image_alt: String::new(),
                content: String::new(),
            },
            "list" => Self::List {
                head: String::new(),
                content: Vec::new(),
            },
            "list2" => Self::List2 {
                head: String::new(),
                content: Vec::new(),
            },
            "testimonial" => Self::Testimonial {
                quote: String::new(),
                author: String::new(),
                position: String::new(),
            },
            _ => Self::Text {
                head: String::new(),
                content: String::new(),
            },
        }
    }

    /// Name of the section type
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::List { .. } => "list",
            Self::List2 { .. } => "list2",
            Self::Testimonial { .. } => "testimonial",
            Self::Unknown => "unknown",
        }
    }
}

/// Case study as stored by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    /// Backend identifier
    #[serde(rename = "_id", default)]
    pub id: String,
    /// URL slug
    #[serde(default)]
    pub slug: String,
    /// SEO title
    #[serde(rename = "meta_title", default, deserialize_with = "lenient_text")]
    pub meta_title: Option<String>,
    /// SEO description
    #[serde(rename = "meta_description", default, deserialize_with = "lenient_text")]
    pub meta_description: Option<String>,
    /// Title
    #[serde(default)]
    pub title: String,
    /// Publication date as sent by the backend
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
    /// Category
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Hero image URL
    #[serde(default, deserialize_with = "lenient_text")]
    pub hero_image: Option<String>,
    /// Body
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Case study as edited in the console; tags are one comma-separated string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStudyDraft {
    /// URL slug
    pub slug: String,
    /// SEO title
    #[serde(default)]
    pub meta_title: String,
    /// SEO description
    #[serde(default)]
    pub meta_description: String,
    /// Title
    pub title: String,
    /// `YYYY-MM-DD`, may be empty
    #[serde(default)]
    pub date: String,
    /// Category
    #[serde(default)]
    pub category: String,
    /// Comma-separated tags
    #[serde(default)]
    pub tags: String,
    /// Hero image URL
    #[serde(rename = "heroImage", default)]
    pub hero_image: String,
    /// Body
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// Body sent to `POST /case-studies` and `PUT /case-studies/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseStudyPayload {
    /// URL slug
    pub slug: String,
    /// SEO title
    pub meta_title: String,
    /// SEO description
    pub meta_description: String,
    /// Title
    pub title: String,
    /// `YYYY-MM-DD` or empty
    pub date: String,
    /// Category
    pub category: String,
    /// Parsed tags
    pub tags: Vec<String>,
    /// Hero image URL
    #[serde(rename = "heroImage")]
    pub hero_image: String,
    /// Body
    pub sections: Vec<Section>,
}

/// Split a comma-separated tag string, trimming and dropping empty tags
#[must_use]
pub fn parse_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

impl CaseStudyDraft {
    /// Prefill the editor from an existing case study
    #[must_use]
    pub fn from_existing(case: &CaseStudy) -> Self {
        Self {
            slug: case.slug.clone(),
            meta_title: case.meta_title.clone().unwrap_or_default(),
            meta_description: case.meta_description.clone().unwrap_or_default(),
            title: case.title.clone(),
            date: case
                .date
                .as_deref()
                .and_then(|date| date.split('T').next())
                .unwrap_or_default()
                .to_string(),
            category: case.category.clone().unwrap_or_default(),
            tags: case.tags.join(", "),
            hero_image: case.hero_image.clone().unwrap_or_default(),
            sections: case.sections.clone(),
        }
    }

    /// Check the draft and build the request body
    pub fn into_payload(self) -> TypesResult<CaseStudyPayload> {
        if self.slug.trim().is_empty() {
            return Err(TypesError::MissingField { field: "slug" });
        }
        if self.title.trim().is_empty() {
            return Err(TypesError::MissingField { field: "title" });
        }
        if !self.date.is_empty() && NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").is_err() {
            return Err(TypesError::InvalidField {
                field: "date",
                message: format!("'{}' is not a YYYY-MM-DD date", self.date),
            });
        }
        Ok(CaseStudyPayload {
            tags: parse_tags(&self.tags),
            slug: self.slug,
            meta_title: self.meta_title,
            meta_description: self.meta_description,
            title: self.title,
            date: self.date,
            category: self.category,
            hero_image: self.hero_image,
            sections: self.sections,
        })
    }
}

/// Founder testimonial shown on the site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessStory {
    /// Backend identifier
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Founder name
    #[serde(default)]
    pub founder_name: String,
    /// Founder position
    #[serde(default, deserialize_with = "lenient_text")]
    pub founder_post: Option<String>,
    /// Story text
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    /// Founder photo URL
    #[serde(default, deserialize_with = "lenient_text")]
    pub photo: Option<String>,
    /// Company logo URL
    #[serde(default, deserialize_with = "lenient_text")]
    pub logo: Option<String>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Success story as edited in the console; images are local files to upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuccessStoryDraft {
    /// Founder name
    pub founder_name: String,
    /// Founder position
    pub founder_post: String,
    /// Story text
    pub description: String,
    /// Photo to upload, keeps the current one when absent
    pub photo: Option<PathBuf>,
    /// Logo to upload, keeps the current one when absent
    pub logo: Option<PathBuf>,
}

impl SuccessStoryDraft {
    /// Check required fields
    pub fn validate(&self) -> TypesResult<()> {
        if self.founder_name.trim().is_empty() {
            return Err(TypesError::MissingField {
                field: "founderName",
            });
        }
        Ok(())
    }
}
