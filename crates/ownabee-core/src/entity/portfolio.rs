//! Portfolio content records and the drafts used to create or update them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::http::UploadFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ContentKind {
    Image,
    Pdf,
    Audiobook,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub kind: ContentKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub profile_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub content_items: Vec<ContentItem>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One entry of a portfolio draft.
///
/// Exactly one of `existing_id` (keep an uploaded item) or `file` (upload a
/// new one) is expected; the encoder rejects entries with neither.
#[derive(Debug, Clone)]
pub struct ContentItemDraft {
    pub kind: ContentKind,
    pub title: Option<String>,
    pub existing_id: Option<String>,
    pub file: Option<UploadFile>,
}

impl ContentItemDraft {
    pub fn upload(kind: ContentKind, file: UploadFile) -> Self {
        Self {
            kind,
            title: None,
            existing_id: None,
            file: Some(file),
        }
    }

    pub fn keep(kind: ContentKind, existing_id: impl Into<String>) -> Self {
        Self {
            kind,
            title: None,
            existing_id: Some(existing_id.into()),
            file: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Create/update payload for a portfolio, sent as multipart form data.
#[derive(Debug, Clone, Default)]
pub struct PortfolioDraft {
    pub title: String,
    pub description: Option<String>,
    pub cover_image: Option<UploadFile>,
    pub items: Vec<ContentItemDraft>,
}
