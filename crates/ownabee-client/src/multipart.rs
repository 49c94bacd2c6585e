//! Multipart encoding of portfolio drafts.
//!
//! The form carries the text fields, an optional cover image, a JSON
//! manifest of content items under `contentItems`, and one file part per
//! newly uploaded item. New items are given a temporary id (`temp-<uuid>`)
//! in the manifest and their file is attached as `file_<tempId>` so the
//! server can associate uploads with manifest entries.

use ownabee_core::entity::{ContentKind, PortfolioDraft};
use ownabee_core::error::{PortalError, Result};
use ownabee_core::http::{MultipartForm, UploadFile};
use serde::Serialize;

pub const COVER_IMAGE_FIELD: &str = "coverImage";
pub const MANIFEST_FIELD: &str = "contentItems";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ManifestEntry {
    kind: ContentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    order: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temp_id: Option<String>,
}

pub fn file_field_name(temp_id: &str) -> String {
    format!("file_{}", temp_id)
}

fn new_temp_id() -> String {
    format!("temp-{}", uuid::Uuid::new_v4())
}

/// Fills in a MIME type guessed from the file name when none was given.
fn with_guessed_type(mut file: UploadFile) -> UploadFile {
    if file.content_type.is_none() {
        file.content_type = Some(
            mime_guess::from_path(&file.file_name)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        );
    }
    file
}

pub fn encode_portfolio_draft(draft: &PortfolioDraft) -> Result<MultipartForm> {
    if draft.title.trim().is_empty() {
        return Err(PortalError::validation("Portfolio title is required"));
    }

    let mut form = MultipartForm::new().text("title", draft.title.trim());
    if let Some(description) = &draft.description {
        form = form.text("description", description.clone());
    }
    if let Some(cover) = &draft.cover_image {
        form = form.file(COVER_IMAGE_FIELD, with_guessed_type(cover.clone()));
    }

    let mut manifest = Vec::with_capacity(draft.items.len());
    let mut files = Vec::new();
    for (index, item) in draft.items.iter().enumerate() {
        let order = index as u32;
        let entry = match (&item.existing_id, &item.file) {
            (_, Some(file)) => {
                let temp_id = new_temp_id();
                files.push((file_field_name(&temp_id), with_guessed_type(file.clone())));
                ManifestEntry {
                    kind: item.kind,
                    title: item.title.clone(),
                    order,
                    id: item.existing_id.clone(),
                    temp_id: Some(temp_id),
                }
            }
            (Some(id), None) => ManifestEntry {
                kind: item.kind,
                title: item.title.clone(),
                order,
                id: Some(id.clone()),
                temp_id: None,
            },
            (None, None) => {
                return Err(PortalError::validation(format!(
                    "Content item {} has neither a file nor an existing id",
                    index + 1
                )));
            }
        };
        manifest.push(entry);
    }

    form = form.text(MANIFEST_FIELD, serde_json::to_string(&manifest)?);
    for (name, file) in files {
        form = form.file(name, file);
    }
    Ok(form)
}
