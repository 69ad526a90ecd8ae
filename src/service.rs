//! Workspace-scoped export and publish flows over a carousel store.
//!
//! The caller resolves authentication and the active workspace; these functions only
//! check that the carousel belongs to it.

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::client::{LinkedInClient, PostResult};
use crate::config::LinkedInCredentials;
use crate::converters::markdown::default_caption;
use crate::converters::pdf::{render_carousel, PagePreset};
use crate::errors::{CarouselError, Result};
use crate::models::carousel::{Carousel, CarouselStatus};

/// Fields written back to the store after an export or publish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: CarouselStatus,
    pub pdf_generated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_post_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_post_url: Option<String>,
}

impl StatusUpdate {
    fn from_carousel(carousel: &Carousel) -> Self {
        StatusUpdate {
            status: carousel.status(),
            pdf_generated_at: carousel.pdf_generated_at,
            linkedin_post_id: carousel.linkedin_post_id.clone(),
            linkedin_post_url: carousel.linkedin_post_url.clone(),
        }
    }
}

/// Persistence for carousels. Implementations map their own failures to
/// [`CarouselError::Store`].
pub trait CarouselStore {
    fn fetch_carousel(&self, carousel_id: &str) -> Result<Option<Carousel>>;

    fn update_carousel_status(&self, carousel_id: &str, update: &StatusUpdate) -> Result<()>;
}

/// A rendered document ready to be sent as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportedDocument {
    /// Value for the `Content-Disposition` response header.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }
}

/// Loads `carousel_id` and checks it belongs to the active workspace.
fn load_owned<S: CarouselStore + ?Sized>(
    store: &S,
    active_workspace: Option<&str>,
    carousel_id: &str,
) -> Result<Carousel> {
    let workspace_id = active_workspace
        .filter(|ws| !ws.is_empty())
        .ok_or(CarouselError::NoActiveWorkspace)?;
    let carousel = store
        .fetch_carousel(carousel_id)?
        .ok_or_else(|| CarouselError::NotFound(carousel_id.to_string()))?;
    if !carousel.belongs_to(workspace_id) {
        return Err(CarouselError::WorkspaceMismatch {
            carousel_id: carousel_id.to_string(),
        });
    }
    Ok(carousel)
}

/// Renders the carousel for download and records the export time.
pub fn export_carousel<S: CarouselStore + ?Sized>(
    store: &S,
    active_workspace: Option<&str>,
    carousel_id: &str,
    preset: PagePreset,
) -> Result<ExportedDocument> {
    let mut carousel = load_owned(store, active_workspace, carousel_id)?;
    let bytes = render_carousel(&carousel, preset)?;

    carousel.mark_exported(Utc::now());
    store.update_carousel_status(carousel_id, &StatusUpdate::from_carousel(&carousel))?;
    info!(
        "Exported carousel {} ({} slides, {} bytes)",
        carousel_id,
        carousel.slides().len(),
        bytes.len()
    );

    Ok(ExportedDocument {
        file_name: format!("{}.pdf", slugify(&carousel.title)),
        content_type: "application/pdf",
        bytes,
    })
}

/// Renders the carousel on publish pages and posts it to LinkedIn.
///
/// A failed post is returned as an unsuccessful [`PostResult`] and leaves the stored
/// status untouched. `Err` is reserved for lookup, ownership, state and storage failures.
pub async fn publish_carousel<S: CarouselStore + ?Sized>(
    store: &S,
    client: &LinkedInClient,
    credentials: &LinkedInCredentials,
    active_workspace: Option<&str>,
    carousel_id: &str,
    caption: Option<&str>,
) -> Result<PostResult> {
    let mut carousel = load_owned(store, active_workspace, carousel_id)?;
    if carousel.status() == CarouselStatus::Published {
        return Err(CarouselError::InvalidState(format!(
            "Carousel {} is already published",
            carousel_id
        )));
    }

    let document = render_carousel(&carousel, PagePreset::Publish)?;
    let caption = match caption.map(str::trim).filter(|c| !c.is_empty()) {
        Some(caption) => caption.to_string(),
        None => default_caption(&carousel),
    };

    let result = client
        .post_document(
            &credentials.access_token,
            &credentials.author_urn,
            &document,
            &carousel.title,
            &caption,
        )
        .await;
    if !result.success {
        return Ok(result);
    }

    carousel.mark_published(Utc::now(), result.post_id.clone(), result.post_url.clone())?;
    store.update_carousel_status(carousel_id, &StatusUpdate::from_carousel(&carousel))?;
    info!("Published carousel {} as {:?}", carousel_id, result.post_id);
    Ok(result)
}

/// Lowercase ASCII alphanumerics joined by single dashes. Falls back to "carousel".
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "carousel".to_string()
    } else {
        slug.to_string()
    }
}
