//! Result types for publish operations.

use std::path::PathBuf;

use crate::types::Page;

/// Whether an upsert created or updated the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    /// No page with the title existed.
    Created,
    /// An existing page got a new version.
    Updated,
}

/// Result of [`Publisher::upsert_page`](super::Publisher::upsert_page).
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    /// Page after the write.
    pub page: Page,
    /// What the upsert did.
    pub action: PageAction,
    /// URL to view the page.
    pub url: String,
}

/// Result of [`Publisher::upload_attachment`](super::Publisher::upload_attachment).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentOutcome {
    /// Bytes were sent.
    Uploaded,
    /// An attachment with the filename already existed; nothing was sent.
    AlreadyPresent,
}

/// What happened to one referenced image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStatus {
    /// Uploaded as a new attachment.
    Uploaded,
    /// Already attached to the page.
    AlreadyPresent,
    /// Not found under the image directory.
    Missing,
}

/// Per-image report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReport {
    /// Attachment filename.
    pub name: String,
    /// Local path the image was looked up at.
    pub path: PathBuf,
    /// Outcome.
    pub status: ImageStatus,
}

/// Result of a successful document publish.
#[derive(Debug, Clone)]
pub struct PublishResult {
    /// Published page.
    pub page: Page,
    /// Created or updated.
    pub action: PageAction,
    /// URL to view the page.
    pub url: String,
    /// Titles of the ancestor pages, root first.
    pub parents: Vec<String>,
    /// Image outcomes, one per distinct image.
    pub images: Vec<ImageReport>,
    /// Number of labels sent.
    pub labels_assigned: usize,
}

impl PublishResult {
    /// Count images with the given status.
    #[must_use]
    pub fn image_count(&self, status: ImageStatus) -> usize {
        self.images.iter().filter(|i| i.status == status).count()
    }
}

/// Result of a dry run (no remote calls made).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryRunResult {
    /// Page title.
    pub title: String,
    /// Titles of the ancestor pages, root first.
    pub parents: Vec<String>,
    /// Converted markup.
    pub markup: String,
    /// Referenced images with their local paths and whether each exists.
    pub images: Vec<(String, PathBuf, bool)>,
    /// Labels that would be assigned.
    pub labels: Vec<String>,
}
