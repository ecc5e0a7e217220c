//! Publisher implementation.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use mdwiki_convert::ConversionResult;
use tracing::{info, warn};

use crate::document::Document;
use crate::store::PageStore;
use crate::types::{Label, PageContent};

use super::PublishConfig;
use super::error::PublishError;
use super::result::{
    AttachmentOutcome, DryRunResult, ImageReport, ImageStatus, PageAction, PublishResult,
    UpsertOutcome,
};

/// Publishes converted documents to a [`PageStore`].
pub struct Publisher<'a, S: PageStore + ?Sized> {
    store: &'a S,
    config: PublishConfig,
}

impl<'a, S: PageStore + ?Sized> Publisher<'a, S> {
    /// Create a new publisher.
    #[must_use]
    pub fn new(store: &'a S, config: PublishConfig) -> Self {
        Self { store, config }
    }

    /// Publish settings.
    #[must_use]
    pub fn config(&self) -> &PublishConfig {
        &self.config
    }

    /// ID of the page with this title in the configured space.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub fn find_page_id(&self, title: &str) -> Result<Option<String>, PublishError> {
        Ok(self
            .store
            .find_page(&self.config.space_key, title)?
            .map(|page| page.id))
    }

    /// Create the page, or update it to the next version if the title is
    /// already taken.
    ///
    /// Read-then-write: an edit landing between the lookup and the update
    /// surfaces as a version conflict error.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or the write fails.
    pub fn upsert_page(
        &self,
        title: &str,
        markup: &str,
        parent_id: Option<&str>,
    ) -> Result<UpsertOutcome, PublishError> {
        let content = PageContent {
            space_key: &self.config.space_key,
            title,
            body: markup,
            parent_id,
        };

        let (page, action) = match self.store.find_page(&self.config.space_key, title)? {
            Some(existing) => {
                let page = self
                    .store
                    .update_page(&existing.id, &content, existing.version.number)?;
                (page, PageAction::Updated)
            }
            None => (self.store.create_page(&content)?, PageAction::Created),
        };

        let url = self.store.page_url(&page);
        Ok(UpsertOutcome { page, action, url })
    }

    /// Upload a local file as an attachment unless the page already has an
    /// attachment with the same filename.
    ///
    /// Existing attachments are never overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the path has no filename, the file cannot be read,
    /// or a remote call fails.
    pub fn upload_attachment(
        &self,
        page_id: &str,
        path: &Path,
    ) -> Result<AttachmentOutcome, PublishError> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                PublishError::Validation(format!("invalid attachment path: {}", path.display()))
            })?;

        if self.store.find_attachment(page_id, filename)?.is_some() {
            info!("Attachment '{}' already on page {}", filename, page_id);
            return Ok(AttachmentOutcome::AlreadyPresent);
        }

        let data = std::fs::read(path)?;
        let content_type = mime_guess::from_path(path).first_or_octet_stream();
        self.store
            .create_attachment(page_id, filename, &data, content_type.essence_str())?;
        Ok(AttachmentOutcome::Uploaded)
    }

    /// Attach labels to a page under the `global` prefix.
    ///
    /// Makes no remote call for an empty set. Returns the number of labels
    /// sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote call fails.
    pub fn assign_labels(
        &self,
        page_id: &str,
        labels: &BTreeSet<String>,
    ) -> Result<usize, PublishError> {
        if labels.is_empty() {
            return Ok(0);
        }

        let labels: Vec<Label> = labels.iter().map(Label::global).collect();
        self.store.add_labels(page_id, &labels)?;
        Ok(labels.len())
    }

    /// Resolve the page for each folder, root first, creating empty
    /// placeholder pages where none exist.
    ///
    /// Existing pages are left untouched. Returns the ID of the innermost
    /// folder's page, or `None` for an empty chain.
    ///
    /// # Errors
    ///
    /// Returns an error if a lookup or create fails.
    pub fn resolve_parent(&self, folders: &[String]) -> Result<Option<String>, PublishError> {
        let mut parent_id: Option<String> = None;

        for folder in folders {
            let id = if let Some(id) = self.find_page_id(folder)? {
                id
            } else {
                info!("Creating placeholder page '{}'", folder);
                let content = PageContent {
                    space_key: &self.config.space_key,
                    title: folder,
                    body: "",
                    parent_id: parent_id.as_deref(),
                };
                self.store.create_page(&content)?.id
            };
            parent_id = Some(id);
        }

        Ok(parent_id)
    }

    /// Publish one converted document.
    ///
    /// Images missing from the image directory are reported and skipped;
    /// every other failure aborts the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document has no title or a remote call or
    /// file read fails.
    pub fn publish(
        &self,
        document: &Document,
        conversion: &ConversionResult,
    ) -> Result<PublishResult, PublishError> {
        let title = document.title();
        if title.is_empty() {
            return Err(PublishError::Validation(format!(
                "cannot derive a page title from {}",
                document.path().display()
            )));
        }

        let parents = document.folders();
        let parent_id = self.resolve_parent(&parents)?;

        let upserted = self.upsert_page(&title, &conversion.markup, parent_id.as_deref())?;
        let page_id = upserted.page.id.clone();

        let mut images = Vec::new();
        for (name, path) in image_paths(&conversion.image_refs, &self.config.image_dir) {
            let status = if path.is_file() {
                match self.upload_attachment(&page_id, &path)? {
                    AttachmentOutcome::Uploaded => ImageStatus::Uploaded,
                    AttachmentOutcome::AlreadyPresent => ImageStatus::AlreadyPresent,
                }
            } else {
                warn!(
                    "Image '{}' referenced by {} not found at {}",
                    name,
                    document.path().display(),
                    path.display()
                );
                ImageStatus::Missing
            };
            images.push(ImageReport { name, path, status });
        }

        let labels_assigned = self.assign_labels(&page_id, &conversion.labels)?;

        Ok(PublishResult {
            page: upserted.page,
            action: upserted.action,
            url: upserted.url,
            parents,
            images,
            labels_assigned,
        })
    }
}

/// Describe what publishing a document would do, without remote calls.
#[must_use]
pub fn dry_run(
    document: &Document,
    conversion: &ConversionResult,
    image_dir: &Path,
) -> DryRunResult {
    let images = image_paths(&conversion.image_refs, image_dir)
        .into_iter()
        .map(|(name, path)| {
            let exists = path.is_file();
            (name, path, exists)
        })
        .collect();

    DryRunResult {
        title: document.title(),
        parents: document.folders(),
        markup: conversion.markup.clone(),
        images,
        labels: conversion.labels.iter().cloned().collect(),
    }
}

/// Distinct image basenames in first-seen order, paired with their local
/// path under `image_dir`.
fn image_paths(refs: &[String], image_dir: &Path) -> Vec<(String, PathBuf)> {
    let mut seen = HashSet::new();
    refs.iter()
        .filter_map(|r| {
            let name = Path::new(r).file_name()?.to_str()?.to_owned();
            seen.insert(name.clone()).then(|| {
                let path = image_dir.join(&name);
                (name, path)
            })
        })
        .collect()
}
