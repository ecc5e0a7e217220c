//! Remote page store abstraction.
//!
//! [`PageStore`] is the set of primitive calls the [`Publisher`](crate::Publisher)
//! builds its idempotent operations on. [`ConfluenceClient`] implements it
//! over the REST API; `MemoryStore` (behind the `mock` feature) implements
//! it in memory for tests.

use crate::client::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::{Attachment, Label, Page, PageContent};

/// Primitive page, attachment and label operations.
///
/// Pages are keyed by (space key, title). Updates are version-stamped: the
/// caller passes the version it last read, and the store rejects the update
/// with a 409 [`ConfluenceError::HttpResponse`] if the page moved on since.
pub trait PageStore {
    /// Find a page by exact title. Absence is `Ok(None)`.
    fn find_page(&self, space_key: &str, title: &str) -> Result<Option<Page>, ConfluenceError>;

    /// Create a page.
    fn create_page(&self, content: &PageContent<'_>) -> Result<Page, ConfluenceError>;

    /// Replace a page's title, body and parent, moving it from `version`
    /// to `version + 1`.
    fn update_page(
        &self,
        page_id: &str,
        content: &PageContent<'_>,
        version: u32,
    ) -> Result<Page, ConfluenceError>;

    /// Find an attachment by filename on a page.
    fn find_attachment(
        &self,
        page_id: &str,
        filename: &str,
    ) -> Result<Option<Attachment>, ConfluenceError>;

    /// Upload a new attachment.
    fn create_attachment(
        &self,
        page_id: &str,
        filename: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<Attachment, ConfluenceError>;

    /// Attach labels to a page.
    fn add_labels(&self, page_id: &str, labels: &[Label]) -> Result<(), ConfluenceError>;

    /// Browser URL of a page.
    fn page_url(&self, page: &Page) -> String;
}

impl PageStore for ConfluenceClient {
    fn find_page(&self, space_key: &str, title: &str) -> Result<Option<Page>, ConfluenceError> {
        self.find_page_by_title(space_key, title)
    }

    fn create_page(&self, content: &PageContent<'_>) -> Result<Page, ConfluenceError> {
        ConfluenceClient::create_page(self, content)
    }

    fn update_page(
        &self,
        page_id: &str,
        content: &PageContent<'_>,
        version: u32,
    ) -> Result<Page, ConfluenceError> {
        ConfluenceClient::update_page(self, page_id, content, version)
    }

    fn find_attachment(
        &self,
        page_id: &str,
        filename: &str,
    ) -> Result<Option<Attachment>, ConfluenceError> {
        self.find_attachment_by_name(page_id, filename)
    }

    fn create_attachment(
        &self,
        page_id: &str,
        filename: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<Attachment, ConfluenceError> {
        ConfluenceClient::create_attachment(self, page_id, filename, data, content_type)
    }

    fn add_labels(&self, page_id: &str, labels: &[Label]) -> Result<(), ConfluenceError> {
        ConfluenceClient::add_labels(self, page_id, labels)
    }

    fn page_url(&self, page: &Page) -> String {
        self.web_url(page)
    }
}
