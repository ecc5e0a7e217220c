//! In-memory page store for testing.
//!
//! Provides [`MemoryStore`] for exercising the publisher without a
//! Confluence server.

use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use crate::error::ConfluenceError;
use crate::store::PageStore;
use crate::types::{Attachment, Label, Page, PageContent, Version};

/// Page as held by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPage {
    /// Page ID.
    pub id: String,
    /// Space key.
    pub space_key: String,
    /// Page title.
    pub title: String,
    /// Wiki markup body.
    pub body: String,
    /// Parent page ID.
    pub parent_id: Option<String>,
    /// Current version number.
    pub version: u32,
}

impl StoredPage {
    fn to_page(&self) -> Page {
        Page {
            id: self.id.clone(),
            content_type: "page".to_owned(),
            title: self.title.clone(),
            version: Version {
                number: self.version,
            },
        }
    }
}

#[derive(Debug, Default)]
struct State {
    pages: Vec<StoredPage>,
    attachments: HashMap<String, Vec<Attachment>>,
    labels: HashMap<String, BTreeSet<String>>,
    next_id: u64,
    creates: usize,
    updates: usize,
    uploads: usize,
    label_calls: usize,
}

impl State {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        (100_000 + self.next_id).to_string()
    }
}

/// In-memory [`PageStore`].
///
/// Mirrors the server rules the publisher relies on: titles are unique per
/// space, updates must name the current version and keep the existing
/// parent unless a new one is given, and attachment filenames are unique
/// per page. Call counters let tests assert how many remote
/// writes an operation would have made.
///
/// # Example
///
/// ```ignore
/// use mdwiki_confluence::{MemoryStore, PublishConfig, Publisher};
///
/// let store = MemoryStore::new();
/// let publisher = Publisher::new(&store, PublishConfig::new("TEST", "images"));
///
/// publisher.upsert_page("Home", "h1. Home", None).unwrap();
/// publisher.upsert_page("Home", "h1. Home", None).unwrap();
///
/// assert_eq!(store.create_count(), 1);
/// assert_eq!(store.update_count(), 1);
/// assert_eq!(store.page("TEST", "Home").unwrap().version, 2);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an existing page at version 1.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, space_key: &str, title: &str, body: &str) -> Self {
        {
            let mut state = self.state.write().unwrap();
            let id = state.next_id();
            state.pages.push(StoredPage {
                id,
                space_key: space_key.to_owned(),
                title: title.to_owned(),
                body: body.to_owned(),
                parent_id: None,
                version: 1,
            });
        }
        self
    }

    /// Snapshot of a page by space and title.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn page(&self, space_key: &str, title: &str) -> Option<StoredPage> {
        self.state
            .read()
            .unwrap()
            .pages
            .iter()
            .find(|p| p.space_key == space_key && p.title == title)
            .cloned()
    }

    /// All pages, in creation order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn pages(&self) -> Vec<StoredPage> {
        self.state.read().unwrap().pages.clone()
    }

    /// Attachment filenames on a page, in upload order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn attachment_names(&self, page_id: &str) -> Vec<String> {
        self.state
            .read()
            .unwrap()
            .attachments
            .get(page_id)
            .map(|atts| atts.iter().map(|a| a.title.clone()).collect())
            .unwrap_or_default()
    }

    /// Labels on a page, sorted.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn labels(&self, page_id: &str) -> Vec<String> {
        self.state
            .read()
            .unwrap()
            .labels
            .get(page_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Simulate an edit made outside this process.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn edit_externally(&self, page_id: &str, body: &str) {
        let mut state = self.state.write().unwrap();
        if let Some(page) = state.pages.iter_mut().find(|p| p.id == page_id) {
            body.clone_into(&mut page.body);
            page.version += 1;
        }
    }

    /// Number of pages created through [`PageStore::create_page`].
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn create_count(&self) -> usize {
        self.state.read().unwrap().creates
    }

    /// Number of successful [`PageStore::update_page`] calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn update_count(&self) -> usize {
        self.state.read().unwrap().updates
    }

    /// Number of attachment uploads.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn upload_count(&self) -> usize {
        self.state.read().unwrap().uploads
    }

    /// Number of [`PageStore::add_labels`] calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn label_call_count(&self) -> usize {
        self.state.read().unwrap().label_calls
    }
}

fn not_found(what: &str) -> ConfluenceError {
    ConfluenceError::HttpResponse {
        status: 404,
        body: format!("{what} not found"),
    }
}

impl PageStore for MemoryStore {
    fn find_page(&self, space_key: &str, title: &str) -> Result<Option<Page>, ConfluenceError> {
        Ok(self.page(space_key, title).map(|p| p.to_page()))
    }

    fn create_page(&self, content: &PageContent<'_>) -> Result<Page, ConfluenceError> {
        let mut state = self.state.write().unwrap();

        let duplicate = state
            .pages
            .iter()
            .any(|p| p.space_key == content.space_key && p.title == content.title);
        if duplicate {
            return Err(ConfluenceError::HttpResponse {
                status: 400,
                body: format!(
                    "A page with this title already exists: {}",
                    content.title
                ),
            });
        }

        let id = state.next_id();
        let page = StoredPage {
            id,
            space_key: content.space_key.to_owned(),
            title: content.title.to_owned(),
            body: content.body.to_owned(),
            parent_id: content.parent_id.map(str::to_owned),
            version: 1,
        };
        let result = page.to_page();
        state.pages.push(page);
        state.creates += 1;
        Ok(result)
    }

    fn update_page(
        &self,
        page_id: &str,
        content: &PageContent<'_>,
        version: u32,
    ) -> Result<Page, ConfluenceError> {
        let mut state = self.state.write().unwrap();

        let page = state
            .pages
            .iter_mut()
            .find(|p| p.id == page_id)
            .ok_or_else(|| not_found("page"))?;

        if page.version != version {
            return Err(ConfluenceError::HttpResponse {
                status: 409,
                body: format!(
                    "Version must be incremented on update. Current version is: {}",
                    page.version
                ),
            });
        }

        content.title.clone_into(&mut page.title);
        content.body.clone_into(&mut page.body);
        if let Some(parent_id) = content.parent_id {
            page.parent_id = Some(parent_id.to_owned());
        }
        page.version += 1;
        let result = page.to_page();
        state.updates += 1;
        Ok(result)
    }

    fn find_attachment(
        &self,
        page_id: &str,
        filename: &str,
    ) -> Result<Option<Attachment>, ConfluenceError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .attachments
            .get(page_id)
            .and_then(|atts| atts.iter().find(|a| a.title == filename).cloned()))
    }

    fn create_attachment(
        &self,
        page_id: &str,
        filename: &str,
        _data: &[u8],
        _content_type: &str,
    ) -> Result<Attachment, ConfluenceError> {
        let mut state = self.state.write().unwrap();

        if !state.pages.iter().any(|p| p.id == page_id) {
            return Err(not_found("page"));
        }

        let attachment = Attachment {
            id: format!("att{}", state.next_id()),
            title: filename.to_owned(),
        };
        let attachments = state.attachments.entry(page_id.to_owned()).or_default();
        if attachments.iter().any(|a| a.title == filename) {
            return Err(ConfluenceError::HttpResponse {
                status: 400,
                body: format!("Cannot add a new attachment with same file name: {filename}"),
            });
        }
        attachments.push(attachment.clone());
        state.uploads += 1;
        Ok(attachment)
    }

    fn add_labels(&self, page_id: &str, labels: &[Label]) -> Result<(), ConfluenceError> {
        let mut state = self.state.write().unwrap();

        if !state.pages.iter().any(|p| p.id == page_id) {
            return Err(not_found("page"));
        }

        let set = state.labels.entry(page_id.to_owned()).or_default();
        set.extend(labels.iter().map(|l| l.name.clone()));
        state.label_calls += 1;
        Ok(())
    }

    fn page_url(&self, page: &Page) -> String {
        format!("memory://pages/viewpage.action?pageId={}", page.id)
    }
}
