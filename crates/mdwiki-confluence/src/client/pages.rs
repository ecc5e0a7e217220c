//! Page operations for Confluence API.

use tracing::info;

use super::{ConfluenceClient, encode_query, read_json};
use crate::error::ConfluenceError;
use crate::types::{Page, PageContent, PagesResponse};

impl ConfluenceClient {
    /// Find a page by exact title within a space.
    ///
    /// The version is expanded so the result can be used for an update.
    pub(crate) fn find_page_by_title(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<Option<Page>, ConfluenceError> {
        let url = format!(
            "{}/content?type=page&spaceKey={}&title={}&expand=version",
            self.api_url(),
            encode_query(space_key),
            encode_query(title)
        );

        info!("Looking up page '{}' in space {}", title, space_key);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        let pages: PagesResponse = read_json(response)?;
        Ok(pages.results.into_iter().find(|p| p.title == title))
    }

    /// Create a new page.
    pub(crate) fn create_page(&self, content: &PageContent<'_>) -> Result<Page, ConfluenceError> {
        let url = format!("{}/content", self.api_url());

        info!(
            "Creating page '{}' in space {}",
            content.title, content.space_key
        );

        let payload_bytes = serde_json::to_vec(&content.to_payload(None))?;

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;

        let page: Page = read_json(response)?;
        info!("Created page {} ('{}')", page.id, page.title);
        Ok(page)
    }

    /// Update existing page (auto-increments version).
    ///
    /// `version` is the current version; the update is tagged `version + 1`.
    pub(crate) fn update_page(
        &self,
        page_id: &str,
        content: &PageContent<'_>,
        version: u32,
    ) -> Result<Page, ConfluenceError> {
        let url = format!("{}/content/{}", self.api_url(), page_id);

        info!(
            "Updating page {} from version {} to {}",
            page_id,
            version,
            version + 1
        );

        let payload_bytes = serde_json::to_vec(&content.to_payload(Some(version + 1)))?;

        let response = self
            .agent
            .put(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;

        let page: Page = read_json(response)?;
        info!(
            "Updated page {} to version {}",
            page_id, page.version.number
        );
        Ok(page)
    }

    /// Get web URL for page.
    pub(crate) fn web_url(&self, page: &Page) -> String {
        format!(
            "{}/pages/viewpage.action?pageId={}",
            self.base_url, page.id
        )
    }
}
