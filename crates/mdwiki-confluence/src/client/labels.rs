//! Label operations for Confluence API.

use tracing::info;

use super::{ConfluenceClient, read_body};
use crate::error::ConfluenceError;
use crate::types::Label;

impl ConfluenceClient {
    /// Add labels to a page.
    ///
    /// Confluence ignores labels the page already carries.
    pub(crate) fn add_labels(&self, page_id: &str, labels: &[Label]) -> Result<(), ConfluenceError> {
        let url = format!("{}/content/{}/label", self.api_url(), page_id);

        info!("Adding {} label(s) to page {}", labels.len(), page_id);

        let payload_bytes = serde_json::to_vec(labels)?;

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;

        read_body(response)?;
        Ok(())
    }
}
