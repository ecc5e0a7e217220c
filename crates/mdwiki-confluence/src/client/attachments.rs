//! Attachment operations for Confluence API.

use rand::RngExt;
use tracing::info;

use super::{ConfluenceClient, encode_query, read_json};
use crate::error::ConfluenceError;
use crate::types::{Attachment, AttachmentsResponse};

impl ConfluenceClient {
    /// Find attachment by filename on a page.
    pub(crate) fn find_attachment_by_name(
        &self,
        page_id: &str,
        filename: &str,
    ) -> Result<Option<Attachment>, ConfluenceError> {
        let url = format!(
            "{}/content/{}/child/attachment?filename={}",
            self.api_url(),
            page_id,
            encode_query(filename)
        );

        info!("Getting attachments for page {}", page_id);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        let attachments: AttachmentsResponse = read_json(response)?;
        Ok(attachments
            .results
            .into_iter()
            .find(|a| a.title == filename))
    }

    /// Upload a new attachment.
    ///
    /// Uploaded as a minor edit so page watchers are not notified.
    pub(crate) fn create_attachment(
        &self,
        page_id: &str,
        filename: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<Attachment, ConfluenceError> {
        let url = format!("{}/content/{}/child/attachment", self.api_url(), page_id);

        info!(
            "Uploading new attachment '{}' to page {}",
            filename, page_id
        );

        let boundary = format!(
            "----MdwikiFormBoundary{:016x}",
            rand::rng().random::<u64>()
        );
        let body = multipart_body(&boundary, filename, data, content_type);

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header(
                "Content-Type",
                &format!("multipart/form-data; boundary={boundary}"),
            )
            .header("X-Atlassian-Token", "nocheck")
            .header("Accept", "application/json")
            .send(&body[..])?;

        let response: AttachmentsResponse = read_json(response)?;
        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ConfluenceError::HttpResponse {
                status: 200,
                body: "Empty attachment response".to_owned(),
            })
    }
}

/// Build a `multipart/form-data` body with the file and a `minorEdit` flag.
fn multipart_body(boundary: &str, filename: &str, data: &[u8], content_type: &str) -> Vec<u8> {
    let mut body = Vec::with_capacity(data.len() + 512);

    // File part
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(b"\r\n");

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"minorEdit\"\r\n\r\n");
    body.extend_from_slice(b"true\r\n");

    // End boundary
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_multipart_body_layout() {
        let body = multipart_body("XYZ", "pic.png", b"PNGDATA", "image/png");
        let text = String::from_utf8(body).unwrap();
        assert_eq!(
            text,
            concat!(
                "--XYZ\r\n",
                "Content-Disposition: form-data; name=\"file\"; filename=\"pic.png\"\r\n",
                "Content-Type: image/png\r\n\r\n",
                "PNGDATA\r\n",
                "--XYZ\r\n",
                "Content-Disposition: form-data; name=\"minorEdit\"\r\n\r\n",
                "true\r\n",
                "--XYZ--\r\n",
            )
        );
    }
}
