//! Confluence page types.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Confluence page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// Content type (always "page").
    #[serde(rename = "type")]
    pub content_type: String,
    /// Page title.
    pub title: String,
    /// Version information.
    pub version: Version,
}

/// Page version.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Version {
    /// Version number.
    pub number: u32,
}

/// Content search response (`GET /content?spaceKey=..&title=..`).
#[derive(Debug, Clone, Deserialize)]
pub struct PagesResponse {
    /// Matching pages.
    pub results: Vec<Page>,
}

/// Page content to create or update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContent<'a> {
    /// Space key the page lives in.
    pub space_key: &'a str,
    /// Page title.
    pub title: &'a str,
    /// Body in wiki markup.
    pub body: &'a str,
    /// ID of the parent page, if any.
    pub parent_id: Option<&'a str>,
}

impl PageContent<'_> {
    /// JSON payload for `POST /content` (create) or `PUT /content/{id}`
    /// (update, when `next_version` is given).
    pub(crate) fn to_payload(&self, next_version: Option<u32>) -> Value {
        let mut payload = json!({
            "type": "page",
            "title": self.title,
            "space": {"key": self.space_key},
            "body": {
                "storage": {
                    "value": self.body,
                    "representation": "wiki"
                }
            }
        });

        if let Some(parent_id) = self.parent_id {
            payload["ancestors"] = json!([{"id": parent_id}]);
        }
        if let Some(number) = next_version {
            payload["version"] = json!({"number": number});
        }

        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn content(parent_id: Option<&str>) -> PageContent<'_> {
        PageContent {
            space_key: "TEST",
            title: "Polaris LAMP",
            body: "h1. Polaris",
            parent_id,
        }
    }

    #[test]
    fn test_create_payload() {
        let payload = content(None).to_payload(None);
        assert_eq!(
            payload,
            json!({
                "type": "page",
                "title": "Polaris LAMP",
                "space": {"key": "TEST"},
                "body": {"storage": {"value": "h1. Polaris", "representation": "wiki"}}
            })
        );
    }

    #[test]
    fn test_update_payload_with_parent() {
        let payload = content(Some("42")).to_payload(Some(4));
        assert_eq!(payload["ancestors"], json!([{"id": "42"}]));
        assert_eq!(payload["version"], json!({"number": 4}));
    }

    #[test]
    fn test_page_deserialize_ignores_unknown_fields() {
        let page: Page = serde_json::from_str(
            r#"{
                "id": "123",
                "type": "page",
                "status": "current",
                "title": "Home",
                "version": {"number": 7, "minorEdit": false},
                "_links": {"webui": "/display/TEST/Home", "self": "http://x"}
            }"#,
        )
        .unwrap();
        assert_eq!(page.id, "123");
        assert_eq!(page.title, "Home");
        assert_eq!(page.version.number, 7);
    }
}
