//! Confluence label types.

use serde::Serialize;

/// Prefix Confluence assigns to labels added by regular users.
const GLOBAL_PREFIX: &str = "global";

/// Label as sent to `POST /content/{id}/label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    /// Label namespace.
    pub prefix: String,
    /// Label text.
    pub name: String,
}

impl Label {
    /// Label in the `global` namespace.
    #[must_use]
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            prefix: GLOBAL_PREFIX.to_owned(),
            name: name.into(),
        }
    }
}
