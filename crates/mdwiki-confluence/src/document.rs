//! Source document identity.

use std::path::{Component, Path, PathBuf};

/// A Markdown source document, identified by its path relative to the
/// source directory.
///
/// The page title is the file stem; each parent folder maps to an ancestor
/// page with the folder's name as its title.
///
/// # Example
///
/// ```
/// use mdwiki_confluence::Document;
///
/// let doc = Document::new("guides/setup/install.md");
/// assert_eq!(doc.title(), "install");
/// assert_eq!(doc.folders(), vec!["guides", "setup"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Document {
    path: PathBuf,
}

impl Document {
    /// Create a document from its relative path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Relative path of the document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Page title: the final path segment without its extension.
    #[must_use]
    pub fn title(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Folder names from the root down to the document's immediate parent.
    ///
    /// Empty for a root-level document.
    #[must_use]
    pub fn folders(&self) -> Vec<String> {
        let Some(parent) = self.path.parent() else {
            return Vec::new();
        };
        parent
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect()
    }

    /// Title of the immediate parent page, if any.
    #[must_use]
    pub fn parent_title(&self) -> Option<String> {
        self.folders().pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_document() {
        let doc = Document::new("Home.md");
        assert_eq!(doc.title(), "Home");
        assert!(doc.folders().is_empty());
        assert_eq!(doc.parent_title(), None);
    }

    #[test]
    fn test_nested_document() {
        let doc = Document::new("ops/runbooks/Restart Service.md");
        assert_eq!(doc.title(), "Restart Service");
        assert_eq!(doc.folders(), vec!["ops", "runbooks"]);
        assert_eq!(doc.parent_title(), Some("runbooks".to_owned()));
    }

    #[test]
    fn test_only_last_extension_stripped() {
        let doc = Document::new("notes/v1.2.md");
        assert_eq!(doc.title(), "v1.2");
    }

    #[test]
    fn test_current_dir_components_ignored() {
        let doc = Document::new("./team/page.md");
        assert_eq!(doc.folders(), vec!["team"]);
    }
}
