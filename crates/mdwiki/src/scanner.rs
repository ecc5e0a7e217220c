//! Document discovery by filesystem walking.

use std::fs;
use std::path::{Path, PathBuf};

use mdwiki_confluence::Document;

/// Finds the Markdown documents under a source directory.
///
/// Hidden entries and the image directory are skipped. Documents carry
/// paths relative to the source directory.
pub(crate) struct Scanner {
    source_dir: PathBuf,
    image_dir: PathBuf,
}

impl Scanner {
    /// Create a new Scanner.
    pub(crate) fn new(source_dir: PathBuf, image_dir: PathBuf) -> Self {
        Self {
            source_dir,
            image_dir,
        }
    }

    /// Scan the source directory, returning documents sorted by path.
    ///
    /// Returns an empty Vec if the source directory doesn't exist.
    pub(crate) fn scan(&self) -> Vec<Document> {
        let mut documents = Vec::new();
        if self.source_dir.is_dir() {
            self.scan_directory(&self.source_dir, Path::new(""), &mut documents);
        }
        documents.sort();
        documents
    }

    fn scan_directory(&self, dir_path: &Path, relative: &Path, documents: &mut Vec<Document>) {
        let Ok(entries) = fs::read_dir(dir_path) else {
            return;
        };

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name();
            if name.to_string_lossy().starts_with('.') {
                continue;
            }

            let path = entry.path();
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());

            if is_dir {
                if path == self.image_dir {
                    continue;
                }
                self.scan_directory(&path, &relative.join(&name), documents);
            } else if path.extension().is_some_and(|e| e == "md") {
                documents.push(Document::new(relative.join(&name)));
            }
        }
    }
}
