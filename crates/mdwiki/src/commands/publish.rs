//! `mdwiki publish` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use mdwiki_config::{CliSettings, Config};
use mdwiki_confluence::{
    ConfluenceClient, Document, DryRunResult, ImageStatus, PageAction, PageStore, PublishConfig,
    PublishResult, Publisher, dry_run,
};
use mdwiki_convert::Converter;
use tracing::info;

use crate::error::CliError;
use crate::output::Output;
use crate::scanner::Scanner;

/// Arguments for the publish command.
#[derive(Args)]
pub(crate) struct PublishArgs {
    /// Source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Image directory (overrides config).
    #[arg(short, long)]
    image_dir: Option<PathBuf>,

    /// Confluence base URL (overrides config).
    #[arg(long, env = "MDWIKI_BASE_URL")]
    base_url: Option<String>,

    /// Target space key (overrides config).
    #[arg(long, env = "MDWIKI_SPACE_KEY")]
    space_key: Option<String>,

    /// Show what would be published without contacting Confluence.
    #[arg(long)]
    dry_run: bool,

    /// Path to configuration file (default: auto-discover mdwiki.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Running totals across documents.
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    created: usize,
    updated: usize,
    failed: usize,
    uploaded: usize,
    skipped: usize,
    missing: usize,
    labels: usize,
}

impl Summary {
    fn record(&mut self, result: &PublishResult) {
        match result.action {
            PageAction::Created => self.created += 1,
            PageAction::Updated => self.updated += 1,
        }
        self.uploaded += result.image_count(ImageStatus::Uploaded);
        self.skipped += result.image_count(ImageStatus::AlreadyPresent);
        self.missing += result.image_count(ImageStatus::Missing);
        self.labels += result.labels_assigned;
    }
}

impl PublishArgs {
    /// Execute the publish command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or any document failed.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            image_dir: self.image_dir.clone(),
            base_url: self.base_url.clone(),
            space_key: self.space_key.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let docs = &config.docs_resolved;

        let documents = Scanner::new(docs.source_dir.clone(), docs.image_dir.clone()).scan();
        if documents.is_empty() {
            output.warning(&format!(
                "No Markdown documents found in {}",
                docs.source_dir.display()
            ));
            return Ok(());
        }

        if self.dry_run {
            let (base_url, space_key) = config
                .confluence
                .as_ref()
                .map_or(("", ""), |c| (c.base_url.as_str(), c.space_key.as_str()));
            let converter = Converter::new(base_url, space_key);
            let failed = preview_all(
                &converter,
                &docs.source_dir,
                &docs.image_dir,
                &documents,
                output,
            );
            output.highlight(&format!(
                "\n[DRY RUN] {} document(s), no changes made.",
                documents.len()
            ));
            return check_failures(failed, documents.len(), "be previewed");
        }

        let confluence = config.require_confluence()?;
        let client = ConfluenceClient::from_config(confluence)?;
        let converter = Converter::new(client.base_url(), &confluence.space_key);
        let publisher = Publisher::new(
            &client,
            PublishConfig::new(&confluence.space_key, &docs.image_dir),
        );

        output.info(&format!(
            "Publishing {} document(s) to space {}...",
            documents.len(),
            confluence.space_key
        ));

        let summary = publish_all(&publisher, &converter, &docs.source_dir, &documents, output);
        print_summary(output, &summary);

        check_failures(summary.failed, documents.len(), "publish")
    }
}

/// Turn a failure count into the command result.
fn check_failures(failed: usize, total: usize, action: &str) -> Result<(), CliError> {
    if failed > 0 {
        return Err(CliError::Incomplete(format!(
            "{failed} of {total} document(s) failed to {action}"
        )));
    }
    Ok(())
}

/// Publish every document, reporting failures and moving on to the next.
fn publish_all<S: PageStore + ?Sized>(
    publisher: &Publisher<'_, S>,
    converter: &Converter,
    source_dir: &Path,
    documents: &[Document],
    output: &Output,
) -> Summary {
    let mut summary = Summary::default();
    for document in documents {
        match publish_document(publisher, converter, source_dir, document) {
            Ok(result) => {
                print_publish_result(output, document, &result);
                summary.record(&result);
            }
            Err(err) => {
                output.error(&format!("  x {}: {err}", document.path().display()));
                summary.failed += 1;
            }
        }
    }
    summary
}

/// Print the dry-run report for every document. Returns how many could not
/// be read.
fn preview_all(
    converter: &Converter,
    source_dir: &Path,
    image_dir: &Path,
    documents: &[Document],
    output: &Output,
) -> usize {
    let mut failed = 0;
    for document in documents {
        match std::fs::read_to_string(source_dir.join(document.path())) {
            Ok(markdown) => {
                let result = dry_run(document, &converter.convert(&markdown), image_dir);
                print_dry_run_result(output, &result);
            }
            Err(err) => {
                output.error(&format!("  x {}: {err}", document.path().display()));
                failed += 1;
            }
        }
    }
    failed
}

fn publish_document<S: PageStore + ?Sized>(
    publisher: &Publisher<'_, S>,
    converter: &Converter,
    source_dir: &Path,
    document: &Document,
) -> Result<PublishResult, CliError> {
    info!("Publishing {}", document.path().display());
    let markdown = std::fs::read_to_string(source_dir.join(document.path()))?;
    let conversion = converter.convert(&markdown);
    Ok(publisher.publish(document, &conversion)?)
}

fn print_publish_result(output: &Output, document: &Document, result: &PublishResult) {
    let verb = match result.action {
        PageAction::Created => "created",
        PageAction::Updated => "updated",
    };
    output.success(&format!(
        "  + {} ({verb}, v{})",
        document.path().display(),
        result.page.version.number
    ));
    output.detail(&format!("    {}", result.url));
    for image in &result.images {
        if image.status == ImageStatus::Missing {
            output.warning(&format!(
                "    ! image not found: {}",
                image.path.display()
            ));
        }
    }
}

fn print_dry_run_result(output: &Output, result: &DryRunResult) {
    output.highlight(&format!("\n{}", result.title));
    if result.parents.is_empty() {
        output.info("  Parent: (space root)");
    } else {
        output.info(&format!("  Parent: {}", result.parents.join(" > ")));
    }

    if !result.images.is_empty() {
        output.info(&format!("  Images ({}):", result.images.len()));
        for (name, path, exists) in &result.images {
            if *exists {
                output.info(&format!("    -> {name}"));
            } else {
                output.warning(&format!("    -> {name} (missing: {})", path.display()));
            }
        }
    }

    if !result.labels.is_empty() {
        output.info(&format!("  Labels: {}", result.labels.join(", ")));
    }
}

fn print_summary(output: &Output, summary: &Summary) {
    output.separator();
    output.info(&format!(
        "Pages: {} created, {} updated, {} failed",
        summary.created, summary.updated, summary.failed
    ));
    output.info(&format!(
        "Attachments: {} uploaded, {} already present, {} missing",
        summary.uploaded, summary.skipped, summary.missing
    ));
    output.info(&format!("Labels assigned: {}", summary.labels));

    if summary.failed == 0 {
        output.success("Done.");
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use mdwiki_confluence::{Attachment, ConfluenceError, Label, MemoryStore, Page, PageContent};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_summary_counts() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("flow.png"), b"png").unwrap();
        let store = MemoryStore::new();
        let publisher = Publisher::new(&store, PublishConfig::new("TEST", temp.path()));
        let converter = Converter::new("https://wiki.example.com", "TEST");
        let document = Document::new("Home.md");
        let conversion = converter.convert("![[flow.png]] ![[gone.png]] #a #b");

        let mut summary = Summary::default();
        summary.record(&publisher.publish(&document, &conversion).unwrap());
        summary.record(&publisher.publish(&document, &conversion).unwrap());

        assert_eq!(
            summary,
            Summary {
                created: 1,
                updated: 1,
                failed: 0,
                uploaded: 1,
                skipped: 1,
                missing: 2,
                labels: 4,
            }
        );
    }

    fn source_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.md"), "# A #first").unwrap();
        fs::write(temp.path().join("b.md"), b"\xff\xfe\x00").unwrap();
        fs::write(temp.path().join("c.md"), "# C").unwrap();
        temp
    }

    fn documents() -> Vec<Document> {
        ["a.md", "b.md", "c.md"].into_iter().map(Document::new).collect()
    }

    #[test]
    fn test_failed_document_does_not_stop_run() {
        let temp = source_tree();
        let store = MemoryStore::new();
        let publisher = Publisher::new(&store, PublishConfig::new("TEST", temp.path()));
        let converter = Converter::new("https://wiki.example.com", "TEST");

        let summary = publish_all(
            &publisher,
            &converter,
            temp.path(),
            &documents(),
            &Output::new(),
        );

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.created, 2);
        assert_eq!(summary.labels, 1);
        assert!(store.page("TEST", "a").is_some());
        assert!(store.page("TEST", "b").is_none());
        assert!(store.page("TEST", "c").is_some());
    }

    /// Store that rejects page creation for one title.
    struct RejectingStore {
        inner: MemoryStore,
        rejected_title: &'static str,
    }

    impl PageStore for RejectingStore {
        fn find_page(
            &self,
            space_key: &str,
            title: &str,
        ) -> Result<Option<Page>, ConfluenceError> {
            self.inner.find_page(space_key, title)
        }

        fn create_page(&self, content: &PageContent<'_>) -> Result<Page, ConfluenceError> {
            if content.title == self.rejected_title {
                return Err(ConfluenceError::HttpResponse {
                    status: 500,
                    body: "Internal Server Error".to_owned(),
                });
            }
            self.inner.create_page(content)
        }

        fn update_page(
            &self,
            page_id: &str,
            content: &PageContent<'_>,
            version: u32,
        ) -> Result<Page, ConfluenceError> {
            self.inner.update_page(page_id, content, version)
        }

        fn find_attachment(
            &self,
            page_id: &str,
            filename: &str,
        ) -> Result<Option<Attachment>, ConfluenceError> {
            self.inner.find_attachment(page_id, filename)
        }

        fn create_attachment(
            &self,
            page_id: &str,
            filename: &str,
            data: &[u8],
            content_type: &str,
        ) -> Result<Attachment, ConfluenceError> {
            self.inner
                .create_attachment(page_id, filename, data, content_type)
        }

        fn add_labels(&self, page_id: &str, labels: &[Label]) -> Result<(), ConfluenceError> {
            self.inner.add_labels(page_id, labels)
        }

        fn page_url(&self, page: &Page) -> String {
            self.inner.page_url(page)
        }
    }

    #[test]
    fn test_server_error_does_not_stop_run() {
        let temp = TempDir::new().unwrap();
        for name in ["a.md", "b.md", "c.md"] {
            fs::write(temp.path().join(name), "body").unwrap();
        }
        let store = RejectingStore {
            inner: MemoryStore::new(),
            rejected_title: "b",
        };
        let publisher = Publisher::new(&store, PublishConfig::new("TEST", temp.path()));
        let converter = Converter::new("https://wiki.example.com", "TEST");

        let summary = publish_all(
            &publisher,
            &converter,
            temp.path(),
            &documents(),
            &Output::new(),
        );

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.created, 2);
        assert!(store.inner.page("TEST", "c").is_some());
    }

    #[test]
    fn test_failures_make_command_fail() {
        assert!(check_failures(0, 3, "publish").is_ok());
        let err = check_failures(1, 3, "publish").unwrap_err();
        assert_eq!(err.to_string(), "1 of 3 document(s) failed to publish");
    }

    #[test]
    fn test_dry_run_reports_unreadable_and_continues() {
        let temp = source_tree();
        let converter = Converter::new("", "");

        let failed = preview_all(
            &converter,
            temp.path(),
            &temp.path().join("Images"),
            &documents(),
            &Output::new(),
        );

        assert_eq!(failed, 1);
    }
}
