//! Idempotent publishing of converted documents.
//!
//! [`Publisher`] turns the primitive [`PageStore`](crate::PageStore) calls
//! into operations that are safe to repeat:
//!
//! 1. Resolve the parent chain, creating empty placeholder pages as needed
//! 2. Create the page, or update it to the next version if the title exists
//! 3. Upload each referenced image unless already attached
//! 4. Assign labels
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use mdwiki_config::Credentials;
//! use mdwiki_confluence::{ConfluenceClient, Document, PublishConfig, Publisher};
//!
//! let client = ConfluenceClient::new(
//!     "https://confluence.example.com",
//!     &Credentials::Token("secret".to_owned()),
//! );
//! let publisher = Publisher::new(&client, PublishConfig::new("DOCS", "docs/Images"));
//!
//! let document = Document::new("guides/install.md");
//! let conversion = mdwiki_convert::convert(
//!     "# Install\n\n![[setup.png]]",
//!     client.base_url(),
//!     "DOCS",
//! );
//! let result = publisher.publish(&document, &conversion)?;
//! println!("{}", result.url);
//! # Ok(())
//! # }
//! ```

mod error;
mod executor;
mod result;

pub use error::PublishError;
pub use executor::{Publisher, dry_run};
pub use result::{
    AttachmentOutcome, DryRunResult, ImageReport, ImageStatus, PageAction, PublishResult,
    UpsertOutcome,
};

use std::path::PathBuf;

/// Where documents are published and where their images come from.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Target space key.
    pub space_key: String,
    /// Directory holding the images documents embed.
    pub image_dir: PathBuf,
}

impl PublishConfig {
    /// Create a publish config.
    pub fn new(space_key: impl Into<String>, image_dir: impl Into<PathBuf>) -> Self {
        Self {
            space_key: space_key.into(),
            image_dir: image_dir.into(),
        }
    }
}
