//! Confluence publishing for mdwiki.
//!
//! Publishes converted Markdown documents to Confluence Server/Data Center:
//!
//! - [`ConfluenceClient`]: sync REST client with Basic or Bearer auth
//! - [`PageStore`]: primitive page, attachment and label calls
//! - `MemoryStore`: in-memory [`PageStore`] for tests (`mock` feature)
//! - [`Publisher`]: idempotent upsert, attachment upload and labelling
//!
//! Folder hierarchy is preserved by giving each document's folders
//! placeholder pages, so `guides/setup/install.md` lands under `setup`,
//! which lands under `guides`.

mod auth;
mod client;
mod document;
mod error;
#[cfg(any(test, feature = "mock"))]
mod memory;
mod publisher;
mod store;
pub mod types;

pub use client::ConfluenceClient;
pub use document::Document;
pub use error::ConfluenceError;
#[cfg(feature = "mock")]
pub use memory::{MemoryStore, StoredPage};
pub use publisher::{
    AttachmentOutcome, DryRunResult, ImageReport, ImageStatus, PageAction, PublishConfig,
    PublishError, PublishResult, Publisher, UpsertOutcome, dry_run,
};
pub use store::PageStore;
pub use types::{Attachment, Label, Page, PageContent};
