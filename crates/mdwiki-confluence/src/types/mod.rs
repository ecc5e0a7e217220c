//! Confluence REST API types.
//!
//! Only the fields this crate reads are modelled; serde ignores the rest.

mod attachment;
mod label;
mod page;

pub use attachment::{Attachment, AttachmentsResponse};
pub use label::Label;
pub use page::{Page, PageContent, PagesResponse, Version};
