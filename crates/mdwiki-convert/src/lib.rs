//! Markdown to Confluence wiki markup conversion.
//!
//! The conversion is a fixed, ordered list of textual [`Rule`]s. Each rule
//! rewrites one piece of Markdown syntax and reports the [`Artifact`]s it
//! found (embedded image filenames, inline tags). The [`Converter`] runs the
//! rules left to right and folds the artifacts into an immutable
//! [`ConversionResult`].
//!
//! Conversion never fails: syntax no rule recognizes passes through as-is.
//!
//! # Example
//!
//! ```
//! use mdwiki_convert::convert;
//!
//! let result = convert(
//!     "# Setup #ops\n\nSee [[Home Page]].\n\n![[diagrams/flow.png]]",
//!     "http://localhost:8090",
//!     "TEST",
//! );
//!
//! assert_eq!(
//!     result.markup,
//!     "h1. Setup \n\nSee [Home Page|http://localhost:8090/display/TEST/Home+Page].\n\n!flow.png!"
//! );
//! assert_eq!(result.image_refs, vec!["flow.png".to_owned()]);
//! assert!(result.labels.contains("ops"));
//! ```

mod converter;
mod rule;
pub mod rules;
mod slug;

pub use converter::{ConversionResult, Converter};
pub use rule::{Artifact, Rule, RuleOutput};
pub use slug::slug;

/// Convert Markdown to Confluence wiki markup with the default rule set.
///
/// `base_url` and `space_key` are used to build absolute targets for
/// `[[Page]]` wiki links.
#[must_use]
pub fn convert(markdown: &str, base_url: &str, space_key: &str) -> ConversionResult {
    Converter::new(base_url, space_key).convert(markdown)
}
