//! Built-in conversion rules.
//!
//! [`default_rules`] returns them in the order the [`Converter`](crate::Converter)
//! must run them. The order matters because later patterns would otherwise
//! match inside text produced by (or reserved for) earlier ones:
//!
//! 1. [`EmbedImage`] and [`LinkImage`] first, so `![...]` is never seen as a link.
//! 2. [`AliasedWikiLink`] before [`WikiLink`], so the plain form cannot swallow the pipe.
//! 3. [`Heading`] before [`InlineTag`], so a heading's `#` run is not read as a tag.
//! 4. [`NumberedList`] after link rewriting.
//! 5. [`MarkdownLink`] last; it skips `!` and `]` in link text.

mod headings;
mod images;
mod links;
mod lists;
mod tags;

pub use headings::Heading;
pub use images::{EmbedImage, LinkImage};
pub use links::{AliasedWikiLink, LinkTarget, MarkdownLink, WikiLink};
pub use lists::NumberedList;
pub use tags::InlineTag;

use crate::Rule;

/// Built-in rules in pipeline order.
#[must_use]
pub fn default_rules(target: &LinkTarget) -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(EmbedImage),
        Box::new(LinkImage),
        Box::new(AliasedWikiLink::new(target.clone())),
        Box::new(WikiLink::new(target.clone())),
        Box::new(Heading),
        Box::new(InlineTag),
        Box::new(NumberedList),
        Box::new(MarkdownLink),
    ]
}
