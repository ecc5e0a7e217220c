//! Inline `#tag` rule.

use std::sync::LazyLock;

use regex::Regex;

use crate::{Artifact, Rule, RuleOutput};

/// `#word`, anywhere in the text.
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("invalid tag regex"));

/// Removes `#tag` markers and reports each tag as a label.
///
/// The marker is deleted as-is; surrounding whitespace is left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineTag;

impl Rule for InlineTag {
    fn name(&self) -> &'static str {
        "inline-tag"
    }

    fn apply(&self, text: &str) -> RuleOutput {
        let artifacts = TAG_PATTERN
            .captures_iter(text)
            .map(|caps| Artifact::Label(caps[1].to_owned()))
            .collect();
        RuleOutput::with_artifacts(TAG_PATTERN.replace_all(text, ""), artifacts)
    }
}
