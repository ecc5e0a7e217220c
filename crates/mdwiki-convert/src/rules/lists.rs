//! Numbered list rule.

use std::sync::LazyLock;

use regex::Regex;

use crate::{Rule, RuleOutput};

/// Line-anchored `<digits>.` followed by a blank.
static NUMBERED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\d+\.[ \t]").expect("invalid numbered list regex"));

/// Rewrites `3. item` to `# item`.
///
/// The wiki dialect numbers items itself, so the explicit number is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberedList;

impl Rule for NumberedList {
    fn name(&self) -> &'static str {
        "numbered-list"
    }

    fn apply(&self, text: &str) -> RuleOutput {
        RuleOutput::text(NUMBERED_PATTERN.replace_all(text, "# "))
    }
}
