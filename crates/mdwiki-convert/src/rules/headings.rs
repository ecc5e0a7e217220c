//! ATX heading rule.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{Rule, RuleOutput};

/// Deepest heading level the wiki dialect supports.
const MAX_LEVEL: usize = 6;

/// Line-anchored `#` run, optional blanks, then the heading text.
static HEADING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#+)[ \t]*(.*)$").expect("invalid heading regex"));

/// Rewrites `## Text` to `h2. Text`.
///
/// Levels 1 through 6 keep their depth. Seven or more `#` characters are not
/// a heading: the hashes are dropped and the text is kept as a plain line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Heading;

impl Rule for Heading {
    fn name(&self) -> &'static str {
        "heading"
    }

    fn apply(&self, text: &str) -> RuleOutput {
        let text = HEADING_PATTERN.replace_all(text, |caps: &Captures| {
            let level = caps[1].len();
            let content = &caps[2];
            if level <= MAX_LEVEL {
                format!("h{level}. {content}")
            } else {
                content.to_owned()
            }
        });
        RuleOutput::text(text)
    }
}
