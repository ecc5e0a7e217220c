//! Link rules: `[[Page]]`, `[[Page|Display]]` and `[text](url)`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{Rule, RuleOutput, slug};

/// `[[page|display]]`
static ALIASED_WIKI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([^\]|]+)\|([^\]]+)\]\]").expect("invalid aliased wiki link regex")
});

/// `[[page]]`
static WIKI_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("invalid wiki link regex"));

/// `[text](url)` where text holds no `!` or `]`.
static MARKDOWN_LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]!]+)\]\(([^)]+)\)").expect("invalid markdown link regex")
});

/// Where wiki links point: `<base_url>/display/<space_key>/<slug>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    base_url: String,
    space_key: String,
}

impl LinkTarget {
    /// Create a target for the given server and space.
    ///
    /// A trailing `/` on `base_url` is ignored.
    #[must_use]
    pub fn new(base_url: &str, space_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            space_key: space_key.to_owned(),
        }
    }

    /// Absolute URL of the page titled `page`.
    #[must_use]
    pub fn page_url(&self, page: &str) -> String {
        format!(
            "{}/display/{}/{}",
            self.base_url,
            self.space_key,
            slug(page)
        )
    }
}

/// Rewrites `[[Page|Display]]` to `[Display|<page url>]`.
#[derive(Debug, Clone)]
pub struct AliasedWikiLink {
    target: LinkTarget,
}

impl AliasedWikiLink {
    /// Create the rule for the given link target.
    #[must_use]
    pub fn new(target: LinkTarget) -> Self {
        Self { target }
    }
}

impl Rule for AliasedWikiLink {
    fn name(&self) -> &'static str {
        "aliased-wiki-link"
    }

    fn apply(&self, text: &str) -> RuleOutput {
        let text = ALIASED_WIKI_PATTERN.replace_all(text, |caps: &Captures| {
            format!("[{}|{}]", &caps[2], self.target.page_url(&caps[1]))
        });
        RuleOutput::text(text)
    }
}

/// Rewrites `[[Page]]` to `[Page|<page url>]`.
#[derive(Debug, Clone)]
pub struct WikiLink {
    target: LinkTarget,
}

impl WikiLink {
    /// Create the rule for the given link target.
    #[must_use]
    pub fn new(target: LinkTarget) -> Self {
        Self { target }
    }
}

impl Rule for WikiLink {
    fn name(&self) -> &'static str {
        "wiki-link"
    }

    fn apply(&self, text: &str) -> RuleOutput {
        let text = WIKI_PATTERN.replace_all(text, |caps: &Captures| {
            format!("[{}|{}]", &caps[1], self.target.page_url(&caps[1]))
        });
        RuleOutput::text(text)
    }
}

/// Rewrites `[text](url)` to `[text|url]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownLink;

impl Rule for MarkdownLink {
    fn name(&self) -> &'static str {
        "markdown-link"
    }

    fn apply(&self, text: &str) -> RuleOutput {
        RuleOutput::text(MARKDOWN_LINK_PATTERN.replace_all(text, "[${1}|${2}]"))
    }
}
