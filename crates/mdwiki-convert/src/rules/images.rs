//! Image rules: `![[file]]` embeds and `![alt](url)` links.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{Artifact, Rule, RuleOutput};

/// `![[ref]]`
static EMBED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[\[([^\]]+)\]\]").expect("invalid embed image regex"));

/// `![alt](target)`
static LINK_IMAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("invalid link image regex")
});

/// Final path component of an embed reference.
///
/// Both `/` and `\` count as separators because vaults are authored on
/// either platform.
fn basename(reference: &str) -> &str {
    let trimmed = reference.trim();
    trimmed
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(trimmed)
}

/// Rewrites `![[path/to/pic.png]]` to `!pic.png!` and reports `pic.png`
/// as an image to upload.
///
/// Embeds with no filename, such as `![[ ]]` or `![[dir/]]`, are removed
/// and not reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbedImage;

impl Rule for EmbedImage {
    fn name(&self) -> &'static str {
        "embed-image"
    }

    fn apply(&self, text: &str) -> RuleOutput {
        let artifacts = EMBED_PATTERN
            .captures_iter(text)
            .map(|caps| basename(&caps[1]).to_owned())
            .filter(|name| !name.is_empty())
            .map(Artifact::Image)
            .collect();
        let text = EMBED_PATTERN.replace_all(text, |caps: &Captures| {
            let name = basename(&caps[1]);
            if name.is_empty() {
                String::new()
            } else {
                format!("!{name}!")
            }
        });
        RuleOutput::with_artifacts(text, artifacts)
    }
}

/// Rewrites `![alt](target)` to `!target|alt=alt!`.
///
/// The target is treated as externally hosted and is not reported for
/// upload.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkImage;

impl Rule for LinkImage {
    fn name(&self) -> &'static str {
        "link-image"
    }

    fn apply(&self, text: &str) -> RuleOutput {
        RuleOutput::text(LINK_IMAGE_PATTERN.replace_all(text, "!${2}|alt=${1}!"))
    }
}
