//! Rule abstraction for the conversion pipeline.

/// Side-channel value discovered while rewriting text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    /// Filename of a local image that should be uploaded as an attachment.
    Image(String),
    /// Label extracted from an inline `#tag`.
    Label(String),
}

/// Result of applying a single [`Rule`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleOutput {
    /// Rewritten text.
    pub text: String,
    /// Artifacts found in the input, in source order.
    pub artifacts: Vec<Artifact>,
}

impl RuleOutput {
    /// Output carrying only rewritten text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            artifacts: Vec::new(),
        }
    }

    /// Output carrying rewritten text and collected artifacts.
    #[must_use]
    pub fn with_artifacts(text: impl Into<String>, artifacts: Vec<Artifact>) -> Self {
        Self {
            text: text.into(),
            artifacts,
        }
    }
}

/// A single textual rewrite step.
///
/// Rules are pure: the same input always produces the same output, and no
/// state is carried between calls.
///
/// # Example
///
/// ```
/// use mdwiki_convert::{Rule, RuleOutput};
///
/// struct Shout;
///
/// impl Rule for Shout {
///     fn name(&self) -> &'static str {
///         "shout"
///     }
///
///     fn apply(&self, text: &str) -> RuleOutput {
///         RuleOutput::text(text.to_uppercase())
///     }
/// }
///
/// assert_eq!(Shout.apply("hi").text, "HI");
/// ```
pub trait Rule: Send + Sync {
    /// Short identifier used in diagnostics and ordering tests.
    fn name(&self) -> &'static str;

    /// Rewrite `text`, returning the new text and any artifacts found.
    fn apply(&self, text: &str) -> RuleOutput;
}
