//! Rule pipeline.

use std::collections::BTreeSet;

use tracing::debug;

use crate::rules::{LinkTarget, default_rules};
use crate::{Artifact, Rule, RuleOutput};

/// Output of a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversionResult {
    /// Confluence wiki markup.
    pub markup: String,
    /// Filenames of embedded images, in source order, duplicates kept.
    pub image_refs: Vec<String>,
    /// Labels from inline tags, deduplicated.
    pub labels: BTreeSet<String>,
}

/// Ordered list of rules applied left to right.
pub struct Converter {
    rules: Vec<Box<dyn Rule>>,
}

impl Converter {
    /// Converter with the built-in rule set.
    ///
    /// `base_url` and `space_key` determine where `[[Page]]` links point.
    #[must_use]
    pub fn new(base_url: &str, space_key: &str) -> Self {
        Self::with_rules(default_rules(&LinkTarget::new(base_url, space_key)))
    }

    /// Converter with a custom rule list, applied in the given order.
    #[must_use]
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Names of the rules, in application order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Convert Markdown to wiki markup, collecting image refs and labels.
    #[must_use]
    pub fn convert(&self, markdown: &str) -> ConversionResult {
        let mut markup = markdown.to_owned();
        let mut artifacts = Vec::new();

        for rule in &self.rules {
            let RuleOutput {
                text,
                artifacts: found,
            } = rule.apply(&markup);
            if !found.is_empty() {
                debug!("Rule {} collected {} artifact(s)", rule.name(), found.len());
            }
            markup = text;
            artifacts.extend(found);
        }

        let mut image_refs = Vec::new();
        let mut labels = BTreeSet::new();
        for artifact in artifacts {
            match artifact {
                Artifact::Image(name) => image_refs.push(name),
                Artifact::Label(label) => {
                    labels.insert(label);
                }
            }
        }

        ConversionResult {
            markup,
            image_refs,
            labels,
        }
    }
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("rules", &self.rule_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert;
    use pretty_assertions::assert_eq;

    const BASE: &str = "http://x";
    const SPACE: &str = "SP";

    fn labels(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_rule_order() {
        let converter = Converter::new(BASE, SPACE);
        assert_eq!(
            converter.rule_names(),
            vec![
                "embed-image",
                "link-image",
                "aliased-wiki-link",
                "wiki-link",
                "heading",
                "inline-tag",
                "numbered-list",
                "markdown-link",
            ]
        );
    }

    #[test]
    fn test_plain_text_unchanged() {
        let input = "Just some prose.\n\nWith two paragraphs, and a - dash.";
        let result = convert(input, BASE, SPACE);
        assert_eq!(result.markup, input);
        assert!(result.image_refs.is_empty());
        assert!(result.labels.is_empty());
    }

    #[test]
    fn test_embed_image() {
        let result = convert("![[pic.png]]", BASE, SPACE);
        assert!(result.markup.contains("!pic.png!"));
        assert_eq!(result.image_refs, vec!["pic.png".to_owned()]);
    }

    #[test]
    fn test_embed_image_in_folder() {
        let result = convert("![[folder/pic.png]]", BASE, SPACE);
        assert!(result.markup.contains("!pic.png!"));
        assert_eq!(result.image_refs, vec!["pic.png".to_owned()]);
    }

    #[test]
    fn test_embed_without_filename_dropped() {
        let result = convert("Before ![[ ]] after ![[Images/]]", BASE, SPACE);
        assert_eq!(result.markup, "Before  after ");
        assert!(result.image_refs.is_empty());
    }

    #[test]
    fn test_wiki_link_padded_title() {
        let result = convert("[[ Home ]]", BASE, SPACE);
        assert_eq!(result.markup, "[ Home |http://x/display/SP/Home]");
    }

    #[test]
    fn test_wiki_link() {
        let result = convert("[[Home Page]]", BASE, SPACE);
        assert!(
            result
                .markup
                .contains("[Home Page|http://x/display/SP/Home+Page]")
        );
    }

    #[test]
    fn test_aliased_wiki_link() {
        let result = convert("[[Home|Go Home]]", BASE, SPACE);
        assert!(result.markup.contains("[Go Home|http://x/display/SP/Home]"));
    }

    #[test]
    fn test_headings() {
        assert!(convert("# Title", BASE, SPACE).markup.contains("h1. Title"));

        let deep = convert("####### Text", BASE, SPACE);
        assert_eq!(deep.markup, "Text");
        assert!(!deep.markup.contains("h7."));
    }

    #[test]
    fn test_inline_tags() {
        let result = convert("See #project and #todo here", BASE, SPACE);
        assert_eq!(result.labels, labels(&["project", "todo"]));
        assert_eq!(result.markup, "See  and  here");
    }

    #[test]
    fn test_duplicate_tags_collapse() {
        let result = convert("#ops first, #ops again, #dev", BASE, SPACE);
        assert_eq!(result.labels, labels(&["dev", "ops"]));
    }

    #[test]
    fn test_link_image_not_queued_for_upload() {
        let result = convert("![chart](chart.png)", BASE, SPACE);
        assert_eq!(result.markup, "!chart.png|alt=chart!");
        assert!(result.image_refs.is_empty());
    }

    #[test]
    fn test_images_are_not_read_as_links() {
        let result = convert("![[a.png]] and ![alt](b.png)", BASE, SPACE);
        assert_eq!(result.markup, "!a.png! and !b.png|alt=alt!");
        assert_eq!(result.image_refs, vec!["a.png".to_owned()]);
    }

    #[test]
    fn test_numbered_list_and_links() {
        let input = "1. Read [the guide](https://example.com/guide)\n2. Visit [[Home]]";
        let result = convert(input, BASE, SPACE);
        assert_eq!(
            result.markup,
            "# Read [the guide|https://example.com/guide]\n# Visit [Home|http://x/display/SP/Home]"
        );
    }

    #[test]
    fn test_full_document() {
        let input = "\
# Polaris LAMP #infra

Overview of [[Server Setup|the servers]].

## Steps

1. Install packages
2. Configure [Apache](https://httpd.apache.org)

![[Images/topology.png]]
![[topology.png]]
";
        let result = convert(input, "http://localhost:8090", "TEST");

        assert_eq!(
            result.markup,
            concat!(
                "h1. Polaris LAMP \n",
                "\n",
                "Overview of [the servers|http://localhost:8090/display/TEST/Server+Setup].\n",
                "\n",
                "h2. Steps\n",
                "\n",
                "# Install packages\n",
                "# Configure [Apache|https://httpd.apache.org]\n",
                "\n",
                "!topology.png!\n",
                "!topology.png!\n",
            )
        );
        assert_eq!(
            result.image_refs,
            vec!["topology.png".to_owned(), "topology.png".to_owned()]
        );
        assert_eq!(result.labels, labels(&["infra"]));
    }

    #[test]
    fn test_custom_rules() {
        let converter = Converter::with_rules(vec![Box::new(crate::rules::InlineTag)]);
        let result = converter.convert("# kept #gone");
        assert_eq!(result.markup, "# kept ");
        assert_eq!(result.labels, labels(&["gone"]));
    }
}
