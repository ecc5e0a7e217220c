/// Derive the URL slug Confluence uses for a page title in `/display/` links.
///
/// Characters that are neither alphanumeric nor whitespace are dropped, then
/// each whitespace run between words becomes a single `+`. Leading and
/// trailing whitespace is dropped, so `[[ Home ]]` links to `Home`.
///
/// ```
/// use mdwiki_convert::slug;
///
/// assert_eq!(slug("Home Page"), "Home+Page");
/// assert_eq!(slug("FAQ: What's new?"), "FAQ+Whats+new");
/// ```
#[must_use]
pub fn slug(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_single_word() {
        assert_eq!(slug("Home"), "Home");
    }

    #[test]
    fn test_slug_whitespace_runs_collapse() {
        assert_eq!(slug("Release  \t Notes"), "Release+Notes");
    }

    #[test]
    fn test_slug_strips_punctuation() {
        assert_eq!(slug("Polaris-LAMP (v2)"), "PolarisLAMP+v2");
    }

    #[test]
    fn test_slug_trims_edges() {
        assert_eq!(slug("  Getting Started "), "Getting+Started");
    }

    #[test]
    fn test_slug_keeps_unicode_letters() {
        assert_eq!(slug("Übersicht Daten"), "Übersicht+Daten");
    }

    #[test]
    fn test_slug_only_punctuation() {
        assert_eq!(slug("?!"), "");
    }
}
