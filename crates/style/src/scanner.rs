//! Raw-text attribute scanning
//!
//! Works on the markup string directly rather than on a parsed tree, so it
//! picks up attribute values even from badly broken documents.

use regex::Regex;

/// Whitespace-split attribute values pulled out of a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedTokens {
    /// Words from class-like attributes, in document order
    pub classes: Vec<String>,
    /// Words from the utility attribute, in document order
    pub utilities: Vec<String>,
}

/// Finds `name=value` pairs for a fixed set of attribute names
#[derive(Debug, Clone)]
pub struct MarkupScanner {
    class_pattern: Option<Regex>,
    utility_pattern: Regex,
}

/// Pattern for `name = "value"`, `name='value'` or `name=value`.
/// The name has to follow whitespace so `data-class` never matches `class`.
fn attribute_pattern<S: AsRef<str>>(names: &[S]) -> Result<Regex, regex::Error> {
    let alternatives: Vec<String> = names.iter().map(|name| regex::escape(name.as_ref())).collect();
    Regex::new(&format!(
        r#"(?i)(?:^|\s)(?:{})\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#,
        alternatives.join("|")
    ))
}

impl MarkupScanner {
    pub fn new<S: AsRef<str>>(class_attributes: &[S], utility_attribute: &str) -> Result<Self, regex::Error> {
        let class_pattern = if class_attributes.is_empty() {
            None
        } else {
            Some(attribute_pattern(class_attributes)?)
        };

        Ok(Self {
            class_pattern,
            utility_pattern: attribute_pattern(&[utility_attribute])?,
        })
    }

    /// Collect class and utility words. Never fails; no matches means empty lists.
    pub fn scan(&self, markup: &str) -> ScannedTokens {
        ScannedTokens {
            classes: self
                .class_pattern
                .as_ref()
                .map(|pattern| words(pattern, markup))
                .unwrap_or_default(),
            utilities: words(&self.utility_pattern, markup),
        }
    }
}

fn words(pattern: &Regex, markup: &str) -> Vec<String> {
    pattern
        .captures_iter(markup)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
        .flat_map(|value| value.as_str().split_whitespace())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> MarkupScanner {
        MarkupScanner::new(&["class", "className"], "data-util").unwrap()
    }

    #[test]
    fn test_scan_both_channels() {
        let tokens = scanner().scan(
            r#"<div class="header-hero  wide" data-util="row(lc)s+ box(sm)"><p class='x'>hi</p></div>"#,
        );

        assert_eq!(tokens.classes, ["header-hero", "wide", "x"]);
        assert_eq!(tokens.utilities, ["row(lc)s+", "box(sm)"]);
    }

    #[test]
    fn test_quoting_styles_and_spacing() {
        let tokens = scanner().scan("<a CLASS = \"one\"\tclassName=two data-util =\n'three four'>");

        assert_eq!(tokens.classes, ["one", "two"]);
        assert_eq!(tokens.utilities, ["three", "four"]);
    }

    #[test]
    fn test_prefixed_attribute_names_ignored() {
        let tokens = scanner().scan(r#"<div data-class="no" subclass="no" xdata-util="no">"#);
        assert_eq!(tokens, ScannedTokens::default());
    }

    #[test]
    fn test_generated_selectors_are_not_rescanned() {
        let tokens = scanner().scan(r#"<style>[data-util~="box(sm)"]{display:flex}</style>"#);
        assert!(tokens.utilities.is_empty());
    }

    #[test]
    fn test_malformed_markup() {
        let tokens = scanner().scan(r#"<div class="a b" <span data-util="box"</div"#);
        assert_eq!(tokens.classes, ["a", "b"]);
        assert_eq!(tokens.utilities, ["box"]);
    }

    #[test]
    fn test_unterminated_quote_yields_nothing() {
        let tokens = scanner().scan(r#"<div class="a b"#);
        assert!(tokens.classes.is_empty());
    }

    #[test]
    fn test_attribute_name_is_escaped() {
        let scanner = MarkupScanner::new(&["class"], "u.x").unwrap();
        assert_eq!(scanner.scan(r#"<i u.x="a" uzx="b">"#).utilities, ["a"]);
    }

    #[test]
    fn test_no_class_attributes() {
        let scanner = MarkupScanner::new::<&str>(&[], "data-util").unwrap();
        assert!(scanner.scan(r#"<p class="a">"#).classes.is_empty());
    }
}
