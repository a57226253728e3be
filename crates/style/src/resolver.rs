//! Utility resolution
//!
//! Turns grouped utility tokens into CSS rule text, one string per viewport.

use indexmap::IndexMap;

use crate::dictionary::RuleFragment;
use crate::tables::StyleTables;
use crate::utility::{UtilityToken, ViewportGroups};

/// Rule text per viewport, fragments concatenated in resolution order
pub type ResolvedGroups<'a> = IndexMap<&'a str, String>;

/// Escape a value for use inside a double-quoted CSS string
fn css_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Looks utility ids up in the utility dictionary
#[derive(Debug, Clone, Copy)]
pub struct UtilityResolver<'t> {
    tables: &'t StyleTables,
}

impl<'t> UtilityResolver<'t> {
    pub fn new(tables: &'t StyleTables) -> Self {
        Self { tables }
    }

    /// Split a word into id and viewport.
    ///
    /// The last-`)` split is authoritative. Only when it leaves no viewport and
    /// its id is unknown is `id(viewport)` tried, and then only if both halves
    /// are configured.
    pub fn interpret<'a>(&self, word: &'a str) -> UtilityToken<'a> {
        let token = UtilityToken::split(word);
        if !token.viewport.is_empty() || self.tables.utilities().contains(token.base_id) {
            return token;
        }

        UtilityToken::parenthesized(word)
            .filter(|alt| {
                self.tables.utilities().contains(alt.base_id)
                    && self.tables.breakpoints().contains(alt.viewport)
            })
            .unwrap_or(token)
    }

    /// The selector matching a token's original word in the utility attribute
    pub fn selector(&self, token: &UtilityToken<'_>) -> String {
        format!("[{}~=\"{}\"]", self.tables.attribute_name(), css_string(token.word))
    }

    /// Build the fragment for one token, or `None` if its id is not configured
    pub fn resolve_token(&self, token: &UtilityToken<'_>) -> Option<RuleFragment<'t>> {
        match self.tables.utilities().get(token.base_id) {
            Some(declarations) => Some(RuleFragment::new(self.selector(token), declarations)),
            None => {
                log::debug!("Dropping unknown utility '{}'", token.word);
                None
            }
        }
    }

    /// Resolve every group. Viewports whose ids all miss are left out.
    ///
    /// Groups for viewports that are not breakpoints are still resolved here;
    /// deciding what gets emitted is the media assembler's job.
    pub fn resolve<'a>(&self, groups: &ViewportGroups<'a>) -> ResolvedGroups<'a> {
        let mut resolved = ResolvedGroups::new();

        for viewport in groups.viewports() {
            let Some(tokens) = groups.get(viewport) else {
                continue;
            };

            let mut rules = String::new();
            for fragment in tokens.filter_map(|token| self.resolve_token(token)) {
                fragment.write_to(&mut rules);
            }

            if !rules.is_empty() {
                resolved.insert(viewport, rules);
            }
        }

        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{Breakpoint, StyleDictionary};

    fn tables() -> StyleTables {
        StyleTables::builder("data-util")
            .utilities(
                [
                    ("box", vec![("display", "flex")]),
                    ("row(lc)", vec![("flex-direction", "row"), ("justify-content", "flex-start")]),
                ]
                .into_iter()
                .collect::<StyleDictionary>(),
            )
            .breakpoints(
                [("sm", Breakpoint::new(0, None)), ("s+", Breakpoint::new(0, None))]
                    .into_iter()
                    .collect(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_interpret_standard_split() {
        let tables = tables();
        let resolver = UtilityResolver::new(&tables);

        let token = resolver.interpret("row(lc)s+");
        assert_eq!((token.base_id, token.viewport), ("row(lc)", "s+"));
    }

    #[test]
    fn test_interpret_parenthesized_viewport() {
        let tables = tables();
        let resolver = UtilityResolver::new(&tables);

        let token = resolver.interpret("box(sm)");
        assert_eq!((token.base_id, token.viewport, token.word), ("box", "sm", "box(sm)"));

        // exact ids win over the parenthesized reading
        let token = resolver.interpret("row(lc)");
        assert_eq!((token.base_id, token.viewport), ("row(lc)", ""));

        // unknown viewport keeps the plain split
        let token = resolver.interpret("box(xl)");
        assert_eq!((token.base_id, token.viewport), ("box(xl)", ""));
    }

    #[test]
    fn test_resolve_token_selector() {
        let tables = tables();
        let resolver = UtilityResolver::new(&tables);

        let fragment = resolver.resolve_token(&resolver.interpret("box(sm)")).unwrap();
        assert_eq!(fragment.to_string(), r#"[data-util~="box(sm)"]{display:flex}"#);

        let fragment = resolver.resolve_token(&resolver.interpret("row(lc)s+")).unwrap();
        assert_eq!(
            fragment.to_string(),
            r#"[data-util~="row(lc)s+"]{flex-direction:row;justify-content:flex-start}"#
        );
    }

    #[test]
    fn test_unknown_ids_dropped() {
        let tables = tables();
        let resolver = UtilityResolver::new(&tables);

        assert!(resolver.resolve_token(&resolver.interpret("ghost")).is_none());

        let words = ["ghost", "ghost(s)s+"];
        let groups = ViewportGroups::collect(words.iter().map(|w| resolver.interpret(w)));
        assert!(resolver.resolve(&groups).is_empty());
    }

    #[test]
    fn test_resolve_groups() {
        let tables = tables();
        let resolver = UtilityResolver::new(&tables);

        let words = ["row(lc)s+", "box(sm)", "row(lc)s+", "ghost(x)s+", "row(lc)xl"];
        let groups = ViewportGroups::collect(words.iter().map(|w| resolver.interpret(w)));
        let resolved = resolver.resolve(&groups);

        assert_eq!(
            resolved.get("s+").map(String::as_str),
            Some(r#"[data-util~="row(lc)s+"]{flex-direction:row;justify-content:flex-start}"#)
        );
        assert_eq!(
            resolved.get("sm").map(String::as_str),
            Some(r#"[data-util~="box(sm)"]{display:flex}"#)
        );
        // not a breakpoint, but still resolved
        assert!(resolved.contains_key("xl"));
    }

    #[test]
    fn test_selector_escapes_quotes() {
        let tables = tables();
        let resolver = UtilityResolver::new(&tables);
        let token = UtilityToken::split(r#"a"b\c"#);
        assert_eq!(resolver.selector(&token), r#"[data-util~="a\"b\\c"]"#);
    }
}
