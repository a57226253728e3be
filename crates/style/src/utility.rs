//! Utility token splitting and per-viewport grouping
//!
//! A utility token is a style id optionally followed by a viewport suffix.
//! Ids may themselves contain parenthesized arguments, so the split point is
//! the last `)`: `row(lc)s+` is the id `row(lc)` at viewport `s+`.

use indexmap::IndexMap;

/// One utility word broken into its parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtilityToken<'a> {
    /// The word exactly as written in the attribute
    pub word: &'a str,
    /// Style id looked up in the utility dictionary
    pub base_id: &'a str,
    /// Viewport name, empty when the word has no suffix
    pub viewport: &'a str,
}

impl<'a> UtilityToken<'a> {
    /// Split on the last `)`. A word without one is all id and no viewport.
    pub fn split(word: &'a str) -> Self {
        let word = word.trim();
        match word.rfind(')') {
            Some(close) => Self {
                word,
                base_id: &word[..=close],
                viewport: &word[close + 1..],
            },
            None => Self {
                word,
                base_id: word,
                viewport: "",
            },
        }
    }

    /// Read `id(viewport)` as the id with its viewport in parentheses.
    ///
    /// Only meaningful for words with nothing after the final `)`.
    pub fn parenthesized(word: &'a str) -> Option<Self> {
        let word = word.trim();
        let inner = word.strip_suffix(')')?;
        let open = inner.rfind('(')?;
        let base_id = &inner[..open];
        let viewport = &inner[open + 1..];

        if base_id.is_empty() || viewport.is_empty() || viewport.contains(')') {
            return None;
        }

        Some(Self { word, base_id, viewport })
    }
}

/// Unique utility ids per viewport.
///
/// Both levels keep first-seen order so output is deterministic, but callers
/// must not read meaning into it: media order comes from the breakpoint table.
#[derive(Debug, Clone, Default)]
pub struct ViewportGroups<'a> {
    groups: IndexMap<&'a str, IndexMap<&'a str, UtilityToken<'a>>>,
}

impl<'a> ViewportGroups<'a> {
    /// Group tokens by viewport, collapsing repeated ids within a viewport
    pub fn collect(tokens: impl IntoIterator<Item = UtilityToken<'a>>) -> Self {
        let mut groups: IndexMap<&'a str, IndexMap<&'a str, UtilityToken<'a>>> = IndexMap::new();
        for token in tokens {
            if token.word.is_empty() {
                continue;
            }
            log::trace!("Utility '{}' -> id '{}' at viewport '{}'", token.word, token.base_id, token.viewport);
            groups
                .entry(token.viewport)
                .or_default()
                .entry(token.base_id)
                .or_insert(token);
        }
        Self { groups }
    }

    /// Tokens for one viewport, one per distinct id
    pub fn get(&self, viewport: &str) -> Option<impl Iterator<Item = &UtilityToken<'a>>> {
        self.groups.get(viewport).map(|ids| ids.values())
    }

    /// Viewports in first-seen order
    pub fn viewports(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_last_paren() {
        let token = UtilityToken::split("row(lc)s+");
        assert_eq!(token.base_id, "row(lc)");
        assert_eq!(token.viewport, "s+");
        assert_eq!(token.word, "row(lc)s+");
    }

    #[test]
    fn test_split_nested_parens() {
        let token = UtilityToken::split("grid(a(b))m-");
        assert_eq!(token.base_id, "grid(a(b))");
        assert_eq!(token.viewport, "m-");
    }

    #[test]
    fn test_split_paren_at_end() {
        let token = UtilityToken::split("box(sm)");
        assert_eq!(token.base_id, "box(sm)");
        assert_eq!(token.viewport, "");
    }

    #[test]
    fn test_split_without_paren() {
        let token = UtilityToken::split(" ghost ");
        assert_eq!(token.word, "ghost");
        assert_eq!(token.base_id, "ghost");
        assert_eq!(token.viewport, "");
    }

    #[test]
    fn test_split_multibyte_suffix() {
        let token = UtilityToken::split("pad(1)ü");
        assert_eq!(token.base_id, "pad(1)");
        assert_eq!(token.viewport, "ü");
    }

    #[test]
    fn test_parenthesized() {
        let token = UtilityToken::parenthesized("box(sm)").unwrap();
        assert_eq!((token.base_id, token.viewport, token.word), ("box", "sm", "box(sm)"));

        assert_eq!(UtilityToken::parenthesized("row(lc)s+"), None);
        assert_eq!(UtilityToken::parenthesized("(sm)"), None);
        assert_eq!(UtilityToken::parenthesized("box()"), None);
        assert_eq!(UtilityToken::parenthesized("plain"), None);
    }

    #[test]
    fn test_group_deduplicates_per_viewport() {
        let words = ["box(x)s", "row(y)s", "box(x)s", "box(x)m", "row(y)"];
        let groups = ViewportGroups::collect(words.iter().map(|w| UtilityToken::split(w)));

        assert_eq!(groups.len(), 3);

        let small: Vec<&str> = groups.get("s").unwrap().map(|t| t.base_id).collect();
        assert_eq!(small, ["box(x)", "row(y)"]);

        let medium: Vec<&str> = groups.get("m").unwrap().map(|t| t.word).collect();
        assert_eq!(medium, ["box(x)m"]);

        let bare: Vec<&str> = groups.get("").unwrap().map(|t| t.base_id).collect();
        assert_eq!(bare, ["row(y)"]);

        assert!(groups.get("l").is_none());
    }

    #[test]
    fn test_group_skips_empty_words() {
        let groups = ViewportGroups::collect([UtilityToken::split("   ")]);
        assert!(groups.is_empty());
    }
}
