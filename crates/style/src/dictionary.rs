//! Style dictionaries, breakpoints and rule fragments
//!
//! Everything here is read-only once built: there are constructors and
//! lookups, but no way to edit a table after the fact.

use indexmap::IndexMap;
use serde::Deserialize;
use smallvec::SmallVec;
use std::fmt;

/// A single `property: value` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// Declarations in configuration order
pub type Declarations = SmallVec<[Declaration; 4]>;

/// Build a declaration list from `(property, value)` pairs
pub fn declarations<I, P, V>(pairs: I) -> Declarations
where
    I: IntoIterator<Item = (P, V)>,
    P: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(property, value)| Declaration::new(property, value))
        .collect()
}

/// Write `selector{prop:val;prop:val}`
pub fn write_block(output: &mut String, selector: &str, declarations: &[Declaration]) {
    output.push_str(selector);
    output.push('{');
    for (i, declaration) in declarations.iter().enumerate() {
        if i > 0 {
            output.push(';');
        }
        output.push_str(&declaration.property);
        output.push(':');
        output.push_str(&declaration.value);
    }
    output.push('}');
}

/// Identifier (tag, class or utility id) to declarations, in configuration order
#[derive(Debug, Clone, Default)]
pub struct StyleDictionary {
    entries: IndexMap<String, Declarations>,
}

impl StyleDictionary {
    /// Look up an identifier. Absence is not an error.
    pub fn get(&self, id: &str) -> Option<&[Declaration]> {
        self.entries.get(id).map(|d| d.as_slice())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Entries in configuration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Declaration])> {
        self.entries.iter().map(|(id, d)| (id.as_str(), d.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, D, P, V> FromIterator<(K, D)> for StyleDictionary
where
    K: Into<String>,
    D: IntoIterator<Item = (P, V)>,
    P: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, D)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(id, pairs)| (id.into(), declarations(pairs)))
                .collect(),
        }
    }
}

/// A named viewport range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Breakpoint {
    /// Minimum width in pixels
    pub min: u32,
    /// Maximum width in pixels, open-ended when absent
    #[serde(default)]
    pub max: Option<u32>,
}

impl Breakpoint {
    pub fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// The `@media` prelude for this range
    pub fn media_query(&self) -> String {
        match self.max {
            Some(max) => format!(
                "@media screen and (min-width: {}px) and (max-width: {}px)",
                self.min, max
            ),
            None => format!("@media screen and (min-width: {}px)", self.min),
        }
    }
}

/// Viewport name to range. Iteration order decides media-query order.
#[derive(Debug, Clone, Default)]
pub struct Breakpoints {
    entries: IndexMap<String, Breakpoint>,
}

impl Breakpoints {
    pub fn get(&self, viewport: &str) -> Option<&Breakpoint> {
        self.entries.get(viewport)
    }

    pub fn contains(&self, viewport: &str) -> bool {
        self.entries.contains_key(viewport)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Breakpoint)> {
        self.entries.iter().map(|(name, bp)| (name.as_str(), bp))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Breakpoint)> for Breakpoints {
    fn from_iter<T: IntoIterator<Item = (K, Breakpoint)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(name, bp)| (name.into(), bp)).collect(),
        }
    }
}

/// One selector plus the declarations it applies
#[derive(Debug, Clone, PartialEq)]
pub struct RuleFragment<'a> {
    pub selector: String,
    pub declarations: &'a [Declaration],
}

impl<'a> RuleFragment<'a> {
    pub fn new(selector: impl Into<String>, declarations: &'a [Declaration]) -> Self {
        Self {
            selector: selector.into(),
            declarations,
        }
    }

    pub fn write_to(&self, output: &mut String) {
        write_block(output, &self.selector, self.declarations);
    }
}

impl fmt::Display for RuleFragment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut block = String::new();
        self.write_to(&mut block);
        f.write_str(&block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_has_no_trailing_separator() {
        let decls = declarations([("display", "flex"), ("gap", "1rem")]);
        let fragment = RuleFragment::new(".row", &decls);
        assert_eq!(fragment.to_string(), ".row{display:flex;gap:1rem}");
    }

    #[test]
    fn test_empty_block() {
        let mut output = String::new();
        write_block(&mut output, ":root", &[]);
        assert_eq!(output, ":root{}");
    }

    #[test]
    fn test_dictionary_keeps_configuration_order() {
        let dict: StyleDictionary = [
            ("zeta", vec![("color", "red")]),
            ("alpha", vec![("margin", "0"), ("padding", "0")]),
        ]
        .into_iter()
        .collect();

        let ids: Vec<&str> = dict.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["zeta", "alpha"]);
        assert_eq!(dict.get("alpha").map(|d| d.len()), Some(2));
        assert_eq!(dict.get("missing"), None);
    }

    #[test]
    fn test_media_query_prelude() {
        assert_eq!(
            Breakpoint::new(0, None).media_query(),
            "@media screen and (min-width: 0px)"
        );
        assert_eq!(
            Breakpoint::new(640, Some(1023)).media_query(),
            "@media screen and (min-width: 640px) and (max-width: 1023px)"
        );
    }
}
