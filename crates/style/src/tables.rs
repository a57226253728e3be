//! The immutable style tables every call resolves against

use crate::dictionary::{Breakpoints, Declarations, StyleDictionary};
use crate::error::{ConfigError, StyleResult};

/// Attribute names scanned for class references when none are configured
pub const DEFAULT_CLASS_ATTRIBUTES: [&str; 2] = ["class", "className"];

/// Root variables, element/custom/utility dictionaries and breakpoints.
///
/// Built once through [`StyleTablesBuilder`] (or loaded from a config
/// directory) and only read afterwards, so it can be shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct StyleTables {
    attribute_name: String,
    class_attributes: Vec<String>,
    root: Declarations,
    elements: StyleDictionary,
    custom: StyleDictionary,
    utilities: StyleDictionary,
    breakpoints: Breakpoints,
}

impl StyleTables {
    /// Start building tables for the given utility attribute
    pub fn builder(attribute_name: impl Into<String>) -> StyleTablesBuilder {
        StyleTablesBuilder {
            attribute_name: attribute_name.into(),
            class_attributes: DEFAULT_CLASS_ATTRIBUTES.iter().map(|s| s.to_string()).collect(),
            root: Declarations::new(),
            elements: StyleDictionary::default(),
            custom: StyleDictionary::default(),
            utilities: StyleDictionary::default(),
            breakpoints: Breakpoints::default(),
        }
    }

    /// The attribute carrying utility tokens
    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    /// Attributes scanned for class names
    pub fn class_attributes(&self) -> &[String] {
        &self.class_attributes
    }

    pub fn root(&self) -> &Declarations {
        &self.root
    }

    pub fn elements(&self) -> &StyleDictionary {
        &self.elements
    }

    pub fn custom(&self) -> &StyleDictionary {
        &self.custom
    }

    pub fn utilities(&self) -> &StyleDictionary {
        &self.utilities
    }

    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }
}

/// Assembles and validates a [`StyleTables`]
#[derive(Debug)]
pub struct StyleTablesBuilder {
    attribute_name: String,
    class_attributes: Vec<String>,
    root: Declarations,
    elements: StyleDictionary,
    custom: StyleDictionary,
    utilities: StyleDictionary,
    breakpoints: Breakpoints,
}

impl StyleTablesBuilder {
    pub fn class_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class_attributes = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn root(mut self, root: Declarations) -> Self {
        self.root = root;
        self
    }

    pub fn elements(mut self, elements: StyleDictionary) -> Self {
        self.elements = elements;
        self
    }

    pub fn custom(mut self, custom: StyleDictionary) -> Self {
        self.custom = custom;
        self
    }

    pub fn utilities(mut self, utilities: StyleDictionary) -> Self {
        self.utilities = utilities;
        self
    }

    pub fn breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    /// Validate and freeze the tables
    pub fn build(self) -> StyleResult<StyleTables> {
        let attribute_name = self.attribute_name.trim().to_string();
        if attribute_name.is_empty() || attribute_name.contains(char::is_whitespace) {
            return Err(ConfigError::invalid(format!(
                "attributeName must be a single attribute name, got {:?}",
                self.attribute_name
            ))
            .into());
        }

        if let Some(bad) = self
            .class_attributes
            .iter()
            .find(|name| name.is_empty() || name.contains(char::is_whitespace))
        {
            return Err(ConfigError::invalid(format!("invalid class attribute name {:?}", bad)).into());
        }

        for (name, bp) in self.breakpoints.iter() {
            if let Some(max) = bp.max {
                if max < bp.min {
                    return Err(ConfigError::invalid(format!(
                        "breakpoint '{}' has max {} below min {}",
                        name, max, bp.min
                    ))
                    .into());
                }
            }
        }

        Ok(StyleTables {
            attribute_name,
            class_attributes: self.class_attributes,
            root: self.root,
            elements: self.elements,
            custom: self.custom,
            utilities: self.utilities,
            breakpoints: self.breakpoints,
        })
    }
}
