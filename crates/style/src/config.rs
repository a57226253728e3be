//! Loading style tables from a configuration directory
//!
//! The directory holds six JSON documents:
//!
//! | file               | shape                                   |
//! |--------------------|-----------------------------------------|
//! | `general.json`     | `{"attributeName": "data-util", "classAttributes": [...]}` |
//! | `root.json`        | `{"--property": "value", ...}`          |
//! | `elements.json`    | `{"tag": {"property": "value"}}`        |
//! | `custom.json`      | `{"class": {"property": "value"}}`      |
//! | `utilities.json`   | `{"utility-id": {"property": "value"}}` |
//! | `resolutions.json` | `{"viewport": {"min": 0, "max": 639}}`  |
//!
//! Object key order is significant and preserved.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::dictionary::{declarations, Breakpoint, Breakpoints, StyleDictionary};
use crate::error::{ConfigError, StyleResult};
use crate::tables::{StyleTables, DEFAULT_CLASS_ATTRIBUTES};

pub const GENERAL_FILE: &str = "general.json";
pub const ROOT_FILE: &str = "root.json";
pub const ELEMENTS_FILE: &str = "elements.json";
pub const CUSTOM_FILE: &str = "custom.json";
pub const UTILITIES_FILE: &str = "utilities.json";
pub const RESOLUTIONS_FILE: &str = "resolutions.json";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneralSettings {
    attribute_name: String,
    #[serde(default = "default_class_attributes")]
    class_attributes: Vec<String>,
}

fn default_class_attributes() -> Vec<String> {
    DEFAULT_CLASS_ATTRIBUTES.iter().map(|s| s.to_string()).collect()
}

/// A property value as written in the config: `"1rem"` or a bare number like `0`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PropertyValue {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{}", number),
        }
    }
}

type PropertyTable = IndexMap<String, PropertyValue>;
type SelectorTable = IndexMap<String, PropertyTable>;

fn property_pairs(table: PropertyTable) -> impl Iterator<Item = (String, String)> {
    table.into_iter().map(|(property, value)| (property, value.to_string()))
}

fn dictionary(table: SelectorTable) -> StyleDictionary {
    table
        .into_iter()
        .map(|(id, properties)| (id, property_pairs(properties)))
        .collect()
}

fn read_resource<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T, ConfigError> {
    let path = dir.join(file);
    let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Json { path, source })
}

impl StyleTables {
    /// Load every table from `dir`. Any missing or malformed file aborts the load.
    pub fn load(dir: impl AsRef<Path>) -> StyleResult<Self> {
        let dir = dir.as_ref();

        let general: GeneralSettings = read_resource(dir, GENERAL_FILE)?;
        let root: PropertyTable = read_resource(dir, ROOT_FILE)?;
        let elements: SelectorTable = read_resource(dir, ELEMENTS_FILE)?;
        let custom: SelectorTable = read_resource(dir, CUSTOM_FILE)?;
        let utilities: SelectorTable = read_resource(dir, UTILITIES_FILE)?;
        let resolutions: IndexMap<String, Breakpoint> = read_resource(dir, RESOLUTIONS_FILE)?;

        let tables = StyleTables::builder(general.attribute_name)
            .class_attributes(general.class_attributes)
            .root(declarations(property_pairs(root)))
            .elements(dictionary(elements))
            .custom(dictionary(custom))
            .utilities(dictionary(utilities))
            .breakpoints(resolutions.into_iter().collect::<Breakpoints>())
            .build()?;

        log::info!(
            "Loaded style tables from {}: {} root, {} elements, {} custom, {} utilities, {} breakpoints",
            dir.display(),
            tables.root().len(),
            tables.elements().len(),
            tables.custom().len(),
            tables.utilities().len(),
            tables.breakpoints().len()
        );

        Ok(tables)
    }
}
