//! Tincture Style Engine
//!
//! Builds a stylesheet for a document from static style tables: root
//! variables, element rules, the custom classes the document references and
//! one `@media` block per breakpoint for its utility tokens.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod media;
pub mod resolver;
pub mod scanner;
pub mod stylesheet;
pub mod tables;
pub mod utility;

pub use dictionary::{
    declarations, Breakpoint, Breakpoints, Declaration, Declarations, RuleFragment, StyleDictionary,
};
pub use error::{ConfigError, StyleError, StyleResult};
pub use media::MediaQueryAssembler;
pub use resolver::{ResolvedGroups, UtilityResolver};
pub use scanner::{MarkupScanner, ScannedTokens};
pub use stylesheet::{StylesheetAssembler, Stylist};
pub use tables::{StyleTables, StyleTablesBuilder, DEFAULT_CLASS_ATTRIBUTES};
pub use utility::{UtilityToken, ViewportGroups};
