//! Stylesheet assembly
//!
//! Output order is fixed: `:root`, every configured element, the custom
//! classes the document references, then the utility media queries.

use rustc_hash::FxHashSet;
use std::sync::Arc;

use crate::dictionary::write_block;
use crate::error::StyleResult;
use crate::media::MediaQueryAssembler;
use crate::resolver::UtilityResolver;
use crate::scanner::{MarkupScanner, ScannedTokens};
use crate::tables::StyleTables;
use crate::utility::ViewportGroups;

/// Concatenates the static blocks with the media-query text
#[derive(Debug, Clone, Copy)]
pub struct StylesheetAssembler<'t> {
    tables: &'t StyleTables,
}

impl<'t> StylesheetAssembler<'t> {
    pub fn new(tables: &'t StyleTables) -> Self {
        Self { tables }
    }

    /// Build the stylesheet. `classes` are the class names found in the
    /// document; `media` is the output of [`MediaQueryAssembler`].
    pub fn assemble<S: AsRef<str>>(&self, classes: &[S], media: &str) -> String {
        let mut output = String::new();

        write_block(&mut output, ":root", self.tables.root());

        for (tag, declarations) in self.tables.elements().iter() {
            write_block(&mut output, tag, declarations);
        }

        let referenced: FxHashSet<&str> = classes.iter().map(AsRef::as_ref).collect();
        for (class, declarations) in self.tables.custom().iter() {
            if referenced.contains(class) {
                write_block(&mut output, &format!(".{}", class), declarations);
            }
        }

        output.push_str(media);
        output
    }
}

/// The whole markup-to-stylesheet pipeline over one set of tables.
///
/// Cheap to clone and safe to share between threads; every call works on
/// its own scratch data.
#[derive(Debug, Clone)]
pub struct Stylist {
    tables: Arc<StyleTables>,
    scanner: MarkupScanner,
}

impl Stylist {
    pub fn new(tables: Arc<StyleTables>) -> StyleResult<Self> {
        let scanner = MarkupScanner::new(tables.class_attributes(), tables.attribute_name())?;
        Ok(Self { tables, scanner })
    }

    pub fn tables(&self) -> &StyleTables {
        &self.tables
    }

    /// Scan a document for class and utility words
    pub fn scan(&self, markup: &str) -> ScannedTokens {
        self.scanner.scan(markup)
    }

    /// Resolve utility words into `@media` blocks
    pub fn media_queries<S: AsRef<str>>(&self, utilities: &[S]) -> String {
        let resolver = UtilityResolver::new(&self.tables);
        let groups =
            ViewportGroups::collect(utilities.iter().map(|word| resolver.interpret(word.as_ref())));
        let resolved = resolver.resolve(&groups);
        MediaQueryAssembler::new(self.tables.breakpoints()).assemble(&resolved)
    }

    /// Compute the stylesheet for a document
    pub fn stylesheet(&self, markup: &str) -> String {
        let tokens = self.scan(markup);
        log::debug!(
            "Scanned {} class words and {} utility words",
            tokens.classes.len(),
            tokens.utilities.len()
        );

        let media = self.media_queries(&tokens.utilities);
        StylesheetAssembler::new(&self.tables).assemble(&tokens.classes, &media)
    }
}
