//! Tincture - utility-attribute CSS generation
//!
//! Scans an HTML document for class names and utility tokens, builds the
//! matching stylesheet from the configured style tables and writes it into
//! the document's `<style>` element.

pub mod injector;

use std::path::Path;
use std::sync::Arc;

use tincture_html::{HtmlParser, HtmlResult};
use tincture_style::{StyleResult, StyleTables, Stylist};

pub use injector::inject_stylesheet;
pub use tincture_style as style;

/// Document processor bound to one set of style tables
#[derive(Debug, Clone)]
pub struct Tincture {
    stylist: Stylist,
}

impl Tincture {
    pub fn new(tables: Arc<StyleTables>) -> StyleResult<Self> {
        Ok(Self {
            stylist: Stylist::new(tables)?,
        })
    }

    /// Load the style tables from a configuration directory
    pub fn from_config_dir(dir: impl AsRef<Path>) -> StyleResult<Self> {
        Self::new(Arc::new(StyleTables::load(dir)?))
    }

    pub fn tables(&self) -> &StyleTables {
        self.stylist.tables()
    }

    /// The stylesheet for `markup`, without touching the markup itself
    pub fn stylesheet(&self, markup: &str) -> String {
        self.stylist.stylesheet(markup)
    }

    /// Return `markup` with its stylesheet appended to the `<style>` element.
    ///
    /// Never fails. If the document cannot be rebuilt the input comes back
    /// unchanged.
    pub fn parse(&self, markup: &str) -> String {
        let css = self.stylesheet(markup);
        match self.inject(markup, &css) {
            Ok(html) => html,
            Err(e) => {
                log::warn!("Could not inject stylesheet: {}", e);
                markup.to_string()
            }
        }
    }

    fn inject(&self, markup: &str, css: &str) -> HtmlResult<String> {
        let mut tree = HtmlParser::new().parse(markup)?;
        inject_stylesheet(&mut tree, css)?;
        Ok(tree.to_html())
    }
}
