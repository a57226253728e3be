//! Tincture HTML Parser
//!
//! Tolerant HTML tokenizer and tree construction.

mod tokenizer;
mod tree_builder;
mod error;

pub use tokenizer::{Tokenizer, Token};
pub use tree_builder::HtmlParser;
pub use error::{HtmlError, HtmlResult};
