//! HTML parsing error types

use thiserror::Error;
use tincture_dom::DomError;

/// HTML parsing result type
pub type HtmlResult<T> = Result<T, HtmlError>;

/// HTML parsing errors
///
/// Malformed markup is never an error; only a failure to build the tree is.
#[derive(Debug, Error)]
pub enum HtmlError {
    #[error("Tree construction failed: {0}")]
    Dom(#[from] DomError),
}
