//! Tincture DOM - Document Object Model
//!
//! Provides the DOM tree structure the injector edits, plus queries and
//! serialization back to HTML.

mod node;
mod tree;
mod error;
mod query;
mod serialize;

pub use node::{Attributes, Node, NodeId, NodeType, ElementData};
pub use tree::DomTree;
pub use error::{DomError, DomResult};
pub use query::Queryable;
pub use serialize::is_void_element;
