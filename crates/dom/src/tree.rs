//! DOM Tree structure

use rustc_hash::FxHashMap;
use std::fmt;

use crate::error::{DomError, DomResult};
use crate::node::{ElementData, Node, NodeId, NodeType};

/// DOM tree that owns all nodes
pub struct DomTree {
    /// All nodes in the tree
    nodes: FxHashMap<NodeId, Node>,
    /// Next available node ID
    next_id: u32,
    /// Root document node
    document_id: NodeId,
}

impl DomTree {
    /// Create a new empty DOM tree
    pub fn new() -> Self {
        let document_id = NodeId::new(0);
        let document = Node::new(document_id, NodeType::Document);

        let mut nodes = FxHashMap::default();
        nodes.insert(document_id, document);

        Self {
            nodes,
            next_id: 1,
            document_id,
        }
    }

    /// Get the document (root) node ID
    pub fn document_id(&self) -> NodeId {
        self.document_id
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    fn insert(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(id, node_type));
        id
    }

    /// Create a new element node
    pub fn create_element(&mut self, tag_name: impl Into<String>) -> NodeId {
        self.insert(NodeType::Element(ElementData::new(tag_name)))
    }

    /// Create a new text node
    pub fn create_text(&mut self, content: impl Into<String>) -> NodeId {
        self.insert(NodeType::Text(content.into()))
    }

    /// Create a new comment node
    pub fn create_comment(&mut self, content: impl Into<String>) -> NodeId {
        self.insert(NodeType::Comment(content.into()))
    }

    /// Create a DOCTYPE node
    pub fn create_doctype(
        &mut self,
        name: impl Into<String>,
        public_id: Option<String>,
        system_id: Option<String>,
    ) -> NodeId {
        self.insert(NodeType::Doctype {
            name: name.into(),
            public_id,
            system_id,
        })
    }

    /// Append a child node to a parent
    pub fn append_child(&mut self, parent_id: NodeId, child_id: NodeId) -> DomResult<()> {
        if parent_id == child_id {
            return Err(DomError::InvalidOperation(format!(
                "cannot append {} to itself",
                child_id
            )));
        }

        match self.get(parent_id).map(|parent| &parent.node_type) {
            None => return Err(DomError::NodeNotFound(parent_id.0)),
            Some(NodeType::Text(_) | NodeType::Comment(_)) => return Err(DomError::InvalidNodeType),
            Some(_) => {}
        }

        let child = self.get_mut(child_id).ok_or(DomError::NodeNotFound(child_id.0))?;
        child.parent = Some(parent_id);

        let parent = self.get_mut(parent_id).ok_or(DomError::NodeNotFound(parent_id.0))?;
        parent.children.push(child_id);

        Ok(())
    }

    /// Append text under a parent, extending a trailing text child if there is one
    pub fn append_text(&mut self, parent_id: NodeId, content: &str) -> DomResult<()> {
        let last_child = self
            .get(parent_id)
            .ok_or(DomError::NodeNotFound(parent_id.0))?
            .children
            .last()
            .copied();

        if let Some(last) = last_child.and_then(|id| self.get_mut(id)) {
            if let NodeType::Text(ref mut text) = last.node_type {
                text.push_str(content);
                return Ok(());
            }
        }

        let text_id = self.create_text(content);
        self.append_child(parent_id, text_id)
    }

    /// Get all children of a node
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.get(id)
            .map(|n| n.children.to_vec())
            .unwrap_or_default()
    }

    /// All descendants of a node in document order.
    ///
    /// Walks with an explicit stack, so nesting depth is bounded only by memory.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            if let Some(node) = self.get(current) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        result
    }

    /// The first element child of the document, normally `<html>`
    pub fn root_element(&self) -> Option<NodeId> {
        self.get(self.document_id)?
            .children
            .iter()
            .copied()
            .find(|&id| self.get(id).map(Node::is_element).unwrap_or(false))
    }

    /// Get the text content of a node and all its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let mut result = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.get(current) else {
                continue;
            };
            match &node.node_type {
                NodeType::Text(text) => result.push_str(text),
                _ => stack.extend(node.children.iter().rev().copied()),
            }
        }
        result
    }

    /// Get the number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (only has document node)
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DomTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomTree")
            .field("nodes", &self.nodes.len())
            .field("html", &self.to_html())
            .finish()
    }
}
