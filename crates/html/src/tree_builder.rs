//! HTML Tree Builder
//!
//! Constructs a DOM tree from HTML tokens. The builder never rejects input:
//! stray end tags are ignored, missing `html`/`head`/`body` elements are
//! created, and unclosed elements are closed at end of input.

use smallvec::SmallVec;

use tincture_dom::{is_void_element, DomTree, NodeId};

use crate::error::HtmlResult;
use crate::tokenizer::{Token, Tokenizer};

/// Stack of open elements
type OpenElements = Vec<NodeId>;

/// HTML parser that builds a DOM tree
pub struct HtmlParser {
    tree: DomTree,
    open_elements: OpenElements,
    html_element: Option<NodeId>,
    head_element: Option<NodeId>,
    body_element: Option<NodeId>,
}

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self {
            tree: DomTree::new(),
            open_elements: Vec::new(),
            html_element: None,
            head_element: None,
            body_element: None,
        }
    }

    /// Parse HTML string into a DOM tree
    pub fn parse(mut self, html: &str) -> HtmlResult<DomTree> {
        for token in Tokenizer::new(html) {
            self.process_token(token)?;
        }
        Ok(self.tree)
    }

    /// Process a single token
    fn process_token(&mut self, token: Token) -> HtmlResult<()> {
        match token {
            Token::Doctype { name, public_id, system_id } => {
                let doctype = self.tree.create_doctype(name, public_id, system_id);
                self.tree.append_child(self.tree.document_id(), doctype)?;
            }

            Token::StartTag { name, attributes, self_closing } => {
                self.handle_start_tag(&name, attributes, self_closing)?;
            }

            Token::EndTag { name } => self.handle_end_tag(&name),

            Token::Text(text) => self.handle_text(&text)?,

            Token::Comment(text) => {
                let comment = self.tree.create_comment(text);
                let parent = self.current_node();
                self.tree.append_child(parent, comment)?;
            }

            Token::Eof => {}
        }
        Ok(())
    }

    /// Handle a start tag
    fn handle_start_tag(
        &mut self,
        name: &str,
        attributes: SmallVec<[(String, String); 4]>,
        self_closing: bool,
    ) -> HtmlResult<()> {
        match name {
            "html" => {
                if let Some(html) = self.html_element {
                    self.merge_attributes(html, attributes);
                } else {
                    let html = self.ensure_html()?;
                    self.merge_attributes(html, attributes);
                }
                return Ok(());
            }
            "head" => {
                if let Some(head) = self.head_element {
                    self.merge_attributes(head, attributes);
                } else if self.body_element.is_none() {
                    let head = self.ensure_head()?;
                    self.merge_attributes(head, attributes);
                    self.open_elements.push(head);
                }
                return Ok(());
            }
            "body" => {
                if let Some(body) = self.body_element {
                    self.merge_attributes(body, attributes);
                } else {
                    let body = self.ensure_body()?;
                    self.merge_attributes(body, attributes);
                }
                return Ok(());
            }
            _ => {}
        }

        let parent = if self.body_element.is_none() && is_head_content(name) {
            if self.in_head_or_before() {
                self.ensure_head()?
            } else {
                self.current_node()
            }
        } else {
            if self.body_element.is_none() {
                self.ensure_body()?;
            } else {
                self.reopen_body();
            }
            self.current_node()
        };

        let element_id = self.tree.create_element(name);
        self.merge_attributes(element_id, attributes);
        self.tree.append_child(parent, element_id)?;

        // Push to open elements (unless self-closing or void element)
        if !self_closing && !is_void_element(name) {
            self.open_elements.push(element_id);
        }

        Ok(())
    }

    /// Handle an end tag
    fn handle_end_tag(&mut self, name: &str) {
        match name {
            // Whitespace after </body> stays outside it; other content reopens it
            "body" => {
                if let Some(pos) = self.body_element.and_then(|body| self.stack_position(body)) {
                    self.open_elements.truncate(pos);
                }
                return;
            }
            "html" => {
                if self.html_element.is_some() {
                    self.open_elements.clear();
                }
                return;
            }
            _ => {}
        }

        for i in (0..self.open_elements.len()).rev() {
            let matches = self
                .tree
                .get(self.open_elements[i])
                .map(|node| node.has_tag(name))
                .unwrap_or(false);
            if matches {
                self.open_elements.truncate(i);
                return;
            }
        }

        log::trace!("Ignoring end tag </{}> with no open element", name);
    }

    /// Handle a run of character data
    fn handle_text(&mut self, text: &str) -> HtmlResult<()> {
        let whitespace_only = text.chars().all(|c| c.is_ascii_whitespace());

        if !whitespace_only {
            if self.body_element.is_none() {
                if self.in_head_or_before() {
                    self.ensure_body()?;
                }
            } else {
                self.reopen_body();
            }
        }

        let parent = self.current_node();
        self.tree.append_text(parent, text)?;
        Ok(())
    }

    /// Get the current node (top of stack or document)
    fn current_node(&self) -> NodeId {
        self.open_elements.last().copied().unwrap_or(self.tree.document_id())
    }

    /// Whether the insertion point is the document, `html` or `head` itself
    fn in_head_or_before(&self) -> bool {
        match self.open_elements.last() {
            None => true,
            Some(&top) => Some(top) == self.html_element || Some(top) == self.head_element,
        }
    }

    fn stack_position(&self, id: NodeId) -> Option<usize> {
        self.open_elements.iter().position(|&open| open == id)
    }

    /// Put `html` and `body` back on the stack after their end tags were seen
    fn reopen_body(&mut self) {
        let Some(body) = self.body_element else {
            return;
        };
        if self.stack_position(body).is_some() {
            return;
        }

        log::trace!("Reopening body for content after its end tag");
        self.open_elements.clear();
        if let Some(html) = self.html_element {
            self.open_elements.push(html);
        }
        self.open_elements.push(body);
    }

    fn merge_attributes(&mut self, id: NodeId, attributes: SmallVec<[(String, String); 4]>) {
        if let Some(elem) = self.tree.get_mut(id).and_then(|n| n.as_element_mut()) {
            for (key, value) in attributes {
                if elem.get_attribute(&key).is_none() {
                    elem.set_attribute(key, value);
                }
            }
        }
    }

    fn ensure_html(&mut self) -> HtmlResult<NodeId> {
        if let Some(html) = self.html_element {
            return Ok(html);
        }

        let html = self.tree.create_element("html");
        self.tree.append_child(self.tree.document_id(), html)?;
        self.open_elements.insert(0, html);
        self.html_element = Some(html);
        Ok(html)
    }

    fn ensure_head(&mut self) -> HtmlResult<NodeId> {
        if let Some(head) = self.head_element {
            return Ok(head);
        }

        let html = self.ensure_html()?;
        let head = self.tree.create_element("head");
        self.tree.append_child(html, head)?;
        self.head_element = Some(head);
        Ok(head)
    }

    /// Create the body, closing the head if it is still open
    fn ensure_body(&mut self) -> HtmlResult<NodeId> {
        if let Some(body) = self.body_element {
            return Ok(body);
        }

        let html = self.ensure_html()?;
        match self.stack_position(html) {
            Some(pos) => self.open_elements.truncate(pos + 1),
            None => {
                self.open_elements.clear();
                self.open_elements.push(html);
            }
        }

        let body = self.tree.create_element("body");
        self.tree.append_child(html, body)?;
        self.open_elements.push(body);
        self.body_element = Some(body);
        Ok(body)
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if a tag belongs in head (not body)
fn is_head_content(name: &str) -> bool {
    matches!(
        name,
        "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes"
        | "script" | "style" | "template" | "title"
    )
}
