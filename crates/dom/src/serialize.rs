//! HTML serialization
//!
//! Writes a [`DomTree`] back out as markup. Text and comments are emitted
//! verbatim since the parser never decodes character references.

use crate::node::{Attributes, NodeId, NodeType};
use crate::tree::DomTree;

/// Elements that never have an end tag
pub fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input"
        | "link" | "meta" | "param" | "source" | "track" | "wbr"
    )
}

/// Pending serializer work
enum Step<'a> {
    Node(NodeId),
    EndTag(&'a str),
}

impl DomTree {
    /// Serialize the whole document to HTML.
    ///
    /// Uses an explicit work stack, so arbitrarily deep documents serialize
    /// without recursion.
    pub fn to_html(&self) -> String {
        let mut output = String::new();
        let mut stack = vec![Step::Node(self.document_id())];

        while let Some(step) = stack.pop() {
            match step {
                Step::EndTag(name) => {
                    output.push_str("</");
                    output.push_str(name);
                    output.push('>');
                }
                Step::Node(id) => {
                    let Some(node) = self.get(id) else {
                        continue;
                    };

                    match &node.node_type {
                        NodeType::Document => {}
                        NodeType::Doctype { name, public_id, system_id } => {
                            write_doctype(&mut output, name, public_id.as_deref(), system_id.as_deref());
                        }
                        NodeType::Element(elem) => {
                            write_start_tag(&mut output, &elem.tag_name, &elem.attributes);
                            if is_void_element(&elem.tag_name) {
                                continue;
                            }
                            stack.push(Step::EndTag(&elem.tag_name));
                        }
                        NodeType::Text(text) => output.push_str(text),
                        NodeType::Comment(text) => {
                            output.push_str("<!--");
                            output.push_str(text);
                            output.push_str("-->");
                        }
                    }

                    stack.extend(node.children.iter().rev().map(|&child| Step::Node(child)));
                }
            }
        }

        output
    }
}

fn write_doctype(output: &mut String, name: &str, public_id: Option<&str>, system_id: Option<&str>) {
    output.push_str("<!DOCTYPE ");
    output.push_str(name);
    match (public_id, system_id) {
        (Some(public), Some(system)) => {
            output.push_str(&format!(" PUBLIC \"{}\" \"{}\"", public, system));
        }
        (Some(public), None) => {
            output.push_str(&format!(" PUBLIC \"{}\"", public));
        }
        (None, Some(system)) => {
            output.push_str(&format!(" SYSTEM \"{}\"", system));
        }
        (None, None) => {}
    }
    output.push('>');
}

fn write_start_tag(output: &mut String, name: &str, attributes: &Attributes) {
    output.push('<');
    output.push_str(name);
    for (attr, value) in attributes {
        output.push(' ');
        output.push_str(attr);
        if !value.is_empty() {
            output.push_str("=\"");
            output.push_str(&value.replace('"', "&quot;"));
            output.push('"');
        }
    }
    output.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_document() {
        let mut tree = DomTree::new();
        let doctype = tree.create_doctype("html", None, None);
        let html = tree.create_element("html");
        let body = tree.create_element("body");
        let img = tree.create_element("img");
        let comment = tree.create_comment(" note ");
        let text = tree.create_text("a &amp; b");

        if let Some(elem) = tree.get_mut(img).and_then(|n| n.as_element_mut()) {
            elem.set_attribute("src", "x.png");
            elem.set_attribute("alt", "say \"hi\"");
            elem.set_attribute("hidden", "");
        }

        let doc = tree.document_id();
        tree.append_child(doc, doctype).unwrap();
        tree.append_child(doc, html).unwrap();
        tree.append_child(html, body).unwrap();
        tree.append_child(body, img).unwrap();
        tree.append_child(body, comment).unwrap();
        tree.append_child(body, text).unwrap();

        assert_eq!(
            tree.to_html(),
            "<!DOCTYPE html><html><body><img src=\"x.png\" alt=\"say &quot;hi&quot;\" hidden>\
             <!-- note -->a &amp; b</body></html>"
        );
    }

    #[test]
    fn test_serialize_doctype_identifiers() {
        let mut tree = DomTree::new();
        let doctype = tree.create_doctype(
            "html",
            Some("-//W3C//DTD HTML 4.01//EN".to_string()),
            Some("http://www.w3.org/TR/html4/strict.dtd".to_string()),
        );
        tree.append_child(tree.document_id(), doctype).unwrap();

        assert_eq!(
            tree.to_html(),
            "<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 4.01//EN\" \"http://www.w3.org/TR/html4/strict.dtd\">"
        );
    }

    #[test]
    fn test_serialize_deep_nesting() {
        let mut tree = DomTree::new();
        let mut parent = tree.document_id();
        for _ in 0..50_000 {
            let div = tree.create_element("div");
            tree.append_child(parent, div).unwrap();
            parent = div;
        }
        let br = tree.create_element("br");
        tree.append_child(parent, br).unwrap();

        let html = tree.to_html();
        assert_eq!(html, format!("{}<br>{}", "<div>".repeat(50_000), "</div>".repeat(50_000)));
    }
}
