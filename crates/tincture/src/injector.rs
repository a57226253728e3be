//! Stylesheet injection into a parsed document

use tincture_dom::{DomResult, DomTree, NodeId, Queryable};

/// Find the `<head>`, creating it (and `<html>` if needed) when missing
fn find_or_create_head(tree: &mut DomTree) -> DomResult<NodeId> {
    if let Some(head) = tree.first_element_by_tag_name("head") {
        return Ok(head);
    }

    let html = match tree.root_element() {
        Some(html) => html,
        None => {
            let html = tree.create_element("html");
            tree.append_child(tree.document_id(), html)?;
            html
        }
    };

    let head = tree.create_element("head");
    tree.append_child(html, head)?;
    log::debug!("Created <head> for stylesheet");
    Ok(head)
}

/// The first `<style>` anywhere in the document, else a new one in `<head>`
fn find_or_create_style(tree: &mut DomTree) -> DomResult<NodeId> {
    if let Some(style) = tree.first_element_by_tag_name("style") {
        return Ok(style);
    }

    let head = find_or_create_head(tree)?;
    let style = tree.create_element("style");
    tree.append_child(head, style)?;
    log::debug!("Created <style> in <head>");
    Ok(style)
}

/// Append `css` to the document's style element.
///
/// Existing style text is kept, so injecting twice leaves both copies.
pub fn inject_stylesheet(tree: &mut DomTree, css: &str) -> DomResult<()> {
    let style = find_or_create_style(tree)?;
    tree.append_text(style, css)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tincture_html::HtmlParser;

    fn parse(html: &str) -> DomTree {
        HtmlParser::new().parse(html).unwrap()
    }

    #[test]
    fn test_creates_style_in_head() {
        let mut tree = parse("<html><head><title>t</title></head><body><p>x</p></body></html>");
        inject_stylesheet(&mut tree, "p{color:red}").unwrap();

        assert_eq!(
            tree.to_html(),
            "<html><head><title>t</title><style>p{color:red}</style></head><body><p>x</p></body></html>"
        );
    }

    #[test]
    fn test_appends_to_existing_style() {
        let mut tree = parse("<body><style>a{b:c}</style><p></p></body>");
        inject_stylesheet(&mut tree, "p{d:e}").unwrap();

        let style = tree.first_element_by_tag_name("style").unwrap();
        assert_eq!(tree.text_content(style), "a{b:c}p{d:e}");
        assert_eq!(tree.get_elements_by_tag_name("style").len(), 1);
    }

    #[test]
    fn test_empty_style_element() {
        let mut tree = parse("<head><style></style></head>");
        inject_stylesheet(&mut tree, "x{y:z}").unwrap();

        let style = tree.first_element_by_tag_name("style").unwrap();
        assert_eq!(tree.text_content(style), "x{y:z}");
    }

    #[test]
    fn test_builds_missing_html_and_head() {
        let mut tree = DomTree::new();
        inject_stylesheet(&mut tree, ":root{}").unwrap();

        assert_eq!(tree.to_html(), "<html><head><style>:root{}</style></head></html>");
    }

    #[test]
    fn test_repeated_injection_accumulates() {
        let mut tree = parse("<p>x</p>");
        inject_stylesheet(&mut tree, "a{}").unwrap();
        inject_stylesheet(&mut tree, "a{}").unwrap();

        let style = tree.first_element_by_tag_name("style").unwrap();
        assert_eq!(tree.text_content(style), "a{}a{}");
    }
}
