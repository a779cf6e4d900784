//! Plain-text preview of a rendered document.
//!
//! Walks the parsed body and prints one line per block: table rows become
//! `cell | cell | cell`, the info grid and header blocks become their text.
//! Handy for eyeballing a document in a terminal before printing it.

use crate::dom::{body_children, collapse_whitespace, document_title, parse_html, DomNode, ElementNode, Tag};

/// Render `html` as an indented text outline.
pub fn text_outline(html: &str) -> String {
    let nodes = parse_html(html);
    let mut lines = Vec::new();

    if let Some(title) = document_title(&nodes) {
        lines.push(format!("# {title}"));
    }
    outline_nodes(&body_children(&nodes), &mut lines);

    lines.join("\n")
}

fn outline_nodes(nodes: &[DomNode], lines: &mut Vec<String>) {
    for node in nodes {
        match node {
            DomNode::Text(text) => push_line(lines, text),
            DomNode::Element(e) => outline_element(e, lines),
        }
    }
}

fn outline_element(e: &ElementNode, lines: &mut Vec<String>) {
    match e.tag {
        _ if e.tag.is_metadata() => {}
        Tag::Tr => {
            let cells: Vec<String> = e
                .find_all(&|c| matches!(c.tag, Tag::Td | Tag::Th))
                .into_iter()
                .map(|c| c.text_content())
                .collect();
            push_line(lines, &cells.join(" | "));
        }
        Tag::Table => {
            lines.push(String::new());
            outline_nodes(&e.children, lines);
            lines.push(String::new());
        }
        // Leaf blocks and multi-span rows read as one line.
        _ if is_leaf_block(e) => push_line(lines, &e.text_content()),
        _ => outline_nodes(&e.children, lines),
    }
}

/// A block whose children are all text, breaks or spans.
fn is_leaf_block(e: &ElementNode) -> bool {
    e.children.iter().all(|child| match child {
        DomNode::Text(_) => true,
        DomNode::Element(c) => matches!(c.tag, Tag::Span | Tag::Br),
    })
}

fn push_line(lines: &mut Vec<String>, text: &str) {
    let text = collapse_whitespace(text);
    if !text.is_empty() {
        lines.push(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragments::{balance_row, line_items_table, wrap_document};
    use crate::theme::Theme;

    #[test]
    fn outline_skips_style_and_lists_rows() {
        let body = format!("{}{}", line_items_table(&[]), balance_row("Opening Balance", 0.0));
        let html = wrap_document("Invoice INV-1", &body, &Theme::default());
        let outline = text_outline(&html);

        assert!(outline.starts_with("# Invoice INV-1"));
        assert!(!outline.contains("font-family"));
        assert!(outline.contains("Description | Qty | Unit Price | Tax | Amount"));
        assert!(outline.contains("No line items"));
        assert!(outline.contains("Opening Balance 0.00"));
    }
}
