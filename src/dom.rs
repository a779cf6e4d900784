//! HTML parser – reads a rendered document back into a simple DOM tree.
//!
//! Only the markup the fragment builders emit needs to be understood:
//! - Document: html, head, title, meta, style, body
//! - Layout: div, span, br
//! - Tables: table, thead, tbody, tr, th, td
//!
//! Used by the text preview and by tests that assert on document structure.

use std::collections::HashMap;

// ---------------------------------------------------------------------------
// DOM types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Html,
    Head,
    Title,
    Meta,
    Style,
    Body,
    Div,
    Span,
    Br,
    Table,
    Thead,
    Tbody,
    Tr,
    Th,
    Td,
    /// Anything else is kept and treated like a div.
    Unknown(String),
}

impl Tag {
    pub fn from_name(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "html" => Tag::Html,
            "head" => Tag::Head,
            "title" => Tag::Title,
            "meta" => Tag::Meta,
            "style" => Tag::Style,
            "body" => Tag::Body,
            "div" => Tag::Div,
            "span" => Tag::Span,
            "br" => Tag::Br,
            "table" => Tag::Table,
            "thead" => Tag::Thead,
            "tbody" => Tag::Tbody,
            "tr" => Tag::Tr,
            "th" => Tag::Th,
            "td" => Tag::Td,
            _ => Tag::Unknown(s.to_string()),
        }
    }

    /// Elements that never have children or a closing tag.
    pub fn is_void(&self) -> bool {
        matches!(self, Tag::Meta | Tag::Br)
    }

    /// Elements whose content is raw text up to the matching close tag.
    pub fn is_raw_text(&self) -> bool {
        matches!(self, Tag::Style | Tag::Title)
    }

    /// Elements that carry page metadata rather than visible content.
    pub fn is_metadata(&self) -> bool {
        matches!(self, Tag::Head | Tag::Title | Tag::Meta | Tag::Style)
    }
}

#[derive(Debug, Clone)]
pub enum DomNode {
    Element(ElementNode),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct ElementNode {
    pub tag: Tag,
    pub attributes: HashMap<String, String>,
    pub children: Vec<DomNode>,
}

impl ElementNode {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attributes: HashMap::new(),
            children: Vec::new(),
        }
    }

    pub fn classes(&self) -> Vec<&str> {
        self.attributes
            .get("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Concatenated text of all descendants, whitespace collapsed.
    pub fn text_content(&self) -> String {
        let mut raw = String::new();
        collect_text(&self.children, &mut raw);
        collapse_whitespace(&raw)
    }

    /// Direct and indirect child elements matching `pred`, in document order.
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&ElementNode) -> bool) -> Vec<&'a ElementNode> {
        find_all(&self.children, pred)
    }
}

fn collect_text(nodes: &[DomNode], out: &mut String) {
    for node in nodes {
        match node {
            DomNode::Text(t) => out.push_str(t),
            DomNode::Element(e) => {
                // Elements are word boundaries: whitespace between tags is
                // dropped by the parser.
                collect_text(&e.children, out);
                out.push(' ');
            }
        }
    }
}

pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ---------------------------------------------------------------------------
// Parser – simple recursive descent over HTML
// ---------------------------------------------------------------------------

/// Parse an HTML string into a list of DOM nodes.
///
/// Hand-written for the well-formed markup this crate produces; it does not
/// attempt HTML5 error recovery.
pub fn parse_html(html: &str) -> Vec<DomNode> {
    let mut parser = Parser::new(html);
    parser.parse_nodes()
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn parse_nodes(&mut self) -> Vec<DomNode> {
        let mut nodes = Vec::new();
        loop {
            self.skip_whitespace_preserve();
            if self.eof() || self.starts_with("</") {
                break;
            }
            if let Some(node) = self.parse_node() {
                nodes.push(node);
            }
        }
        nodes
    }

    fn parse_node(&mut self) -> Option<DomNode> {
        if self.starts_with("<!--") {
            self.skip_comment();
            return None;
        }
        if self.starts_with("<!") || self.starts_with("<?") {
            // Doctype / processing instruction
            self.skip_past(">");
            return None;
        }
        if self.starts_with("<") {
            Some(self.parse_element())
        } else {
            Some(self.parse_text())
        }
    }

    fn parse_text(&mut self) -> DomNode {
        let start = self.pos;
        while !self.eof() && !self.starts_with("<") {
            self.advance_char();
        }
        DomNode::Text(decode_entities(&self.input[start..self.pos]))
    }

    fn parse_element(&mut self) -> DomNode {
        self.advance_char(); // '<'
        let tag_name = self.parse_name();
        let mut elem = ElementNode::new(Tag::from_name(&tag_name));

        loop {
            self.skip_whitespace();
            if self.eof() || self.starts_with(">") || self.starts_with("/>") {
                break;
            }
            let (key, value) = self.parse_attribute();
            if key.is_empty() {
                // Stray character inside a tag; step over it.
                self.advance_char();
                continue;
            }
            elem.attributes.insert(key.to_ascii_lowercase(), value);
        }

        if self.starts_with("/>") {
            self.pos += 2;
            return DomNode::Element(elem);
        }
        if self.starts_with(">") {
            self.pos += 1;
        }
        if elem.tag.is_void() {
            return DomNode::Element(elem);
        }

        if elem.tag.is_raw_text() {
            let close = format!("</{tag_name}");
            let start = self.pos;
            let end = self.input[start..]
                .find(&close)
                .map(|i| start + i)
                .unwrap_or(self.input.len());
            let text = &self.input[start..end];
            if !text.is_empty() {
                let text = if elem.tag == Tag::Title {
                    decode_entities(text)
                } else {
                    text.to_string()
                };
                elem.children.push(DomNode::Text(text));
            }
            self.pos = end;
        } else {
            elem.children = self.parse_nodes();
        }

        // Closing tag
        if self.starts_with("</") {
            self.skip_past(">");
        }

        DomNode::Element(elem)
    }

    fn parse_name(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.current_char() {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == ':' {
                self.advance_char();
            } else {
                break;
            }
        }
        self.input[start..self.pos].to_string()
    }

    fn parse_attribute(&mut self) -> (String, String) {
        let key = self.parse_name();
        self.skip_whitespace();
        if !self.starts_with("=") {
            return (key, String::new());
        }
        self.pos += 1;
        self.skip_whitespace();
        (key, self.parse_attr_value())
    }

    fn parse_attr_value(&mut self) -> String {
        for quote in ['"', '\''] {
            if self.current_char() == Some(quote) {
                self.advance_char();
                let start = self.pos;
                while let Some(c) = self.current_char() {
                    if c == quote {
                        break;
                    }
                    self.advance_char();
                }
                let val = decode_entities(&self.input[start..self.pos]);
                self.advance_char();
                return val;
            }
        }

        let start = self.pos;
        while let Some(c) = self.current_char() {
            if c.is_whitespace() || c == '>' || c == '/' {
                break;
            }
            self.advance_char();
        }
        decode_entities(&self.input[start..self.pos])
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance_char();
        }
    }

    fn skip_whitespace_preserve(&mut self) {
        // Drop whitespace-only runs between tags; keep it inside text.
        let saved = self.pos;
        self.skip_whitespace();
        if !self.eof() && !self.starts_with("<") {
            self.pos = saved;
        }
    }

    fn skip_comment(&mut self) {
        self.pos += 4; // "<!--"
        match self.input[self.pos..].find("-->") {
            Some(i) => self.pos += i + 3,
            None => self.pos = self.input.len(),
        }
    }

    fn skip_past(&mut self, s: &str) {
        match self.input[self.pos..].find(s) {
            Some(i) => self.pos += i + s.len(),
            None => self.pos = self.input.len(),
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance_char(&mut self) {
        if let Some(c) = self.current_char() {
            self.pos += c.len_utf8();
        }
    }
}

/// Decode the entities `escape_html` produces, plus a few common ones.
/// Single pass, so `&amp;lt;` decodes to `&lt;` and not `<`.
pub fn decode_entities(s: &str) -> String {
    const ENTITIES: [(&str, char); 7] = [
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&#39;", '\''),
        ("&apos;", '\''),
        ("&nbsp;", '\u{00A0}'),
    ];

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match ENTITIES.iter().find(|(name, _)| rest.starts_with(name)) {
            Some((name, ch)) => {
                out.push(*ch);
                rest = &rest[name.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

// ---------------------------------------------------------------------------
// Convenience helpers
// ---------------------------------------------------------------------------

/// Find the `<body>` element and return its children, or return all nodes if
/// no `<body>` is present.
pub fn body_children(nodes: &[DomNode]) -> Vec<DomNode> {
    for node in nodes {
        if let DomNode::Element(e) = node {
            if e.tag == Tag::Body {
                return e.children.clone();
            }
            if e.tag == Tag::Html {
                let inner = body_children(&e.children);
                if !inner.is_empty() {
                    return inner;
                }
            }
        }
    }
    nodes.to_vec()
}

/// All elements under `nodes` matching `pred`, depth-first in document order.
pub fn find_all<'a>(
    nodes: &'a [DomNode],
    pred: &dyn Fn(&ElementNode) -> bool,
) -> Vec<&'a ElementNode> {
    let mut found = Vec::new();
    visit(nodes, pred, &mut found);
    found
}

fn visit<'a>(
    nodes: &'a [DomNode],
    pred: &dyn Fn(&ElementNode) -> bool,
    found: &mut Vec<&'a ElementNode>,
) {
    for node in nodes {
        if let DomNode::Element(e) = node {
            if pred(e) {
                found.push(e);
            }
            visit(&e.children, pred, found);
        }
    }
}

/// All elements carrying `class`.
pub fn find_by_class<'a>(nodes: &'a [DomNode], class: &str) -> Vec<&'a ElementNode> {
    find_all(nodes, &|e| e.has_class(class))
}

/// Text of the document's `<title>`, if any.
pub fn document_title(nodes: &[DomNode]) -> Option<String> {
    find_all(nodes, &|e| e.tag == Tag::Title)
        .first()
        .map(|t| t.text_content())
}
