use crate::{Element, Node};

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
    "source", "track", "wbr",
];

pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// Lenient fragment parser. Unclosed elements are closed at end of input,
/// stray close tags are dropped, comments and doctypes are skipped, and a
/// bare `<` that does not open a tag is treated as text.
pub fn parse(html: &str) -> Vec<Node> {
    Parser::new(html).run()
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    src: &'a str,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            input: src.as_bytes(),
            pos: 0,
            src,
        }
    }

    fn run(mut self) -> Vec<Node> {
        let mut stack: Vec<Element> = vec![Element::new("#fragment")];
        let mut text_start = self.pos;

        while self.pos < self.input.len() {
            if self.input[self.pos] != b'<' {
                self.pos += 1;
                continue;
            }
            let tag_start = self.pos;
            match self.scan_tag() {
                Some(Tag::Open { element, void }) => {
                    flush_text(&mut stack, &self.src[text_start..tag_start]);
                    if void {
                        attach(&mut stack, Node::Element(element));
                    } else {
                        stack.push(element);
                    }
                    text_start = self.pos;
                }
                Some(Tag::Close(tag)) => {
                    flush_text(&mut stack, &self.src[text_start..tag_start]);
                    close_tag(&mut stack, &tag);
                    text_start = self.pos;
                }
                Some(Tag::Skip) => {
                    flush_text(&mut stack, &self.src[text_start..tag_start]);
                    text_start = self.pos;
                }
                None => {
                    // literal '<' in text
                    self.pos = tag_start + 1;
                }
            }
        }
        flush_text(&mut stack, &self.src[text_start..]);

        // close everything still open
        while stack.len() > 1 {
            if let Some(el) = stack.pop() {
                attach(&mut stack, Node::Element(el));
            }
        }
        stack.pop().map(|root| root.children).unwrap_or_default()
    }

    fn scan_tag(&mut self) -> Option<Tag> {
        let rest = &self.src[self.pos..];
        if rest.starts_with("<!--") {
            let end = rest.find("-->").map(|i| i + 3).unwrap_or(rest.len());
            self.pos += end;
            return Some(Tag::Skip);
        }
        if rest.starts_with("<!") {
            let end = rest.find('>').map(|i| i + 1).unwrap_or(rest.len());
            self.pos += end;
            return Some(Tag::Skip);
        }
        if let Some(after) = rest.strip_prefix("</") {
            let name: String = after
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
                .collect();
            if name.is_empty() {
                return None;
            }
            let end = rest.find('>').map(|i| i + 1).unwrap_or(rest.len());
            self.pos += end;
            return Some(Tag::Close(name.to_ascii_lowercase()));
        }
        let after = &rest[1..];
        if !after.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return None;
        }
        let name: String = after
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();
        self.pos += 1 + name.len();
        let mut element = Element::new(&name);
        let self_closed = self.scan_attrs(&mut element);
        let void = self_closed || is_void_tag(&element.tag);
        Some(Tag::Open { element, void })
    }

    /// Scan attributes up to and including `>`. Returns true on `/>`.
    fn scan_attrs(&mut self, element: &mut Element) -> bool {
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return false,
                Some(b'>') => {
                    self.pos += 1;
                    return false;
                }
                Some(b'/') => {
                    self.pos += 1;
                    if self.peek() == Some(b'>') {
                        self.pos += 1;
                        return true;
                    }
                }
                Some(_) => {
                    let name = self.scan_attr_name();
                    if name.is_empty() {
                        self.pos += 1;
                        continue;
                    }
                    self.skip_whitespace();
                    let value = if self.peek() == Some(b'=') {
                        self.pos += 1;
                        self.skip_whitespace();
                        self.scan_attr_value()
                    } else {
                        String::new()
                    };
                    element.set_attr(&name.to_ascii_lowercase(), &value);
                }
            }
        }
    }

    fn scan_attr_name(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() || c == b'=' || c == b'>' || c == b'/' {
                break;
            }
            self.pos += 1;
        }
        self.src[start..self.pos].to_string()
    }

    fn scan_attr_value(&mut self) -> String {
        match self.peek() {
            Some(q @ (b'"' | b'\'')) => {
                self.pos += 1;
                let start = self.pos;
                while let Some(c) = self.peek() {
                    if c == q {
                        break;
                    }
                    self.pos += 1;
                }
                let raw = &self.src[start..self.pos];
                if self.peek() == Some(q) {
                    self.pos += 1;
                }
                html_escape::decode_html_entities(raw).into_owned()
            }
            _ => {
                let start = self.pos;
                while let Some(c) = self.peek() {
                    if c.is_ascii_whitespace() || c == b'>' {
                        break;
                    }
                    self.pos += 1;
                }
                html_escape::decode_html_entities(&self.src[start..self.pos]).into_owned()
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }
}

enum Tag {
    Open { element: Element, void: bool },
    Close(String),
    Skip,
}

fn flush_text(stack: &mut Vec<Element>, raw: &str) {
    if raw.is_empty() {
        return;
    }
    let decoded = html_escape::decode_html_entities(raw).into_owned();
    attach(stack, Node::Text(decoded));
}

fn attach(stack: &mut Vec<Element>, node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn close_tag(stack: &mut Vec<Element>, tag: &str) {
    let open_at = stack.iter().rposition(|el| el.tag == tag);
    let Some(open_at) = open_at else {
        return; // stray close tag
    };
    if open_at == 0 {
        return; // never close the fragment root
    }
    while stack.len() > open_at {
        if let Some(el) = stack.pop() {
            attach(stack, Node::Element(el));
        }
    }
}

/// Serialize a fragment. Attribute values are double-quoted and escaped;
/// attributes with empty values render as bare boolean attributes.
pub fn serialize_nodes(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Text(t) => out.push_str(&html_escape::encode_text(t)),
        Node::Element(el) => {
            out.push('<');
            out.push_str(&el.tag);
            for (name, value) in el.attrs() {
                out.push(' ');
                out.push_str(name);
                if !value.is_empty() {
                    out.push_str("=\"");
                    out.push_str(&html_escape::encode_double_quoted_attribute(value));
                    out.push('"');
                }
            }
            out.push('>');
            if is_void_tag(&el.tag) {
                return;
            }
            for child in &el.children {
                write_node(out, child);
            }
            out.push_str("</");
            out.push_str(&el.tag);
            out.push('>');
        }
    }
}
