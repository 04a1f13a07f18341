use crate::serialize_nodes;

/// A node in the in-memory markup tree: either an element or a run of text.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.clone(),
            Node::Element(el) => el.text_content(),
        }
    }
}

/// An element with ordered attributes and child nodes.
///
/// `guarded` records that capture-phase input suppression has been installed
/// on the element. It is runtime state and never serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
    guarded: bool,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
            guarded: false,
        }
    }

    /// An offscreen container wrapping a parsed fragment.
    pub fn container(children: Vec<Node>) -> Self {
        let mut el = Self::new("div");
        el.children = children;
        el
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k == name)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| k != name);
    }

    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|list| list.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let merged = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.set_attr("class", &merged);
    }

    /// Install the capture-phase input guard. Idempotent: the guard is a
    /// flag, installing twice leaves a single guard.
    pub fn set_guard(&mut self) {
        self.guarded = true;
    }

    pub fn has_guard(&self) -> bool {
        self.guarded
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    pub fn inner_html(&self) -> String {
        serialize_nodes(&self.children)
    }

    /// Depth-first walk calling `f` on every element matching `pred`.
    pub fn for_each_matching_mut(
        &mut self,
        pred: &dyn Fn(&Element) -> bool,
        f: &mut dyn FnMut(&mut Element),
    ) {
        for child in &mut self.children {
            if let Node::Element(el) = child {
                if pred(el) {
                    f(el);
                }
                el.for_each_matching_mut(pred, f);
            }
        }
    }

    /// Collect references to every element matching `pred`, document order.
    pub fn find_all(&self, pred: &dyn Fn(&Element) -> bool) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_matching(pred, &mut out);
        out
    }

    fn collect_matching<'a>(
        &'a self,
        pred: &dyn Fn(&Element) -> bool,
        out: &mut Vec<&'a Element>,
    ) {
        for child in &self.children {
            if let Node::Element(el) = child {
                if pred(el) {
                    out.push(el);
                }
                el.collect_matching(pred, out);
            }
        }
    }

    /// Replace matching child elements with whatever `f` yields. When `f`
    /// returns `None` the element is left in place and its subtree is still
    /// visited; replacements are not re-visited.
    pub fn replace_matching(
        &mut self,
        pred: &dyn Fn(&Element) -> bool,
        f: &mut dyn FnMut(&Element) -> Option<Node>,
    ) {
        let mut i = 0;
        while i < self.children.len() {
            let replacement = match &self.children[i] {
                Node::Element(el) if pred(el) => f(el),
                _ => None,
            };
            if let Some(node) = replacement {
                self.children[i] = node;
            } else if let Node::Element(el) = &mut self.children[i] {
                el.replace_matching(pred, f);
            }
            i += 1;
        }
    }
}
