use crate::{Element, Node};
use serde::Serialize;

/// A caret position addressed by a child-index path from the surface root.
///
/// When the path resolves to a text node, `offset` is a character offset
/// into the text. When it resolves to an element (the empty path is the
/// root itself), `offset` is a child index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caret {
    pub path: Vec<usize>,
    pub offset: usize,
}

impl Caret {
    pub fn new(path: Vec<usize>, offset: usize) -> Self {
        Self { path, offset }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomRange {
    pub start: Caret,
    pub end: Caret,
}

impl DomRange {
    pub fn new(start: Caret, end: Caret) -> Self {
        Self { start, end }
    }

    pub fn collapsed(caret: Caret) -> Self {
        Self {
            start: caret.clone(),
            end: caret,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("no child at index {index} (depth {depth})")]
    OutOfBounds { index: usize, depth: usize },
    #[error("path descends into a text node at depth {depth}")]
    IntoText { depth: usize },
    #[error("offset {offset} beyond length {len}")]
    BadOffset { offset: usize, len: usize },
    #[error("range endpoints address different nodes")]
    SplitRange,
}

pub fn node_at<'a>(root: &'a Element, path: &[usize]) -> Result<&'a Node, ResolveError> {
    let mut el = root;
    for (depth, &index) in path.iter().enumerate() {
        let node = el
            .children
            .get(index)
            .ok_or(ResolveError::OutOfBounds { index, depth })?;
        if depth + 1 == path.len() {
            return Ok(node);
        }
        el = match node {
            Node::Element(child) => child,
            Node::Text(_) => return Err(ResolveError::IntoText { depth }),
        };
    }
    Err(ResolveError::OutOfBounds { index: 0, depth: 0 })
}

pub fn element_at<'a>(root: &'a Element, path: &[usize]) -> Result<&'a Element, ResolveError> {
    let mut el = root;
    for (depth, &index) in path.iter().enumerate() {
        let node = el
            .children
            .get(index)
            .ok_or(ResolveError::OutOfBounds { index, depth })?;
        el = match node {
            Node::Element(child) => child,
            Node::Text(_) => return Err(ResolveError::IntoText { depth }),
        };
    }
    Ok(el)
}

pub fn element_at_mut<'a>(
    root: &'a mut Element,
    path: &[usize],
) -> Result<&'a mut Element, ResolveError> {
    let mut el = root;
    for (depth, &index) in path.iter().enumerate() {
        let node = el
            .children
            .get_mut(index)
            .ok_or(ResolveError::OutOfBounds { index, depth })?;
        el = match node {
            Node::Element(child) => child,
            Node::Text(_) => return Err(ResolveError::IntoText { depth }),
        };
    }
    Ok(el)
}

/// Caret at the end of the surface content: end of the last text node, or an
/// element caret just past the last child, or the very start when empty.
pub fn caret_at_end(root: &Element) -> Caret {
    match root.children.last() {
        Some(Node::Text(t)) => Caret::new(vec![root.children.len() - 1], t.chars().count()),
        Some(Node::Element(_)) => Caret::new(Vec::new(), root.children.len()),
        None => Caret::new(Vec::new(), 0),
    }
}

/// Wrap the text covered by `range` in a new element. Both endpoints must
/// address the same text node. Returns the path of the wrapper element.
pub fn wrap_range(
    root: &mut Element,
    range: &DomRange,
    tag: &str,
    attrs: &[(&str, &str)],
) -> Result<Vec<usize>, ResolveError> {
    if range.start.path != range.end.path {
        return Err(ResolveError::SplitRange);
    }
    let path = &range.start.path;
    let Some((&index, parent_path)) = path.split_last() else {
        return Err(ResolveError::OutOfBounds { index: 0, depth: 0 });
    };
    let parent = element_at_mut(root, parent_path)?;
    let text = match parent.children.get(index) {
        Some(Node::Text(t)) => t.clone(),
        Some(Node::Element(_)) => {
            return Err(ResolveError::IntoText { depth: path.len() })
        }
        None => {
            return Err(ResolveError::OutOfBounds {
                index,
                depth: parent_path.len(),
            })
        }
    };
    let (from, to) = (
        range.start.offset.min(range.end.offset),
        range.start.offset.max(range.end.offset),
    );
    let len = text.chars().count();
    if to > len {
        return Err(ResolveError::BadOffset { offset: to, len });
    }
    let before: String = text.chars().take(from).collect();
    let middle: String = text.chars().take(to).skip(from).collect();
    let after: String = text.chars().skip(to).collect();

    let mut wrapper = Element::new(tag);
    for (name, value) in attrs {
        wrapper.set_attr(name, value);
    }
    wrapper.children.push(Node::Text(middle));

    let mut replacement = Vec::new();
    if !before.is_empty() {
        replacement.push(Node::Text(before));
    }
    let wrapper_index = index + replacement.len();
    replacement.push(Node::Element(wrapper));
    if !after.is_empty() {
        replacement.push(Node::Text(after));
    }
    parent.children.splice(index..index + 1, replacement);

    let mut wrapper_path = parent_path.to_vec();
    wrapper_path.push(wrapper_index);
    Ok(wrapper_path)
}

/// Insert nodes at a caret. Returns the caret just after the insertion.
pub fn insert_at(
    root: &mut Element,
    caret: &Caret,
    nodes: Vec<Node>,
) -> Result<Caret, ResolveError> {
    let inserted = nodes.len();
    // element caret: offset is a child index
    let target_is_text = !caret.path.is_empty()
        && matches!(node_at(root, &caret.path)?, Node::Text(_));
    if !target_is_text {
        let el = element_at_mut(root, &caret.path)?;
        let len = el.children.len();
        if caret.offset > len {
            return Err(ResolveError::BadOffset {
                offset: caret.offset,
                len,
            });
        }
        el.children.splice(caret.offset..caret.offset, nodes);
        return Ok(Caret::new(caret.path.clone(), caret.offset + inserted));
    }

    let Some((&index, parent_path)) = caret.path.split_last() else {
        return Err(ResolveError::OutOfBounds { index: 0, depth: 0 });
    };
    let parent = element_at_mut(root, parent_path)?;
    let text = match parent.children.get(index) {
        Some(Node::Text(t)) => t.clone(),
        _ => {
            return Err(ResolveError::OutOfBounds {
                index,
                depth: parent_path.len(),
            })
        }
    };
    let len = text.chars().count();
    if caret.offset > len {
        return Err(ResolveError::BadOffset {
            offset: caret.offset,
            len,
        });
    }
    let before: String = text.chars().take(caret.offset).collect();
    let after: String = text.chars().skip(caret.offset).collect();

    let mut replacement = Vec::new();
    if !before.is_empty() {
        replacement.push(Node::Text(before));
    }
    let lead = replacement.len();
    replacement.extend(nodes);
    if !after.is_empty() {
        replacement.push(Node::Text(after));
    }
    parent.children.splice(index..index + 1, replacement);
    Ok(Caret::new(parent_path.to_vec(), index + lead + inserted))
}

/// Unwrap every ancestor of the node at `path` matching `pred`, splicing the
/// ancestor's children into its parent. Returns how many were unwrapped.
pub fn unwrap_matching_ancestors(
    root: &mut Element,
    path: &[usize],
    pred: &dyn Fn(&Element) -> bool,
) -> Result<usize, ResolveError> {
    if path.len() < 2 {
        return Ok(0);
    }
    let index = path[0];
    let child_node = root
        .children
        .get_mut(index)
        .ok_or(ResolveError::OutOfBounds { index, depth: 0 })?;
    let (mut count, spliced) = match child_node {
        Node::Element(child) => {
            let inner = unwrap_matching_ancestors(child, &path[1..], pred)?;
            if pred(child) {
                (inner, Some(std::mem::take(&mut child.children)))
            } else {
                (inner, None)
            }
        }
        Node::Text(_) => return Err(ResolveError::IntoText { depth: 0 }),
    };
    if let Some(grandchildren) = spliced {
        root.children.splice(index..index + 1, grandchildren);
        count += 1;
    }
    Ok(count)
}

/// Longest prefix of `path` (including the full path) resolving to an
/// element matching `pred`, the ancestor lookup used for anchor fixups.
pub fn closest_matching_path(
    root: &Element,
    path: &[usize],
    pred: &dyn Fn(&Element) -> bool,
) -> Option<Vec<usize>> {
    for end in (0..=path.len()).rev() {
        let prefix = &path[..end];
        if let Ok(el) = element_at(root, prefix) {
            if pred(el) {
                return Some(prefix.to_vec());
            }
        }
    }
    None
}
