use pan_dom::{
    caret_at_end, closest_matching_path, element_at_mut, parse, Caret, DomRange, Element, Node,
};

/// The live editable surface: the markup tree the browser would own, plus
/// the current selection and mount/focus state. Shared by the editing core,
/// router, and immutable manager under the single-threaded model, so
/// mutations never interleave and nothing locks.
pub struct EditableRegion {
    root: Element,
    selection: Option<Vec<DomRange>>,
    mounted: bool,
    focused: bool,
}

impl Default for EditableRegion {
    fn default() -> Self {
        Self::new()
    }
}

impl EditableRegion {
    pub fn new() -> Self {
        Self {
            root: Element::new("div"),
            selection: None,
            mounted: false,
            focused: false,
        }
    }

    pub fn mount(&mut self) {
        self.mounted = true;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub fn inner_html(&self) -> String {
        self.root.inner_html()
    }

    /// Rewrite the surface content. The previous selection no longer
    /// addresses valid nodes and is cleared.
    pub fn set_inner_html(&mut self, html: &str) {
        self.root.children = parse(html);
        self.selection = None;
    }

    /// Snapshot of the live selection ranges, re-derived on every read.
    pub fn selection_ranges(&self) -> Option<Vec<DomRange>> {
        self.selection.clone()
    }

    pub fn set_selection(&mut self, ranges: Vec<DomRange>) {
        self.selection = Some(ranges);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn first_range(&self) -> Option<&DomRange> {
        self.selection.as_ref().and_then(|rs| rs.first())
    }

    /// True when some range is non-collapsed and covers text.
    pub fn has_active_selection(&self) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|rs| rs.iter().any(|r| !r.is_collapsed()))
    }

    /// Collapse the selection to the end of the surface content, giving
    /// selection-dependent commands a well-defined application point.
    pub fn collapse_to_end(&mut self) {
        let caret = caret_at_end(&self.root);
        self.selection = Some(vec![DomRange::collapsed(caret)]);
    }

    /// Nearest anchor element containing the selection start, for the
    /// router's link fixup.
    pub fn anchor_at_selection_mut(&mut self) -> Option<&mut Element> {
        let start = self.first_range()?.start.clone();
        let path = closest_matching_path(&self.root, &start.path, &|el| el.tag == "a")?;
        element_at_mut(&mut self.root, &path).ok()
    }

    /// Deliver a primary-button press targeted at `path`. Returns false when
    /// a guarded (immutable) element along the target chain suppresses it.
    pub fn dispatch_mouse_down(&self, path: &[usize]) -> bool {
        !self.guard_intercepts(path)
    }

    /// Deliver a key press targeted at `path`; same suppression rule.
    pub fn dispatch_key_down(&self, path: &[usize]) -> bool {
        !self.guard_intercepts(path)
    }

    fn guard_intercepts(&self, path: &[usize]) -> bool {
        let mut el = &self.root;
        for &index in path {
            match el.children.get(index) {
                Some(Node::Element(child)) => {
                    if child.has_guard() {
                        return true;
                    }
                    el = child;
                }
                _ => return false,
            }
        }
        false
    }
}

/// Capability interface over the platform's rich-text primitive. Higher
/// layers depend only on this, never on a concrete browser API, so the
/// whole core is testable with a fake adapter.
pub trait CommandEngine {
    /// Execute a primitive command against the region. The boolean mirrors
    /// the native success indicator.
    fn execute(&mut self, region: &mut EditableRegion, command: &str, value: &str) -> bool;

    /// Current toggle state of a command at the selection.
    fn query_state(&self, region: &EditableRegion, command: &str) -> bool;

    /// Current value of a value-carrying command at the selection.
    fn query_value(&self, region: &EditableRegion, command: &str) -> String;
}

/// Caret placement helper shared by insert-style commands: the selection
/// start when present, else the end of content.
pub fn insertion_caret(region: &EditableRegion) -> Caret {
    region
        .first_range()
        .map(|r| r.start.clone())
        .unwrap_or_else(|| caret_at_end(region.root()))
}
