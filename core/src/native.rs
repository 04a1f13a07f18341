use crate::{insertion_caret, CommandEngine, EditableRegion};
use pan_dom::{
    insert_at, unwrap_matching_ancestors, wrap_range, Caret, DomRange, Element, Node,
};
use std::collections::HashMap;

const FORMATTING_TAGS: &[&str] = &["b", "strong", "i", "em", "u", "s", "strike", "font", "span"];

/// In-memory adapter over the region standing in for the browser's
/// formatting primitive. Inline commands mutate the tree; block-level
/// toggle and alignment state is tracked for the query interface.
#[derive(Default)]
pub struct NativeEngine {
    toggles: HashMap<String, bool>,
    align: Option<&'static str>,
    font_name: String,
    font_size: String,
    fore_color: String,
    back_color: String,
}

impl NativeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn flip(&mut self, command: &str) -> bool {
        let state = self.toggles.entry(command.to_string()).or_insert(false);
        *state = !*state;
        *state
    }

    fn set_toggle(&mut self, command: &str, on: bool) {
        self.toggles.insert(command.to_string(), on);
    }

    /// Wrap the active selection in `tag`, or record pending typing state
    /// when the selection is collapsed.
    fn wrap_command(
        &mut self,
        region: &mut EditableRegion,
        command: &str,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> bool {
        let Some(range) = region.first_range().filter(|r| !r.is_collapsed()).cloned() else {
            self.flip(command);
            return true; // collapsed: state applies to subsequent input
        };
        // toggle state must track the tree, so flip only once the wrap lands
        match wrap_range(region.root_mut(), &range, tag, attrs) {
            Ok(wrapper_path) => {
                self.flip(command);
                let span = range.start.offset.abs_diff(range.end.offset);
                let mut text_path = wrapper_path;
                text_path.push(0);
                region.set_selection(vec![DomRange::new(
                    Caret::new(text_path.clone(), 0),
                    Caret::new(text_path, span),
                )]);
                true
            }
            Err(_) => false,
        }
    }

    fn create_link(&mut self, region: &mut EditableRegion, url: &str) -> bool {
        if url.trim().is_empty() {
            return false;
        }
        if region.has_active_selection() {
            return self.wrap_command(region, "createLink", "a", &[("href", url)]);
        }
        // collapsed inside an existing anchor: retarget it
        match region.anchor_at_selection_mut() {
            Some(anchor) => {
                anchor.set_attr("href", url);
                true
            }
            None => false,
        }
    }

    fn insert_nodes(&mut self, region: &mut EditableRegion, nodes: Vec<Node>) -> bool {
        if nodes.is_empty() {
            return false;
        }
        let caret = insertion_caret(region);
        match insert_at(region.root_mut(), &caret, nodes) {
            Ok(after) => {
                region.set_selection(vec![DomRange::collapsed(after)]);
                true
            }
            Err(_) => false,
        }
    }

    fn unwrap_at_selection(
        &mut self,
        region: &mut EditableRegion,
        pred: &dyn Fn(&Element) -> bool,
    ) -> usize {
        let Some(range) = region.first_range().cloned() else {
            return 0;
        };
        unwrap_matching_ancestors(region.root_mut(), &range.start.path, pred).unwrap_or(0)
    }
}

impl CommandEngine for NativeEngine {
    fn execute(&mut self, region: &mut EditableRegion, command: &str, value: &str) -> bool {
        if !region.is_mounted() {
            return false;
        }
        match command {
            "bold" => self.wrap_command(region, command, "b", &[]),
            "italic" => self.wrap_command(region, command, "i", &[]),
            "underline" => self.wrap_command(region, command, "u", &[]),
            "strikeThrough" => self.wrap_command(region, command, "strike", &[]),
            "fontName" => {
                self.font_name = value.to_string();
                self.wrap_command(region, command, "font", &[("face", value)])
            }
            "fontSize" => {
                self.font_size = value.to_string();
                self.wrap_command(region, command, "font", &[("size", value)])
            }
            "foreColor" => {
                self.fore_color = value.to_string();
                self.wrap_command(region, command, "font", &[("color", value)])
            }
            "backColor" => {
                self.back_color = value.to_string();
                let style = format!("background-color: {value}");
                self.wrap_command(region, command, "span", &[("style", &style)])
            }
            "createLink" => self.create_link(region, value),
            "unlink" => self.unwrap_at_selection(region, &|el: &Element| el.tag == "a") > 0,
            "insertImage" => {
                if value.trim().is_empty() {
                    return false;
                }
                let mut img = Element::new("img");
                img.set_attr("src", value);
                self.insert_nodes(region, vec![Node::Element(img)])
            }
            "insertHTML" => self.insert_nodes(region, pan_dom::parse(value)),
            "insertText" => {
                if value.is_empty() {
                    return false;
                }
                self.insert_nodes(region, vec![Node::Text(value.to_string())])
            }
            "removeFormat" => {
                self.toggles.clear();
                self.unwrap_at_selection(region, &|el: &Element| {
                    FORMATTING_TAGS.contains(&el.tag.as_str())
                });
                true
            }
            "insertUnorderedList" => {
                let on = self.flip(command);
                if on {
                    self.set_toggle("insertOrderedList", false);
                }
                true
            }
            "insertOrderedList" => {
                let on = self.flip(command);
                if on {
                    self.set_toggle("insertUnorderedList", false);
                }
                true
            }
            "justifyLeft" | "justifyCenter" | "justifyRight" | "justifyFull" => {
                self.align = match command {
                    "justifyCenter" => Some("justifyCenter"),
                    "justifyRight" => Some("justifyRight"),
                    "justifyFull" => Some("justifyFull"),
                    _ => None, // left is the default, no explicit state
                };
                true
            }
            _ => false,
        }
    }

    fn query_state(&self, _region: &EditableRegion, command: &str) -> bool {
        match command {
            "justifyLeft" => self.align.is_none(),
            "justifyCenter" | "justifyRight" | "justifyFull" => self.align == Some(command),
            _ => self.toggles.get(command).copied().unwrap_or(false),
        }
    }

    fn query_value(&self, _region: &EditableRegion, command: &str) -> String {
        match command {
            "fontName" => self.font_name.clone(),
            "fontSize" => self.font_size.clone(),
            "foreColor" => self.fore_color.clone(),
            "backColor" => self.back_color.clone(),
            _ => String::new(),
        }
    }
}
