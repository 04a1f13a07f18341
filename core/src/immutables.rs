use pan_dom::{parse, Element, Node};

/// Marker attribute flagging an element subtree as non-editable.
pub const IMMUTABLE_ATTR: &str = "data-immutable";
/// Presentation class added alongside the marker.
pub const IMMUTABLE_CLASS: &str = "pan-immutable";

/// Serialization strategy for immutable blocks. Returning `None` (or empty
/// markup) leaves the element untouched.
pub trait SerializeImmutable {
    fn serialize(&self, element: &Element) -> Option<String>;
}

impl<F> SerializeImmutable for F
where
    F: Fn(&Element) -> Option<String>,
{
    fn serialize(&self, element: &Element) -> Option<String> {
        self(element)
    }
}

/// Deserialization strategy: receives the original element and a deep clone
/// and returns the element to place in the tree. Returning the original
/// unchanged re-tags it as immutable instead of replacing it.
pub trait DeserializeImmutable {
    fn deserialize(&self, original: &Element, clone: Element) -> Element;
}

impl<F> DeserializeImmutable for F
where
    F: Fn(&Element, Element) -> Element,
{
    fn deserialize(&self, original: &Element, clone: Element) -> Element {
        self(original, clone)
    }
}

#[derive(Default)]
pub struct ImmutableConfig {
    pub serialization: Option<Box<dyn SerializeImmutable>>,
    pub deserialization: Option<Box<dyn DeserializeImmutable>>,
}

/// Is this element flagged immutable, by marker attribute or class?
pub fn is_immutable(element: &Element) -> bool {
    element.has_attr(IMMUTABLE_ATTR) || element.has_class(IMMUTABLE_CLASS)
}

/// Tag an element immutable in place, for host-driven dynamic insertion.
/// The caller re-runs marking on the live surface afterwards.
pub fn make_immutable(element: &mut Element) {
    element.set_attr(IMMUTABLE_ATTR, "true");
    element.add_class(IMMUTABLE_CLASS);
    element.set_attr("contenteditable", "false");
    element.set_guard();
}

/// Bridge between inert content islands in the live surface and their
/// serialized textual form. Guarantees structural marker consistency only;
/// content fidelity is up to the host strategies.
pub struct ImmutableBlocks {
    config: ImmutableConfig,
}

impl ImmutableBlocks {
    pub fn new(config: ImmutableConfig) -> Self {
        Self { config }
    }

    /// Walk the live surface and flag every marker-attribute element:
    /// presentation class, `contenteditable="false"`, and the capture-phase
    /// input guard. Safe to call repeatedly after every write.
    pub fn mark(&self, root: &mut Element) {
        root.for_each_matching_mut(&|el: &Element| el.has_attr(IMMUTABLE_ATTR), &mut |el| {
            el.add_class(IMMUTABLE_CLASS);
            el.set_attr("contenteditable", "false");
            el.set_guard();
        });
    }

    /// Convert immutable elements in raw markup to their serialized form via
    /// the configured strategy. Passthrough when no strategy is configured.
    pub fn serialize(&self, html: &str) -> String {
        let Some(strategy) = &self.config.serialization else {
            return html.to_string();
        };
        let mut container = Element::container(parse(html));
        container.replace_matching(&is_immutable, &mut |el| {
            strategy
                .serialize(el)
                .and_then(|markup| parse(&markup).into_iter().next())
        });
        container.inner_html()
    }

    /// Convert serialized markup back into live immutable elements via the
    /// configured strategy. When the strategy returns the element unchanged
    /// it is re-tagged in place and its descendants stay eligible, so nested
    /// blocks are processed too; a fresh replacement subtree is not
    /// revisited. The caller writes the result into the surface and then
    /// invokes [`ImmutableBlocks::mark`].
    pub fn deserialize(&self, html: &str) -> String {
        let Some(strategy) = &self.config.deserialization else {
            return html.to_string();
        };
        let mut container = Element::container(parse(html));
        deserialize_children(&mut container, strategy.as_ref());
        container.inner_html()
    }
}

fn deserialize_children(el: &mut Element, strategy: &dyn DeserializeImmutable) {
    for i in 0..el.children.len() {
        let Some(Node::Element(child)) = el.children.get_mut(i) else {
            continue;
        };
        if !is_immutable(child) {
            deserialize_children(child, strategy);
            continue;
        }
        let mut replacement = strategy.deserialize(child, child.clone());
        if replacement == *child {
            replacement.set_attr(IMMUTABLE_ATTR, "true");
            *child = replacement;
            deserialize_children(child, strategy);
        } else {
            *child = replacement;
        }
    }
}
