use pan_core::{
    is_immutable, make_immutable, Editor, EditorOptions, ImmutableBlocks, ImmutableConfig,
    NativeEngine, IMMUTABLE_ATTR, IMMUTABLE_CLASS,
};
use pan_dom::{parse, Element, Node};

#[test]
fn immutable_detection() {
    let by_attr = Element::container(parse("<div data-immutable=\"true\">x</div>"));
    assert!(is_immutable(by_attr.children[0].as_element().unwrap()));

    let by_class = Element::container(parse("<div class=\"pan-immutable\">x</div>"));
    assert!(is_immutable(by_class.children[0].as_element().unwrap()));

    let plain = Element::container(parse("<div>x</div>"));
    assert!(!is_immutable(plain.children[0].as_element().unwrap()));
}

#[test]
fn make_immutable_installs_all_markers() {
    let mut el = Element::new("div");
    make_immutable(&mut el);
    assert_eq!(el.attr(IMMUTABLE_ATTR), Some("true"));
    assert!(el.has_class(IMMUTABLE_CLASS));
    assert_eq!(el.attr("contenteditable"), Some("false"));
    assert!(el.has_guard());
}

#[test]
fn mark_is_idempotent() {
    let blocks = ImmutableBlocks::new(ImmutableConfig::default());
    let mut root = Element::container(parse(
        "<div data-immutable=\"true\">locked</div><p>open</p>",
    ));
    blocks.mark(&mut root);
    blocks.mark(&mut root);

    let div = root.children[0].as_element().unwrap();
    assert_eq!(div.attr("class"), Some(IMMUTABLE_CLASS));
    assert_eq!(div.attr("contenteditable"), Some("false"));
    assert!(div.has_guard());

    let p = root.children[1].as_element().unwrap();
    assert!(!p.has_attr("contenteditable"));
    assert!(!p.has_guard());
}

#[test]
fn guarded_blocks_suppress_input_events() {
    let mut editor = Editor::new(
        NativeEngine::new(),
        EditorOptions {
            value: "<div data-immutable=\"true\">locked</div><p>open</p>".to_string(),
            immutables: Some(ImmutableConfig::default()),
            ..Default::default()
        },
    );
    editor.mount();

    assert!(!editor.region().dispatch_key_down(&[0]));
    assert!(!editor.region().dispatch_mouse_down(&[0, 0]));
    assert!(editor.region().dispatch_key_down(&[1]));
    assert!(editor.region().dispatch_mouse_down(&[1, 0]));
}

#[test]
fn serialize_passthrough_without_strategy() {
    let blocks = ImmutableBlocks::new(ImmutableConfig::default());
    let html = "<div data-immutable=\"true\">tok</div>";
    assert_eq!(blocks.serialize(html), html);
    assert_eq!(blocks.deserialize(html), html);
}

#[test]
fn serialize_strategy_replaces_blocks() {
    let blocks = ImmutableBlocks::new(ImmutableConfig {
        serialization: Some(Box::new(|el: &Element| {
            Some(format!("<code>{}</code>", el.text_content()))
        })),
        deserialization: None,
    });
    let out = blocks.serialize("<p>a</p><div data-immutable=\"true\">tok</div>");
    assert_eq!(out, "<p>a</p><code>tok</code>");
}

#[test]
fn serialize_strategy_none_leaves_block_in_place() {
    let blocks = ImmutableBlocks::new(ImmutableConfig {
        serialization: Some(Box::new(|_: &Element| None)),
        deserialization: None,
    });
    let html = "<div data-immutable=\"true\">tok</div>";
    assert_eq!(blocks.serialize(html), html);
}

#[test]
fn deserialize_strategy_builds_live_blocks() {
    let blocks = ImmutableBlocks::new(ImmutableConfig {
        serialization: None,
        deserialization: Some(Box::new(|el: &Element, _clone: Element| {
            let mut span = Element::new("span");
            span.set_attr("data-immutable", "true");
            span.children = vec![Node::Text(el.text_content().to_uppercase())];
            span
        })),
    });
    let out = blocks.deserialize("<div data-immutable=\"true\">tok</div>");
    assert_eq!(out, "<span data-immutable=\"true\">TOK</span>");
}

#[test]
fn identity_deserialization_retags_the_block() {
    let blocks = ImmutableBlocks::new(ImmutableConfig {
        serialization: None,
        deserialization: Some(Box::new(|_: &Element, clone: Element| clone)),
    });
    let out = blocks.deserialize("<span class=\"pan-immutable\">x</span>");
    assert_eq!(
        out,
        "<span class=\"pan-immutable\" data-immutable=\"true\">x</span>"
    );
}

#[test]
fn nested_blocks_inside_a_retagged_block_are_processed() {
    let blocks = ImmutableBlocks::new(ImmutableConfig {
        serialization: None,
        deserialization: Some(Box::new(|_: &Element, clone: Element| clone)),
    });
    let out = blocks.deserialize(
        "<div class=\"pan-immutable\">a<span class=\"pan-immutable\">b</span></div>",
    );
    assert_eq!(
        out,
        "<div class=\"pan-immutable\" data-immutable=\"true\">a\
         <span class=\"pan-immutable\" data-immutable=\"true\">b</span></div>"
    );
}

#[test]
fn replacement_subtrees_are_not_fed_back_to_the_strategy() {
    let calls = std::rc::Rc::new(std::cell::Cell::new(0));
    let count = std::rc::Rc::clone(&calls);
    let blocks = ImmutableBlocks::new(ImmutableConfig {
        serialization: None,
        deserialization: Some(Box::new(move |el: &Element, _clone: Element| {
            count.set(count.get() + 1);
            let mut span = Element::new("span");
            span.set_attr("data-immutable", "true");
            span.children = vec![Node::Text(el.text_content())];
            span
        })),
    });
    let out = blocks.deserialize("<div data-immutable=\"true\">tok</div>");
    assert_eq!(out, "<span data-immutable=\"true\">tok</span>");
    assert_eq!(calls.get(), 1);
}

#[test]
fn editor_round_trips_through_both_strategies() {
    // live form: a span carrying the token text; serialized form: a
    // placeholder element naming the token
    let mut editor = Editor::new(
        NativeEngine::new(),
        EditorOptions {
            value: "<ph data-immutable=\"name\"></ph>".to_string(),
            immutables: Some(ImmutableConfig {
                serialization: Some(Box::new(|el: &Element| {
                    el.attr("data-immutable")
                        .map(|token| format!("<ph data-immutable=\"{token}\"></ph>"))
                })),
                deserialization: Some(Box::new(|el: &Element, _clone: Element| {
                    let token = el.attr("data-immutable").unwrap_or("").to_string();
                    let mut span = Element::new("span");
                    span.set_attr("data-immutable", &token);
                    span.children = vec![Node::Text(format!("{{{{{token}}}}}"))];
                    span
                })),
            }),
            ..Default::default()
        },
    );
    editor.mount();

    // live surface shows the expanded placeholder, marked non-editable
    assert!(editor
        .region()
        .inner_html()
        .contains("{{name}}"));
    let span = editor.region().root().children[0].as_element().unwrap();
    assert_eq!(span.attr("contenteditable"), Some("false"));
    assert!(span.has_guard());

    // the model re-serializes back to the compact form
    editor.sync_from_dom();
    assert_eq!(editor.model_html(), "<ph data-immutable=\"name\"></ph>");
}
