use pan_core::{handle_paste, ClipboardData, Editor, EditorOptions, HtmlTransform, NativeEngine};

fn mounted(value: &str) -> Editor<NativeEngine> {
    let mut editor = Editor::new(
        NativeEngine::new(),
        EditorOptions {
            value: value.to_string(),
            ..Default::default()
        },
    );
    editor.mount();
    editor
}

#[test]
fn formatting_allowed_without_hook_defers_to_native() {
    let mut editor = mounted("x");
    let clipboard = ClipboardData {
        html: Some("<b>rich</b>".to_string()),
        text: "rich".to_string(),
    };
    assert!(handle_paste(&mut editor, &clipboard, true, None));
    assert_eq!(editor.model_html(), "x");
}

#[test]
fn formatting_disallowed_inserts_plain_text() {
    let mut editor = mounted("");
    let clipboard = ClipboardData {
        html: Some("<b>rich</b>".to_string()),
        text: "rich".to_string(),
    };
    assert!(!handle_paste(&mut editor, &clipboard, false, None));
    assert_eq!(editor.model_html(), "rich");
}

#[test]
fn deserialization_hook_rewrites_pasted_html() {
    let mut editor = mounted("");
    let clipboard = ClipboardData {
        html: Some("<b>hi</b>".to_string()),
        text: "hi".to_string(),
    };
    let hook = |html: &str| html.replace("<b>", "<em>").replace("</b>", "</em>");
    assert!(!handle_paste(
        &mut editor,
        &clipboard,
        true,
        Some(&hook as &dyn HtmlTransform)
    ));
    assert_eq!(editor.model_html(), "<em>hi</em>");
}

#[test]
fn text_only_clipboard_falls_back_to_text() {
    let mut editor = mounted("");
    let clipboard = ClipboardData {
        html: None,
        text: "plain".to_string(),
    };
    let hook = |html: &str| html.to_string();
    assert!(!handle_paste(
        &mut editor,
        &clipboard,
        true,
        Some(&hook as &dyn HtmlTransform)
    ));
    assert_eq!(editor.model_html(), "plain");
}
