use pan_core::{
    CommandEngine, CommandRouter, EditableRegion, Editor, EditorCommand, EditorEvent,
    EditorOptions, EventTopic, ImageOptions, LinkOptions, LinkTarget, NativeEngine,
    RouterOptions,
};
use pan_dom::{Caret, DomRange};
use std::cell::RefCell;
use std::rc::Rc;

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

/// Records every primitive invocation instead of mutating the tree.
struct RecordingEngine {
    calls: Rc<RefCell<Vec<String>>>,
}

impl CommandEngine for RecordingEngine {
    fn execute(&mut self, _region: &mut EditableRegion, command: &str, _value: &str) -> bool {
        self.calls.borrow_mut().push(command.to_string());
        true
    }

    fn query_state(&self, _region: &EditableRegion, _command: &str) -> bool {
        false
    }

    fn query_value(&self, _region: &EditableRegion, _command: &str) -> String {
        String::new()
    }
}

#[test]
fn create_link_with_value_wraps_selection() {
    let mut editor = mounted("Click here");
    editor.region_mut().set_selection(vec![DomRange::new(
        Caret::new(vec![0], 0),
        Caret::new(vec![0], 5),
    )]);
    let mut router = CommandRouter::new(RouterOptions::default());
    router.run(&mut editor, EditorCommand::CreateLink, Some("https://x.example"));
    assert_eq!(editor.model_html(), "<a href=\"https://x.example\">Click</a> here");
    assert_eq!(router.last_link(), "https://x.example");
}

#[test]
fn create_link_collapsed_inside_anchor_retargets_it() {
    let mut editor = mounted("<a href=\"https://old.example\">old</a>");
    editor
        .region_mut()
        .set_selection(vec![DomRange::collapsed(Caret::new(vec![0, 0], 1))]);
    let mut router = CommandRouter::new(RouterOptions::default());
    router.run(&mut editor, EditorCommand::CreateLink, Some("https://new.example"));
    assert_eq!(editor.model_html(), "<a href=\"https://new.example\">old</a>");
}

#[test]
fn apply_link_collapsed_inside_anchor_updates_href_and_text() {
    let mut editor = mounted("<a href=\"https://old.example\">old</a>");
    editor
        .region_mut()
        .set_selection(vec![DomRange::collapsed(Caret::new(vec![0, 0], 1))]);
    let mut router = CommandRouter::new(RouterOptions::default());
    router.apply_link(
        &mut editor,
        LinkOptions {
            url: "https://example.com".to_string(),
            text: Some("Example".to_string()),
            target: None,
        },
    );
    assert_eq!(
        editor.model_html(),
        "<a href=\"https://example.com\">Example</a>"
    );
}

#[test]
fn apply_link_overwrites_text_and_sets_target() {
    let mut editor = mounted("hello");
    editor.region_mut().set_selection(vec![DomRange::new(
        Caret::new(vec![0], 0),
        Caret::new(vec![0], 5),
    )]);
    let mut router = CommandRouter::new(RouterOptions::default());
    router.apply_link(
        &mut editor,
        LinkOptions {
            url: "https://x.example".to_string(),
            text: Some("Docs".to_string()),
            target: Some(LinkTarget::NewWindow),
        },
    );
    assert_eq!(
        editor.model_html(),
        "<a href=\"https://x.example\" target=\"_blank\" rel=\"noopener noreferrer\">Docs</a>"
    );
}

#[test]
fn apply_link_rejects_blank_url() {
    let mut editor = mounted("hello");
    let mut router = CommandRouter::new(RouterOptions::default());
    router.apply_link(
        &mut editor,
        LinkOptions {
            url: "   ".to_string(),
            ..Default::default()
        },
    );
    assert_eq!(editor.model_html(), "hello");
    assert_eq!(router.last_link(), "");
}

#[test]
fn create_link_prompt_is_seeded_with_last_url() {
    let seen: Rc<RefCell<Vec<String>>> = Rc::default();
    let log = Rc::clone(&seen);
    let mut router = CommandRouter::new(RouterOptions {
        prompt: Some(Box::new(move |_msg: &str, initial: &str| {
            log.borrow_mut().push(initial.to_string());
            Some("https://a.example".to_string())
        })),
        ..Default::default()
    });

    let mut editor = mounted("one two");
    editor.region_mut().set_selection(vec![DomRange::new(
        Caret::new(vec![0], 0),
        Caret::new(vec![0], 3),
    )]);
    router.run(&mut editor, EditorCommand::CreateLink, None);
    router.run(&mut editor, EditorCommand::CreateLink, None);
    assert_eq!(
        seen.borrow().as_slice(),
        &["https://".to_string(), "https://a.example".to_string()]
    );
}

#[test]
fn cancelled_prompt_changes_nothing() {
    let mut editor = mounted("<p>x</p>");
    let changes = Rc::new(RefCell::new(0));
    let count = Rc::clone(&changes);
    let _sub = editor
        .events()
        .on(EventTopic::Change, move |_| *count.borrow_mut() += 1);

    let mut router = CommandRouter::new(RouterOptions {
        prompt: Some(Box::new(|_: &str, _: &str| None)),
        ..Default::default()
    });
    router.run(&mut editor, EditorCommand::InsertImage, None);
    router.run(&mut editor, EditorCommand::CreateLink, None);
    assert_eq!(editor.model_html(), "<p>x</p>");
    assert_eq!(*changes.borrow(), 0);
}

#[test]
fn insert_image_via_prompt() {
    let mut router = CommandRouter::new(RouterOptions {
        prompt: Some(Box::new(|_: &str, _: &str| {
            Some("https://img.example/a.png".to_string())
        })),
        ..Default::default()
    });
    let mut editor = mounted("");
    router.run(&mut editor, EditorCommand::InsertImage, None);
    assert_eq!(editor.model_html(), "<img src=\"https://img.example/a.png\">");
    assert_eq!(router.last_image(), "https://img.example/a.png");
}

#[test]
fn image_picker_defers_the_interaction() {
    let mut router = CommandRouter::new(RouterOptions {
        prompt: Some(Box::new(|_: &str, _: &str| {
            Some("https://never.example".to_string())
        })),
        image_browser: Some(Default::default()),
        on_image_select: Some(Box::new(|_| {})),
        ..Default::default()
    });
    let mut editor = mounted("x");
    router.run(&mut editor, EditorCommand::InsertImage, None);
    assert_eq!(editor.model_html(), "x");
}

#[test]
fn request_callback_preempts_the_prompt() {
    let requested: Rc<RefCell<Vec<String>>> = Rc::default();
    let log = Rc::clone(&requested);
    let mut router = CommandRouter::new(RouterOptions {
        prompt: Some(Box::new(|_: &str, _: &str| {
            Some("https://never.example".to_string())
        })),
        on_request_link: Some(Box::new(move |last: &str| {
            log.borrow_mut().push(last.to_string())
        })),
        ..Default::default()
    });
    let mut editor = mounted("x");
    router.run(&mut editor, EditorCommand::CreateLink, None);
    assert_eq!(editor.model_html(), "x");
    assert_eq!(requested.borrow().as_slice(), &[String::new()]);
}

#[test]
fn sized_image_goes_through_markup_insertion() {
    let mut router = CommandRouter::new(RouterOptions::default());
    let mut editor = mounted("");
    router.run_insert_image(
        &mut editor,
        Some("https://img.example/a.png"),
        &ImageOptions {
            width: Some(320),
            alt: Some("a \"fine\" image".to_string()),
        },
    );
    assert_eq!(
        editor.model_html(),
        "<img src=\"https://img.example/a.png\" width=\"320\" alt=\"a &quot;fine&quot; image\">"
    );
}

#[test]
fn clear_formatting_runs_remove_format_then_unlink() {
    let calls: Rc<RefCell<Vec<String>>> = Rc::default();
    let mut editor = Editor::new(
        RecordingEngine {
            calls: Rc::clone(&calls),
        },
        EditorOptions::default(),
    );
    editor.mount();
    let mut router = CommandRouter::new(RouterOptions::default());
    router.run(&mut editor, EditorCommand::ClearFormatting, None);
    assert_eq!(
        calls.borrow().as_slice(),
        &["removeFormat".to_string(), "unlink".to_string()]
    );
}

#[test]
fn undo_and_redo_route_through_history() {
    let mut editor = mounted("");
    editor.exec(EditorCommand::InsertText, Some("a"));
    editor.exec(EditorCommand::InsertText, Some("b"));

    let mut router = CommandRouter::new(RouterOptions::default());
    router.run(&mut editor, EditorCommand::Undo, None);
    assert_eq!(editor.model_html(), "a");
    router.run(&mut editor, EditorCommand::Redo, None);
    assert_eq!(editor.model_html(), "ab");
}
