use pan_core::{base_toolbar, build_toolbar, EditorCommand, ToolbarItem, ToolbarKind};

#[test]
fn base_toolbar_shape() {
    let items = base_toolbar();
    assert_eq!(items.len(), 20);
    assert_eq!(items[0].id, "undo");
    assert!(items.iter().any(|i| i.kind == ToolbarKind::Separator));

    let bold = items.iter().find(|i| i.id == "bold").unwrap();
    assert_eq!(bold.command, Some(EditorCommand::Bold));
    assert_eq!(bold.kind, ToolbarKind::Button);

    let font = items.iter().find(|i| i.id == "fontName").unwrap();
    assert_eq!(font.kind, ToolbarKind::Dropdown);
    assert_eq!(font.options.len(), 4);

    let color = items.iter().find(|i| i.id == "foreColor").unwrap();
    assert_eq!(color.kind, ToolbarKind::Color);
}

#[test]
fn enabled_filter_keeps_separators() {
    let items = build_toolbar(Some(&["bold", "italic"]), Vec::new());
    let buttons: Vec<&str> = items
        .iter()
        .filter(|i| i.kind != ToolbarKind::Separator)
        .map(|i| i.id.as_str())
        .collect();
    assert_eq!(buttons, vec!["bold", "italic"]);
    assert!(items.iter().any(|i| i.kind == ToolbarKind::Separator));
}

#[test]
fn empty_filter_means_everything() {
    assert_eq!(build_toolbar(Some(&[]), Vec::new()).len(), base_toolbar().len());
    assert_eq!(build_toolbar(None, Vec::new()).len(), base_toolbar().len());
}

#[test]
fn custom_items_append_after_builtins() {
    let custom = ToolbarItem::button("stamp", "Stamp", "stamp", EditorCommand::InsertHtml);
    let items = build_toolbar(Some(&["bold"]), vec![custom]);
    assert_eq!(items.last().unwrap().id, "stamp");
}

#[test]
fn items_serialize_without_empty_fields() {
    let sep = ToolbarItem::separator("sep-1");
    let json = serde_json::to_string(&sep).unwrap();
    assert!(!json.contains("command"));
    assert!(!json.contains("options"));
    assert!(json.contains("\"kind\":\"separator\""));
}
