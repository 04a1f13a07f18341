use crate::EditorCommand;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolbarKind {
    Button,
    Dropdown,
    Color,
    Separator,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolbarOption {
    pub label: String,
    pub value: String,
}

impl ToolbarOption {
    fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// Declarative toolbar entry consumed by the presentation layer; carries no
/// behavior of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolbarItem {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<EditorCommand>,
    pub kind: ToolbarKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ToolbarOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

impl ToolbarItem {
    pub fn button(id: &str, label: &str, icon: &str, command: EditorCommand) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            icon: Some(icon.to_string()),
            command: Some(command),
            kind: ToolbarKind::Button,
            options: Vec::new(),
            width: None,
            disabled: false,
        }
    }

    pub fn dropdown(
        id: &str,
        label: &str,
        icon: &str,
        command: EditorCommand,
        options: Vec<ToolbarOption>,
        width: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            icon: Some(icon.to_string()),
            command: Some(command),
            kind: ToolbarKind::Dropdown,
            options,
            width: Some(width.to_string()),
            disabled: false,
        }
    }

    pub fn color(id: &str, label: &str, icon: &str, command: EditorCommand) -> Self {
        Self {
            kind: ToolbarKind::Color,
            ..Self::button(id, label, icon, command)
        }
    }

    pub fn separator(id: &str) -> Self {
        Self {
            id: id.to_string(),
            label: "Separator".to_string(),
            icon: None,
            command: None,
            kind: ToolbarKind::Separator,
            options: Vec::new(),
            width: None,
            disabled: false,
        }
    }
}

pub fn font_size_options() -> Vec<ToolbarOption> {
    vec![
        ToolbarOption::new("Small", "2"),
        ToolbarOption::new("Normal", "3"),
        ToolbarOption::new("Large", "4"),
        ToolbarOption::new("Huge", "5"),
    ]
}

pub fn font_family_options() -> Vec<ToolbarOption> {
    vec![
        ToolbarOption::new("Inter", "Inter"),
        ToolbarOption::new("Georgia", "Georgia"),
        ToolbarOption::new("Courier", "Courier New"),
        ToolbarOption::new("Montserrat", "Montserrat"),
    ]
}

/// The built-in toolbar, in display order.
pub fn base_toolbar() -> Vec<ToolbarItem> {
    vec![
        ToolbarItem::button("undo", "Undo", "undo", EditorCommand::Undo),
        ToolbarItem::button("redo", "Redo", "redo", EditorCommand::Redo),
        ToolbarItem::separator("sep-1"),
        ToolbarItem::dropdown(
            "fontName",
            "Font",
            "font",
            EditorCommand::FontName,
            font_family_options(),
            "160px",
        ),
        ToolbarItem::dropdown(
            "fontSize",
            "Size",
            "font-size",
            EditorCommand::FontSize,
            font_size_options(),
            "120px",
        ),
        ToolbarItem::button("bold", "Bold", "bold", EditorCommand::Bold),
        ToolbarItem::button("italic", "Italic", "italic", EditorCommand::Italic),
        ToolbarItem::button("underline", "Underline", "underline", EditorCommand::Underline),
        ToolbarItem::button(
            "strikeThrough",
            "Strike",
            "strikethrough",
            EditorCommand::StrikeThrough,
        ),
        ToolbarItem::color("foreColor", "Text color", "text-color", EditorCommand::ForeColor),
        ToolbarItem::color("backColor", "Highlight", "bg-color", EditorCommand::BackColor),
        ToolbarItem::button(
            "insertUnorderedList",
            "Bullets",
            "bullet-list",
            EditorCommand::InsertUnorderedList,
        ),
        ToolbarItem::button(
            "insertOrderedList",
            "Numbered",
            "number-list",
            EditorCommand::InsertOrderedList,
        ),
        ToolbarItem::button("justifyLeft", "Left", "align-left", EditorCommand::JustifyLeft),
        ToolbarItem::button(
            "justifyCenter",
            "Center",
            "align-center",
            EditorCommand::JustifyCenter,
        ),
        ToolbarItem::button("justifyRight", "Right", "align-right", EditorCommand::JustifyRight),
        ToolbarItem::button("justifyFull", "Justify", "align-justify", EditorCommand::JustifyFull),
        ToolbarItem::button("createLink", "Link", "link", EditorCommand::CreateLink),
        ToolbarItem::button("insertImage", "Image", "image", EditorCommand::InsertImage),
        ToolbarItem::button("clearFormatting", "Clear", "clear", EditorCommand::ClearFormatting),
    ]
}

/// Filter the built-ins by an enabled-id allow-list (separators always
/// survive) and append host-supplied custom items after them.
pub fn build_toolbar(enabled: Option<&[&str]>, custom: Vec<ToolbarItem>) -> Vec<ToolbarItem> {
    let mut items = base_toolbar();
    if let Some(enabled) = enabled {
        if !enabled.is_empty() {
            items.retain(|item| {
                item.kind == ToolbarKind::Separator || enabled.contains(&item.id.as_str())
            });
        }
    }
    items.extend(custom);
    items
}
