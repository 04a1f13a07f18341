use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of editor commands. Wire names are the camelCase command
/// names of the native formatting interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditorCommand {
    Bold,
    Italic,
    Underline,
    StrikeThrough,
    FontSize,
    FontName,
    ForeColor,
    BackColor,
    InsertUnorderedList,
    InsertOrderedList,
    JustifyLeft,
    JustifyCenter,
    JustifyRight,
    JustifyFull,
    CreateLink,
    Unlink,
    InsertImage,
    #[serde(rename = "insertHTML")]
    InsertHtml,
    InsertText,
    RemoveFormat,
    Undo,
    Redo,
    ClearFormatting,
}

impl EditorCommand {
    pub const ALL: &'static [EditorCommand] = &[
        EditorCommand::Bold,
        EditorCommand::Italic,
        EditorCommand::Underline,
        EditorCommand::StrikeThrough,
        EditorCommand::FontSize,
        EditorCommand::FontName,
        EditorCommand::ForeColor,
        EditorCommand::BackColor,
        EditorCommand::InsertUnorderedList,
        EditorCommand::InsertOrderedList,
        EditorCommand::JustifyLeft,
        EditorCommand::JustifyCenter,
        EditorCommand::JustifyRight,
        EditorCommand::JustifyFull,
        EditorCommand::CreateLink,
        EditorCommand::Unlink,
        EditorCommand::InsertImage,
        EditorCommand::InsertHtml,
        EditorCommand::InsertText,
        EditorCommand::RemoveFormat,
        EditorCommand::Undo,
        EditorCommand::Redo,
        EditorCommand::ClearFormatting,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EditorCommand::Bold => "bold",
            EditorCommand::Italic => "italic",
            EditorCommand::Underline => "underline",
            EditorCommand::StrikeThrough => "strikeThrough",
            EditorCommand::FontSize => "fontSize",
            EditorCommand::FontName => "fontName",
            EditorCommand::ForeColor => "foreColor",
            EditorCommand::BackColor => "backColor",
            EditorCommand::InsertUnorderedList => "insertUnorderedList",
            EditorCommand::InsertOrderedList => "insertOrderedList",
            EditorCommand::JustifyLeft => "justifyLeft",
            EditorCommand::JustifyCenter => "justifyCenter",
            EditorCommand::JustifyRight => "justifyRight",
            EditorCommand::JustifyFull => "justifyFull",
            EditorCommand::CreateLink => "createLink",
            EditorCommand::Unlink => "unlink",
            EditorCommand::InsertImage => "insertImage",
            EditorCommand::InsertHtml => "insertHTML",
            EditorCommand::InsertText => "insertText",
            EditorCommand::RemoveFormat => "removeFormat",
            EditorCommand::Undo => "undo",
            EditorCommand::Redo => "redo",
            EditorCommand::ClearFormatting => "clearFormatting",
        }
    }

    /// Commands that only take effect on the native interface with an
    /// active, non-collapsed selection.
    pub fn needs_active_selection(self) -> bool {
        matches!(self, EditorCommand::ForeColor | EditorCommand::BackColor)
    }
}

impl fmt::Display for EditorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown editor command: {0}")]
pub struct UnknownCommand(pub String);

impl FromStr for EditorCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EditorCommand::ALL
            .iter()
            .find(|c| c.name() == s)
            .copied()
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}
