use crate::EditorCommand;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ctrl: false,
            meta: false,
            shift: false,
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Canonical combo string: modifiers in meta, ctrl, shift order.
    fn combo(&self) -> String {
        let mut segments: Vec<&str> = Vec::new();
        if self.meta {
            segments.push("meta");
        }
        if self.ctrl {
            segments.push("ctrl");
        }
        if self.shift {
            segments.push("shift");
        }
        let key = self.key.to_lowercase();
        segments.push(&key);
        segments.join("+")
    }
}

const DEFAULT_SHORTCUTS: &[(&str, EditorCommand)] = &[
    ("ctrl+b", EditorCommand::Bold),
    ("meta+b", EditorCommand::Bold),
    ("ctrl+i", EditorCommand::Italic),
    ("meta+i", EditorCommand::Italic),
    ("ctrl+u", EditorCommand::Underline),
    ("meta+u", EditorCommand::Underline),
    ("ctrl+shift+x", EditorCommand::StrikeThrough),
    ("meta+shift+x", EditorCommand::StrikeThrough),
    ("ctrl+z", EditorCommand::Undo),
    ("meta+z", EditorCommand::Undo),
    ("ctrl+shift+z", EditorCommand::Redo),
    ("meta+shift+z", EditorCommand::Redo),
    ("ctrl+shift+l", EditorCommand::InsertUnorderedList),
    ("meta+shift+l", EditorCommand::InsertUnorderedList),
];

/// Document-level modifier-combo table checked against every key press
/// while the editor is mounted.
#[derive(Debug, Clone)]
pub struct ShortcutMap {
    entries: HashMap<String, EditorCommand>,
}

impl Default for ShortcutMap {
    fn default() -> Self {
        Self {
            entries: DEFAULT_SHORTCUTS
                .iter()
                .map(|(combo, command)| (combo.to_string(), *command))
                .collect(),
        }
    }
}

impl ShortcutMap {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn bind(&mut self, combo: &str, command: EditorCommand) {
        self.entries.insert(combo.to_lowercase(), command);
    }

    /// The command bound to this key press, if any. A hit means the caller
    /// should swallow the native default.
    pub fn lookup(&self, event: &KeyEvent) -> Option<EditorCommand> {
        self.entries.get(&event.combo()).copied()
    }
}
