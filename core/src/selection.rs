use crate::{CommandEngine, Editor, EventBus, EventTopic, Subscription};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Formatting toggle state at the current selection, for toolbar
/// reflection.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike_through: bool,
    pub ordered_list: bool,
    pub unordered_list: bool,
    pub align: Alignment,
    pub font_name: String,
    pub font_size: String,
}

impl SelectionState {
    /// Poll the native query interface. Alignment uses the documented
    /// tie-break center → right → justify → left: only one native alignment
    /// state should be true at a time, and this order decides when the
    /// platform disagrees.
    pub fn read<E: CommandEngine>(editor: &Editor<E>) -> Self {
        let align = if editor.query_state("justifyCenter") {
            Alignment::Center
        } else if editor.query_state("justifyRight") {
            Alignment::Right
        } else if editor.query_state("justifyFull") {
            Alignment::Justify
        } else {
            Alignment::Left
        };
        Self {
            bold: editor.query_state("bold"),
            italic: editor.query_state("italic"),
            underline: editor.query_state("underline"),
            strike_through: editor.query_state("strikeThrough"),
            ordered_list: editor.query_state("insertOrderedList"),
            unordered_list: editor.query_state("insertUnorderedList"),
            align,
            font_name: strip_quotes(&editor.query_value("fontName")),
            font_size: editor.query_value("fontSize"),
        }
    }
}

/// Platforms quote multi-word font families; normalize them away.
fn strip_quotes(value: &str) -> String {
    value.chars().filter(|c| *c != '"' && *c != '\'').collect()
}

/// Observes `selectionChange` notifications and recomputes toggle state
/// lazily. The subscription is torn down when the watcher is dropped.
pub struct SelectionWatcher {
    stale: Rc<Cell<bool>>,
    state: SelectionState,
    _subscription: Subscription,
}

impl SelectionWatcher {
    pub fn new(events: &EventBus) -> Self {
        let stale = Rc::new(Cell::new(true));
        let flag = Rc::clone(&stale);
        let subscription = events.on(EventTopic::SelectionChange, move |_| flag.set(true));
        Self {
            stale,
            state: SelectionState::default(),
            _subscription: subscription,
        }
    }

    /// Current state, recomputed if a selection change happened since the
    /// last read.
    pub fn state<E: CommandEngine>(&mut self, editor: &Editor<E>) -> &SelectionState {
        if self.stale.get() {
            self.refresh(editor);
        }
        &self.state
    }

    /// Synchronous re-read without waiting for the next notification.
    pub fn refresh<E: CommandEngine>(&mut self, editor: &Editor<E>) {
        self.state = SelectionState::read(editor);
        self.stale.set(false);
    }
}
