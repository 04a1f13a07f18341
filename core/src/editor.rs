use crate::{
    CommandEngine, EditableRegion, EditorCommand, EditorEvent, EventBus, History,
    ImmutableBlocks, ImmutableConfig, DEFAULT_HISTORY_CAPACITY,
};
use pan_dom::DomRange;

/// Host-supplied string-to-string markup transform, wrapping the editor's
/// own immutable-block serialization.
pub trait HtmlTransform {
    fn apply(&self, html: &str) -> String;
}

impl<F> HtmlTransform for F
where
    F: Fn(&str) -> String,
{
    fn apply(&self, html: &str) -> String {
        self(html)
    }
}

pub struct EditorOptions {
    pub value: String,
    pub readonly: bool,
    pub history_capacity: usize,
    pub immutables: Option<ImmutableConfig>,
    pub serialization: Option<Box<dyn HtmlTransform>>,
    pub deserialization: Option<Box<dyn HtmlTransform>>,
    pub on_update: Option<Box<dyn Fn(&str)>>,
    pub on_ready: Option<Box<dyn Fn()>>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            value: String::new(),
            readonly: false,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            immutables: None,
            serialization: None,
            deserialization: None,
            on_update: None,
            on_ready: None,
        }
    }
}

/// The editing core: owns the editable surface, keeps the canonical model
/// HTML synchronized with it, and funnels every formatting operation
/// through [`Editor::exec`].
pub struct Editor<E: CommandEngine> {
    engine: E,
    region: EditableRegion,
    events: EventBus,
    history: History,
    immutables: Option<ImmutableBlocks>,
    serialization: Option<Box<dyn HtmlTransform>>,
    deserialization: Option<Box<dyn HtmlTransform>>,
    on_update: Option<Box<dyn Fn(&str)>>,
    on_ready: Option<Box<dyn Fn()>>,
    model_html: String,
    initial_value: String,
    readonly: bool,
}

impl<E: CommandEngine> Editor<E> {
    pub fn new(engine: E, options: EditorOptions) -> Self {
        Self {
            engine,
            region: EditableRegion::new(),
            events: EventBus::new(),
            history: History::new(options.history_capacity),
            immutables: options.immutables.map(ImmutableBlocks::new),
            serialization: options.serialization,
            deserialization: options.deserialization,
            on_update: options.on_update,
            on_ready: options.on_ready,
            model_html: options.value.clone(),
            initial_value: options.value,
            readonly: options.readonly,
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn can_edit(&self) -> bool {
        !self.readonly
    }

    pub fn is_focused(&self) -> bool {
        self.region.is_focused()
    }

    pub fn model_html(&self) -> &str {
        &self.model_html
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn region(&self) -> &EditableRegion {
        &self.region
    }

    pub fn region_mut(&mut self) -> &mut EditableRegion {
        &mut self.region
    }

    pub fn immutables(&self) -> Option<&ImmutableBlocks> {
        self.immutables.as_ref()
    }

    /// Bring the surface up: deserialize the initial value, write it in,
    /// mark immutable islands, signal ready.
    pub fn mount(&mut self) {
        self.region.mount();
        let value = self.deserialize_value(&self.initial_value.clone());
        self.region.set_inner_html(&value);
        self.model_html = value;
        self.mark_immutables();
        // seed the ring so the first undo can reach the pre-edit state
        self.history.snapshot(&self.model_html);
        tracing::debug!(len = self.model_html.len(), "editor mounted");
        if let Some(cb) = &self.on_ready {
            cb();
        }
    }

    /// External content replacement: run the deserialization pipeline and
    /// rewrite the surface. Immutable marking re-runs after every write.
    pub fn set_html(&mut self, value: &str) {
        let processed = self.deserialize_value(value);
        self.model_html = processed.clone();
        if self.region.is_mounted() {
            self.region.set_inner_html(&processed);
            self.mark_immutables();
        }
        self.history.snapshot(&self.model_html);
    }

    /// Host reactivity re-entry: a pushed value identical to the current
    /// model is ignored.
    pub fn set_value(&mut self, value: &str) {
        if value == self.model_html {
            return;
        }
        self.set_html(value);
    }

    /// Re-derive the model from the live surface, record history, and tell
    /// the world. Runs after every primitive execution and raw input event.
    pub fn sync_from_dom(&mut self) {
        if !self.region.is_mounted() {
            return;
        }
        let mut raw = self.region.inner_html();
        if let Some(imm) = &self.immutables {
            raw = imm.serialize(&raw);
        }
        if let Some(hook) = &self.serialization {
            raw = hook.apply(&raw);
        }
        self.model_html = raw;
        self.history.snapshot(&self.model_html);
        tracing::trace!(len = self.model_html.len(), "model synchronized");
        self.events.emit(&EditorEvent::Change {
            html: self.model_html.clone(),
        });
        if let Some(cb) = &self.on_update {
            cb(&self.model_html);
        }
    }

    /// The single command-execution funnel. Synchronization and the
    /// `command` event always run, whatever the primitive reported.
    pub fn exec(&mut self, command: EditorCommand, value: Option<&str>) -> bool {
        if !self.can_edit() || !self.region.is_mounted() {
            return false;
        }
        self.region.focus();
        if command.needs_active_selection() && !self.region.has_active_selection() {
            self.region.collapse_to_end();
        }
        let ok = self
            .engine
            .execute(&mut self.region, command.name(), value.unwrap_or(""));
        tracing::debug!(command = command.name(), ok, "primitive executed");
        self.sync_from_dom();
        self.events.emit(&EditorEvent::Command {
            command,
            value: value.map(str::to_string),
        });
        ok
    }

    pub fn query_state(&self, command: &str) -> bool {
        self.engine.query_state(&self.region, command)
    }

    pub fn query_value(&self, command: &str) -> String {
        self.engine.query_value(&self.region, command)
    }

    /// Live selection ranges, or `None` when there is no active selection.
    pub fn selection_ranges(&self) -> Option<Vec<DomRange>> {
        if !self.region.is_mounted() {
            return None;
        }
        self.region.selection_ranges()
    }

    pub fn emit_selection_change(&self) {
        self.events.emit(&EditorEvent::SelectionChange {
            ranges: self.selection_ranges(),
        });
    }

    /// Step back in history and restore that snapshot to the surface.
    pub fn undo(&mut self) -> bool {
        match self.history.undo().map(str::to_string) {
            Some(value) => {
                self.restore(&value);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo().map(str::to_string) {
            Some(value) => {
                self.restore(&value);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, value: &str) {
        let processed = self.deserialize_value(value);
        if self.region.is_mounted() {
            self.region.set_inner_html(&processed);
            self.mark_immutables();
        }
        self.model_html = value.to_string();
        self.events.emit(&EditorEvent::Change {
            html: self.model_html.clone(),
        });
        if let Some(cb) = &self.on_update {
            cb(&self.model_html);
        }
    }

    /// Raw input event from the surface.
    pub fn handle_input(&mut self) {
        self.sync_from_dom();
    }

    pub fn handle_focus(&mut self) {
        self.region.focus();
    }

    pub fn handle_blur(&mut self) {
        self.region.blur();
    }

    fn deserialize_value(&self, value: &str) -> String {
        let mut processed = value.to_string();
        if let Some(hook) = &self.deserialization {
            processed = hook.apply(&processed);
        }
        if let Some(imm) = &self.immutables {
            processed = imm.deserialize(&processed);
        }
        processed
    }

    fn mark_immutables(&mut self) {
        if let Some(imm) = &self.immutables {
            imm.mark(self.region.root_mut());
        }
    }
}
