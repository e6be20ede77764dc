//! In-memory editor engine.

use super::{EditorEngine, EditorEventKind, EditorListener, EditorOptions, RegionBinding, RichTextEditor};
use std::cell::RefCell;
use std::rc::Rc;

/// Observable state of one editor created by a [`MemoryEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorRecord {
    pub container_id: String,
    pub initial_html: String,
    pub block_tag: String,
    pub focused: bool,
    pub destroyed: bool,
    /// Events fired so far, in order.
    pub events: Vec<EditorEventKind>,
}

/// In-memory engine for testing and headless use.
///
/// Clones share state, so a test can keep a handle while the factory owns
/// the engine.
#[derive(Debug, Clone, Default)]
pub struct MemoryEngine {
    records: Rc<RefCell<Vec<EditorRecord>>>,
}

impl MemoryEngine {
    /// Create an engine with no editors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of editors constructed so far.
    pub fn constructed(&self) -> usize {
        self.records.borrow().len()
    }

    /// Snapshot of every editor ever constructed.
    pub fn records(&self) -> Vec<EditorRecord> {
        self.records.borrow().clone()
    }

    /// Number of editors bound to a container that have not been destroyed.
    pub fn live_for(&self, container_id: &str) -> usize {
        self.records
            .borrow()
            .iter()
            .filter(|r| r.container_id == container_id && !r.destroyed)
            .count()
    }

    /// Containers whose editor currently holds focus.
    pub fn focused(&self) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .filter(|r| r.focused)
            .map(|r| r.container_id.clone())
            .collect()
    }
}

impl EditorEngine for MemoryEngine {
    fn construct(&mut self, region: RegionBinding, options: &EditorOptions) -> Box<dyn RichTextEditor> {
        let mut records = self.records.borrow_mut();
        records.push(EditorRecord {
            container_id: region.container_id,
            initial_html: region.initial_html,
            block_tag: options.block_tag.clone(),
            focused: false,
            destroyed: false,
            events: Vec::new(),
        });
        Box::new(MemoryEditor {
            index: records.len() - 1,
            records: Rc::clone(&self.records),
            listeners: Vec::new(),
        })
    }
}

/// Editor handed out by [`MemoryEngine`].
pub struct MemoryEditor {
    index: usize,
    records: Rc<RefCell<Vec<EditorRecord>>>,
    listeners: Vec<(EditorEventKind, EditorListener)>,
}

impl MemoryEditor {
    /// Flip the focus flag and fire listeners if the state changed.
    fn set_focused(&mut self, focused: bool) {
        let kind = {
            let mut records = self.records.borrow_mut();
            let record = &mut records[self.index];
            if record.destroyed || record.focused == focused {
                return;
            }
            record.focused = focused;
            let kind = if focused { EditorEventKind::Focus } else { EditorEventKind::Blur };
            record.events.push(kind);
            kind
        };
        // Listeners run with the records released so they may inspect the engine.
        for (listen_kind, listener) in &mut self.listeners {
            if *listen_kind == kind {
                listener();
            }
        }
    }
}

impl RichTextEditor for MemoryEditor {
    fn focus(&mut self) {
        self.set_focused(true);
    }

    fn blur(&mut self) {
        self.set_focused(false);
    }

    fn is_focused(&self) -> bool {
        self.records.borrow()[self.index].focused
    }

    fn add_event_listener(&mut self, kind: EditorEventKind, listener: EditorListener) {
        self.listeners.push((kind, listener));
    }

    fn destroy(&mut self) {
        let mut records = self.records.borrow_mut();
        let record = &mut records[self.index];
        record.focused = false;
        record.destroyed = true;
        self.listeners.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn binding(id: &str) -> RegionBinding {
        RegionBinding {
            container_id: id.to_string(),
            initial_html: "<p>hi</p>".to_string(),
        }
    }

    #[test]
    fn test_construct_records_binding() {
        let mut engine = MemoryEngine::new();
        let _editor = engine.construct(binding("svg_1"), &EditorOptions::default());

        let records = engine.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].container_id, "svg_1");
        assert_eq!(records[0].initial_html, "<p>hi</p>");
        assert_eq!(records[0].block_tag, "p");
        assert_eq!(engine.live_for("svg_1"), 1);
    }

    #[test]
    fn test_focus_fires_listeners_once() {
        let mut engine = MemoryEngine::new();
        let mut editor = engine.construct(binding("svg_1"), &EditorOptions::default());

        let focus_hits = Rc::new(Cell::new(0));
        let hits = Rc::clone(&focus_hits);
        editor.add_event_listener(EditorEventKind::Focus, Box::new(move || hits.set(hits.get() + 1)));

        editor.focus();
        editor.focus();
        assert!(editor.is_focused());
        assert_eq!(focus_hits.get(), 1);
        assert_eq!(engine.focused(), vec!["svg_1".to_string()]);

        editor.blur();
        assert!(!editor.is_focused());
        assert_eq!(engine.records()[0].events, vec![EditorEventKind::Focus, EditorEventKind::Blur]);
    }

    #[test]
    fn test_destroyed_editor_ignores_focus() {
        let mut engine = MemoryEngine::new();
        let mut editor = engine.construct(binding("svg_1"), &EditorOptions::default());

        editor.focus();
        editor.destroy();
        assert!(!editor.is_focused());
        editor.focus();
        assert!(!editor.is_focused());
        assert_eq!(engine.live_for("svg_1"), 0);
    }
}
