//! Registry of live editors keyed by container id.

use crate::editor::RichTextEditor;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

/// Maps container ids to their bound editor.
///
/// Holds at most one editor per id and tracks which one, if any, has focus.
/// Owned by the extension for the lifetime of a document session.
#[derive(Default)]
pub struct EditorRegistry {
    editors: HashMap<String, Box<dyn RichTextEditor>>,
    focused: Option<String>,
}

impl fmt::Debug for EditorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorRegistry")
            .field("ids", &self.ids())
            .field("focused", &self.focused)
            .finish()
    }
}

impl EditorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a container has a bound editor.
    pub fn contains(&self, id: &str) -> bool {
        self.editors.contains_key(id)
    }

    /// Get the editor bound to a container.
    pub fn get(&self, id: &str) -> Option<&dyn RichTextEditor> {
        self.editors.get(id).map(|e| e.as_ref())
    }

    /// Register an editor unless the id is already bound.
    /// Returns false, leaving the live editor in place, on a duplicate.
    pub fn insert_if_absent(&mut self, id: &str, editor: Box<dyn RichTextEditor>) -> bool {
        match self.editors.entry(id.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(editor);
                true
            }
        }
    }

    /// Focus the editor for `id`, blurring whichever editor had focus before.
    /// Returns false if no editor is bound to `id`.
    pub fn focus(&mut self, id: &str) -> bool {
        if !self.editors.contains_key(id) {
            return false;
        }
        if let Some(previous) = self.focused.take() {
            if previous != id {
                if let Some(editor) = self.editors.get_mut(&previous) {
                    editor.blur();
                }
            }
        }
        if let Some(editor) = self.editors.get_mut(id) {
            editor.focus();
        }
        self.focused = Some(id.to_string());
        true
    }

    /// Blur every registered editor.
    pub fn blur_all(&mut self) {
        for editor in self.editors.values_mut() {
            editor.blur();
        }
        self.focused = None;
    }

    /// Id of the container whose editor has focus.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Number of editors reporting focus.
    pub fn focused_count(&self) -> usize {
        self.editors.values().filter(|e| e.is_focused()).count()
    }

    /// Unregister and destroy the editor bound to `id`.
    /// Returns false if nothing was bound.
    pub fn release(&mut self, id: &str) -> bool {
        match self.editors.remove(id) {
            Some(mut editor) => {
                if self.focused.as_deref() == Some(id) {
                    self.focused = None;
                }
                editor.destroy();
                true
            }
            None => false,
        }
    }

    /// Destroy every editor.
    pub fn clear(&mut self) {
        for (_, mut editor) in self.editors.drain() {
            editor.destroy();
        }
        self.focused = None;
    }

    /// Bound container ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.editors.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of bound editors.
    pub fn len(&self) -> usize {
        self.editors.len()
    }

    /// Check if no editor is bound.
    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }
}

impl Drop for EditorRegistry {
    fn drop(&mut self) {
        self.clear();
    }
}
