//! Host canvas capability surface.

use crate::document::{Document, DocumentError, Element, ElementSpec};

/// The host mode in which pointer events select elements.
pub const SELECT_MODE: &str = "select";

/// Capabilities the host canvas exposes to the extension.
///
/// All calls happen on the host's event thread, so implementations need no
/// synchronization.
pub trait Canvas {
    /// Current tool mode.
    fn mode(&self) -> &str;

    /// Switch the tool mode.
    fn set_mode(&mut self, mode: &str);

    /// Allocate a session-unique element id.
    fn next_id(&mut self) -> String;

    /// Build an element tree from a spec and add it to the document.
    /// Returns the id of the new element.
    fn add_element_from_spec(&mut self, spec: &ElementSpec) -> Result<String, DocumentError>;

    /// Look up an element by id.
    fn element(&self, id: &str) -> Option<&Element>;

    /// Look up an element by id for mutation.
    fn element_mut(&mut self, id: &str) -> Option<&mut Element>;

    /// Delete an element from the document.
    fn remove_element(&mut self, id: &str) -> Option<Element>;

    /// Current zoom factor.
    fn zoom(&self) -> f64;

    /// Return keyboard focus to the host's root surface.
    fn focus_root(&mut self);
}

/// In-memory canvas for testing and headless use.
#[derive(Debug, Clone)]
pub struct MemoryCanvas {
    /// The document being edited.
    pub document: Document,
    mode: String,
    zoom: f64,
    id_counter: u64,
    root_focus_count: usize,
}

impl Default for MemoryCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCanvas {
    /// Create an empty canvas in select mode.
    pub fn new() -> Self {
        Self::with_document(Document::new())
    }

    /// Create a canvas over an existing document (e.g. one loaded from disk).
    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            mode: SELECT_MODE.to_string(),
            zoom: 1.0,
            id_counter: 0,
            root_focus_count: 0,
        }
    }

    /// Set the zoom factor.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    /// Number of times focus was returned to the root surface.
    pub fn root_focus_count(&self) -> usize {
        self.root_focus_count
    }
}

impl Canvas for MemoryCanvas {
    fn mode(&self) -> &str {
        &self.mode
    }

    fn set_mode(&mut self, mode: &str) {
        self.mode = mode.to_string();
    }

    fn next_id(&mut self) -> String {
        // Skip ids already taken by a loaded document.
        loop {
            self.id_counter += 1;
            let id = format!("svg_{}", self.id_counter);
            if self.document.get(&id).is_none() {
                return id;
            }
        }
    }

    fn add_element_from_spec(&mut self, spec: &ElementSpec) -> Result<String, DocumentError> {
        self.document.add(Element::from_spec(spec))
    }

    fn element(&self, id: &str) -> Option<&Element> {
        self.document.get(id)
    }

    fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.document.get_mut(id)
    }

    fn remove_element(&mut self, id: &str) -> Option<Element> {
        self.document.remove(id)
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn focus_root(&mut self) {
        self.root_focus_count += 1;
    }
}
