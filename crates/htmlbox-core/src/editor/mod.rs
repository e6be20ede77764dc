//! Rich-text editing capability contract.
//!
//! The extension never renders text itself. It binds an editor produced by an
//! [`EditorEngine`] to each editable region and only drives focus and
//! lifecycle through the [`RichTextEditor`] trait.

mod memory;

pub use memory::{EditorRecord, MemoryEditor, MemoryEngine};

use serde::{Deserialize, Serialize};

/// Editor notifications a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditorEventKind {
    Focus,
    Blur,
}

/// Callback invoked when an editor event fires.
pub type EditorListener = Box<dyn FnMut()>;

/// Options passed to the engine when binding a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOptions {
    /// Block-level tag wrapping each paragraph.
    pub block_tag: String,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            block_tag: "p".to_string(),
        }
    }
}

/// The region an editor is being bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionBinding {
    /// Id of the container that owns the region.
    pub container_id: String,
    /// Markup the region held before binding. Engines that clear their root
    /// on construction restore it from here.
    pub initial_html: String,
}

/// A live rich-text editor bound to one editable region.
pub trait RichTextEditor {
    /// Give the editor input focus.
    fn focus(&mut self);

    /// Remove input focus from the editor.
    fn blur(&mut self);

    /// Whether the editor currently holds focus.
    fn is_focused(&self) -> bool;

    /// Subscribe to an editor event.
    fn add_event_listener(&mut self, kind: EditorEventKind, listener: EditorListener);

    /// Tear the editor down. It must not be used afterwards.
    fn destroy(&mut self);
}

/// Factory for editor instances.
pub trait EditorEngine {
    /// Construct an editor that takes ownership of the region's content.
    fn construct(&mut self, region: RegionBinding, options: &EditorOptions) -> Box<dyn RichTextEditor>;
}
