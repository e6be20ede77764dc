//! Binding editors to container regions.

use crate::container;
use crate::document::Element;
use crate::editor::{EditorEngine, EditorEventKind, EditorOptions, RegionBinding};
use crate::registry::EditorRegistry;
use thiserror::Error;

/// Reasons an editor could not be attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachError {
    #[error("Container has no id")]
    MissingId,
    #[error("No editable region in container {0}")]
    MissingRegion(String),
}

/// Result of a successful attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// A new editor was constructed and registered.
    Created,
    /// The container already had an editor; nothing changed.
    Existing,
}

/// Constructs editors for containers and registers them.
pub struct EditorFactory {
    engine: Box<dyn EditorEngine>,
    options: EditorOptions,
}

impl EditorFactory {
    /// Create a factory over an editor engine.
    pub fn new(engine: Box<dyn EditorEngine>, options: EditorOptions) -> Self {
        Self { engine, options }
    }

    /// Options handed to every constructed editor.
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Bind an editor to the container's editable region.
    ///
    /// Fails without touching the registry if the container has no id or no
    /// region. A container that is already bound is left as is.
    pub fn attach(&mut self, element: &Element, registry: &mut EditorRegistry) -> Result<Binding, AttachError> {
        let id = element.id().ok_or(AttachError::MissingId)?;
        let region = container::editable_region(element)
            .ok_or_else(|| AttachError::MissingRegion(id.to_string()))?;

        if registry.contains(id) {
            log::debug!("Editor already bound to {}", id);
            return Ok(Binding::Existing);
        }

        let binding = RegionBinding {
            container_id: id.to_string(),
            initial_html: region.inner_html(),
        };
        let mut editor = self.engine.construct(binding, &self.options);

        let focus_id = id.to_string();
        editor.add_event_listener(
            EditorEventKind::Focus,
            Box::new(move || log::debug!("Editor {} gained focus", focus_id)),
        );
        let blur_id = id.to_string();
        editor.add_event_listener(
            EditorEventKind::Blur,
            Box::new(move || log::debug!("Editor {} lost focus", blur_id)),
        );

        registry.insert_if_absent(id, editor);
        log::debug!("Bound editor to {}", id);
        Ok(Binding::Created)
    }
}
