//! Focus coordination across the set of bound editors.

use crate::container;
use crate::factory::EditorFactory;
use crate::host::Canvas;
use crate::registry::EditorRegistry;
use serde::{Deserialize, Serialize};

/// Selection-change notification from the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionChange {
    /// Ids of the selected elements, in host order.
    pub elements: Vec<String>,
    #[serde(default)]
    pub is_single_selection: bool,
    #[serde(default)]
    pub is_multi_selection: bool,
}

impl SelectionChange {
    /// A selection of exactly one element.
    pub fn single(id: &str) -> Self {
        Self {
            elements: vec![id.to_string()],
            is_single_selection: true,
            is_multi_selection: false,
        }
    }

    /// A selection of several elements.
    pub fn multiple(ids: &[&str]) -> Self {
        Self {
            elements: ids.iter().map(|id| id.to_string()).collect(),
            is_single_selection: false,
            is_multi_selection: true,
        }
    }

    /// An empty selection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Exactly one element is selected, and the host agrees.
    pub fn is_exclusive(&self) -> bool {
        self.is_single_selection && !self.is_multi_selection && self.elements.len() == 1
    }
}

/// Keeps at most one editor focused, following the host selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct FocusCoordinator;

impl FocusCoordinator {
    pub fn new() -> Self {
        Self
    }

    /// React to a selection change.
    ///
    /// Blurs every editor and hands keyboard focus back to the host, then
    /// focuses the editor of a uniquely selected container, binding one first
    /// if the container has none yet (e.g. it was loaded from a file).
    /// Returns the id of the focused container.
    pub fn selection_changed(
        &self,
        selection: &SelectionChange,
        canvas: &mut dyn Canvas,
        factory: &mut EditorFactory,
        registry: &mut EditorRegistry,
    ) -> Option<String> {
        registry.blur_all();
        canvas.focus_root();

        let mut focused = None;
        for id in selection.elements.iter().rev() {
            let Some(element) = canvas.element(id) else {
                continue;
            };
            if !container::is_container(element) {
                continue;
            }
            if !selection.is_exclusive() {
                log::debug!("Container {} is not uniquely selected; leaving unfocused", id);
                continue;
            }
            // The factory registers under the element's own id.
            let Some(key) = element.id() else {
                log::warn!("Skipping focus for {}: container has no id", id);
                continue;
            };
            if !registry.contains(key) {
                if let Err(e) = factory.attach(element, registry) {
                    log::warn!("Skipping focus for {}: {}", id, e);
                    continue;
                }
            }
            if registry.focus(key) {
                focused = Some(key.to_string());
            }
        }
        focused
    }
}
