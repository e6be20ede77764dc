//! The HTML box extension: one owner for the controller, factory, registry,
//! and focus coordinator, exposing the handlers a host calls.

use crate::config::ExtensionConfig;
use crate::editor::{EditorEngine, EditorOptions};
use crate::factory::EditorFactory;
use crate::focus::{FocusCoordinator, SelectionChange};
use crate::host::Canvas;
use crate::locale::{LocaleError, Locales};
use crate::registry::EditorRegistry;
use crate::tools::{DrawController, DrawOutcome, Flow, ToolKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Internal name of the extension.
pub const EXTENSION_NAME: &str = "htmlbox";

/// A tool button the host should place in its tool panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolButton {
    pub id: String,
    /// Localized tooltip.
    pub title: String,
    /// Icon file name.
    pub icon: String,
}

/// Handlers and state for drawing and editing HTML boxes on one document.
pub struct HtmlBoxExtension {
    name: String,
    button: ToolButton,
    controller: DrawController,
    factory: EditorFactory,
    registry: EditorRegistry,
    coordinator: FocusCoordinator,
}

impl HtmlBoxExtension {
    /// Create the extension with the built-in locale bundles.
    pub fn init(config: ExtensionConfig, engine: Box<dyn EditorEngine>) -> Result<Self, LocaleError> {
        let locales = Locales::builtin()?;
        Ok(Self::new(config, &locales, engine))
    }

    /// Create the extension, resolving strings from `locales`.
    pub fn new(config: ExtensionConfig, locales: &Locales, engine: Box<dyn EditorEngine>) -> Self {
        let bundle = locales.resolve(&config.lang);
        let button = ToolButton {
            id: EXTENSION_NAME.to_string(),
            title: bundle.button_title(0).to_string(),
            icon: format!("{}.png", EXTENSION_NAME),
        };
        let options = EditorOptions {
            block_tag: config.block_tag.clone(),
        };
        Self {
            name: bundle.name.clone(),
            button,
            factory: EditorFactory::new(engine, options),
            controller: DrawController::new(config),
            registry: EditorRegistry::new(),
            coordinator: FocusCoordinator::new(),
        }
    }

    /// Localized display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The button that activates the drawing tool.
    pub fn tool_button(&self) -> &ToolButton {
        &self.button
    }

    /// Switch the host into drawing mode. Called when the tool button is clicked.
    pub fn activate_tool(&self, canvas: &mut dyn Canvas) {
        canvas.set_mode(ToolKind::HtmlBox.mode_name());
    }

    /// Live editors, keyed by container id.
    pub fn registry(&self) -> &EditorRegistry {
        &self.registry
    }

    /// Check if a drag is in progress.
    pub fn is_drawing(&self) -> bool {
        self.controller.is_drawing()
    }

    pub fn mouse_down(&mut self, canvas: &mut dyn Canvas, point: Point) -> Flow {
        self.controller.pointer_down(canvas, point)
    }

    pub fn mouse_move(&mut self, canvas: &mut dyn Canvas, point: Point) -> Flow {
        self.controller.pointer_move(canvas, point)
    }

    pub fn mouse_up(&mut self, canvas: &mut dyn Canvas) -> Option<DrawOutcome> {
        self.controller
            .pointer_up(canvas, &mut self.factory, &mut self.registry)
    }

    /// Update editor focus after the host selection changed.
    pub fn selected_changed(&mut self, canvas: &mut dyn Canvas, selection: &SelectionChange) -> Option<String> {
        self.coordinator
            .selection_changed(selection, canvas, &mut self.factory, &mut self.registry)
    }

    /// Drop the editor of an element the host deleted.
    /// Returns true if an editor was destroyed.
    pub fn element_removed(&mut self, id: &str) -> bool {
        let released = self.registry.release(id);
        if released {
            log::debug!("Released editor for deleted container {}", id);
        }
        released
    }

    /// Abandon an in-progress drag, deleting its container.
    pub fn cancel_drawing(&mut self, canvas: &mut dyn Canvas) -> bool {
        self.controller.cancel(canvas)
    }
}
