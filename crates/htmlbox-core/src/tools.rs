//! Drawing interaction: turns a pointer drag into a sized container.

use crate::config::ExtensionConfig;
use crate::container;
use crate::factory::EditorFactory;
use crate::host::{Canvas, SELECT_MODE};
use crate::registry::EditorRegistry;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Tools the extension knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    HtmlBox,
}

impl ToolKind {
    /// Host mode name for this tool.
    pub fn mode_name(&self) -> &'static str {
        match self {
            ToolKind::Select => SELECT_MODE,
            ToolKind::HtmlBox => "htmlbox",
        }
    }

    /// Map a host mode name back to a tool.
    pub fn from_mode(mode: &str) -> Option<Self> {
        match mode {
            SELECT_MODE => Some(ToolKind::Select),
            "htmlbox" => Some(ToolKind::HtmlBox),
            _ => None,
        }
    }
}

/// State of the drawing interaction.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DrawState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A drag is in progress and one container is pending.
    Drawing {
        /// Id of the container being sized.
        container_id: String,
        /// Pointer position at pointer-down.
        anchor: Point,
    },
}

/// Whether the host should keep delivering pointer events to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Result of finishing a drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    /// Id of the finished container.
    pub element: String,
    /// The host should keep the element in the document.
    pub keep: bool,
    /// An editor was bound to the container.
    pub bound: bool,
}

/// Drives the `Idle -> Drawing -> Idle` interaction.
#[derive(Debug, Clone)]
pub struct DrawController {
    /// Current state of the interaction.
    pub state: DrawState,
    config: ExtensionConfig,
}

impl DrawController {
    /// Create an idle controller.
    pub fn new(config: ExtensionConfig) -> Self {
        Self {
            state: DrawState::Idle,
            config,
        }
    }

    /// Check if a drag is in progress.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawState::Drawing { .. })
    }

    /// Id of the container being drawn, if any.
    pub fn pending(&self) -> Option<&str> {
        match &self.state {
            DrawState::Drawing { container_id, .. } => Some(container_id.as_str()),
            DrawState::Idle => None,
        }
    }

    /// Start a drag: create a zero-sized container at `point`.
    ///
    /// Ignored unless the host is in HTML box mode.
    pub fn pointer_down(&mut self, canvas: &mut dyn Canvas, point: Point) -> Flow {
        if ToolKind::from_mode(canvas.mode()) != Some(ToolKind::HtmlBox) {
            return Flow::Stop;
        }
        if let Some(pending) = self.pending() {
            log::debug!("Pointer down while {} is pending; ignoring", pending);
            return Flow::Continue;
        }

        let id = canvas.next_id();
        let spec = container::container_spec(&id, point, &self.config);
        match canvas.add_element_from_spec(&spec) {
            Ok(container_id) => {
                log::debug!(
                    "Drawing container {} from ({}, {}) at zoom {}",
                    container_id,
                    point.x,
                    point.y,
                    canvas.zoom()
                );
                self.state = DrawState::Drawing {
                    container_id,
                    anchor: point,
                };
                Flow::Continue
            }
            Err(e) => {
                log::error!("Failed to create container {}: {}", id, e);
                Flow::Stop
            }
        }
    }

    /// Resize the pending container so it spans from the anchor to `point`.
    pub fn pointer_move(&mut self, canvas: &mut dyn Canvas, point: Point) -> Flow {
        let DrawState::Drawing { container_id, anchor } = &self.state else {
            return Flow::Stop;
        };
        match canvas.element_mut(container_id) {
            Some(element) => {
                container::set_extent(element, *anchor, point);
                Flow::Continue
            }
            None => {
                // Deleted by the host mid-drag.
                log::warn!("Container {} vanished while drawing", container_id);
                self.state = DrawState::Idle;
                Flow::Stop
            }
        }
    }

    /// Finish the drag: normalize the frame, bind an editor, and hand the
    /// container back to the host.
    ///
    /// Returns `None` when no drag was in progress.
    pub fn pointer_up(
        &mut self,
        canvas: &mut dyn Canvas,
        factory: &mut EditorFactory,
        registry: &mut EditorRegistry,
    ) -> Option<DrawOutcome> {
        let DrawState::Drawing { container_id, .. } = std::mem::take(&mut self.state) else {
            return None;
        };
        let Some(element) = canvas.element_mut(&container_id) else {
            log::warn!("Container {} vanished before release", container_id);
            return None;
        };

        if let Some(frame) = container::normalize(element) {
            log::debug!(
                "Container {} finished at ({}, {}) size {}x{}",
                container_id,
                frame.origin.x,
                frame.origin.y,
                frame.width,
                frame.height
            );
        }

        let bound = match factory.attach(element, registry) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Could not bind editor: {}", e);
                false
            }
        };
        if bound {
            canvas.set_mode(SELECT_MODE);
            log::info!("Created HTML box {}", container_id);
        }

        Some(DrawOutcome {
            element: container_id,
            keep: true,
            bound,
        })
    }

    /// Abandon an in-progress drag and delete its container.
    /// Returns true if a drag was cancelled.
    pub fn cancel(&mut self, canvas: &mut dyn Canvas) -> bool {
        match std::mem::take(&mut self.state) {
            DrawState::Drawing { container_id, .. } => {
                canvas.remove_element(&container_id);
                log::debug!("Cancelled drawing {}", container_id);
                true
            }
            DrawState::Idle => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{ATTR_HEIGHT, ATTR_WIDTH, ATTR_X, ATTR_Y, Frame};
    use crate::editor::{EditorOptions, MemoryEngine};
    use crate::host::MemoryCanvas;

    struct Fixture {
        canvas: MemoryCanvas,
        controller: DrawController,
        factory: EditorFactory,
        registry: EditorRegistry,
        engine: MemoryEngine,
    }

    fn fixture() -> Fixture {
        let engine = MemoryEngine::new();
        let mut canvas = MemoryCanvas::new();
        canvas.set_mode(ToolKind::HtmlBox.mode_name());
        Fixture {
            canvas,
            controller: DrawController::new(ExtensionConfig::default()),
            factory: EditorFactory::new(Box::new(engine.clone()), EditorOptions::default()),
            registry: EditorRegistry::new(),
            engine,
        }
    }

    fn frame_of(canvas: &MemoryCanvas, id: &str) -> Frame {
        container::frame(canvas.element(id).unwrap()).unwrap()
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(ToolKind::default(), ToolKind::Select);
        assert_eq!(ToolKind::from_mode("htmlbox"), Some(ToolKind::HtmlBox));
        assert_eq!(ToolKind::from_mode("select"), Some(ToolKind::Select));
        assert_eq!(ToolKind::from_mode("rect"), None);
    }

    #[test]
    fn test_pointer_down_requires_mode() {
        let mut f = fixture();
        f.canvas.set_mode(SELECT_MODE);

        assert_eq!(f.controller.pointer_down(&mut f.canvas, Point::new(1.0, 1.0)), Flow::Stop);
        assert!(!f.controller.is_drawing());
        assert!(f.canvas.document.is_empty());

        // Modes of other extensions are not ours either.
        f.canvas.set_mode("rect");
        assert_eq!(f.controller.pointer_down(&mut f.canvas, Point::new(1.0, 1.0)), Flow::Stop);
        assert!(f.canvas.document.is_empty());
    }

    #[test]
    fn test_pointer_move_while_idle() {
        let mut f = fixture();
        assert_eq!(f.controller.pointer_move(&mut f.canvas, Point::new(5.0, 5.0)), Flow::Stop);
        assert!(f.controller.pointer_up(&mut f.canvas, &mut f.factory, &mut f.registry).is_none());
    }

    #[test]
    fn test_drag_sizing() {
        let mut f = fixture();
        assert_eq!(f.controller.pointer_down(&mut f.canvas, Point::new(10.0, 10.0)), Flow::Continue);
        let id = f.controller.pending().unwrap().to_string();
        assert_eq!(id, "svg_1");
        assert!(matches!(&f.controller.state, DrawState::Drawing { anchor, .. } if *anchor == Point::new(10.0, 10.0)));

        assert_eq!(f.controller.pointer_move(&mut f.canvas, Point::new(30.0, 15.0)), Flow::Continue);
        assert_eq!(f.controller.pointer_move(&mut f.canvas, Point::new(50.0, 40.0)), Flow::Continue);

        let frame = frame_of(&f.canvas, &id);
        assert_eq!(frame.origin, Point::new(10.0, 10.0));
        assert_eq!((frame.width, frame.height), (40.0, 30.0));
    }

    #[test]
    fn test_zoom_does_not_scale_geometry() {
        let mut f = fixture();
        f.canvas.set_zoom(2.0);
        f.controller.pointer_down(&mut f.canvas, Point::new(10.0, 10.0));
        f.controller.pointer_move(&mut f.canvas, Point::new(50.0, 40.0));

        let frame = frame_of(&f.canvas, "svg_1");
        assert_eq!(frame.origin, Point::new(10.0, 10.0));
        assert_eq!((frame.width, frame.height), (40.0, 30.0));
    }

    #[test]
    fn test_release_binds_and_reverts_mode() {
        let mut f = fixture();
        f.controller.pointer_down(&mut f.canvas, Point::new(10.0, 10.0));
        f.controller.pointer_move(&mut f.canvas, Point::new(50.0, 40.0));

        let outcome = f.controller.pointer_up(&mut f.canvas, &mut f.factory, &mut f.registry).unwrap();
        assert_eq!(
            outcome,
            DrawOutcome { element: "svg_1".to_string(), keep: true, bound: true }
        );
        assert!(f.registry.contains("svg_1"));
        assert_eq!(f.canvas.mode(), SELECT_MODE);
        assert!(!f.controller.is_drawing());
    }

    #[test]
    fn test_release_normalizes_negative_extent() {
        let mut f = fixture();
        f.controller.pointer_down(&mut f.canvas, Point::new(50.0, 50.0));
        f.controller.pointer_move(&mut f.canvas, Point::new(10.0, 20.0));

        let el = f.canvas.element("svg_1").unwrap();
        assert_eq!(el.number_attr(ATTR_WIDTH), Some(-40.0));
        assert_eq!(el.number_attr(ATTR_HEIGHT), Some(-30.0));

        f.controller.pointer_up(&mut f.canvas, &mut f.factory, &mut f.registry);
        let el = f.canvas.element("svg_1").unwrap();
        assert_eq!(el.number_attr(ATTR_X), Some(10.0));
        assert_eq!(el.number_attr(ATTR_Y), Some(20.0));
        assert_eq!(el.number_attr(ATTR_WIDTH), Some(40.0));
        assert_eq!(el.number_attr(ATTR_HEIGHT), Some(30.0));
    }

    #[test]
    fn test_click_without_move_still_binds() {
        let mut f = fixture();
        f.controller.pointer_down(&mut f.canvas, Point::new(7.0, 8.0));
        let outcome = f.controller.pointer_up(&mut f.canvas, &mut f.factory, &mut f.registry).unwrap();

        assert!(outcome.bound);
        let frame = frame_of(&f.canvas, &outcome.element);
        assert_eq!((frame.width, frame.height), (0.0, 0.0));
        assert_eq!(f.engine.constructed(), 1);
    }

    #[test]
    fn test_second_pointer_down_is_ignored() {
        let mut f = fixture();
        f.controller.pointer_down(&mut f.canvas, Point::new(0.0, 0.0));
        assert_eq!(f.controller.pointer_down(&mut f.canvas, Point::new(5.0, 5.0)), Flow::Continue);
        assert_eq!(f.canvas.document.len(), 1);
        assert_eq!(f.controller.pending(), Some("svg_1"));
    }

    #[test]
    fn test_failed_binding_keeps_mode() {
        let mut f = fixture();
        f.controller.pointer_down(&mut f.canvas, Point::new(0.0, 0.0));
        // Strip the editable region out from under the drag.
        f.canvas.element_mut("svg_1").unwrap().children.clear();

        let outcome = f.controller.pointer_up(&mut f.canvas, &mut f.factory, &mut f.registry).unwrap();
        assert!(outcome.keep);
        assert!(!outcome.bound);
        assert!(f.registry.is_empty());
        assert_eq!(f.canvas.mode(), ToolKind::HtmlBox.mode_name());
    }

    #[test]
    fn test_container_removed_mid_drag() {
        let mut f = fixture();
        f.controller.pointer_down(&mut f.canvas, Point::new(0.0, 0.0));
        f.canvas.remove_element("svg_1");

        assert_eq!(f.controller.pointer_move(&mut f.canvas, Point::new(3.0, 3.0)), Flow::Stop);
        assert!(!f.controller.is_drawing());
    }

    #[test]
    fn test_cancel_removes_pending() {
        let mut f = fixture();
        f.controller.pointer_down(&mut f.canvas, Point::new(0.0, 0.0));
        assert!(f.controller.cancel(&mut f.canvas));
        assert!(f.canvas.document.is_empty());
        assert!(!f.controller.cancel(&mut f.canvas));
    }
}
