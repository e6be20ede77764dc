//! Replays scripted host events against an in-memory canvas.

use htmlbox_core::{
    Canvas, ConfigError, ExtensionConfig, HostEvent, HtmlBoxExtension, LocaleError, MemoryCanvas, MemoryEngine,
    SelectionChange,
};
use std::path::Path;
use thiserror::Error;

/// Errors that stop a replay before it starts.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Locale(#[from] LocaleError),
}

/// Load a JSON array of host events.
pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<HostEvent>, ReplayError> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Draw a box from (10, 10) to (50, 40), then a flipped one, and select each.
pub fn demo_script() -> Vec<HostEvent> {
    vec![
        HostEvent::ActivateTool,
        HostEvent::PointerDown { x: 10.0, y: 10.0 },
        HostEvent::PointerMove { x: 50.0, y: 40.0 },
        HostEvent::PointerUp { x: 50.0, y: 40.0 },
        HostEvent::SelectionChanged(SelectionChange::single("svg_1")),
        HostEvent::ActivateTool,
        HostEvent::PointerDown { x: 150.0, y: 150.0 },
        HostEvent::PointerMove { x: 110.0, y: 120.0 },
        HostEvent::PointerUp { x: 110.0, y: 120.0 },
        HostEvent::SelectionChanged(SelectionChange::single("svg_2")),
        HostEvent::SelectionChanged(SelectionChange::empty()),
    ]
}

/// A canvas plus the extension driving it.
pub struct Session {
    pub canvas: MemoryCanvas,
    pub engine: MemoryEngine,
    pub extension: HtmlBoxExtension,
}

impl Session {
    /// Start a session on an empty canvas.
    pub fn new(config: ExtensionConfig) -> Result<Self, ReplayError> {
        let engine = MemoryEngine::new();
        let extension = HtmlBoxExtension::init(config, Box::new(engine.clone()))?;
        Ok(Self {
            canvas: MemoryCanvas::new(),
            engine,
            extension,
        })
    }

    /// Dispatch one event the way a host would. Returns a one-line summary.
    pub fn apply(&mut self, event: &HostEvent) -> String {
        match event {
            HostEvent::ActivateTool => {
                self.extension.activate_tool(&mut self.canvas);
                format!("mode -> {}", self.canvas.mode())
            }
            HostEvent::PointerDown { .. } => match event.position() {
                Some(point) => format!("{:?}", self.extension.mouse_down(&mut self.canvas, point)),
                None => "ignored".to_string(),
            },
            HostEvent::PointerMove { .. } => match event.position() {
                Some(point) => format!("{:?}", self.extension.mouse_move(&mut self.canvas, point)),
                None => "ignored".to_string(),
            },
            HostEvent::PointerUp { .. } => match self.extension.mouse_up(&mut self.canvas) {
                Some(outcome) => format!(
                    "{} keep={} bound={}",
                    outcome.element, outcome.keep, outcome.bound
                ),
                None => "no drag".to_string(),
            },
            HostEvent::SelectionChanged(selection) => {
                match self.extension.selected_changed(&mut self.canvas, selection) {
                    Some(id) => format!("focused {}", id),
                    None => "no focus".to_string(),
                }
            }
            HostEvent::ElementRemoved { id } => {
                self.canvas.remove_element(id);
                format!("removed {} editor_released={}", id, self.extension.element_removed(id))
            }
            HostEvent::Cancel => format!("cancelled={}", self.extension.cancel_drawing(&mut self.canvas)),
        }
    }

    /// Dispatch every event in order, logging each summary.
    pub fn run(&mut self, events: &[HostEvent]) {
        for event in events {
            let summary = self.apply(event);
            log::info!("{:?}: {}", event, summary);
        }
    }
}
