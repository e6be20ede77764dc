//! Host events as delivered to the extension.

use crate::focus::SelectionChange;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// An event the host dispatches to the extension.
///
/// Pointer positions are in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// The tool button was clicked.
    ActivateTool,
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    /// Release position. Kept for script fidelity only: the box extent is
    /// the one written by the last `PointerMove`.
    PointerUp { x: f64, y: f64 },
    SelectionChanged(SelectionChange),
    /// The host deleted an element.
    ElementRemoved { id: String },
    /// Pointer capture was lost mid-drag.
    Cancel,
}

impl HostEvent {
    /// Pointer position for pointer events.
    pub fn position(&self) -> Option<Point> {
        match self {
            HostEvent::PointerDown { x, y } | HostEvent::PointerMove { x, y } | HostEvent::PointerUp { x, y } => {
                Some(Point::new(*x, *y))
            }
            _ => None,
        }
    }
}
