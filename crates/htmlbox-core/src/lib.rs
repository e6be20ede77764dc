//! HtmlBox Core Library
//!
//! Draw a region on a vector canvas and turn it into an independently
//! editable rich-text area, embedded as foreign content in the document.

pub mod config;
pub mod container;
pub mod document;
pub mod editor;
pub mod extension;
pub mod factory;
pub mod focus;
pub mod host;
pub mod input;
pub mod locale;
pub mod registry;
pub mod tools;

pub use config::{ConfigError, ExtensionConfig};
pub use container::Frame;
pub use document::{Document, DocumentError, Element, ElementSpec, Node};
pub use editor::{EditorEngine, EditorEventKind, EditorOptions, MemoryEngine, RegionBinding, RichTextEditor};
pub use extension::{HtmlBoxExtension, ToolButton};
pub use factory::{AttachError, Binding, EditorFactory};
pub use focus::{FocusCoordinator, SelectionChange};
pub use host::{Canvas, MemoryCanvas};
pub use input::HostEvent;
pub use locale::{LocaleBundle, LocaleError, Locales};
pub use registry::EditorRegistry;
pub use tools::{DrawController, DrawOutcome, DrawState, Flow, ToolKind};
