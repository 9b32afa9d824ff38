//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Presentation, actions, settings, notices)
//! - `services/` - Business operations (reducer, history, storage, templates, export)
//! - `controllers/` - Orchestration (EditorSession, PresentationLibrary, gestures, playback)
//! - `infrastructure/` - Error types and clock access

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-exports for convenient external access
pub use controllers::editor::EditorSession;
pub use controllers::gesture::{GestureTracker, ScreenPoint};
pub use controllers::library::PresentationLibrary;
pub use controllers::player::{PlayerCommand, PresentationPlayer};
pub use domain::{
    Appearance, EditorSettings, ElementId, ElementKind, ElementPatch, Notice, Presentation,
    PresentationAction, PresentationId, Slide, SlideElement, SlideId, SlidePatch, Transition,
};
pub use infrastructure::error::{AppError, Result};
pub use services::history::History;
pub use services::storage::{JsonFileStore, MemoryStore, PresentationStore, StoredList};
