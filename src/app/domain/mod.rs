//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Presentation, Slide and SlideElement
//! - Identifiers and their generator
//! - Reducer actions and partial updates
//! - Structural validation for imported documents
//! - Editor settings
//! - Notices surfaced to the user

pub mod actions;
pub mod ids;
pub mod notices;
pub mod presentation;
pub mod settings;
pub mod validation;

pub use actions::{ElementPatch, PresentationAction, SlidePatch};
pub use ids::{ElementId, PresentationId, SlideId};
pub use notices::Notice;
pub use presentation::{
    Animation, Appearance, ElementKind, ImageStyle, Placement, Position, Presentation,
    ShapeStyle, Size, Slide, SlideElement, TextStyle, Transition,
};
pub use settings::EditorSettings;
