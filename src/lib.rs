pub mod app;

pub use app::{
    EditorSession, EditorSettings, History, Notice, Presentation, PresentationAction,
    PresentationLibrary, PresentationPlayer, PresentationStore, Slide, SlideElement,
};
