use super::ids::{ElementId, SlideId};
use super::presentation::{
    Animation, Appearance, Placement, Position, Presentation, Size, Slide, SlideElement,
    Transition,
};

/// Every mutation the editor can request from the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationAction {
    CreatePresentation { title: String },
    LoadPresentation(Box<Presentation>),
    UpdateTitle { title: String },
    /// Appends `slide`, or a blank slide when `None`.
    AddSlide { slide: Option<Slide> },
    DeleteSlide { slide_id: SlideId },
    UpdateSlide { slide_id: SlideId, patch: SlidePatch },
    DuplicateSlide { slide_id: SlideId },
    ReorderSlides { source_index: usize, destination_index: usize },
    SetCurrentSlide { index: usize },
    AddElement { slide_id: SlideId, element: SlideElement },
    UpdateElement { slide_id: SlideId, element_id: ElementId, patch: ElementPatch },
    DeleteElement { slide_id: SlideId, element_id: ElementId },
    SetBackground { slide_id: SlideId, background: String },
    SetTransition { slide_id: SlideId, transition: Transition },
    UpdateElementPosition { slide_id: SlideId, element_id: ElementId, position: Position },
    UpdateElementSize { slide_id: SlideId, element_id: ElementId, size: Size },
    UpdateSlideNotes { slide_id: SlideId, notes: String },
}

impl PresentationAction {
    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreatePresentation { .. } => "create_presentation",
            Self::LoadPresentation(_) => "load_presentation",
            Self::UpdateTitle { .. } => "update_title",
            Self::AddSlide { .. } => "add_slide",
            Self::DeleteSlide { .. } => "delete_slide",
            Self::UpdateSlide { .. } => "update_slide",
            Self::DuplicateSlide { .. } => "duplicate_slide",
            Self::ReorderSlides { .. } => "reorder_slides",
            Self::SetCurrentSlide { .. } => "set_current_slide",
            Self::AddElement { .. } => "add_element",
            Self::UpdateElement { .. } => "update_element",
            Self::DeleteElement { .. } => "delete_element",
            Self::SetBackground { .. } => "set_background",
            Self::SetTransition { .. } => "set_transition",
            Self::UpdateElementPosition { .. } => "update_element_position",
            Self::UpdateElementSize { .. } => "update_element_size",
            Self::UpdateSlideNotes { .. } => "update_slide_notes",
        }
    }
}

/// Partial slide update; `None` leaves the field as is.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlidePatch {
    pub elements: Option<Vec<SlideElement>>,
    pub background: Option<String>,
    pub transition: Option<Transition>,
    /// `Some(None)` clears the notes.
    pub notes: Option<Option<String>>,
}

impl SlidePatch {
    pub fn apply(self, slide: &mut Slide) {
        if let Some(elements) = self.elements {
            slide.elements = elements;
        }
        if let Some(background) = self.background {
            slide.background = background;
        }
        if let Some(transition) = self.transition {
            slide.transition = transition;
        }
        if let Some(notes) = self.notes {
            slide.notes = notes;
        }
    }
}

/// Partial element update. `placement` and `appearance` replace the whole
/// sub-object; an appearance of a different element type is ignored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementPatch {
    pub content: Option<String>,
    pub placement: Option<Placement>,
    pub appearance: Option<Appearance>,
    /// `Some(None)` removes the animation.
    pub animation: Option<Option<Animation>>,
    pub is_editing: Option<bool>,
}

impl ElementPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn placement(placement: Placement) -> Self {
        Self {
            placement: Some(placement),
            ..Default::default()
        }
    }

    pub fn editing(is_editing: bool) -> Self {
        Self {
            is_editing: Some(is_editing),
            ..Default::default()
        }
    }

    pub fn apply(self, element: &mut SlideElement) {
        if let Some(content) = self.content {
            element.content = content;
        }
        if let Some(placement) = self.placement {
            element.placement = placement;
        }
        if let Some(appearance) = self.appearance
            && appearance.kind() == element.kind()
        {
            element.appearance = appearance;
        }
        if let Some(animation) = self.animation {
            element.animation = animation;
        }
        if let Some(is_editing) = self.is_editing {
            element.is_editing = is_editing;
        }
    }
}
