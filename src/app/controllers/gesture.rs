//! Pointer-driven move and resize of canvas elements.
//!
//! Pointer coordinates arrive in screen pixels while element geometry is in
//! canvas units, so every delta is divided by the current zoom.

use crate::app::domain::actions::PresentationAction;
use crate::app::domain::ids::{ElementId, SlideId};
use crate::app::domain::presentation::{Position, Size, SlideElement};

/// Smallest width or height a resize can produce, in canvas units.
pub const MIN_ELEMENT_SIZE: f64 = 50.0;

/// Pointer location in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Zoom usable as a divisor.
fn effective_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    pub slide_id: SlideId,
    pub element_id: ElementId,
    origin: Position,
    start: ScreenPoint,
}

impl DragGesture {
    pub fn begin(slide_id: SlideId, element: &SlideElement, pointer: ScreenPoint) -> Self {
        Self {
            slide_id,
            element_id: element.id.clone(),
            origin: element.placement.position,
            start: pointer,
        }
    }

    /// Top-left for the pointer at `pointer`, never left of or above the canvas.
    pub fn position_at(&self, pointer: ScreenPoint, scale: f64) -> Position {
        let scale = effective_scale(scale);
        Position {
            x: (self.origin.x + (pointer.x - self.start.x) / scale).max(0.0),
            y: (self.origin.y + (pointer.y - self.start.y) / scale).max(0.0),
        }
    }
}

/// Resize from the bottom-right handle; the top-left stays put.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeGesture {
    pub slide_id: SlideId,
    pub element_id: ElementId,
    origin: Size,
    start: ScreenPoint,
}

impl ResizeGesture {
    pub fn begin(slide_id: SlideId, element: &SlideElement, pointer: ScreenPoint) -> Self {
        Self {
            slide_id,
            element_id: element.id.clone(),
            origin: element.placement.size,
            start: pointer,
        }
    }

    pub fn size_at(&self, pointer: ScreenPoint, scale: f64) -> Size {
        let scale = effective_scale(scale);
        Size {
            width: (self.origin.width + (pointer.x - self.start.x) / scale).max(MIN_ELEMENT_SIZE),
            height: (self.origin.height + (pointer.y - self.start.y) / scale)
                .max(MIN_ELEMENT_SIZE),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Drag(DragGesture),
    Resize(ResizeGesture),
}

/// Holds the gesture in progress, if any.
#[derive(Debug, Default)]
pub struct GestureTracker {
    active: Option<Gesture>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_drag(&mut self, slide_id: SlideId, element: &SlideElement, pointer: ScreenPoint) {
        log::debug!("Drag started on element {}", element.id);
        self.active = Some(Gesture::Drag(DragGesture::begin(slide_id, element, pointer)));
    }

    pub fn begin_resize(
        &mut self,
        slide_id: SlideId,
        element: &SlideElement,
        pointer: ScreenPoint,
    ) {
        log::debug!("Resize started on element {}", element.id);
        self.active = Some(Gesture::Resize(ResizeGesture::begin(slide_id, element, pointer)));
    }

    /// The update to dispatch for this pointer move, if a gesture is active.
    pub fn pointer_moved(&self, pointer: ScreenPoint, scale: f64) -> Option<PresentationAction> {
        match self.active.as_ref()? {
            Gesture::Drag(drag) => Some(PresentationAction::UpdateElementPosition {
                slide_id: drag.slide_id.clone(),
                element_id: drag.element_id.clone(),
                position: drag.position_at(pointer, scale),
            }),
            Gesture::Resize(resize) => Some(PresentationAction::UpdateElementSize {
                slide_id: resize.slide_id.clone(),
                element_id: resize.element_id.clone(),
                size: resize.size_at(pointer, scale),
            }),
        }
    }

    /// End the gesture. Returns the one that was active.
    pub fn release(&mut self) -> Option<Gesture> {
        let ended = self.active.take();
        if ended.is_some() {
            log::debug!("Gesture ended");
        }
        ended
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&Gesture> {
        self.active.as_ref()
    }
}
