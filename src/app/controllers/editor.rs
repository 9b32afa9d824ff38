use crate::app::controllers::gesture::{GestureTracker, ScreenPoint};
use crate::app::controllers::player::PresentationPlayer;
use crate::app::domain::actions::{ElementPatch, PresentationAction, SlidePatch};
use crate::app::domain::ids::{ElementId, PresentationId, SlideId};
use crate::app::domain::notices::Notice;
use crate::app::domain::presentation::{
    Animation, ElementKind, Presentation, Size, Slide, SlideElement, Transition,
};
use crate::app::domain::settings::{EditorSettings, clamp_scale};
use crate::app::services::export::{self, HtmlExport, PdfWriter, SlideRenderer};
use crate::app::services::history::History;
use crate::app::services::reducer::reduce;
use crate::app::services::storage::{self, PresentationStore, StoredList};
use crate::app::services::templates::Template;

/// One open presentation and everything the editor screen keeps around it.
///
/// Every document change goes through [`EditorSession::dispatch`] (or the
/// undo/redo and gesture paths) so that history and persistence stay in step
/// with what the user sees.
pub struct EditorSession {
    store: Box<dyn PresentationStore>,
    /// Everything in the store; the open presentation is upserted on each change.
    library: StoredList,
    /// False when the store could not be read; edits then stay in memory.
    writable: bool,
    presentation: Presentation,
    history: History,
    selected: Option<ElementId>,
    scale: f64,
    canvas: Size,
    gestures: GestureTracker,
    /// Document as it was when the active gesture started.
    gesture_start: Option<Presentation>,
    notices: Vec<Notice>,
    storage_ok: bool,
}

impl EditorSession {
    /// Open `id` from the store, or a new presentation when `id` is `None`
    /// or unknown.
    pub fn open(
        store: Box<dyn PresentationStore>,
        settings: &EditorSettings,
        id: Option<&str>,
    ) -> Self {
        let mut notices = Vec::new();
        let loaded = storage::load_or_default(store.as_ref());
        notices.extend(loaded.notice);
        let library = loaded.list;

        let found = id.and_then(|id| {
            library
                .presentations
                .iter()
                .find(|p| p.id.as_str() == id)
                .cloned()
        });
        let presentation = match (found, id) {
            (Some(presentation), _) => presentation,
            (None, Some(missing)) => {
                log::warn!("Presentation {} not found, starting a new one", missing);
                notices.push(Notice::PresentationNotFound(PresentationId::from(missing)));
                Presentation::new(settings.default_title.clone())
            }
            (None, None) => Presentation::new(settings.default_title.clone()),
        };

        let mut session = Self {
            store,
            library,
            writable: loaded.writable,
            presentation,
            history: History::with_limit(settings.history_limit),
            selected: None,
            scale: settings.initial_scale(),
            canvas: Size {
                width: settings.canvas_width,
                height: settings.canvas_height(),
            },
            gestures: GestureTracker::new(),
            gesture_start: None,
            storage_ok: loaded.writable,
            notices,
        };
        session.persist();
        session
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.presentation.current_slide()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Drain queued notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Apply `action`. Returns whether the document changed.
    pub fn dispatch(&mut self, action: PresentationAction) -> bool {
        log::debug!("Dispatching {}", action.name());
        let next = reduce(&self.presentation, action);
        self.commit(next)
    }

    /// Apply several actions as one undo step.
    fn dispatch_all(&mut self, actions: Vec<PresentationAction>) -> bool {
        let next = actions
            .into_iter()
            .fold(self.presentation.clone(), |doc, action| reduce(&doc, action));
        self.commit(next)
    }

    fn commit(&mut self, next: Presentation) -> bool {
        if next == self.presentation {
            return false;
        }
        // An edit during a gesture ends it, so the gesture lands in history first
        if self.gesture_start.is_some() {
            self.finish_gesture();
        }
        let previous = std::mem::replace(&mut self.presentation, next);
        self.history.record(&previous);
        self.persist();
        true
    }

    pub fn undo(&mut self) -> bool {
        self.finish_gesture();
        match self.history.undo(&self.presentation) {
            Some(previous) => {
                self.presentation = previous;
                self.persist();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        self.finish_gesture();
        match self.history.redo(&self.presentation) {
            Some(next) => {
                self.presentation = next;
                self.persist();
                true
            }
            None => false,
        }
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn persist(&mut self) {
        storage::upsert(&mut self.library.presentations, &self.presentation);
        if !self.writable {
            return;
        }
        match storage::save_or_warn(self.store.as_mut(), &self.library) {
            None => self.storage_ok = true,
            Some(notice) => {
                // One notice per outage
                if self.storage_ok {
                    self.notices.push(notice);
                }
                self.storage_ok = false;
            }
        }
    }

    fn current_slide_id(&self) -> Option<SlideId> {
        self.current_slide().map(|s| s.id.clone())
    }

    fn current_element(&self, id: &ElementId) -> Option<&SlideElement> {
        self.current_slide()?.element(id)
    }

    // Selection and text editing

    /// Select an element of the current slide. Unknown ids are ignored.
    pub fn select_element(&mut self, id: &ElementId) {
        if self.current_element(id).is_some() {
            self.selected = Some(id.clone());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_element(&self) -> Option<&SlideElement> {
        self.current_element(self.selected.as_ref()?)
    }

    /// Put a text element into live editing. Other element types are ignored.
    pub fn begin_text_edit(&mut self, id: &ElementId) -> bool {
        let is_text = self
            .current_element(id)
            .is_some_and(|e| e.kind() == ElementKind::Text);
        if !is_text {
            return false;
        }
        self.selected = Some(id.clone());
        self.update_element(id, ElementPatch::editing(true))
    }

    pub fn end_text_edit(&mut self, id: &ElementId) -> bool {
        self.update_element(id, ElementPatch::editing(false))
    }

    // Element commands on the current slide

    /// Add `element` to the current slide and select it.
    pub fn add_element(&mut self, element: SlideElement) -> bool {
        let Some(slide_id) = self.current_slide_id() else {
            return false;
        };
        if !self.dispatch(PresentationAction::AddElement { slide_id, element }) {
            return false;
        }
        // Appended last; the id may have been replaced on collision
        self.selected = self
            .current_slide()
            .and_then(|s| s.elements.last())
            .map(|e| e.id.clone());
        true
    }

    pub fn update_element(&mut self, id: &ElementId, patch: ElementPatch) -> bool {
        let Some(slide_id) = self.current_slide_id() else {
            return false;
        };
        self.dispatch(PresentationAction::UpdateElement {
            slide_id,
            element_id: id.clone(),
            patch,
        })
    }

    pub fn delete_element(&mut self, id: &ElementId) -> bool {
        let Some(slide_id) = self.current_slide_id() else {
            return false;
        };
        let deleted = self.dispatch(PresentationAction::DeleteElement {
            slide_id,
            element_id: id.clone(),
        });
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        deleted
    }

    pub fn bring_forward(&mut self, id: &ElementId) -> bool {
        let Some(element) = self.current_element(id) else {
            return false;
        };
        let mut placement = element.placement.clone();
        placement.z_index += 1;
        self.update_element(id, ElementPatch::placement(placement))
    }

    /// Lower the paint order by one; elements at 1 or below stay put.
    pub fn send_backward(&mut self, id: &ElementId) -> bool {
        let Some(element) = self.current_element(id) else {
            return false;
        };
        if element.placement.z_index <= 1 {
            return false;
        }
        let mut placement = element.placement.clone();
        placement.z_index -= 1;
        self.update_element(id, ElementPatch::placement(placement))
    }

    /// Switch between fully hidden and fully opaque.
    pub fn toggle_visibility(&mut self, id: &ElementId) -> bool {
        let Some(element) = self.current_element(id) else {
            return false;
        };
        let mut placement = element.placement.clone();
        placement.opacity = Some(if element.is_hidden() { 1.0 } else { 0.0 });
        self.update_element(id, ElementPatch::placement(placement))
    }

    pub fn set_animation(&mut self, id: &ElementId, kind: &str, duration: f64, delay: f64) -> bool {
        if self.current_element(id).is_none() {
            return false;
        }
        let patch = ElementPatch {
            animation: Some(Some(Animation {
                kind: kind.to_string(),
                duration,
                delay,
            })),
            ..Default::default()
        };
        self.update_element(id, patch)
    }

    // Slide commands

    pub fn rename(&mut self, title: &str) -> bool {
        self.dispatch(PresentationAction::UpdateTitle {
            title: title.to_string(),
        })
    }

    pub fn add_slide(&mut self) -> bool {
        self.selected = None;
        self.dispatch(PresentationAction::AddSlide { slide: None })
    }

    pub fn select_slide(&mut self, index: usize) -> bool {
        let changed = self.dispatch(PresentationAction::SetCurrentSlide { index });
        if changed {
            self.selected = None;
        }
        changed
    }

    pub fn duplicate_slide(&mut self, slide_id: &SlideId) -> bool {
        self.dispatch(PresentationAction::DuplicateSlide {
            slide_id: slide_id.clone(),
        })
    }

    pub fn delete_slide(&mut self, slide_id: &SlideId) -> bool {
        self.dispatch(PresentationAction::DeleteSlide {
            slide_id: slide_id.clone(),
        })
    }

    pub fn move_slide(&mut self, from: usize, to: usize) -> bool {
        self.dispatch(PresentationAction::ReorderSlides {
            source_index: from,
            destination_index: to,
        })
    }

    pub fn set_background(&mut self, slide_id: &SlideId, background: &str) -> bool {
        self.dispatch(PresentationAction::SetBackground {
            slide_id: slide_id.clone(),
            background: background.to_string(),
        })
    }

    pub fn set_transition(&mut self, slide_id: &SlideId, transition: Transition) -> bool {
        self.dispatch(PresentationAction::SetTransition {
            slide_id: slide_id.clone(),
            transition,
        })
    }

    pub fn set_notes(&mut self, slide_id: &SlideId, notes: &str) -> bool {
        self.dispatch(PresentationAction::UpdateSlideNotes {
            slide_id: slide_id.clone(),
            notes: notes.to_string(),
        })
    }

    /// Restyle the first slide after the template's first slide and append
    /// the rest. Recorded as a single undo step.
    pub fn apply_template(&mut self, template: &Template) -> bool {
        let mut slides = template.slides.iter().cloned();
        let (Some(first), Some(target)) = (slides.next(), self.presentation.slides.first()) else {
            return false;
        };

        let mut actions = vec![PresentationAction::UpdateSlide {
            slide_id: target.id.clone(),
            patch: SlidePatch {
                elements: Some(first.elements),
                background: Some(first.background),
                transition: Some(first.transition),
                notes: None,
            },
        }];
        actions.extend(slides.map(|slide| PresentationAction::AddSlide {
            slide: Some(Slide {
                id: SlideId::generate(),
                ..slide
            }),
        }));
        actions.push(PresentationAction::SetCurrentSlide { index: 0 });

        let applied = self.dispatch_all(actions);
        if applied {
            self.selected = None;
            self.notices.push(Notice::TemplateApplied(template.name.to_string()));
        }
        applied
    }

    // Zoom

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = clamp_scale(scale);
    }

    /// Slide frame in canvas units, before zoom.
    pub fn canvas_size(&self) -> Size {
        self.canvas
    }

    // Pointer gestures

    /// Start moving an element of the current slide.
    pub fn begin_drag(&mut self, id: &ElementId, pointer: ScreenPoint) -> bool {
        let Some(slide) = self.presentation.current_slide() else {
            return false;
        };
        let Some(element) = slide.element(id) else {
            return false;
        };
        self.gestures.begin_drag(slide.id.clone(), element, pointer);
        self.gesture_start = Some(self.presentation.clone());
        true
    }

    /// Start resizing an element of the current slide.
    pub fn begin_resize(&mut self, id: &ElementId, pointer: ScreenPoint) -> bool {
        let Some(slide) = self.presentation.current_slide() else {
            return false;
        };
        let Some(element) = slide.element(id) else {
            return false;
        };
        self.gestures.begin_resize(slide.id.clone(), element, pointer);
        self.gesture_start = Some(self.presentation.clone());
        true
    }

    /// Follow the pointer. Intermediate states are neither recorded nor
    /// saved; the whole gesture becomes one undo step on release.
    pub fn pointer_moved(&mut self, pointer: ScreenPoint) -> bool {
        let Some(action) = self.gestures.pointer_moved(pointer, self.scale) else {
            return false;
        };
        let next = reduce(&self.presentation, action);
        if next == self.presentation {
            return false;
        }
        self.presentation = next;
        true
    }

    pub fn pointer_released(&mut self) {
        self.finish_gesture();
    }

    pub fn is_gesture_active(&self) -> bool {
        self.gestures.is_active()
    }

    fn finish_gesture(&mut self) {
        self.gestures.release();
        if let Some(before) = self.gesture_start.take()
            && before != self.presentation
        {
            self.history.record(&before);
            self.persist();
        }
    }

    /// Play the presentation from the current slide. Ends any gesture first.
    pub fn present(&mut self) -> PresentationPlayer {
        self.finish_gesture();
        PresentationPlayer::start(&self.presentation, self.presentation.current_slide_index)
    }

    // Export

    /// Build the HTML player. Failures are reported as a notice.
    pub fn export_html(&mut self, renderer: &mut dyn SlideRenderer) -> Option<HtmlExport> {
        match export::export_html(&self.presentation, renderer) {
            Ok(export) => {
                self.notices.push(Notice::ExportSucceeded {
                    format: "HTML",
                    file_name: export.file_name.clone(),
                });
                Some(export)
            }
            Err(e) => {
                log::error!("HTML export failed: {}", e);
                self.notices.push(Notice::ExportFailed {
                    format: "HTML",
                    reason: e.to_string(),
                });
                None
            }
        }
    }

    pub fn export_pdf(
        &mut self,
        renderer: &mut dyn SlideRenderer,
        writer: &mut dyn PdfWriter,
    ) -> bool {
        match export::export_pdf(&self.presentation, renderer, writer) {
            Ok(file_name) => {
                self.notices.push(Notice::ExportSucceeded {
                    format: "PDF",
                    file_name,
                });
                true
            }
            Err(e) => {
                log::error!("PDF export failed: {}", e);
                self.notices.push(Notice::ExportFailed {
                    format: "PDF",
                    reason: e.to_string(),
                });
                false
            }
        }
    }
}
