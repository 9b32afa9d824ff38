//! The presentation reducer: `(document, action) -> document`.
//!
//! The input document is only borrowed. Actions that reference a slide or
//! element that does not exist, or that would break an invariant (deleting
//! the last slide, an out-of-range index), return an unchanged copy.

use std::collections::HashSet;

use crate::app::domain::actions::PresentationAction;
use crate::app::domain::ids::{ElementId, SlideId, fresh_id};
use crate::app::domain::presentation::{Presentation, Slide, SlideElement};
use crate::app::infrastructure::clock::now_millis;

/// Apply `action` to `state` using the system clock for `updated`.
pub fn reduce(state: &Presentation, action: PresentationAction) -> Presentation {
    reduce_at(state, action, now_millis())
}

/// Apply `action` to `state` with an explicit clock reading.
pub fn reduce_at(state: &Presentation, action: PresentationAction, now: i64) -> Presentation {
    use PresentationAction::*;

    match action {
        CreatePresentation { title } => Presentation::new_at(title, now),

        LoadPresentation(presentation) => *presentation,

        UpdateTitle { title } => {
            let mut next = state.clone();
            next.title = title;
            touch(&mut next, now);
            next
        }

        AddSlide { slide } => {
            let mut next = state.clone();
            let mut slide = slide.unwrap_or_else(Slide::blank);
            if next.slide(&slide.id).is_some() {
                let mut taken = slide_ids(&next);
                slide.id = SlideId(fresh_id(&mut taken));
            }
            next.slides.push(slide);
            next.current_slide_index = next.slides.len() - 1;
            touch(&mut next, now);
            next
        }

        DeleteSlide { slide_id } => {
            if state.slides.len() <= 1 {
                return state.clone();
            }
            let Some(index) = state.slide_index(&slide_id) else {
                return state.clone();
            };
            let mut next = state.clone();
            next.slides.remove(index);
            next.current_slide_index = next.current_slide_index.min(next.slides.len() - 1);
            touch(&mut next, now);
            next
        }

        UpdateSlide { slide_id, patch } => {
            edit_slide(state, &slide_id, now, |slide| patch.apply(slide))
        }

        DuplicateSlide { slide_id } => {
            let Some(index) = state.slide_index(&slide_id) else {
                return state.clone();
            };
            let mut next = state.clone();
            let mut taken = all_ids(&next);
            let mut copy = next.slides[index].clone();
            copy.id = SlideId(fresh_id(&mut taken));
            for element in &mut copy.elements {
                element.id = ElementId(fresh_id(&mut taken));
                element.is_editing = false;
            }
            next.slides.insert(index + 1, copy);
            next.current_slide_index = index + 1;
            touch(&mut next, now);
            next
        }

        ReorderSlides {
            source_index,
            destination_index,
        } => {
            let len = state.slides.len();
            if source_index >= len || destination_index >= len {
                return state.clone();
            }
            let mut next = state.clone();
            let moved = next.slides.remove(source_index);
            next.slides.insert(destination_index, moved);
            if next.current_slide_index == source_index {
                next.current_slide_index = destination_index;
            }
            touch(&mut next, now);
            next
        }

        SetCurrentSlide { index } => {
            if index >= state.slides.len() {
                return state.clone();
            }
            let mut next = state.clone();
            next.current_slide_index = index;
            next
        }

        AddElement { slide_id, element } => edit_slide(state, &slide_id, now, |slide| {
            let mut element = element;
            if slide.element(&element.id).is_some() {
                let mut taken: HashSet<String> =
                    slide.elements.iter().map(|e| e.id.0.clone()).collect();
                element.id = ElementId(fresh_id(&mut taken));
            }
            slide.elements.push(element);
        }),

        UpdateElement {
            slide_id,
            element_id,
            patch,
        } => edit_element(state, &slide_id, &element_id, now, |element| {
            patch.apply(element)
        }),

        DeleteElement {
            slide_id,
            element_id,
        } => {
            let exists = state
                .slide(&slide_id)
                .is_some_and(|s| s.element(&element_id).is_some());
            if !exists {
                return state.clone();
            }
            edit_slide(state, &slide_id, now, |slide| {
                slide.elements.retain(|e| e.id != element_id)
            })
        }

        SetBackground {
            slide_id,
            background,
        } => edit_slide(state, &slide_id, now, |slide| slide.background = background),

        SetTransition {
            slide_id,
            transition,
        } => edit_slide(state, &slide_id, now, |slide| slide.transition = transition),

        UpdateSlideNotes { slide_id, notes } => {
            edit_slide(state, &slide_id, now, |slide| slide.notes = Some(notes))
        }

        UpdateElementPosition {
            slide_id,
            element_id,
            position,
        } => edit_element(state, &slide_id, &element_id, now, |element| {
            element.placement.position = position
        }),

        UpdateElementSize {
            slide_id,
            element_id,
            size,
        } => edit_element(state, &slide_id, &element_id, now, |element| {
            element.placement.size = size
        }),
    }
}

/// `updated` never moves backwards, even if the clock does.
fn touch(presentation: &mut Presentation, now: i64) {
    presentation.updated = presentation.updated.max(now);
}

fn edit_slide(
    state: &Presentation,
    slide_id: &SlideId,
    now: i64,
    edit: impl FnOnce(&mut Slide),
) -> Presentation {
    let Some(index) = state.slide_index(slide_id) else {
        return state.clone();
    };
    let mut next = state.clone();
    edit(&mut next.slides[index]);
    touch(&mut next, now);
    next
}

fn edit_element(
    state: &Presentation,
    slide_id: &SlideId,
    element_id: &ElementId,
    now: i64,
    edit: impl FnOnce(&mut SlideElement),
) -> Presentation {
    let Some(slide_index) = state.slide_index(slide_id) else {
        return state.clone();
    };
    let Some(element_index) = state.slides[slide_index]
        .elements
        .iter()
        .position(|e| &e.id == element_id)
    else {
        return state.clone();
    };
    let mut next = state.clone();
    edit(&mut next.slides[slide_index].elements[element_index]);
    touch(&mut next, now);
    next
}

fn slide_ids(presentation: &Presentation) -> HashSet<String> {
    presentation.slides.iter().map(|s| s.id.0.clone()).collect()
}

/// Every slide and element id in the presentation.
fn all_ids(presentation: &Presentation) -> HashSet<String> {
    let mut ids = slide_ids(presentation);
    for slide in &presentation.slides {
        ids.extend(slide.elements.iter().map(|e| e.id.0.clone()));
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::actions::{ElementPatch, SlidePatch};
    use crate::app::domain::presentation::{Position, Size, Transition};

    const T0: i64 = 1_000;
    const T1: i64 = 2_000;

    fn deck() -> Presentation {
        Presentation::new_at("Untitled Presentation", T0)
    }

    fn three_slides() -> Presentation {
        let mut p = deck();
        for _ in 0..2 {
            p = reduce_at(&p, PresentationAction::AddSlide { slide: None }, T0);
        }
        p
    }

    fn first_slide_id(p: &Presentation) -> SlideId {
        p.slides[0].id.clone()
    }

    #[test]
    fn test_update_title_bumps_updated() {
        let p = deck();
        let next = reduce_at(&p, PresentationAction::UpdateTitle { title: "Q3".into() }, T1);
        assert_eq!(next.title, "Q3");
        assert_eq!(next.updated, T1);
        assert_eq!(p.title, "Untitled Presentation");
    }

    #[test]
    fn test_updated_never_decreases() {
        let p = deck();
        let next = reduce_at(&p, PresentationAction::UpdateTitle { title: "Q3".into() }, T0 - 500);
        assert_eq!(next.updated, T0);
    }

    #[test]
    fn test_add_default_slide() {
        let next = reduce_at(&deck(), PresentationAction::AddSlide { slide: None }, T1);
        assert_eq!(next.slides.len(), 2);
        assert_eq!(next.current_slide_index, 1);
        let added = &next.slides[1];
        assert_eq!(added.background, "#ffffff");
        assert_eq!(added.transition, Transition::None);
        assert!(added.elements.is_empty());
    }

    #[test]
    fn test_add_slide_with_colliding_id_gets_fresh_id() {
        let p = deck();
        let mut clash = Slide::blank();
        clash.id = first_slide_id(&p);
        let next = reduce_at(&p, PresentationAction::AddSlide { slide: Some(clash) }, T1);
        assert_eq!(next.slides.len(), 2);
        assert_ne!(next.slides[1].id, next.slides[0].id);
    }

    #[test]
    fn test_delete_last_slide_is_rejected() {
        let p = deck();
        let next = reduce_at(&p, PresentationAction::DeleteSlide { slide_id: first_slide_id(&p) }, T1);
        assert_eq!(next, p);
    }

    #[test]
    fn test_delete_slide_clamps_index() {
        let p = three_slides();
        assert_eq!(p.current_slide_index, 2);
        let last = p.slides[2].id.clone();
        let next = reduce_at(&p, PresentationAction::DeleteSlide { slide_id: last }, T1);
        assert_eq!(next.slides.len(), 2);
        assert_eq!(next.current_slide_index, 1);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let p = three_slides();
        let ghost_slide = SlideId::from("ghost");
        let ghost_element = ElementId::from("ghost");
        let real_slide = first_slide_id(&p);

        let actions = vec![
            PresentationAction::DeleteSlide { slide_id: ghost_slide.clone() },
            PresentationAction::DuplicateSlide { slide_id: ghost_slide.clone() },
            PresentationAction::UpdateSlide {
                slide_id: ghost_slide.clone(),
                patch: SlidePatch { background: Some("#000".into()), ..Default::default() },
            },
            PresentationAction::SetBackground { slide_id: ghost_slide.clone(), background: "#000".into() },
            PresentationAction::SetTransition { slide_id: ghost_slide.clone(), transition: Transition::Zoom },
            PresentationAction::UpdateSlideNotes { slide_id: ghost_slide.clone(), notes: "n".into() },
            PresentationAction::AddElement { slide_id: ghost_slide.clone(), element: SlideElement::default_shape() },
            PresentationAction::UpdateElement {
                slide_id: real_slide.clone(),
                element_id: ghost_element.clone(),
                patch: ElementPatch::content("x"),
            },
            PresentationAction::DeleteElement { slide_id: real_slide.clone(), element_id: ghost_element.clone() },
            PresentationAction::UpdateElementPosition {
                slide_id: real_slide.clone(),
                element_id: ghost_element.clone(),
                position: Position { x: 1.0, y: 1.0 },
            },
            PresentationAction::UpdateElementSize {
                slide_id: ghost_slide,
                element_id: ghost_element,
                size: Size { width: 80.0, height: 80.0 },
            },
            PresentationAction::ReorderSlides { source_index: 5, destination_index: 0 },
            PresentationAction::SetCurrentSlide { index: 3 },
        ];

        for action in actions {
            let name = action.name();
            assert_eq!(reduce_at(&p, action, T1), p, "{} should be a no-op", name);
        }
    }

    #[test]
    fn test_update_slide_merges_patch() {
        let p = deck();
        let id = first_slide_id(&p);
        let next = reduce_at(
            &p,
            PresentationAction::UpdateSlide {
                slide_id: id,
                patch: SlidePatch {
                    transition: Some(Transition::Fade),
                    ..Default::default()
                },
            },
            T1,
        );
        assert_eq!(next.slides[0].transition, Transition::Fade);
        assert_eq!(next.slides[0].elements, p.slides[0].elements);
    }

    #[test]
    fn test_duplicate_slide_fresh_ids() {
        let p = three_slides();
        let mut p = reduce_at(
            &p,
            PresentationAction::AddElement {
                slide_id: first_slide_id(&p),
                element: SlideElement::default_shape(),
            },
            T1,
        );
        p.current_slide_index = 2;
        let source = p.slides[0].clone();
        let before = all_ids(&p);

        let next = reduce_at(&p, PresentationAction::DuplicateSlide { slide_id: source.id.clone() }, T1);
        assert_eq!(next.slides.len(), 4);
        assert_eq!(next.current_slide_index, 1);

        let copy = &next.slides[1];
        assert!(!before.contains(copy.id.as_str()));
        assert_eq!(copy.elements.len(), source.elements.len());
        for (dup, orig) in copy.elements.iter().zip(&source.elements) {
            assert!(!before.contains(dup.id.as_str()));
            assert_eq!(dup.content, orig.content);
            assert_eq!(dup.placement, orig.placement);
            assert_eq!(dup.appearance, orig.appearance);
        }
        assert_eq!(copy.background, source.background);
        // Source untouched and still in front of the copy
        assert_eq!(next.slides[0], source);
    }

    #[test]
    fn test_reorder_follows_moved_current_slide() {
        let mut p = three_slides();
        p.current_slide_index = 0;
        let moved = p.slides[0].id.clone();
        let next = reduce_at(
            &p,
            PresentationAction::ReorderSlides { source_index: 0, destination_index: 2 },
            T1,
        );
        assert_eq!(next.slides[2].id, moved);
        assert_eq!(next.current_slide_index, 2);
    }

    #[test]
    fn test_reorder_keeps_other_current_index() {
        let mut p = three_slides();
        p.current_slide_index = 1;
        let next = reduce_at(
            &p,
            PresentationAction::ReorderSlides { source_index: 0, destination_index: 2 },
            T1,
        );
        assert_eq!(next.current_slide_index, 1);
    }

    #[test]
    fn test_set_current_slide_does_not_touch() {
        let p = three_slides();
        let next = reduce_at(&p, PresentationAction::SetCurrentSlide { index: 0 }, T1);
        assert_eq!(next.current_slide_index, 0);
        assert_eq!(next.updated, p.updated);
    }

    #[test]
    fn test_element_position_and_size() {
        let p = deck();
        let slide_id = first_slide_id(&p);
        let element_id = p.slides[0].elements[0].id.clone();
        let moved = reduce_at(
            &p,
            PresentationAction::UpdateElementPosition {
                slide_id: slide_id.clone(),
                element_id: element_id.clone(),
                position: Position { x: 12.0, y: 34.0 },
            },
            T1,
        );
        let resized = reduce_at(
            &moved,
            PresentationAction::UpdateElementSize {
                slide_id,
                element_id,
                size: Size { width: 120.0, height: 60.0 },
            },
            T1,
        );
        let placement = &resized.slides[0].elements[0].placement;
        assert_eq!(placement.position, Position { x: 12.0, y: 34.0 });
        assert_eq!(placement.size, Size { width: 120.0, height: 60.0 });
        assert_eq!(placement.z_index, 10);
    }

    #[test]
    fn test_delete_element() {
        let p = deck();
        let slide_id = first_slide_id(&p);
        let element_id = p.slides[0].elements[1].id.clone();
        let next = reduce_at(&p, PresentationAction::DeleteElement { slide_id, element_id }, T1);
        assert_eq!(next.slides[0].elements.len(), 1);
        assert_eq!(next.slides[0].elements[0], p.slides[0].elements[0]);
    }

    #[test]
    fn test_notes_background_transition() {
        let p = deck();
        let id = first_slide_id(&p);
        let p = reduce_at(&p, PresentationAction::UpdateSlideNotes { slide_id: id.clone(), notes: "hi".into() }, T1);
        let p = reduce_at(&p, PresentationAction::SetBackground { slide_id: id.clone(), background: "#111827".into() }, T1);
        let p = reduce_at(&p, PresentationAction::SetTransition { slide_id: id, transition: Transition::Slide }, T1);
        assert_eq!(p.slides[0].notes.as_deref(), Some("hi"));
        assert_eq!(p.slides[0].background, "#111827");
        assert_eq!(p.slides[0].transition, Transition::Slide);
    }

    #[test]
    fn test_create_and_load_presentation() {
        let p = three_slides();
        let fresh = reduce_at(&p, PresentationAction::CreatePresentation { title: "New".into() }, T1);
        assert_eq!(fresh.title, "New");
        assert_eq!(fresh.slides.len(), 1);
        assert_ne!(fresh.id, p.id);

        let loaded = reduce_at(&fresh, PresentationAction::LoadPresentation(Box::new(p.clone())), T1 + 5);
        assert_eq!(loaded, p);
    }

    #[test]
    fn test_index_invariant_over_mixed_sequence() {
        let mut p = deck();
        for step in 0..60usize {
            let action = match step % 5 {
                0 | 1 => PresentationAction::AddSlide { slide: None },
                2 => PresentationAction::DeleteSlide {
                    slide_id: p.slides[step % p.slides.len()].id.clone(),
                },
                3 => PresentationAction::ReorderSlides {
                    source_index: step % p.slides.len(),
                    destination_index: 0,
                },
                _ => PresentationAction::DeleteSlide {
                    slide_id: p.slides[p.slides.len() - 1].id.clone(),
                },
            };
            p = reduce_at(&p, action, T1);
            assert!(!p.slides.is_empty());
            assert!(p.current_slide_index < p.slides.len());
        }
    }

    #[test]
    fn test_default_scenario() {
        let p = deck();
        let p = reduce_at(&p, PresentationAction::AddSlide { slide: None }, T1);
        let p = reduce_at(&p, PresentationAction::SetCurrentSlide { index: 1 }, T1);
        let added = p.slides[1].id.clone();
        let p = reduce_at(
            &p,
            PresentationAction::AddElement { slide_id: added, element: SlideElement::default_shape() },
            T1,
        );
        assert_eq!(p.slides.len(), 2);
        assert_eq!(p.current_slide_index, 1);
        assert_eq!(p.slides[1].elements.len(), 1);

        // The title slide already holds the two placeholders
        let title_slide = first_slide_id(&p);
        let p = reduce_at(
            &p,
            PresentationAction::AddElement { slide_id: title_slide, element: SlideElement::default_shape() },
            T1,
        );
        assert_eq!(p.slides[0].elements.len(), 3);
    }
}
