//! Full-screen playback of a presentation.
//!
//! Navigation stops at the first and last slide. The exported HTML player
//! wraps around; this one does not.

use crate::app::domain::presentation::{Presentation, Slide, Transition};

/// What a key press asks the player to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Next,
    Previous,
    Close,
}

impl PlayerCommand {
    /// Map a DOM-style key name. Unbound keys give `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" | " " => Some(Self::Next),
            "ArrowLeft" => Some(Self::Previous),
            "Escape" => Some(Self::Close),
            _ => None,
        }
    }
}

/// CSS class the host plays when a slide with `transition` comes in.
pub fn entrance_class(transition: Transition) -> &'static str {
    match transition {
        Transition::Fade => "animate-fadeIn",
        Transition::Slide => "animate-slideIn",
        Transition::Zoom => "scale-in-center",
        Transition::None => "",
    }
}

/// Playback state over a snapshot of the slides taken at start.
#[derive(Debug, Clone)]
pub struct PresentationPlayer {
    slides: Vec<Slide>,
    index: usize,
    open: bool,
}

impl PresentationPlayer {
    /// Start at `index`, or at the last slide if it is past the end.
    pub fn start(presentation: &Presentation, index: usize) -> Self {
        let slides = presentation.slides.clone();
        let index = index.min(slides.len().saturating_sub(1));
        log::debug!("Presenting {} from slide {}", presentation.id, index + 1);
        Self {
            slides,
            index,
            open: true,
        }
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.index)
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Transition of the slide on screen.
    pub fn transition(&self) -> Transition {
        self.current_slide()
            .map(|s| s.transition)
            .unwrap_or_default()
    }

    pub fn transition_class(&self) -> &'static str {
        entrance_class(self.transition())
    }

    /// "3 / 12"
    pub fn counter(&self) -> String {
        format!("{} / {}", self.index + 1, self.slides.len())
    }

    /// Speaker notes of the slide on screen, when there are any.
    pub fn notes(&self) -> Option<&str> {
        self.current_slide()?
            .notes
            .as_deref()
            .filter(|notes| !notes.is_empty())
    }

    pub fn has_previous(&self) -> bool {
        self.open && self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.open && self.index + 1 < self.slides.len()
    }

    /// Advance one slide. Returns whether the slide changed.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Go back one slide. Returns whether the slide changed.
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn close(&mut self) {
        if self.open {
            log::debug!("Presentation closed on slide {}", self.index + 1);
        }
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn apply(&mut self, command: PlayerCommand) -> bool {
        match command {
            PlayerCommand::Next => self.next(),
            PlayerCommand::Previous => self.previous(),
            PlayerCommand::Close => {
                let was_open = self.open;
                self.close();
                was_open
            }
        }
    }

    /// Handle a key press. Returns whether the key did anything.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match PlayerCommand::from_key(key) {
            Some(command) => self.apply(command),
            None => false,
        }
    }
}
