use crate::app::domain::ids::{PresentationId, fresh_id};
use crate::app::domain::notices::Notice;
use crate::app::domain::presentation::{DEFAULT_TITLE, Presentation};
use crate::app::domain::validation::import_presentation;
use crate::app::infrastructure::error::Result;
use crate::app::services::storage::{self, PresentationStore, StoredList};

/// The saved presentations, as listed on the home screen.
pub struct PresentationLibrary {
    store: Box<dyn PresentationStore>,
    stored: StoredList,
    /// False when the store could not be read; changes then stay in memory.
    writable: bool,
    notices: Vec<Notice>,
}

impl PresentationLibrary {
    pub fn load(store: Box<dyn PresentationStore>) -> Self {
        let loaded = storage::load_or_default(store.as_ref());
        Self {
            store,
            stored: loaded.list,
            writable: loaded.writable,
            notices: loaded.notice.into_iter().collect(),
        }
    }

    /// Most recently updated first.
    pub fn presentations(&self) -> Vec<&Presentation> {
        let mut sorted: Vec<&Presentation> = self.stored.presentations.iter().collect();
        sorted.sort_by(|a, b| b.updated.cmp(&a.updated));
        sorted
    }

    pub fn len(&self) -> usize {
        self.stored.presentations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stored.presentations.is_empty()
    }

    pub fn get(&self, id: &PresentationId) -> Option<&Presentation> {
        self.stored.presentations.iter().find(|p| &p.id == id)
    }

    /// Create and save a presentation. A blank title gets the default one.
    pub fn create(&mut self, title: &str) -> PresentationId {
        let title = match title.trim() {
            "" => DEFAULT_TITLE,
            trimmed => trimmed,
        };
        let presentation = Presentation::new(title);
        let id = presentation.id.clone();
        self.stored.presentations.push(presentation);
        self.save();
        id
    }

    pub fn delete(&mut self, id: &PresentationId) -> bool {
        let removed = storage::remove(&mut self.stored.presentations, id);
        if removed {
            self.save();
        }
        removed
    }

    /// Add a presentation from shared JSON. It gets a new id if the one it
    /// carries is already in the library.
    pub fn import(&mut self, json: &str) -> Result<PresentationId> {
        let mut presentation = import_presentation(json)?;
        if self.get(&presentation.id).is_some() {
            let mut taken = self
                .stored
                .presentations
                .iter()
                .map(|p| p.id.as_str().to_string())
                .collect();
            presentation.id = PresentationId(fresh_id(&mut taken));
        }
        let id = presentation.id.clone();
        self.stored.presentations.push(presentation);
        self.save();
        Ok(id)
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn save(&mut self) {
        if !self.writable {
            log::debug!("Store unreadable, keeping library changes in memory");
            return;
        }
        if let Some(notice) = storage::save_or_warn(self.store.as_mut(), &self.stored) {
            self.notices.push(notice);
        }
    }
}
