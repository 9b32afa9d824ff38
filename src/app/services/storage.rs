use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::app::domain::ids::PresentationId;
use crate::app::domain::notices::Notice;
use crate::app::domain::presentation::Presentation;
use crate::app::domain::settings::EditorSettings;
use crate::app::domain::validation::validate_presentation;
use crate::app::infrastructure::error::{AppError, Result};

/// Key under which the whole presentation list is stored.
pub const STORAGE_KEY: &str = "presentcraft-presentations";

/// Contents of a store: the presentations that could be read, and the raw
/// entries that could not. Unreadable entries are written back as they were.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredList {
    pub presentations: Vec<Presentation>,
    pub unreadable: Vec<Value>,
}

impl StoredList {
    pub fn new(presentations: Vec<Presentation>) -> Self {
        Self {
            presentations,
            unreadable: Vec::new(),
        }
    }

    fn to_values(&self) -> Result<Vec<Value>> {
        let mut values = Vec::with_capacity(self.presentations.len() + self.unreadable.len());
        for presentation in &self.presentations {
            values.push(serde_json::to_value(presentation)?);
        }
        values.extend(self.unreadable.iter().cloned());
        Ok(values)
    }
}

/// Whole-list persistence for presentations. Every save replaces the entire
/// list; there are no per-presentation entries.
pub trait PresentationStore {
    fn load_list(&self) -> Result<StoredList>;
    fn save_list(&mut self, list: &StoredList) -> Result<()>;

    /// The readable presentations only.
    fn load_all(&self) -> Result<Vec<Presentation>> {
        Ok(self.load_list()?.presentations)
    }

    /// Replace everything stored, unreadable entries included, with `presentations`.
    fn save_all(&mut self, presentations: &[Presentation]) -> Result<()> {
        self.save_list(&StoredList::new(presentations.to_vec()))
    }
}

/// Returns the default presentations file: data_dir/presentcraft/presentcraft-presentations.json
pub fn default_store_path() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("presentcraft");
    path.push(format!("{}.json", STORAGE_KEY));
    path
}

/// Presentations kept as one JSON array in a file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `override_path`, or the per-user data directory.
    pub fn open(override_path: Option<&Path>) -> Self {
        match override_path {
            Some(path) => Self::new(path),
            None => Self::new(default_store_path()),
        }
    }

    /// Store at the configured `storage_path`, if any.
    pub fn from_settings(settings: &EditorSettings) -> Self {
        Self::open(settings.storage_path.as_deref())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PresentationStore for JsonFileStore {
    fn load_list(&self) -> Result<StoredList> {
        if !self.path.exists() {
            return Ok(StoredList::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        decode_list(&contents)
    }

    fn save_list(&mut self, list: &StoredList) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&list.to_values()?)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// String key-value store holding the list as JSON text, the way a browser's
/// local storage would.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value under `key`, for inspecting what was written.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), value.into());
    }
}

impl PresentationStore for MemoryStore {
    fn load_list(&self) -> Result<StoredList> {
        match self.get(STORAGE_KEY) {
            Some(contents) => decode_list(contents),
            None => Ok(StoredList::default()),
        }
    }

    fn save_list(&mut self, list: &StoredList) -> Result<()> {
        let json = serde_json::to_string(&list.to_values()?)?;
        self.set(STORAGE_KEY, json);
        Ok(())
    }
}

/// Decode a stored list. Entries that fail the structural check are kept
/// raw in [`StoredList::unreadable`]; a value that is not a JSON array is
/// an error.
fn decode_list(contents: &str) -> Result<StoredList> {
    let value: Value = serde_json::from_str(contents)?;
    let Value::Array(entries) = value else {
        return Err(AppError::Storage(
            "stored presentations are not a list".to_string(),
        ));
    };

    let mut list = StoredList::default();
    for (i, entry) in entries.into_iter().enumerate() {
        let decoded = validate_presentation(&entry)
            .map_err(AppError::from)
            .and_then(|()| Presentation::deserialize(&entry).map_err(AppError::from));
        match decoded {
            Ok(mut presentation) => {
                presentation.repair();
                list.presentations.push(presentation);
            }
            Err(e) => {
                log::warn!("Keeping unreadable stored presentation #{} as is: {}", i, e);
                list.unreadable.push(entry);
            }
        }
    }
    Ok(list)
}

/// Result of reading the store when a session or library opens.
#[derive(Debug)]
pub struct LoadOutcome {
    pub list: StoredList,
    /// To show the user, if any.
    pub notice: Option<Notice>,
    /// False when the stored list could not be read at all. Saving would
    /// then overwrite data that is still in the store.
    pub writable: bool,
}

/// Load the stored list, degrading to an empty, read-only one on any
/// storage error.
pub fn load_or_default(store: &dyn PresentationStore) -> LoadOutcome {
    match store.load_list() {
        Ok(list) => {
            let notice = match list.unreadable.len() {
                0 => None,
                n => Some(Notice::UnreadableEntries(n)),
            };
            LoadOutcome {
                list,
                notice,
                writable: true,
            }
        }
        Err(e) => {
            log::warn!("Failed to load presentations: {}. Using an empty list.", e);
            LoadOutcome {
                list: StoredList::default(),
                notice: Some(Notice::StorageWarning(e.to_string())),
                writable: false,
            }
        }
    }
}

/// Save the list; failures are logged and turned into a notice.
pub fn save_or_warn(store: &mut dyn PresentationStore, list: &StoredList) -> Option<Notice> {
    match store.save_list(list) {
        Ok(()) => None,
        Err(e) => {
            log::warn!("Failed to save presentations: {}", e);
            Some(Notice::StorageWarning(e.to_string()))
        }
    }
}

/// Replace the entry with the same id, or append.
pub fn upsert(presentations: &mut Vec<Presentation>, presentation: &Presentation) {
    match presentations.iter_mut().find(|p| p.id == presentation.id) {
        Some(existing) => *existing = presentation.clone(),
        None => presentations.push(presentation.clone()),
    }
}

/// Remove the entry with `id`. Returns whether anything was removed.
pub fn remove(presentations: &mut Vec<Presentation>, id: &PresentationId) -> bool {
    let before = presentations.len();
    presentations.retain(|p| &p.id != id);
    presentations.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store whose every operation fails, like a disabled browser storage.
    struct BrokenStore;

    impl PresentationStore for BrokenStore {
        fn load_list(&self) -> Result<StoredList> {
            Err(AppError::Storage("store unavailable".to_string()))
        }

        fn save_list(&mut self, _list: &StoredList) -> Result<()> {
            Err(AppError::Storage("quota exceeded".to_string()))
        }
    }

    fn dissolving_deck() -> Value {
        let mut other = serde_json::to_value(Presentation::new("Other deck")).unwrap();
        other["slides"][0]["transition"] = Value::from("dissolve");
        other
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("data").join("decks.json"));
        assert!(store.load_all().unwrap().is_empty());

        let decks = vec![Presentation::new("One"), Presentation::new("Two")];
        store.save_all(&decks).unwrap();
        assert_eq!(store.load_all().unwrap(), decks);
    }

    #[test]
    fn test_file_store_from_settings() {
        let dir = tempfile::tempdir().unwrap();
        let settings = EditorSettings {
            storage_path: Some(dir.path().join("custom.json")),
            ..Default::default()
        };
        let store = JsonFileStore::from_settings(&settings);
        assert_eq!(store.path(), dir.path().join("custom.json"));

        let fallback = JsonFileStore::from_settings(&EditorSettings::default());
        assert_eq!(fallback.path(), default_store_path());
    }

    #[test]
    fn test_file_store_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decks.json");
        fs::write(&path, "[{ not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load_all(), Err(AppError::Json(_))));

        let loaded = load_or_default(&store);
        assert!(loaded.list.presentations.is_empty());
        assert!(!loaded.writable);
        assert!(matches!(loaded.notice, Some(Notice::StorageWarning(_))));
    }

    #[test]
    fn test_memory_store_uses_storage_key() {
        let mut store = MemoryStore::new();
        let deck = Presentation::new("Stored");
        store.save_all(std::slice::from_ref(&deck)).unwrap();

        let raw = store.get(STORAGE_KEY).unwrap();
        assert!(raw.starts_with('['));
        assert!(raw.contains("\"currentSlideIndex\":0"));
        assert_eq!(store.load_all().unwrap(), vec![deck]);
    }

    #[test]
    fn test_non_array_is_storage_error() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "{}");
        assert!(matches!(store.load_all(), Err(AppError::Storage(_))));
    }

    #[test]
    fn test_invalid_entries_kept_aside() {
        let mut store = MemoryStore::new();
        let deck = Presentation::new("Good");
        let good = serde_json::to_value(&deck).unwrap();
        let list = serde_json::json!([good, {"id": "broken"}]);
        store.set(STORAGE_KEY, list.to_string());

        assert_eq!(store.load_all().unwrap(), vec![deck]);
        let loaded = store.load_list().unwrap();
        assert_eq!(loaded.unreadable, vec![serde_json::json!({"id": "broken"})]);
    }

    #[test]
    fn test_unreadable_entries_survive_save() {
        let mut store = MemoryStore::new();
        let good = Presentation::new("Good deck");
        let list = serde_json::json!([serde_json::to_value(&good).unwrap(), dissolving_deck()]);
        store.set(STORAGE_KEY, list.to_string());

        let mut loaded = load_or_default(&store);
        assert!(loaded.writable);
        assert_eq!(loaded.notice, Some(Notice::UnreadableEntries(1)));
        assert_eq!(loaded.list.presentations.len(), 1);

        loaded.list.presentations[0].title = "Renamed".to_string();
        assert_eq!(save_or_warn(&mut store, &loaded.list), None);

        let raw = store.get(STORAGE_KEY).unwrap();
        assert!(raw.contains("Other deck"));
        assert!(raw.contains("dissolve"));
        assert!(raw.contains("Renamed"));
        assert_eq!(store.load_list().unwrap().unreadable.len(), 1);
    }

    #[test]
    fn test_clean_load_has_no_notice() {
        let mut store = MemoryStore::new();
        store.save_all(&[Presentation::new("Fine")]).unwrap();
        let loaded = load_or_default(&store);
        assert!(loaded.writable);
        assert_eq!(loaded.notice, None);
    }

    #[test]
    fn test_save_or_warn() {
        let mut broken = BrokenStore;
        let notice = save_or_warn(&mut broken, &StoredList::default());
        assert_eq!(
            notice,
            Some(Notice::StorageWarning("Storage error: quota exceeded".to_string()))
        );

        let mut store = MemoryStore::new();
        assert_eq!(save_or_warn(&mut store, &StoredList::default()), None);
    }

    #[test]
    fn test_upsert_and_remove() {
        let mut list = Vec::new();
        let mut deck = Presentation::new("Deck");
        upsert(&mut list, &deck);
        deck.title = "Renamed".to_string();
        upsert(&mut list, &deck);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].title, "Renamed");

        assert!(remove(&mut list, &deck.id));
        assert!(!remove(&mut list, &deck.id));
        assert!(list.is_empty());
    }
}
