//! # Storage Layer
//!
//! [`Storage`] is the registry: the single owner of every live record,
//! keyed by `"<Kind>.<id>"`. It is an explicit value handed to the api and
//! the console, never ambient global state.
//!
//! Durability is delegated to a [`Backend`], which only knows how to load
//! and save one JSON [`Document`]:
//!
//! - [`fs::FileBackend`]: production, a single file (`hbnb.json`)
//! - [`memory::InMemoryBackend`]: testing, keeps the last saved document
//!
//! ## Storage Format
//!
//! ```text
//! {
//!   "User.4c1f...": {"id": "4c1f...", "created_at": "2024-05-01T10:00:00.123456",
//!                    "updated_at": "...", "email": "a@b.c", "__class__": "User"},
//!   "Place.9e2a...": { ... }
//! }
//! ```
//!
//! `persist` rewrites the whole document; `reload` replaces the whole
//! in-memory mapping. Nothing is merged.

use crate::error::Result;
use crate::model::{composite_key, Kind, Record, CLASS_TAG};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub mod fs;
pub mod memory;

/// The persisted JSON object, composite key to field mapping.
pub type Document = Map<String, Value>;

/// Raw persistence for the registry document.
pub trait Backend {
    /// Returns `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Document>>;

    /// Replaces the stored document.
    fn save(&mut self, document: &Document) -> Result<()>;
}

pub struct Storage<B: Backend> {
    objects: BTreeMap<String, Record>,
    backend: B,
}

impl<B: Backend> Storage<B> {
    pub fn new(backend: B) -> Self {
        Self {
            objects: BTreeMap::new(),
            backend,
        }
    }

    /// Builds a registry and loads whatever the backend holds.
    pub fn open(backend: B) -> Result<Self> {
        let mut storage = Self::new(backend);
        storage.reload()?;
        Ok(storage)
    }

    pub fn all(&self) -> &BTreeMap<String, Record> {
        &self.objects
    }

    pub fn all_mut(&mut self) -> &mut BTreeMap<String, Record> {
        &mut self.objects
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Inserts or overwrites the record under its composite key.
    pub fn register(&mut self, record: Record) {
        self.objects.insert(record.key(), record);
    }

    pub fn get(&self, kind: Kind, id: &str) -> Option<&Record> {
        self.objects.get(&composite_key(kind, id))
    }

    pub fn get_mut(&mut self, kind: Kind, id: &str) -> Option<&mut Record> {
        self.objects.get_mut(&composite_key(kind, id))
    }

    pub fn remove(&mut self, kind: Kind, id: &str) -> Option<Record> {
        self.objects.remove(&composite_key(kind, id))
    }

    /// Records of one kind, or all records when `kind` is `None`.
    pub fn of_kind(&self, kind: Option<Kind>) -> impl Iterator<Item = &Record> {
        self.objects
            .values()
            .filter(move |record| kind.map_or(true, |k| record.kind() == k))
    }

    pub fn count(&self, kind: Option<Kind>) -> usize {
        self.of_kind(kind).count()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Writes every live record to the backend, replacing its content.
    pub fn persist(&mut self) -> Result<()> {
        let document: Document = self
            .objects
            .iter()
            .map(|(key, record)| (key.clone(), Value::Object(record.to_fields())))
            .collect();
        self.backend.save(&document)?;
        debug!(records = document.len(), "registry persisted");
        Ok(())
    }

    /// Replaces the live mapping with the backend's document.
    ///
    /// No document is a no-op. Entries that cannot be rebuilt are skipped
    /// with a warning; the remaining entries still load.
    pub fn reload(&mut self) -> Result<()> {
        let Some(document) = self.backend.load()? else {
            debug!("no stored document, registry left as is");
            return Ok(());
        };

        let mut objects = BTreeMap::new();
        for (key, value) in &document {
            match rebuild_entry(key, value) {
                Some(record) => {
                    objects.insert(record.key(), record);
                }
                None => warn!(key = %key, "skipping unreadable stored record"),
            }
        }

        debug!(records = objects.len(), "registry reloaded");
        self.objects = objects;
        Ok(())
    }
}

/// Resolves the entry's kind from `__class__`, falling back to the key
/// prefix, and rebuilds the record.
fn rebuild_entry(key: &str, value: &Value) -> Option<Record> {
    let fields = value.as_object()?;
    let kind_name = fields
        .get(CLASS_TAG)
        .and_then(Value::as_str)
        .or_else(|| key.split_once('.').map(|(prefix, _)| prefix))?;
    let kind: Kind = kind_name.parse().ok()?;

    match Record::from_fields(kind, fields) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(key = %key, error = %e, "stored record is malformed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::InMemoryBackend;
    use super::*;
    use serde_json::json;

    #[test]
    fn register_keys_by_kind_and_id() {
        let mut storage = Storage::new(InMemoryBackend::new());
        for kind in Kind::ALL {
            let record = Record::new(kind);
            let key = format!("{}.{}", kind.name(), record.id());
            storage.register(record);
            assert!(storage.all().contains_key(&key));
        }
        assert_eq!(storage.count(None), Kind::ALL.len());
    }

    #[test]
    fn register_is_idempotent_for_same_id() {
        let mut storage = Storage::new(InMemoryBackend::new());
        let record = Record::new(Kind::User);
        storage.register(record.clone());
        storage.register(record);
        assert_eq!(storage.count(Some(Kind::User)), 1);
    }

    #[test]
    fn count_filters_by_kind() {
        let mut storage = Storage::new(InMemoryBackend::new());
        storage.register(Record::new(Kind::User));
        storage.register(Record::new(Kind::User));
        storage.register(Record::new(Kind::City));
        assert_eq!(storage.count(Some(Kind::User)), 2);
        assert_eq!(storage.count(Some(Kind::City)), 1);
        assert_eq!(storage.count(Some(Kind::Place)), 0);
        assert_eq!(storage.count(None), 3);
    }

    #[test]
    fn persist_then_reload_round_trips() {
        let mut storage = Storage::new(InMemoryBackend::new());
        let mut place = Record::new(Kind::Place);
        place.set("number_rooms", json!(3));
        place.set("name", json!("Loft"));
        storage.register(place.clone());
        storage.register(Record::new(Kind::Amenity));
        storage.persist().unwrap();

        let before = storage.all().clone();
        storage.clear();
        assert!(storage.all().is_empty());

        storage.reload().unwrap();
        assert_eq!(storage.all(), &before);
        assert_eq!(storage.get(Kind::Place, place.id()), Some(&place));
    }

    #[test]
    fn reload_without_document_keeps_state() {
        let mut storage = Storage::new(InMemoryBackend::new());
        storage.register(Record::new(Kind::State));
        storage.reload().unwrap();
        assert_eq!(storage.count(None), 1);
    }

    #[test]
    fn reload_replaces_instead_of_merging() {
        let mut storage = Storage::new(InMemoryBackend::new());
        storage.persist().unwrap();
        storage.register(Record::new(Kind::State));
        storage.reload().unwrap();
        assert!(storage.all().is_empty());
    }

    #[test]
    fn reload_skips_unknown_and_malformed_entries() {
        let good = Record::new(Kind::Review);
        let mut document = Document::new();
        document.insert(good.key(), Value::Object(good.to_fields()));
        document.insert(
            "Spaceship.1".to_string(),
            json!({"id": "1", "created_at": "2024-01-01T00:00:00", "updated_at": "2024-01-01T00:00:00", "__class__": "Spaceship"}),
        );
        document.insert("User.2".to_string(), json!({"__class__": "User"}));

        let mut storage = Storage::new(InMemoryBackend::with_document(document));
        storage.reload().unwrap();

        assert_eq!(storage.count(None), 1);
        assert_eq!(storage.get(Kind::Review, good.id()), Some(&good));
    }

    #[test]
    fn reload_falls_back_to_key_prefix() {
        let mut document = Document::new();
        document.insert(
            "City.abc".to_string(),
            json!({"id": "abc", "created_at": "2024-01-01T00:00:00", "updated_at": "2024-01-02T00:00:00"}),
        );
        let storage = Storage::open(InMemoryBackend::with_document(document)).unwrap();
        assert!(storage.get(Kind::City, "abc").is_some());
    }
}
