use super::{Backend, Document};
use crate::error::Result;

/// In-memory backend for testing and development.
/// Holds the last saved document; nothing reaches the disk.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    document: Option<Document>,
    saves: usize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already holds `document`, as if saved earlier.
    pub fn with_document(document: Document) -> Self {
        Self {
            document: Some(document),
            saves: 0,
        }
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// How many times `save` has been called.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl Backend for InMemoryBackend {
    fn load(&self) -> Result<Option<Document>> {
        Ok(self.document.clone())
    }

    fn save(&mut self, document: &Document) -> Result<()> {
        self.document = Some(document.clone());
        self.saves += 1;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Kind, Record};
    use crate::store::Storage;
    use serde_json::Value;

    pub struct StoreFixture {
        pub storage: Storage<InMemoryBackend>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                storage: Storage::new(InMemoryBackend::new()),
            }
        }

        pub fn with_records(mut self, kind: Kind, count: usize) -> Self {
            for _ in 0..count {
                self.storage.register(Record::new(kind));
            }
            self
        }

        pub fn with_record(mut self, record: Record) -> Self {
            self.storage.register(record);
            self
        }

        /// Registers a record carrying the given attributes and returns its id.
        pub fn insert(&mut self, kind: Kind, attributes: &[(&str, Value)]) -> String {
            let mut record = Record::new(kind);
            for (name, value) in attributes {
                record.set(name, value.clone());
            }
            let id = record.id().to_string();
            self.storage.register(record);
            id
        }
    }
}
