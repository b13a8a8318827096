use crate::engine::fetch::MemoryStore;
use serde_json::Value;

/// Memory store preloaded under the default target's database and collection.
pub struct StoreFactory {
    database: String,
    collection: String,
    documents: Vec<(String, Value)>,
}

impl StoreFactory {
    pub fn new() -> Self {
        Self {
            database: "metrics".into(),
            collection: "containers".into(),
            documents: Vec::new(),
        }
    }

    pub fn with_document(mut self, id: &str, document: Value) -> Self {
        self.documents.push((id.to_string(), document));
        self
    }

    pub fn create(self) -> MemoryStore {
        let store = MemoryStore::new();
        for (id, document) in self.documents {
            store.insert(&self.database, &self.collection, &id, document);
        }
        store
    }
}
