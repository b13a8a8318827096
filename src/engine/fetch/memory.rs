use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::DocumentSource;
use super::mongo::{validate_collection_name, validate_database_name};
use super::serialize::value_to_text;
use crate::engine::errors::{FetchError, FixtureError};
use crate::engine::types::{ConnectionTarget, RawDocument};

type Key = (String, String, String);

/// In-process document source keyed by (database, collection, id).
///
/// The connection URI is ignored. A failure can be injected to stand in for an
/// unreachable store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<Key, Value>>,
    failure: RwLock<Option<FetchError>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, database: &str, collection: &str, id: &str, document: Value) {
        self.documents.write().insert(
            (database.to_string(), collection.to_string(), id.to_string()),
            document,
        );
    }

    pub fn with_document(self, database: &str, collection: &str, id: &str, document: Value) -> Self {
        self.insert(database, collection, id, document);
        self
    }

    /// Loads `{database: {collection: {id: document}}}`.
    pub fn from_fixture(fixture: &Value) -> Result<Self, FixtureError> {
        let store = Self::new();
        let databases = fixture
            .as_object()
            .ok_or_else(|| FixtureError::Layout("root must be an object".into()))?;
        for (database, collections) in databases {
            let collections = collections.as_object().ok_or_else(|| {
                FixtureError::Layout(format!("database '{}' must be an object", database))
            })?;
            for (collection, documents) in collections {
                let documents = documents.as_object().ok_or_else(|| {
                    FixtureError::Layout(format!(
                        "collection '{}.{}' must be an object",
                        database, collection
                    ))
                })?;
                for (id, document) in documents {
                    store.insert(database, collection, id, document.clone());
                }
            }
        }
        Ok(store)
    }

    pub fn from_fixture_file(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| FixtureError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let fixture: Value = serde_json::from_str(&text)?;
        let store = Self::from_fixture(&fixture)?;
        debug!(
            target: "jmesq::fetch",
            path = %path.display(),
            documents = store.len(),
            "Fixture loaded"
        );
        Ok(store)
    }

    pub fn fail_with(&self, error: FetchError) {
        *self.failure.write() = Some(error);
    }

    pub fn clear_failure(&self) {
        *self.failure.write() = None;
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

#[async_trait]
impl DocumentSource for MemoryStore {
    async fn fetch(
        &self,
        target: &ConnectionTarget,
        document_id: &str,
    ) -> Result<RawDocument, FetchError> {
        if let Some(error) = self.failure.read().clone() {
            return Err(error);
        }
        validate_database_name(&target.database)?;
        validate_collection_name(&target.collection)?;

        let key = (
            target.database.clone(),
            target.collection.clone(),
            document_id.to_string(),
        );
        let documents = self.documents.read();
        let Some(document) = documents.get(&key) else {
            debug!(target: "jmesq::fetch", document_id, "No matching document in memory store");
            return Err(FetchError::NotFound(document_id.to_string()));
        };
        value_to_text(document)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
