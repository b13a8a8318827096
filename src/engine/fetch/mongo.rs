use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, warn};

use super::DocumentSource;
use super::serialize::document_to_text;
use crate::engine::errors::FetchError;
use crate::engine::types::{ConnectionTarget, RawDocument};
use crate::shared::config::{CONFIG, StoreConfig};

/// Fetches from MongoDB with a fresh client per call.
#[derive(Debug, Clone)]
pub struct MongoFetcher {
    settings: StoreConfig,
}

impl MongoFetcher {
    pub fn new(settings: StoreConfig) -> Self {
        Self { settings }
    }

    pub fn from_config() -> Self {
        Self::new(CONFIG.store.clone())
    }

    pub fn settings(&self) -> &StoreConfig {
        &self.settings
    }

    async fn client_for(&self, uri: &str) -> Result<Client, FetchError> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| FetchError::MalformedUri(e.to_string()))?;

        // URI parameters win over configured defaults
        if options.connect_timeout.is_none() {
            options.connect_timeout = Some(self.settings.connect_timeout());
        }
        if options.server_selection_timeout.is_none() {
            options.server_selection_timeout = Some(self.settings.server_selection_timeout());
        }
        if options.app_name.is_none() {
            options.app_name = Some(self.settings.app_name.clone());
        }
        options.max_pool_size = Some(1);

        Client::with_options(options).map_err(|e| FetchError::Client(e.to_string()))
    }

    /// Connect, find and release under one deadline. The client is shut down
    /// on every outcome, including when the deadline passes mid-query.
    async fn fetch_by_id(
        &self,
        target: &ConnectionTarget,
        oid: ObjectId,
    ) -> Result<RawDocument, FetchError> {
        let deadline = Instant::now() + self.settings.fetch_timeout();
        let client = match timeout_at(deadline, self.client_for(&target.uri)).await {
            Ok(client) => client?,
            Err(_) => return Err(self.timed_out(oid)),
        };
        let result = match timeout_at(deadline, find_by_id(&client, target, oid)).await {
            Ok(result) => result,
            Err(_) => Err(self.timed_out(oid)),
        };
        client.shutdown().await;
        result
    }

    fn timed_out(&self, oid: ObjectId) -> FetchError {
        warn!(
            target: "jmesq::fetch",
            document_id = %oid,
            timeout_ms = self.settings.fetch_timeout_ms,
            "Fetch timed out"
        );
        FetchError::Timeout(self.settings.fetch_timeout_ms)
    }
}

#[async_trait]
impl DocumentSource for MongoFetcher {
    async fn fetch(
        &self,
        target: &ConnectionTarget,
        document_id: &str,
    ) -> Result<RawDocument, FetchError> {
        let oid = parse_object_id(document_id)?;

        debug!(
            target: "jmesq::fetch",
            database = %target.database,
            collection = %target.collection,
            document_id,
            "Fetching document"
        );

        let document = self.fetch_by_id(target, oid).await?;
        info!(
            target: "jmesq::fetch",
            document_id,
            bytes = document.len(),
            "Document fetched"
        );
        Ok(document)
    }

    fn name(&self) -> &str {
        "mongodb"
    }
}

/// Parses the 24-hex-digit ObjectId form. Anything else is a caller error.
pub fn parse_object_id(document_id: &str) -> Result<ObjectId, FetchError> {
    ObjectId::parse_str(document_id.trim())
        .map_err(|_| FetchError::InvalidDocumentId(document_id.to_string()))
}

fn collection_handle(
    client: &Client,
    target: &ConnectionTarget,
) -> Result<Collection<Document>, FetchError> {
    validate_database_name(&target.database)?;
    validate_collection_name(&target.collection)?;
    Ok(client
        .database(&target.database)
        .collection::<Document>(&target.collection))
}

async fn find_by_id(
    client: &Client,
    target: &ConnectionTarget,
    oid: ObjectId,
) -> Result<RawDocument, FetchError> {
    let collection = collection_handle(client, target)?;

    let found = collection
        .find_one(doc! { "_id": oid }, None)
        .await
        .map_err(classify_find_error)?;

    let Some(document) = found else {
        debug!(target: "jmesq::fetch", document_id = %oid, "No matching document");
        return Err(FetchError::NotFound(oid.to_hex()));
    };

    document_to_text(document)
}

/// Splits an unreachable store from a store that answered with an error.
pub(crate) fn classify_find_error(error: MongoError) -> FetchError {
    match *error.kind {
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
            FetchError::Connection(error.to_string())
        }
        _ => FetchError::Query(error.to_string()),
    }
}

pub(crate) fn validate_database_name(name: &str) -> Result<(), FetchError> {
    if name.is_empty() {
        return Err(FetchError::Collection("database name is empty".into()));
    }
    if let Some(c) = name
        .chars()
        .find(|c| matches!(c, '/' | '\\' | '.' | ' ' | '"' | '$' | '\0'))
    {
        return Err(FetchError::Collection(format!(
            "database name '{}' contains '{}'",
            name,
            c.escape_default()
        )));
    }
    Ok(())
}

pub(crate) fn validate_collection_name(name: &str) -> Result<(), FetchError> {
    if name.is_empty() {
        return Err(FetchError::Collection("collection name is empty".into()));
    }
    if name.contains('\0') || name.contains('$') {
        return Err(FetchError::Collection(format!(
            "collection name '{}' contains a reserved character",
            name.escape_default()
        )));
    }
    Ok(())
}
