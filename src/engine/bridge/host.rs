//! Synchronous entry points for the host engine.
//!
//! Every failure is absorbed here: the string path answers with the failure's
//! sentinel marker, the numeric paths answer zero. Callers that need to tell an
//! error apart from a real zero should use [`QueryBridge`] directly.

use std::future::Future;

use super::driver;
use super::query_bridge::QueryBridge;
use crate::engine::errors::BridgeError;
use crate::engine::fetch::{DocumentSource, MongoFetcher};
use crate::engine::process::QueryProcessEngine;
use crate::engine::types::{ConnectionTarget, QueryRequest, ResultKind, TypedResult};
use crate::shared::config::{CONFIG, DriverConfig, Settings};

pub struct HostBridge<S: DocumentSource = MongoFetcher> {
    bridge: QueryBridge<S>,
    driver: DriverConfig,
}

impl HostBridge<MongoFetcher> {
    pub fn from_config() -> Self {
        Self {
            bridge: QueryBridge::from_config(),
            driver: CONFIG.driver.clone(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_source(MongoFetcher::new(settings.store.clone()), settings)
    }
}

impl<S: DocumentSource> HostBridge<S> {
    pub fn with_source(source: S, settings: &Settings) -> Self {
        Self {
            bridge: QueryBridge::new(source, QueryProcessEngine::new(settings.processor.clone())),
            driver: settings.driver.clone(),
        }
    }

    pub fn bridge(&self) -> &QueryBridge<S> {
        &self.bridge
    }

    fn block_on<T>(&self, call: impl Future<Output = Result<T, BridgeError>>) -> Result<T, BridgeError> {
        // Blocking inside an async context would panic the host thread
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(BridgeError::Runtime(
                "blocking query issued from inside an async runtime".into(),
            ));
        }
        let runtime = driver::acquire_with(&self.driver)?;
        runtime.block_on(call)
    }

    /// Structured result of a blocking call; nothing is absorbed.
    pub fn query(
        &self,
        uri: &str,
        database: &str,
        collection: &str,
        document_id: &str,
        query: &str,
        kind: ResultKind,
    ) -> Result<TypedResult, BridgeError> {
        let request = QueryRequest::new(
            ConnectionTarget::new(uri, database, collection),
            document_id,
            query,
        );
        self.block_on(self.bridge.query(&request, kind))
    }

    pub fn query_string(
        &self,
        uri: &str,
        database: &str,
        collection: &str,
        document_id: &str,
        query: &str,
    ) -> String {
        match self.query(uri, database, collection, document_id, query, ResultKind::String) {
            Ok(value) => value.to_string(),
            Err(e) => {
                e.log_error();
                e.sentinel().to_string()
            }
        }
    }

    pub fn query_integer(
        &self,
        uri: &str,
        database: &str,
        collection: &str,
        document_id: &str,
        query: &str,
    ) -> i64 {
        match self.query(uri, database, collection, document_id, query, ResultKind::Integer) {
            Ok(value) => value.as_i64().unwrap_or_default(),
            Err(e) => {
                e.log_error();
                0
            }
        }
    }

    pub fn query_float(
        &self,
        uri: &str,
        database: &str,
        collection: &str,
        document_id: &str,
        query: &str,
    ) -> f64 {
        match self.query(uri, database, collection, document_id, query, ResultKind::Float) {
            Ok(value) => value.as_f64().unwrap_or_default(),
            Err(e) => {
                e.log_error();
                0.0
            }
        }
    }
}

/// String answer for `query` against one MongoDB document, or a sentinel marker.
pub fn query_string(
    uri: &str,
    database: &str,
    collection: &str,
    document_id: &str,
    query: &str,
) -> String {
    HostBridge::from_config().query_string(uri, database, collection, document_id, query)
}

/// Integer answer, zero on any failure.
pub fn query_integer(
    uri: &str,
    database: &str,
    collection: &str,
    document_id: &str,
    query: &str,
) -> i64 {
    HostBridge::from_config().query_integer(uri, database, collection, document_id, query)
}

/// Float answer, zero on any failure.
pub fn query_float(
    uri: &str,
    database: &str,
    collection: &str,
    document_id: &str,
    query: &str,
) -> f64 {
    HostBridge::from_config().query_float(uri, database, collection, document_id, query)
}
