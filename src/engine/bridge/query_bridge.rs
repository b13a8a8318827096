use tracing::{debug, info, warn};

use crate::engine::coerce::{trim_output, try_coerce};
use crate::engine::errors::{BridgeError, CoercionError, ProcessError};
use crate::engine::fetch::{DocumentSource, MongoFetcher};
use crate::engine::process::QueryProcessEngine;
use crate::engine::types::{QueryRequest, RawDocument, RawResult, ResultKind, TypedResult};

/// Fetch, process, coerce. Holds configuration only; nothing from one call is
/// visible to another.
pub struct QueryBridge<S: DocumentSource = MongoFetcher> {
    source: S,
    engine: QueryProcessEngine,
}

impl QueryBridge<MongoFetcher> {
    pub fn from_config() -> Self {
        Self::new(MongoFetcher::from_config(), QueryProcessEngine::from_config())
    }
}

impl<S: DocumentSource> QueryBridge<S> {
    pub fn new(source: S, engine: QueryProcessEngine) -> Self {
        Self { source, engine }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn engine(&self) -> &QueryProcessEngine {
        &self.engine
    }

    pub async fn query(
        &self,
        request: &QueryRequest,
        kind: ResultKind,
    ) -> Result<TypedResult, BridgeError> {
        debug!(
            target: "jmesq::bridge",
            source = self.source.name(),
            database = %request.target.database,
            collection = %request.target.collection,
            document_id = %request.document_id,
            query = %request.query,
            %kind,
            "Query received"
        );

        let document = self
            .source
            .fetch(&request.target, &request.document_id)
            .await?;

        let raw = self.process(&document, &request.query).await?;
        let text = raw.text();
        // Whitespace alone is not an answer, not even an empty string
        if trim_output(&text).is_empty() {
            return Err(BridgeError::NoOutput);
        }

        let value = match try_coerce(&text, kind) {
            Ok(value) => value,
            Err(CoercionError::Unparseable { kind, text }) => {
                debug!(
                    target: "jmesq::bridge",
                    %kind,
                    text = %text,
                    "Unreadable numeric output, answering zero"
                );
                TypedResult::zero(kind)
            }
        };

        info!(
            target: "jmesq::bridge",
            document_id = %request.document_id,
            %kind,
            "Query answered"
        );
        Ok(value)
    }

    async fn process(
        &self,
        document: &RawDocument,
        query: &str,
    ) -> Result<RawResult, BridgeError> {
        match self.engine.run(document, query).await {
            Ok(raw) => Ok(raw),
            // Output produced before a failing exit is still the answer
            Err(ProcessError::Exit {
                code,
                stderr,
                output,
            }) if !trim_output(&output.text()).is_empty() => {
                warn!(
                    target: "jmesq::bridge",
                    code,
                    stderr = %stderr,
                    output_bytes = output.len(),
                    "Using output of unsuccessful processor run"
                );
                Ok(output)
            }
            Err(ProcessError::Exit { code, stderr, .. }) => {
                debug!(target: "jmesq::bridge", code, stderr = %stderr, "Processor failed silently");
                Err(BridgeError::NoOutput)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn query_string(&self, request: &QueryRequest) -> Result<String, BridgeError> {
        match self.query(request, ResultKind::String).await? {
            TypedResult::String(value) => Ok(value),
            other => Ok(other.to_string()),
        }
    }

    pub async fn query_integer(&self, request: &QueryRequest) -> Result<i64, BridgeError> {
        Ok(self
            .query(request, ResultKind::Integer)
            .await?
            .as_i64()
            .unwrap_or_default())
    }

    pub async fn query_float(&self, request: &QueryRequest) -> Result<f64, BridgeError> {
        Ok(self
            .query(request, ResultKind::Float)
            .await?
            .as_f64()
            .unwrap_or_default())
    }
}
