use mongodb::bson::{Bson, Document};
use serde_json::Value;

use crate::engine::errors::FetchError;
use crate::engine::types::RawDocument;

/// Relaxed Extended JSON, compact. Object ids render as `{"$oid": "..."}` and
/// in-range numbers as plain JSON numbers.
pub fn document_to_text(document: Document) -> Result<RawDocument, FetchError> {
    value_to_text(&Bson::Document(document).into_relaxed_extjson())
}

pub fn value_to_text(value: &Value) -> Result<RawDocument, FetchError> {
    serde_json::to_string(value)
        .map(RawDocument::new)
        .map_err(|e| FetchError::Serialize(e.to_string()))
}
