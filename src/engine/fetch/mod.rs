pub mod memory;
pub mod mongo;
pub mod serialize;

pub use memory::MemoryStore;
pub use mongo::{MongoFetcher, parse_object_id};

use async_trait::async_trait;

use crate::engine::errors::FetchError;
use crate::engine::types::{ConnectionTarget, RawDocument};

/// Retrieves exactly one document by primary key and returns its canonical text.
///
/// Implementations hold no per-call state: every call resolves its own
/// connection and releases it before returning.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(
        &self,
        target: &ConnectionTarget,
        document_id: &str,
    ) -> Result<RawDocument, FetchError>;

    /// Short label for logs.
    fn name(&self) -> &str;
}
