//! Typed query bridge: fetch one document from MongoDB, run a JMESPath
//! expression over it with an external processor, and hand the host a string,
//! integer or float.

pub mod engine;
pub mod logging;
pub mod shared;

pub use engine::bridge::{HostBridge, QueryBridge, query_float, query_integer, query_string};
pub use engine::errors::{BridgeError, FetchError, ProcessError};
pub use engine::types::{ConnectionTarget, QueryRequest, ResultKind, TypedResult};

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub mod test_helpers;
