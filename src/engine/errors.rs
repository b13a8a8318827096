use std::io;
use thiserror::Error;
use tracing::{debug, error};

use crate::engine::types::{RawResult, ResultKind};

/// Errors raised while resolving and reading a single document.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Malformed connection URI: {0}")]
    MalformedUri(String),

    #[error("Client construction failed: {0}")]
    Client(String),

    #[error("Store unreachable: {0}")]
    Connection(String),

    #[error("Collection handle unavailable: {0}")]
    Collection(String),

    #[error("Malformed document identifier '{0}'")]
    InvalidDocumentId(String),

    #[error("No document with _id {0}")]
    NotFound(String),

    #[error("Store query failed: {0}")]
    Query(String),

    #[error("Document serialization failed: {0}")]
    Serialize(String),

    #[error("Fetch timed out after {0}ms")]
    Timeout(u64),
}

/// Errors raised while loading a JSON document fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Fixture is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unexpected fixture layout: {0}")]
    Layout(String),
}

/// Errors raised while running the external processor.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to spawn processor {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Processor channel {0} was not established")]
    ChannelSetup(&'static str),

    #[error("Failed writing document to processor stdin: {0}")]
    StdinWrite(#[source] io::Error),

    #[error("Failed reading processor stdout: {0}")]
    StdoutRead(#[source] io::Error),

    #[error("Failed collecting processor exit status: {0}")]
    Wait(#[source] io::Error),

    /// The output gathered before the exit is kept; callers may still use it.
    #[error("Processor exited with {}", describe_exit(.code))]
    Exit {
        code: Option<i32>,
        stderr: String,
        output: RawResult,
    },

    #[error("Processor timed out after {0}ms")]
    Timeout(u64),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Numeric coercion failures. Never reaches the host: the bridge resolves these to zero.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoercionError {
    #[error("Cannot read {kind} from '{text}'")]
    Unparseable { kind: ResultKind, text: String },
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Processing failed: {0}")]
    Process(#[from] ProcessError),

    #[error("Processor produced no output")]
    NoOutput,

    #[error("Runtime unavailable: {0}")]
    Runtime(String),
}

pub const SENTINEL_STORE_URI: &str = "<E:STORE_URI>";
pub const SENTINEL_STORE_CLIENT: &str = "<E:STORE_CLIENT>";
pub const SENTINEL_STORE_CONNECTION: &str = "<E:STORE_CONNECTION>";
pub const SENTINEL_STORE_COLLECTION: &str = "<E:STORE_COLLECTION>";
pub const SENTINEL_DOCUMENT_ID: &str = "<E:DOCUMENT_ID>";
pub const SENTINEL_NOT_FOUND: &str = "<E:NOT_FOUND>";
pub const SENTINEL_STORE_QUERY: &str = "<E:STORE_QUERY>";
pub const SENTINEL_SERIALIZE: &str = "<E:DOCUMENT_SERIALIZE>";
pub const SENTINEL_FETCH_TIMEOUT: &str = "<E:FETCH_TIMEOUT>";
pub const SENTINEL_PROCESSOR_SPAWN: &str = "<E:PROCESSOR_SPAWN>";
pub const SENTINEL_PROCESSOR_IO: &str = "<E:PROCESSOR_IO>";
pub const SENTINEL_PROCESSOR_EXIT: &str = "<E:PROCESSOR_EXIT>";
pub const SENTINEL_PROCESSOR_TIMEOUT: &str = "<E:PROCESSOR_TIMEOUT>";
pub const SENTINEL_NO_OUTPUT: &str = "<E:NO_OUTPUT>";
pub const SENTINEL_RUNTIME: &str = "<E:RUNTIME>";

impl BridgeError {
    /// Marker string handed to the host in place of a string result.
    pub fn sentinel(&self) -> &'static str {
        match self {
            BridgeError::Fetch(e) => match e {
                FetchError::MalformedUri(_) => SENTINEL_STORE_URI,
                FetchError::Client(_) => SENTINEL_STORE_CLIENT,
                FetchError::Connection(_) => SENTINEL_STORE_CONNECTION,
                FetchError::Collection(_) => SENTINEL_STORE_COLLECTION,
                FetchError::InvalidDocumentId(_) => SENTINEL_DOCUMENT_ID,
                FetchError::NotFound(_) => SENTINEL_NOT_FOUND,
                FetchError::Query(_) => SENTINEL_STORE_QUERY,
                FetchError::Serialize(_) => SENTINEL_SERIALIZE,
                FetchError::Timeout(_) => SENTINEL_FETCH_TIMEOUT,
            },
            BridgeError::Process(e) => match e {
                ProcessError::Spawn { .. } => SENTINEL_PROCESSOR_SPAWN,
                ProcessError::ChannelSetup(_)
                | ProcessError::StdinWrite(_)
                | ProcessError::StdoutRead(_)
                | ProcessError::Wait(_) => SENTINEL_PROCESSOR_IO,
                ProcessError::Exit { .. } => SENTINEL_PROCESSOR_EXIT,
                ProcessError::Timeout(_) => SENTINEL_PROCESSOR_TIMEOUT,
            },
            BridgeError::NoOutput => SENTINEL_NO_OUTPUT,
            BridgeError::Runtime(_) => SENTINEL_RUNTIME,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BridgeError::Fetch(FetchError::NotFound(_)))
    }

    pub fn log_error(&self) {
        match self {
            BridgeError::Fetch(e) => {
                error!(target: "jmesq::bridge", "Document fetch failed: {}", e);
                debug!(target: "jmesq::bridge", "Fetch error details: {:?}", e);
            }
            BridgeError::Process(ProcessError::Exit { code, stderr, output }) => {
                error!(target: "jmesq::bridge", "Processor exited with {}", describe_exit(code));
                debug!(
                    target: "jmesq::bridge",
                    stderr = %stderr,
                    output_bytes = output.len(),
                    "Processor exit details"
                );
            }
            BridgeError::Process(e) => {
                error!(target: "jmesq::bridge", "Processor failed: {}", e);
                debug!(target: "jmesq::bridge", "Processor error details: {:?}", e);
            }
            BridgeError::NoOutput => {
                error!(target: "jmesq::bridge", "Processor produced no output");
            }
            BridgeError::Runtime(e) => {
                error!(target: "jmesq::bridge", "Runtime unavailable: {}", e);
                debug!(target: "jmesq::bridge", "Runtime error details: {}", e);
            }
        }
    }
}
