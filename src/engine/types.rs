use std::borrow::Cow;
use std::fmt;

/// Where a document lives. Resolved afresh on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl ConnectionTarget {
    pub fn new(
        uri: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            collection: collection.into(),
        }
    }
}

/// One bridge invocation: which document, and which expression to run against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub target: ConnectionTarget,
    pub document_id: String,
    pub query: String,
}

impl QueryRequest {
    pub fn new(
        target: ConnectionTarget,
        document_id: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            target,
            document_id: document_id.into(),
            query: query.into(),
        }
    }
}

/// Canonical text of a fetched document, always complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument(String);

impl RawDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RawDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the processor wrote to stdout during one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResult {
    bytes: Vec<u8>,
}

impl RawResult {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Output decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<&str> for RawResult {
    fn from(text: &str) -> Self {
        Self::from_bytes(text.as_bytes().to_vec())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    String,
    Integer,
    Float,
}

impl ResultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::String => "string",
            ResultKind::Integer => "integer",
            ResultKind::Float => "float",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypedResult {
    String(String),
    Integer(i64),
    Float(f64),
}

impl TypedResult {
    /// Value the host receives when nothing better is available.
    pub fn zero(kind: ResultKind) -> Self {
        match kind {
            ResultKind::String => TypedResult::String(String::new()),
            ResultKind::Integer => TypedResult::Integer(0),
            ResultKind::Float => TypedResult::Float(0.0),
        }
    }

    pub fn kind(&self) -> ResultKind {
        match self {
            TypedResult::String(_) => ResultKind::String,
            TypedResult::Integer(_) => ResultKind::Integer,
            TypedResult::Float(_) => ResultKind::Float,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedResult::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TypedResult::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedResult::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for TypedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedResult::String(s) => f.write_str(s),
            TypedResult::Integer(v) => write!(f, "{}", v),
            TypedResult::Float(v) => write!(f, "{}", v),
        }
    }
}
