use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One result row: column name to scalar value.
pub type Record = Map<String, Value>;

/// Server-issued token binding an executed query's results to later exports.
///
/// Opaque to the client: it is stored and sent back, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl CorrelationId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// POST `/run_query`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<Record>,
    #[serde(default)]
    pub column_names: Vec<String>,
    #[serde(default)]
    pub request_id: Option<CorrelationId>,
}

impl QueryResponse {
    /// The correlation id, ignoring blank values.
    pub fn correlation_id(&self) -> Option<&CorrelationId> {
        self.request_id
            .as_ref()
            .filter(|id| !id.as_str().trim().is_empty())
    }
}
