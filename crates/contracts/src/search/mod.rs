//! Wire contract of the query, export and directory-tree endpoints.

pub mod directory;
pub mod export;
pub mod query;

pub use directory::{DirectoryFile, DirectoryNode, DirectoryTreeResponse};
pub use export::{ExportArtifact, ExportFormat, ExportRequest, ExportScope};
pub use query::{CorrelationId, QueryRequest, QueryResponse, Record};
