//! Backend seam for the query session.

use crate::shared::error::ApiError;
use crate::shared::http::ApiClient;
use async_trait::async_trait;
use contracts::search::{
    DirectoryNode, DirectoryTreeResponse, ExportArtifact, ExportRequest, QueryRequest,
    QueryResponse,
};

pub const RUN_QUERY_PATH: &str = "/run_query";
pub const SAVE_RESULTS_PATH: &str = "/save_results";
pub const DIRECTORY_TREE_PATH: &str = "/get_directory_tree";

#[async_trait(?Send)]
pub trait SearchBackend {
    async fn run_query(&self, request: &QueryRequest) -> Result<QueryResponse, ApiError>;

    async fn export_results(&self, request: &ExportRequest) -> Result<ExportArtifact, ApiError>;

    async fn fetch_directory_tree(&self) -> Result<DirectoryNode, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpSearchBackend {
    client: ApiClient,
}

impl HttpSearchBackend {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl SearchBackend for HttpSearchBackend {
    async fn run_query(&self, request: &QueryRequest) -> Result<QueryResponse, ApiError> {
        self.client.post(RUN_QUERY_PATH, request).await
    }

    async fn export_results(&self, request: &ExportRequest) -> Result<ExportArtifact, ApiError> {
        self.client.post(SAVE_RESULTS_PATH, request).await
    }

    async fn fetch_directory_tree(&self) -> Result<DirectoryNode, ApiError> {
        let response: DirectoryTreeResponse = self.client.get(DIRECTORY_TREE_PATH).await?;
        Ok(response.tree)
    }
}
