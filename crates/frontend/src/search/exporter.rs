//! Server-side export of the current result set.

use super::backend::SearchBackend;
use super::session::QuerySession;
use crate::shared::download::download_url;
use crate::shared::error::{ApiError, ErrorKind};
use contracts::search::{ExportArtifact, ExportFormat, ExportRequest, ExportScope};
use thiserror::Error;

pub const NO_ACTIVE_QUERY: &str = "No request ID found. Please run a query first.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("{}", NO_ACTIVE_QUERY)]
    NoActiveQuery,
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ExportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExportError::NoActiveQuery => ErrorKind::State,
            ExportError::Api(e) => e.kind(),
        }
    }
}

/// Build the export request for `session`. Fails before anything is sent
/// when the session has no correlation id.
pub fn build_request(
    session: &QuerySession,
    scope: ExportScope,
    format: ExportFormat,
) -> Result<ExportRequest, ExportError> {
    let request_id = session
        .correlation_id()
        .cloned()
        .ok_or(ExportError::NoActiveQuery)?;
    let range = match scope {
        ExportScope::CurrentPage => session.pagination().window().row_range(),
        ExportScope::EntireResultSet => 0..session.pagination().total_rows(),
    };
    Ok(ExportRequest {
        request_id,
        save_type: scope,
        format,
        start: range.start,
        end: range.end,
    })
}

pub struct Exporter<'a, B: ?Sized> {
    backend: &'a B,
}

impl<'a, B: SearchBackend + ?Sized> Exporter<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    pub async fn submit(&self, request: &ExportRequest) -> Result<ExportArtifact, ExportError> {
        log::info!(
            "export {} {} rows {}..{}",
            request.format.as_str(),
            request.save_type.as_str(),
            request.start,
            request.end
        );
        Ok(self.backend.export_results(request).await?)
    }

    pub async fn request_export(
        &self,
        session: &QuerySession,
        scope: ExportScope,
        format: ExportFormat,
    ) -> Result<ExportArtifact, ExportError> {
        let request = build_request(session, scope, format)?;
        self.submit(&request).await
    }
}

/// Hand the artifact to the browser. Fire-and-forget: a failed download is
/// only logged.
pub fn trigger_download(artifact: &ExportArtifact) {
    if let Err(e) = download_url(&artifact.file_url, &artifact.file_name) {
        log::error!("{}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::session::{OverlapPolicy, SessionController};
    use crate::shared::storage::MemoryStore;
    use async_trait::async_trait;
    use contracts::search::{CorrelationId, DirectoryNode, QueryRequest, QueryResponse, Record};
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingBackend {
        exports: RefCell<Vec<ExportRequest>>,
    }

    #[async_trait(?Send)]
    impl SearchBackend for RecordingBackend {
        async fn run_query(&self, _: &QueryRequest) -> Result<QueryResponse, ApiError> {
            unreachable!()
        }

        async fn export_results(&self, request: &ExportRequest) -> Result<ExportArtifact, ApiError> {
            self.exports.borrow_mut().push(request.clone());
            Ok(ExportArtifact {
                file_url: "/static/temp/results.csv".into(),
                file_name: "results.csv".into(),
            })
        }

        async fn fetch_directory_tree(&self) -> Result<DirectoryNode, ApiError> {
            unreachable!()
        }
    }

    fn session_with(rows: usize, request_id: Option<&str>) -> SessionController<MemoryStore> {
        let mut ctl =
            SessionController::new(MemoryStore::default(), OverlapPolicy::LatestRequestWins, 100);
        let results: Vec<Record> = (0..rows)
            .map(|i| match json!({ "i": i }) {
                serde_json::Value::Object(map) => map,
                _ => unreachable!(),
            })
            .collect();
        let ticket = ctl.begin_query("q");
        ctl.complete_query(
            ticket,
            Ok(QueryResponse {
                results,
                column_names: vec!["i".into()],
                request_id: request_id.map(CorrelationId::new),
            }),
        )
        .unwrap();
        ctl
    }

    #[test]
    fn test_current_page_bounds() {
        let mut ctl = session_with(250, Some("r-1"));
        ctl.go_to_page(3);
        let req = build_request(ctl.current(), ExportScope::CurrentPage, ExportFormat::Csv).unwrap();
        assert_eq!((req.start, req.end), (200, 250));
        assert_eq!(req.request_id.as_str(), "r-1");

        let req =
            build_request(ctl.current(), ExportScope::EntireResultSet, ExportFormat::Json).unwrap();
        assert_eq!((req.start, req.end), (0, 250));
    }

    #[test]
    fn test_empty_result_exports_empty_range() {
        let ctl = session_with(0, Some("r-0"));
        let req = build_request(ctl.current(), ExportScope::CurrentPage, ExportFormat::Csv).unwrap();
        assert_eq!((req.start, req.end), (0, 0));
    }

    #[tokio::test]
    async fn test_no_correlation_id_makes_no_call() {
        let backend = RecordingBackend::default();
        let exporter = Exporter::new(&backend);

        let ctl =
            SessionController::new(MemoryStore::default(), OverlapPolicy::LatestRequestWins, 100);
        let err = exporter
            .request_export(ctl.current(), ExportScope::EntireResultSet, ExportFormat::Csv)
            .await
            .unwrap_err();
        assert_eq!(err, ExportError::NoActiveQuery);
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(err.to_string(), NO_ACTIVE_QUERY);

        let ctl = session_with(10, None);
        assert!(exporter
            .request_export(ctl.current(), ExportScope::CurrentPage, ExportFormat::Json)
            .await
            .is_err());
        assert!(backend.exports.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_request_export_sends_current_window() {
        let backend = RecordingBackend::default();
        let mut ctl = session_with(250, Some("r-9"));
        ctl.next_page();
        let artifact = Exporter::new(&backend)
            .request_export(ctl.current(), ExportScope::CurrentPage, ExportFormat::Csv)
            .await
            .unwrap();
        assert_eq!(artifact.file_name, "results.csv");
        let sent = backend.exports.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!((sent[0].start, sent[0].end), (100, 200));
        assert_eq!(sent[0].save_type, ExportScope::CurrentPage);
    }
}
