use super::query::CorrelationId;
use serde::{Deserialize, Serialize};

/// Which rows an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportScope {
    #[serde(rename = "current_page")]
    CurrentPage,
    #[serde(rename = "all")]
    EntireResultSet,
}

impl ExportScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportScope::CurrentPage => "current_page",
            ExportScope::EntireResultSet => "all",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        }
    }
}

/// POST `/save_results`. `start..end` is a half-open row range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub request_id: CorrelationId,
    pub save_type: ExportScope,
    pub format: ExportFormat,
    pub start: usize,
    pub end: usize,
}

/// Descriptor of a file the backend materialised for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportArtifact {
    pub file_url: String,
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::envelope::decode_envelope;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let req = ExportRequest {
            request_id: CorrelationId::new("r-1"),
            save_type: ExportScope::CurrentPage,
            format: ExportFormat::Csv,
            start: 100,
            end: 200,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"request_id": "r-1", "save_type": "current_page", "format": "csv", "start": 100, "end": 200})
        );
        let all = ExportRequest {
            save_type: ExportScope::EntireResultSet,
            format: ExportFormat::Json,
            ..req
        };
        let value = serde_json::to_value(&all).unwrap();
        assert_eq!(value["save_type"], "all");
        assert_eq!(value["format"], "json");
    }

    #[test]
    fn test_artifact_from_envelope() {
        let artifact: ExportArtifact = decode_envelope(
            r#"{"status":"success","file_url":"/static/temp/x.csv","file_name":"x.csv"}"#,
        )
        .unwrap();
        assert_eq!(artifact.file_url, "/static/temp/x.csv");
        assert_eq!(artifact.file_name, "x.csv");
    }
}
