use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Extensions the backend accepts for lookup uploads.
pub const ALLOWED_LOOKUP_EXTENSIONS: [&str; 4] = ["sqlite3", "parquet", "csv", "json"];

/// Lookup file as listed by GET `/get_lookup_files`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupFile {
    pub filename: String,
    pub filepath: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub filesize: u64,
    #[serde(default)]
    pub permissions: String,
    /// Integer for tabular files, a message string when the backend cannot count.
    #[serde(default)]
    pub row_count: Value,
}

impl LookupFile {
    pub fn row_count_label(&self) -> String {
        match &self.row_count {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupFileListResponse {
    #[serde(default)]
    pub files: Vec<LookupFile>,
}

/// POST `/delete_lookup_file`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteLookupRequest {
    pub filepath: String,
}

/// POST `/clone_lookup_file`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneLookupRequest {
    pub filepath: String,
    pub new_name: String,
}

impl CloneLookupRequest {
    /// A blank `requested_name` falls back to `<basename>_copy`.
    pub fn new(filepath: &str, requested_name: &str) -> Self {
        let trimmed = requested_name.trim();
        let new_name = if trimmed.is_empty() {
            default_clone_name(filepath)
        } else {
            trimmed.to_string()
        };
        Self {
            filepath: filepath.to_string(),
            new_name,
        }
    }
}

pub fn default_clone_name(filepath: &str) -> String {
    let base = filepath.rsplit('/').next().unwrap_or(filepath);
    format!("{base}_copy")
}

/// Client-side check mirroring the backend's upload whitelist.
pub fn validate_upload_name(file_name: &str) -> Result<(), String> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if ALLOWED_LOOKUP_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err("Invalid file type. Please upload a .sqlite3, .parquet, .csv, or .json file.".into())
    }
}
