use crate::shared::api_utils::encode_segment;
use crate::shared::error::ApiError;
use crate::shared::http::{Acknowledged, ApiClient};
use contracts::domain::a003_lookup_file::aggregate::{
    validate_upload_name, CloneLookupRequest, DeleteLookupRequest, LookupFile,
    LookupFileListResponse,
};

pub async fn fetch_lookup_files(client: &ApiClient) -> Result<Vec<LookupFile>, ApiError> {
    let response: LookupFileListResponse = client.get("/get_lookup_files").await?;
    Ok(response.files)
}

pub async fn delete_lookup_file(client: &ApiClient, filepath: &str) -> Result<(), ApiError> {
    let request = DeleteLookupRequest {
        filepath: filepath.to_string(),
    };
    let _: Acknowledged = client.post("/delete_lookup_file", &request).await?;
    Ok(())
}

pub async fn clone_lookup_file(
    client: &ApiClient,
    request: &CloneLookupRequest,
) -> Result<(), ApiError> {
    let _: Acknowledged = client.post("/clone_lookup_file", request).await?;
    Ok(())
}

/// Check the file locally before anything is sent.
pub fn check_upload(file_name: Option<&str>) -> Result<(), ApiError> {
    let name = file_name.ok_or_else(|| ApiError::State("Please select a file to upload.".into()))?;
    validate_upload_name(name).map_err(ApiError::State)
}

pub async fn upload_lookup_file(client: &ApiClient, file: &web_sys::File) -> Result<(), ApiError> {
    let name = file.name();
    check_upload(Some(&name))?;
    let form = web_sys::FormData::new()
        .map_err(|e| ApiError::State(format!("Failed to build form: {:?}", e)))?;
    form.append_with_blob_and_filename("file", file, &name)
        .map_err(|e| ApiError::State(format!("Failed to build form: {:?}", e)))?;
    let _: Acknowledged = client.post_form("/upload_file", form).await?;
    log::info!("uploaded lookup file {}", name);
    Ok(())
}

pub fn view_url(filepath: &str) -> String {
    format!("/view_lookup?file={}", encode_segment(filepath))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_upload() {
        assert!(check_upload(Some("users.CSV")).is_ok());
        assert!(check_upload(Some("hosts.sqlite3")).is_ok());
        assert_eq!(
            check_upload(None).unwrap_err().to_string(),
            "Please select a file to upload."
        );
        assert_eq!(
            check_upload(Some("notes.txt")).unwrap_err().to_string(),
            "Invalid file type. Please upload a .sqlite3, .parquet, .csv, or .json file."
        );
    }

    #[test]
    fn test_view_url_encodes_path() {
        assert_eq!(
            view_url("lookups/geo ip.csv"),
            "/view_lookup?file=lookups%2Fgeo%20ip.csv"
        );
    }
}
