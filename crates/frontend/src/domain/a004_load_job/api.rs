use crate::shared::api_utils::encode_segment;
use crate::shared::error::ApiError;
use crate::shared::http::ApiClient;
use crate::shared::storage::{SessionStore, SAVED_QUERY_KEY};
use contracts::domain::a004_load_job::aggregate::{
    build_loadjob_command, LoadJobFile, LoadJobListResponse, LoadJobQueryResponse,
};

pub async fn fetch_loadjob_files(client: &ApiClient) -> Result<Vec<LoadJobFile>, ApiError> {
    let response: LoadJobListResponse = client.get("/get_loadjob_files").await?;
    Ok(response.files)
}

/// Original query text of the job stored as `filename`.
pub async fn fetch_loadjob_query(client: &ApiClient, filename: &str) -> Result<String, ApiError> {
    let response: LoadJobQueryResponse = client
        .get_bare(&format!("/get_query_for_loadjob/{}", encode_segment(filename)))
        .await?;
    Ok(response.query)
}

/// Store the load command for `filename` as the next search. Returns the
/// staged text.
pub fn stage_loadjob<S: SessionStore>(store: &S, filename: &str, original_query: &str) -> String {
    let command = build_loadjob_command(filename, original_query);
    store.set(SAVED_QUERY_KEY, &command);
    command
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStore;

    #[test]
    fn test_stage_loadjob() {
        let store = MemoryStore::default();
        let staged = stage_loadjob(&store, "167a8a78.pkl", "index=\"a\"\n| head 5");
        assert_eq!(staged, "| loadjob '167a8a78.pkl'\n# index=\"a\"\n# | head 5");
        assert_eq!(store.get(SAVED_QUERY_KEY), Some(staged));
    }
}
