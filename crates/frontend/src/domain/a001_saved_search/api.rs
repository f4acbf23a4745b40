use crate::shared::api_utils::encode_segment;
use crate::shared::error::ApiError;
use crate::shared::http::{Acknowledged, ApiClient};
use crate::shared::storage::{SessionStore, SAVED_QUERY_KEY};
use contracts::domain::a001_saved_search::aggregate::{
    CommitSavedSearchRequest, SavedSearch, SavedSearchDetailResponse, SavedSearchDto,
    SavedSearchListResponse, SavedSearchWriteResponse, TitleCheckRequest, TitleCheckResponse,
};

pub async fn fetch_saved_searches(client: &ApiClient) -> Result<Vec<SavedSearch>, ApiError> {
    let response: SavedSearchListResponse = client.get("/get_saved_searches").await?;
    Ok(response.searches)
}

pub async fn delete_search(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    let _: Acknowledged = client
        .post_action(&format!("/delete_search/{}", encode_segment(id)))
        .await?;
    Ok(())
}

pub async fn toggle_disable_search(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    let _: Acknowledged = client
        .post_action(&format!("/toggle_disable_search/{}", encode_segment(id)))
        .await?;
    Ok(())
}

pub async fn clone_search(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    let _: Acknowledged = client
        .post_action(&format!("/clone_search/{}", encode_segment(id)))
        .await?;
    Ok(())
}

pub async fn fetch_saved_search(client: &ApiClient, id: &str) -> Result<SavedSearchDto, ApiError> {
    let response: SavedSearchDetailResponse = client
        .get(&format!("/get_saved_search/{}", encode_segment(id)))
        .await?;
    Ok(response.search)
}

pub async fn check_title_unique(client: &ApiClient, title: &str) -> Result<bool, ApiError> {
    let request = TitleCheckRequest {
        title: title.trim().to_string(),
    };
    let response: TitleCheckResponse = client.post_bare("/check_title_unique", &request).await?;
    Ok(response.is_unique)
}

/// Returns the backend's confirmation message.
pub async fn commit_saved_search(
    client: &ApiClient,
    request: &CommitSavedSearchRequest,
) -> Result<String, ApiError> {
    let response: SavedSearchWriteResponse = client.post("/commit_saved_search", request).await?;
    Ok(response
        .message
        .unwrap_or_else(|| format!("Successfully saved search: '{}'", request.search.title)))
}

pub async fn update_saved_search(
    client: &ApiClient,
    id: &str,
    search: &SavedSearchDto,
) -> Result<String, ApiError> {
    let response: SavedSearchWriteResponse = client
        .post(&format!("/update_saved_search/{}", encode_segment(id)), search)
        .await?;
    Ok(response
        .message
        .unwrap_or_else(|| "Saved search updated successfully.".to_string()))
}

pub fn title_taken_message(title: &str) -> String {
    format!(
        "The title \"{}\" already exists. Please choose a different title.",
        title.trim()
    )
}

/// Hand the search's query to the search page.
pub fn stage_for_run<S: SessionStore>(store: &S, search: &SavedSearch) -> Result<(), ApiError> {
    let query = search
        .runnable_query()
        .ok_or_else(|| ApiError::State("No query available to run.".to_string()))?;
    store.set(SAVED_QUERY_KEY, query);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStore;

    fn search(query: Option<&str>) -> SavedSearch {
        serde_json::from_value(serde_json::json!({
            "id": 4,
            "title": "Errors",
            "query": query,
        }))
        .unwrap()
    }

    #[test]
    fn test_stage_for_run_writes_saved_query() {
        let store = MemoryStore::default();
        stage_for_run(&store, &search(Some("level=\"ERROR\""))).unwrap();
        assert_eq!(store.get(SAVED_QUERY_KEY).as_deref(), Some("level=\"ERROR\""));
    }

    #[test]
    fn test_stage_for_run_without_query() {
        let store = MemoryStore::default();
        let err = stage_for_run(&store, &search(None)).unwrap_err();
        assert_eq!(err.to_string(), "No query available to run.");
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_title_taken_message() {
        assert_eq!(
            title_taken_message(" Errors "),
            "The title \"Errors\" already exists. Please choose a different title."
        );
    }
}
