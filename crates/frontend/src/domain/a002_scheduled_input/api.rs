use crate::shared::api_utils::encode_segment;
use crate::shared::error::ApiError;
use crate::shared::http::{Acknowledged, ApiClient};
use contracts::domain::a002_scheduled_input::aggregate::{
    preview_json, ApiDataRequest, ApiDataResponse, ScheduledInput, ScheduledInputDto,
    ScheduledInputListResponse, ScriptTestRequest, ScriptTestResponse, ToggleDisableResponse,
    PREVIEW_MAX_LINES,
};

pub async fn fetch_scheduled_inputs(client: &ApiClient) -> Result<Vec<ScheduledInput>, ApiError> {
    let response: ScheduledInputListResponse = client.get("/get_scheduled_inputs").await?;
    Ok(response.inputs)
}

pub async fn run_scheduled_input(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    let _: Acknowledged = client
        .post_action(&format!("/run_scheduled_input/{}", encode_segment(id)))
        .await?;
    Ok(())
}

pub async fn delete_scheduled_input(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    let _: Acknowledged = client
        .post_action(&format!("/delete_scheduled_input/{}", encode_segment(id)))
        .await?;
    Ok(())
}

/// Returns the new `disabled` flag when the backend reports it.
pub async fn toggle_disable_scheduled_input(
    client: &ApiClient,
    id: &str,
) -> Result<Option<bool>, ApiError> {
    let response: ToggleDisableResponse = client
        .post_action(&format!(
            "/toggle_disable_scheduled_input/{}",
            encode_segment(id)
        ))
        .await?;
    Ok(response.new_disabled)
}

pub async fn clone_scheduled_input(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    let _: Acknowledged = client
        .post_action(&format!("/clone_scheduled_input/{}", encode_segment(id)))
        .await?;
    Ok(())
}

/// Find one input in the listing; the listing carries the code, so the
/// edit form needs no separate fetch.
pub async fn fetch_scheduled_input(
    client: &ApiClient,
    id: &str,
) -> Result<ScheduledInputDto, ApiError> {
    fetch_scheduled_inputs(client)
        .await?
        .iter()
        .find(|input| input.id == id)
        .map(ScheduledInputDto::from)
        .ok_or_else(|| ApiError::State(format!("Scheduled input {} not found.", id)))
}

/// `/commit_scheduled_input` reads a form, not a JSON body.
pub async fn commit_scheduled_input(
    client: &ApiClient,
    input: &ScheduledInputDto,
) -> Result<(), ApiError> {
    let form = web_sys::FormData::new()
        .map_err(|e| ApiError::State(format!("Failed to build form: {:?}", e)))?;
    for (name, value) in input.form_fields() {
        form.append_with_str(name, &value)
            .map_err(|e| ApiError::State(format!("Failed to build form: {:?}", e)))?;
    }
    let _: Acknowledged = client.post_form("/commit_scheduled_input", form).await?;
    log::info!("committed scheduled input {}", input.title);
    Ok(())
}

pub async fn update_scheduled_input(
    client: &ApiClient,
    id: &str,
    input: &ScheduledInputDto,
) -> Result<(), ApiError> {
    let _: Acknowledged = client
        .post(&format!("/update_scheduled_input/{}", encode_segment(id)), input)
        .await?;
    Ok(())
}

/// Run the script once on the backend and return its DataFrame summary.
pub async fn test_scheduled_input(client: &ApiClient, code: &str) -> Result<String, ApiError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(ApiError::State(
            "Please enter your Python code before testing.".to_string(),
        ));
    }
    let request = ScriptTestRequest {
        code: code.to_string(),
    };
    let response: ScriptTestResponse = client.post("/test_scheduled_input", &request).await?;
    Ok(response.df_summary)
}

/// Fetch sample data through the backend and return it pretty-printed.
pub async fn fetch_api_data(client: &ApiClient, api_url: &str) -> Result<String, ApiError> {
    let api_url = check_api_url(api_url)?;
    let request = ApiDataRequest {
        api_url: api_url.to_string(),
    };
    let response: ApiDataResponse = client.post("/fetch_api_data", &request).await?;
    Ok(preview_json(&response.api_data, PREVIEW_MAX_LINES))
}

pub fn check_api_url(api_url: &str) -> Result<&str, ApiError> {
    let api_url = api_url.trim();
    if api_url.is_empty() {
        return Err(ApiError::State("Please enter an API URL.".to_string()));
    }
    let host = api_url
        .strip_prefix("https://")
        .or_else(|| api_url.strip_prefix("http://"))
        .and_then(|rest| rest.split(['/', '?', '#']).next())
        .filter(|host| !host.is_empty() && !host.contains(char::is_whitespace));
    match host {
        Some(_) => Ok(api_url),
        None => Err(ApiError::State("Please enter a valid API URL.".to_string())),
    }
}

pub fn toggle_message(new_disabled: Option<bool>) -> String {
    match new_disabled {
        Some(true) => "Scheduled input disabled successfully.".to_string(),
        Some(false) => "Scheduled input enabled successfully.".to_string(),
        None => "Scheduled input updated successfully.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_message() {
        assert_eq!(toggle_message(Some(true)), "Scheduled input disabled successfully.");
        assert_eq!(toggle_message(Some(false)), "Scheduled input enabled successfully.");
        assert_eq!(toggle_message(None), "Scheduled input updated successfully.");
    }

    #[test]
    fn test_check_api_url() {
        assert_eq!(
            check_api_url(" https://jsonplaceholder.typicode.com/todos/1 ").unwrap(),
            "https://jsonplaceholder.typicode.com/todos/1"
        );
        assert!(check_api_url("http://localhost:8080").is_ok());
        assert_eq!(check_api_url("  ").unwrap_err().to_string(), "Please enter an API URL.");
        for bad in ["example.com/data", "https://", "ftp://host", "https:///path"] {
            assert_eq!(
                check_api_url(bad).unwrap_err().to_string(),
                "Please enter a valid API URL.",
                "{bad}"
            );
        }
    }

    #[tokio::test]
    async fn test_blank_script_is_not_sent() {
        let client = ApiClient::new("http://127.0.0.1:9");
        let err = test_scheduled_input(&client, " \n ").await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter your Python code before testing.");
        let err = fetch_api_data(&client, "not a url").await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid API URL.");
    }
}
