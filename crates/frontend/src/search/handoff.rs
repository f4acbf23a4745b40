//! Hand-off from the search page to the save-search form.

use super::exporter::NO_ACTIVE_QUERY;
use super::session::QuerySession;
use crate::layout::global_context::{page_params, PageParams};
use crate::shared::error::ApiError;

/// Page key of the save-search form.
pub const SAVE_SEARCH_PAGE: &str = "save_search";

const REQUEST_ID_PARAM: &str = "request_id";
const SAVED_QUERY_PARAM: &str = "saved_query";

/// What the save-search form is prefilled with: the correlation id of the
/// query being saved and the text currently in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSearchDraft {
    pub request_id: String,
    pub saved_query: String,
}

impl SaveSearchDraft {
    pub fn from_session(session: &QuerySession, query_text: &str) -> Result<Self, ApiError> {
        let request_id = session
            .correlation_id()
            .ok_or_else(|| ApiError::State(NO_ACTIVE_QUERY.to_string()))?;
        Ok(Self {
            request_id: request_id.as_str().to_string(),
            saved_query: query_text.to_string(),
        })
    }

    pub fn to_params(&self) -> PageParams {
        page_params([
            (REQUEST_ID_PARAM, self.request_id.as_str()),
            (SAVED_QUERY_PARAM, self.saved_query.as_str()),
        ])
    }

    /// Read the draft back from page parameters; a missing or blank
    /// request id means there is nothing to save.
    pub fn from_params(params: &PageParams) -> Result<Self, ApiError> {
        let request_id = params
            .get(REQUEST_ID_PARAM)
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ApiError::State(NO_ACTIVE_QUERY.to_string()))?;
        Ok(Self {
            request_id: request_id.clone(),
            saved_query: params.get(SAVED_QUERY_PARAM).cloned().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::global_context::page_query;
    use crate::search::session::{OverlapPolicy, SessionController};
    use crate::shared::storage::MemoryStore;
    use contracts::search::{CorrelationId, QueryResponse};

    #[test]
    fn test_requires_correlation_id() {
        let ctl =
            SessionController::new(MemoryStore::default(), OverlapPolicy::LastResponseWins, 100);
        let err = SaveSearchDraft::from_session(ctl.current(), "index=\"a\"").unwrap_err();
        assert_eq!(err.to_string(), NO_ACTIVE_QUERY);
        assert!(SaveSearchDraft::from_params(&PageParams::new()).is_err());
    }

    #[test]
    fn test_draft_survives_the_url() {
        let mut ctl =
            SessionController::new(MemoryStore::default(), OverlapPolicy::LastResponseWins, 100);
        let t = ctl.begin_query("q");
        ctl.complete_query(
            t,
            Ok(QueryResponse {
                request_id: Some(CorrelationId::new("r-1")),
                ..Default::default()
            }),
        )
        .unwrap();
        let draft = SaveSearchDraft::from_session(ctl.current(), "level=\"ERROR\" & x>4").unwrap();

        let query = page_query(SAVE_SEARCH_PAGE, &draft.to_params());
        assert!(query.starts_with("?active=save_search&request_id=r-1&saved_query="));
        let parsed: PageParams = serde_qs::from_str(query.trim_start_matches('?')).unwrap();
        assert_eq!(SaveSearchDraft::from_params(&parsed).unwrap(), draft);
    }
}
