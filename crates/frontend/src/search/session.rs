//! Query session: the single owner of the current result set.
//!
//! A successful response replaces the [`QuerySession`] snapshot as one value,
//! so rows, pagination and correlation id always belong to the same query.
//! Overlapping queries are ordered by a generation counter; which response
//! survives is decided by the [`OverlapPolicy`].

use super::backend::SearchBackend;
use super::pager::{PageWindow, Pager, PaginationState};
use super::result_cache::ResultCache;
use crate::shared::config::SearchConfig;
use crate::shared::error::ApiError;
use crate::shared::storage::{SessionStore, REQUEST_ID_KEY, SAVED_QUERY_KEY};
use contracts::search::{CorrelationId, QueryRequest, QueryResponse};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Responses are applied in arrival order, whichever query they answer.
    #[default]
    LastResponseWins,
    /// Only the response to the most recently issued query is applied.
    LatestRequestWins,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("response to query #{generation} discarded, query #{latest} is newer")]
    Superseded { generation: u64, latest: u64 },
}

/// Issued by [`SessionController::begin_query`]; hand it back with the
/// response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    generation: u64,
    text: String,
}

impl QueryTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuerySession {
    generation: u64,
    cache: ResultCache,
    correlation_id: Option<CorrelationId>,
    pagination: PaginationState,
}

impl QuerySession {
    fn empty(page_size: usize) -> Self {
        Self {
            generation: 0,
            cache: ResultCache::default(),
            correlation_id: None,
            pagination: PaginationState::new(page_size, 0),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn correlation_id(&self) -> Option<&CorrelationId> {
        self.correlation_id.as_ref()
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    /// Nothing has been executed yet in this page load.
    pub fn is_initial(&self) -> bool {
        self.generation == 0
    }
}

pub struct SessionController<S> {
    store: S,
    policy: OverlapPolicy,
    page_size: usize,
    issued: u64,
    session: QuerySession,
}

impl<S: SessionStore> SessionController<S> {
    pub fn new(store: S, policy: OverlapPolicy, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            store,
            policy,
            page_size,
            issued: 0,
            session: QuerySession::empty(page_size),
        }
    }

    pub fn from_config(store: S, config: &SearchConfig) -> Self {
        Self::new(store, config.overlap_policy, config.page_size)
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    pub fn current(&self) -> &QuerySession {
        &self.session
    }

    /// Generation of the most recently issued query.
    pub fn latest_generation(&self) -> u64 {
        self.issued
    }

    pub fn pager(&self) -> Pager<'_> {
        Pager::new(&self.session.cache, self.session.pagination.page_size())
    }

    pub fn window(&self) -> PageWindow {
        self.session.pagination.window()
    }

    /// Last persisted query text. Pure read.
    pub fn restore_query(&self) -> Option<String> {
        self.store.get(SAVED_QUERY_KEY)
    }

    pub fn begin_query(&mut self, text: impl Into<String>) -> QueryTicket {
        self.issued += 1;
        let ticket = QueryTicket {
            generation: self.issued,
            text: text.into(),
        };
        log::debug!("query #{} issued", ticket.generation);
        ticket
    }

    /// Apply the outcome of the query `ticket` was issued for.
    ///
    /// On failure, and when the response is superseded, the current session is
    /// left untouched.
    pub fn complete_query(
        &mut self,
        ticket: QueryTicket,
        outcome: Result<QueryResponse, ApiError>,
    ) -> Result<&QuerySession, QueryError> {
        if self.policy == OverlapPolicy::LatestRequestWins && ticket.generation != self.issued {
            log::debug!(
                "query #{} answered after #{} was issued, discarding",
                ticket.generation,
                self.issued
            );
            return Err(QueryError::Superseded {
                generation: ticket.generation,
                latest: self.issued,
            });
        }

        let response = outcome.map_err(|e| {
            log::error!("query #{} failed: {} ({})", ticket.generation, e, e.detail());
            QueryError::Api(e)
        })?;

        let correlation_id = response.correlation_id().cloned();
        let cache = ResultCache::from_response(response);
        let pagination = PaginationState::new(self.page_size, cache.len());
        self.session = QuerySession {
            generation: ticket.generation,
            cache,
            correlation_id,
            pagination,
        };

        match &self.session.correlation_id {
            Some(id) => self.store.set(REQUEST_ID_KEY, id.as_str()),
            None => {
                log::error!("No request_id found in the response");
                self.store.remove(REQUEST_ID_KEY);
            }
        }
        self.store.set(SAVED_QUERY_KEY, &ticket.text);

        log::info!(
            "query #{} returned {} rows",
            ticket.generation,
            self.session.cache.len()
        );
        Ok(&self.session)
    }

    pub async fn execute_query<B: SearchBackend + ?Sized>(
        &mut self,
        backend: &B,
        text: impl Into<String>,
    ) -> Result<&QuerySession, QueryError> {
        let ticket = self.begin_query(text);
        let outcome = backend.run_query(&QueryRequest::new(ticket.text())).await;
        self.complete_query(ticket, outcome)
    }

    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.session.pagination.go_to(page)
    }

    pub fn next_page(&mut self) -> usize {
        let current = self.session.pagination.current_page();
        if self.pager().has_next(current) {
            self.go_to_page(current + 1)
        } else {
            current
        }
    }

    pub fn previous_page(&mut self) -> usize {
        let current = self.session.pagination.current_page();
        if self.pager().has_previous(current) {
            self.go_to_page(current - 1)
        } else {
            current
        }
    }

    /// Change the page size and return to page 1.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), ApiError> {
        if page_size == 0 {
            return Err(ApiError::State(
                "Page size must be greater than zero.".to_string(),
            ));
        }
        self.page_size = page_size;
        self.session.pagination = PaginationState::new(page_size, self.session.cache.len());
        Ok(())
    }
}
