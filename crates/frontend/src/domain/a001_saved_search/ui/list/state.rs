use crate::shared::list_state::ListState;
use contracts::domain::a001_saved_search::aggregate::SavedSearch;
use leptos::prelude::*;

pub type SavedSearchListState = ListState<SavedSearch>;

pub fn create_state() -> RwSignal<SavedSearchListState> {
    RwSignal::new(SavedSearchListState::default())
}
