use crate::shared::list_state::ListState;
use contracts::domain::a004_load_job::aggregate::LoadJobFile;
use leptos::prelude::*;

pub type LoadJobListState = ListState<LoadJobFile>;

pub fn create_state() -> RwSignal<LoadJobListState> {
    RwSignal::new(LoadJobListState::default())
}
