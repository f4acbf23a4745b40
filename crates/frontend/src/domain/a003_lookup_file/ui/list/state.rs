use crate::shared::list_state::ListState;
use contracts::domain::a003_lookup_file::aggregate::LookupFile;
use leptos::prelude::*;

pub type LookupFileListState = ListState<LookupFile>;

pub fn create_state() -> RwSignal<LookupFileListState> {
    RwSignal::new(LookupFileListState::default())
}
