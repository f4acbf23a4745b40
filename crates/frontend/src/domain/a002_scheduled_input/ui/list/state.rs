use crate::shared::list_state::ListState;
use contracts::domain::a002_scheduled_input::aggregate::ScheduledInput;
use leptos::prelude::*;

pub type ScheduledInputListState = ListState<ScheduledInput>;

pub fn create_state() -> RwSignal<ScheduledInputListState> {
    RwSignal::new(ScheduledInputListState::default())
}
