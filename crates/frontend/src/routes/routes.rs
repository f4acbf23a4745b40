use crate::domain::a001_saved_search::ui::details::{self as saved_search, SaveSearchPage, SavedSearchDetails};
use crate::domain::a001_saved_search::ui::list::SavedSearchList;
use crate::domain::a002_scheduled_input::ui::details::{self as scheduled_input, ScheduledInputDetails};
use crate::domain::a002_scheduled_input::ui::list::ScheduledInputList;
use crate::domain::a003_lookup_file::ui::list::LookupFileList;
use crate::domain::a004_load_job::ui::list::LoadJobList;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::Navbar;
use crate::layout::Shell;
use crate::search::ui::SearchPage;
use leptos::prelude::*;

/// Page body for an active-page key. Edit pages without an `id` fall back
/// to their list.
fn page_view(ctx: AppGlobalContext, key: &str) -> AnyView {
    match key {
        "saved_searches" => view! { <SavedSearchList /> }.into_any(),
        "save_search" => view! { <SaveSearchPage /> }.into_any(),
        "edit_saved_search" => match ctx.param("id") {
            Some(id) => {
                let target = saved_search::FormTarget::Edit { id };
                view! { <SavedSearchDetails target=target /> }.into_any()
            }
            None => view! { <SavedSearchList /> }.into_any(),
        },
        "scheduled_inputs" => view! { <ScheduledInputList /> }.into_any(),
        "new_scheduled_input" => {
            let target = scheduled_input::FormTarget::Create;
            view! { <ScheduledInputDetails target=target /> }.into_any()
        }
        "edit_scheduled_input" => match ctx.param("id") {
            Some(id) => {
                let target = scheduled_input::FormTarget::Edit { id };
                view! { <ScheduledInputDetails target=target /> }.into_any()
            }
            None => view! { <ScheduledInputList /> }.into_any(),
        },
        "lookups" => view! { <LookupFileList /> }.into_any(),
        "history" => view! { <LoadJobList /> }.into_any(),
        _ => view! { <SearchPage /> }.into_any(),
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    // Initialize router integration. This runs once when the component is created.
    ctx.init_router_integration();

    let active = Memo::new(move |_| ctx.active.get());

    view! {
        <Shell
            left=|| view! { <Navbar /> }.into_any()
            center=move || view! { {move || page_view(ctx, &active.get())} }.into_any()
        />
    }
}
