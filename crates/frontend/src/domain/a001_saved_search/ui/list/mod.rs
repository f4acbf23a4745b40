pub mod state;

use crate::domain::a001_saved_search::api;
use crate::layout::global_context::{page_params, AppGlobalContext};
use crate::layout::notifications::NotificationService;
use crate::shared::commands::{CommandDispatcher, RowCommand};
use crate::shared::components::dropdown_menu::{DropdownMenu, MenuItem};
use crate::shared::date_utils::format_minutes;
use crate::shared::dialogs::confirm;
use crate::shared::format::yes_no;
use crate::shared::http::ApiClient;
use crate::shared::icons::icon;
use crate::shared::storage::BrowserStorage;
use contracts::domain::a001_saved_search::aggregate::SavedSearch;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Debug, PartialEq)]
pub struct SavedSearchRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub cron_schedule: String,
    pub trigger: String,
    pub lookback: String,
    pub next_scheduled_time: String,
    pub owner: String,
    pub execution_count: String,
    pub status: &'static str,
    pub send_email: &'static str,
    pub toggle_label: &'static str,
}

impl From<&SavedSearch> for SavedSearchRow {
    fn from(s: &SavedSearch) -> Self {
        Self {
            id: s.id.clone(),
            title: s.title.clone(),
            description: s.description.clone().unwrap_or_default(),
            cron_schedule: s.cron_schedule.clone().unwrap_or_default(),
            trigger: s.trigger.clone().unwrap_or_default(),
            lookback: s.lookback.clone().unwrap_or_default(),
            next_scheduled_time: s
                .next_scheduled_time
                .as_deref()
                .map(format_minutes)
                .unwrap_or_default(),
            owner: s.owner.clone().unwrap_or_default(),
            execution_count: s.execution_count.unwrap_or(0).to_string(),
            status: s.status_label(),
            send_email: yes_no(s.send_email),
            toggle_label: s.toggle_label(),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn SavedSearchList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let client = StoredValue::new(
        use_context::<ApiClient>().expect("ApiClient not provided in context"),
    );
    let notifications =
        use_context::<NotificationService>().expect("NotificationService not provided in context");
    let state = state::create_state();

    let fetch = move || {
        state.update(|s| s.begin_load());
        spawn_local(async move {
            let result = api::fetch_saved_searches(&client.get_value()).await;
            if result.is_err() {
                notifications.error("Error loading saved searches.");
            }
            state.update(|s| s.finish(result));
        });
    };

    let find = move |id: &str| {
        state.with_untracked(|s| s.items.iter().find(|item| item.id == id).cloned())
    };

    let dispatcher = StoredValue::new_local(
        CommandDispatcher::<String>::new()
            .on(RowCommand::Edit, move |id: String| {
                ctx.open_page_with("edit_saved_search", page_params([("id", id)]))
            })
            .on(RowCommand::Run, move |id: String| {
                let Some(search) = find(&id) else { return };
                match api::stage_for_run(&BrowserStorage, &search) {
                    Ok(()) => ctx.open_page("search"),
                    Err(e) => {
                        notifications.api_error(&e);
                    }
                }
            })
            .on(RowCommand::Delete, move |id: String| {
                if !confirm("Are you sure you want to delete this saved search?") {
                    return;
                }
                spawn_local(async move {
                    let result = api::delete_search(&client.get_value(), &id).await;
                    if notifications.report(&result, "Saved search deleted successfully.") {
                        fetch();
                    }
                });
            })
            .on(RowCommand::ToggleDisable, move |id: String| {
                spawn_local(async move {
                    let result = api::toggle_disable_search(&client.get_value(), &id).await;
                    if notifications.report(&result, "Saved search status updated successfully.") {
                        fetch();
                    }
                });
            })
            .on(RowCommand::Clone, move |id: String| {
                spawn_local(async move {
                    let result = api::clone_search(&client.get_value(), &id).await;
                    if notifications.report(&result, "Saved search cloned successfully.") {
                        fetch();
                    }
                });
            }),
    );

    let dispatch = move |command: RowCommand, id: String| {
        dispatcher.with_value(|d| {
            if let Err(e) = d.dispatch(command, id) {
                log::warn!("{}", e);
            }
        })
    };

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Saved Searches"</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--secondary" on:click=move |_| fetch()>
                        {icon("refresh")}
                        "Refresh"
                    </button>
                </div>
            </div>

            {move || state.with(|s| s.error.clone()).map(|e| view! {
                <div class="warning-box">
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div id="saved-searches-table" class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Title"</th>
                            <th class="table__header-cell">"Description"</th>
                            <th class="table__header-cell">"Cron Schedule"</th>
                            <th class="table__header-cell">"Trigger"</th>
                            <th class="table__header-cell">"Lookback"</th>
                            <th class="table__header-cell">"Next Scheduled Time"</th>
                            <th class="table__header-cell">"Owner"</th>
                            <th class="table__header-cell">"Execution Count"</th>
                            <th class="table__header-cell">"Status"</th>
                            <th class="table__header-cell">"Email"</th>
                            <th class="table__header-cell">"Edit"</th>
                            <th class="table__header-cell">"Run"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || state.with(|s| s.items.iter().map(SavedSearchRow::from).collect::<Vec<_>>())
                            .into_iter()
                            .map(|row| {
                                let menu_id = row.id.clone();
                                let run_id = row.id.clone();
                                let items = vec![
                                    MenuItem::labelled(RowCommand::Edit, "Edit Search"),
                                    MenuItem::new(RowCommand::Delete),
                                    MenuItem::labelled(RowCommand::ToggleDisable, row.toggle_label),
                                    MenuItem::new(RowCommand::Clone),
                                ];
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell">{row.title}</td>
                                        <td class="table__cell">{row.description}</td>
                                        <td class="table__cell">{row.cron_schedule}</td>
                                        <td class="table__cell">{row.trigger}</td>
                                        <td class="table__cell">{row.lookback}</td>
                                        <td class="table__cell">{row.next_scheduled_time}</td>
                                        <td class="table__cell">{row.owner}</td>
                                        <td class="table__cell">{row.execution_count}</td>
                                        <td class="table__cell">{row.status}</td>
                                        <td class="table__cell">{row.send_email}</td>
                                        <td class="table__cell">
                                            <DropdownMenu
                                                items=items
                                                on_select=Callback::new(move |cmd| dispatch(cmd, menu_id.clone()))
                                            />
                                        </td>
                                        <td class="table__cell">
                                            <button class="button load-btn" on:click=move |_| dispatch(RowCommand::Run, run_id.clone())>
                                                "Run"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
            </div>
        </div>
    }
}
