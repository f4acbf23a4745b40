pub mod state;

use crate::domain::a002_scheduled_input::api;
use crate::layout::global_context::{page_params, AppGlobalContext};
use crate::layout::notifications::NotificationService;
use crate::shared::commands::{CommandDispatcher, RowCommand};
use crate::shared::components::dropdown_menu::{DropdownMenu, MenuItem};
use crate::shared::date_utils::format_epoch_seconds;
use crate::shared::dialogs::confirm;
use crate::shared::format::yes_no;
use crate::shared::http::ApiClient;
use crate::shared::icons::icon;
use contracts::domain::a002_scheduled_input::aggregate::ScheduledInput;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledInputRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub cron_schedule: String,
    pub subdirectory: String,
    pub created_at: String,
    pub overwrite: &'static str,
    pub status: &'static str,
    pub toggle_label: &'static str,
}

impl From<&ScheduledInput> for ScheduledInputRow {
    fn from(i: &ScheduledInput) -> Self {
        Self {
            id: i.id.clone(),
            title: i.title.clone(),
            description: i.description.clone().unwrap_or_default(),
            cron_schedule: i.cron_schedule.clone().unwrap_or_default(),
            subdirectory: i.subdirectory_label().to_string(),
            created_at: i.created_at.map(format_epoch_seconds).unwrap_or_default(),
            overwrite: yes_no(i.overwrite),
            status: i.status_label(),
            toggle_label: i.toggle_label(),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ScheduledInputList() -> impl IntoView {
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
            let result = api::fetch_scheduled_inputs(&client.get_value()).await;
            if result.is_err() {
                notifications.error("Error loading scheduled inputs.");
            }
            state.update(|s| s.finish(result));
        });
    };

    let dispatcher = StoredValue::new_local(
        CommandDispatcher::<String>::new()
            .on(RowCommand::Edit, move |id: String| {
                ctx.open_page_with("edit_scheduled_input", page_params([("id", id)]))
            })
            .on(RowCommand::Run, move |id: String| {
                spawn_local(async move {
                    let result = api::run_scheduled_input(&client.get_value(), &id).await;
                    notifications.report(&result, "Input executed successfully.");
                });
            })
            .on(RowCommand::Delete, move |id: String| {
                if !confirm("Are you sure you want to delete this input?") {
                    return;
                }
                spawn_local(async move {
                    let result = api::delete_scheduled_input(&client.get_value(), &id).await;
                    if notifications.report(&result, "Scheduled input deleted successfully.") {
                        fetch();
                    }
                });
            })
            .on(RowCommand::ToggleDisable, move |id: String| {
                spawn_local(async move {
                    match api::toggle_disable_scheduled_input(&client.get_value(), &id).await {
                        Ok(new_disabled) => {
                            notifications.success(api::toggle_message(new_disabled));
                            fetch();
                        }
                        Err(e) => {
                            notifications.api_error(&e);
                        }
                    }
                });
            })
            .on(RowCommand::Clone, move |id: String| {
                if !confirm("Are you sure you want to clone this input?") {
                    return;
                }
                spawn_local(async move {
                    let result = api::clone_scheduled_input(&client.get_value(), &id).await;
                    if notifications.report(&result, "Scheduled input cloned successfully.") {
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
                    <h1 class="header__title">"Scheduled Inputs"</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| ctx.open_page("new_scheduled_input")>
                        {icon("plus")}
                        "New Scheduled Input"
                    </button>
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

            <div id="scheduled-inputs-table" class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Title"</th>
                            <th class="table__header-cell">"Description"</th>
                            <th class="table__header-cell">"Cron Schedule"</th>
                            <th class="table__header-cell">"Subdirectory"</th>
                            <th class="table__header-cell">"Created At"</th>
                            <th class="table__header-cell">"Overwrite"</th>
                            <th class="table__header-cell">"Status"</th>
                            <th class="table__header-cell">"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || state.with(|s| s.items.iter().map(ScheduledInputRow::from).collect::<Vec<_>>())
                            .into_iter()
                            .map(|row| {
                                let edit_id = row.id.clone();
                                let menu_id = row.id.clone();
                                let items = vec![
                                    MenuItem::new(RowCommand::Edit),
                                    MenuItem::new(RowCommand::Run),
                                    MenuItem::labelled(RowCommand::ToggleDisable, row.toggle_label),
                                    MenuItem::new(RowCommand::Clone),
                                    MenuItem::new(RowCommand::Delete),
                                ];
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell">
                                            <a href="#" on:click=move |ev| {
                                                ev.prevent_default();
                                                dispatch(RowCommand::Edit, edit_id.clone());
                                            }>{row.title}</a>
                                        </td>
                                        <td class="table__cell">{row.description}</td>
                                        <td class="table__cell">{row.cron_schedule}</td>
                                        <td class="table__cell">{row.subdirectory}</td>
                                        <td class="table__cell">{row.created_at}</td>
                                        <td class="table__cell">{row.overwrite}</td>
                                        <td class="table__cell">
                                            <span class="tag" class:is-danger={row.status == "disabled"}>{row.status}</span>
                                        </td>
                                        <td class="table__cell">
                                            <DropdownMenu
                                                items=items
                                                label="Actions"
                                                on_select=Callback::new(move |cmd| dispatch(cmd, menu_id.clone()))
                                            />
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_formatting() {
        let input: ScheduledInput = serde_json::from_value(serde_json::json!({
            "id": 2,
            "title": "Firewall",
            "cron_schedule": "0 * * * *",
            "subdirectory": "",
            "created_at": 0,
            "overwrite": "1",
            "disabled": "0"
        }))
        .unwrap();
        let row = ScheduledInputRow::from(&input);
        assert_eq!(row.id, "2");
        assert_eq!(row.subdirectory, "None");
        assert_eq!(row.created_at, "1970-01-01 00:00:00");
        assert_eq!(row.overwrite, "Yes");
        assert_eq!(row.status, "enabled");
        assert_eq!(row.toggle_label, "Disable");
    }
}
