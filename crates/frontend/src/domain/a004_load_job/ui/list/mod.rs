pub mod state;

use crate::domain::a004_load_job::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::notifications::NotificationService;
use crate::shared::commands::{CommandDispatcher, RowCommand};
use crate::shared::format::format_file_size;
use crate::shared::http::ApiClient;
use crate::shared::icons::icon;
use crate::shared::storage::BrowserStorage;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
#[allow(non_snake_case)]
pub fn LoadJobList() -> impl IntoView {
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
            let result = api::fetch_loadjob_files(&client.get_value()).await;
            if result.is_err() {
                notifications.error("Error loading load job files.");
            }
            state.update(|s| s.finish(result));
        });
    };

    let dispatcher = StoredValue::new_local(CommandDispatcher::<String>::new().on(
        RowCommand::Load,
        move |filename: String| {
            notifications.info("Fetching original query...");
            spawn_local(async move {
                match api::fetch_loadjob_query(&client.get_value(), &filename).await {
                    Ok(query) => {
                        api::stage_loadjob(&BrowserStorage, &filename, &query);
                        notifications.success("Load job command saved. Opening the Search page.");
                        ctx.open_page("search");
                    }
                    Err(e) => {
                        log::error!("Error fetching original query: {}", e);
                        notifications.error("Original query not found for this load job.");
                    }
                }
            });
        },
    ));

    let dispatch = move |command: RowCommand, filename: String| {
        dispatcher.with_value(|d| {
            if let Err(e) = d.dispatch(command, filename) {
                log::warn!("{}", e);
            }
        })
    };

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"History"</h1>
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

            <div id="history-table" class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Filename"</th>
                            <th class="table__header-cell">"Datetime Created"</th>
                            <th class="table__header-cell">"Last Updated"</th>
                            <th class="table__header-cell">"Filesize"</th>
                            <th class="table__header-cell">"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || state.with(|s| s.items.clone())
                            .into_iter()
                            .map(|file| {
                                let filename = file.filename.clone();
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell">{file.filename}</td>
                                        <td class="table__cell">{file.created_at}</td>
                                        <td class="table__cell">{file.updated_at}</td>
                                        <td class="table__cell">{format_file_size(file.filesize)}</td>
                                        <td class="table__cell">
                                            <button
                                                class="button load-btn"
                                                on:click=move |_| dispatch(RowCommand::Load, filename.clone())
                                            >
                                                "Load"
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
