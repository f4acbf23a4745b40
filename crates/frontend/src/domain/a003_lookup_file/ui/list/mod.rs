pub mod state;

use crate::domain::a003_lookup_file::api;
use crate::layout::notifications::NotificationService;
use crate::shared::commands::{CommandDispatcher, RowCommand};
use crate::shared::dialogs::{confirm, open_in_new_tab, prompt};
use crate::shared::format::format_file_size;
use crate::shared::http::ApiClient;
use crate::shared::icons::icon;
use contracts::domain::a003_lookup_file::aggregate::{CloneLookupRequest, LookupFile};
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Debug, PartialEq)]
pub struct LookupFileRow {
    pub filename: String,
    pub filepath: String,
    pub created_at: String,
    pub updated_at: String,
    pub filesize: String,
    pub permissions: String,
    pub row_count: String,
}

impl From<&LookupFile> for LookupFileRow {
    fn from(f: &LookupFile) -> Self {
        Self {
            filename: f.filename.clone(),
            filepath: f.filepath.clone(),
            created_at: f.created_at.clone(),
            updated_at: f.updated_at.clone(),
            filesize: format_file_size(f.filesize),
            permissions: f.permissions.clone(),
            row_count: f.row_count_label(),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn LookupFileList() -> impl IntoView {
    let client = StoredValue::new(
        use_context::<ApiClient>().expect("ApiClient not provided in context"),
    );
    let notifications =
        use_context::<NotificationService>().expect("NotificationService not provided in context");
    let state = state::create_state();
    let show_upload = RwSignal::new(false);
    let chosen_name = RwSignal::new(None::<String>);
    let file_input = NodeRef::<Input>::new();

    let fetch = move || {
        state.update(|s| s.begin_load());
        spawn_local(async move {
            let result = api::fetch_lookup_files(&client.get_value()).await;
            if result.is_err() {
                notifications.error("Error loading lookup files.");
            }
            state.update(|s| s.finish(result));
        });
    };

    let selected_file = move || {
        file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
    };

    let reset_upload = move || {
        if let Some(input) = file_input.get_untracked() {
            input.set_value("");
        }
        chosen_name.set(None);
        show_upload.set(false);
    };

    let upload = move || {
        let file = selected_file();
        if let Err(e) = api::check_upload(file.as_ref().map(|f| f.name()).as_deref()) {
            notifications.api_error(&e);
            return;
        }
        let Some(file) = file else { return };
        spawn_local(async move {
            let result = api::upload_lookup_file(&client.get_value(), &file).await;
            if notifications.report(&result, "File uploaded successfully.") {
                reset_upload();
                fetch();
            }
        });
    };

    let dispatcher = StoredValue::new_local(
        CommandDispatcher::<String>::new()
            .on(RowCommand::View, |path| open_in_new_tab(&api::view_url(&path)))
            .on(RowCommand::Delete, move |path: String| {
                if !confirm("Are you sure you want to delete this file?") {
                    return;
                }
                spawn_local(async move {
                    let result = api::delete_lookup_file(&client.get_value(), &path).await;
                    if notifications.report(&result, "File deleted successfully.") {
                        fetch();
                    }
                });
            })
            .on(RowCommand::Clone, move |path: String| {
                let Some(name) =
                    prompt("Enter a new name for the clone (leave blank to use default):")
                else {
                    return;
                };
                let request = CloneLookupRequest::new(&path, &name);
                spawn_local(async move {
                    let result = api::clone_lookup_file(&client.get_value(), &request).await;
                    if notifications.report(&result, "File cloned successfully.") {
                        fetch();
                    }
                });
            }),
    );

    let dispatch = move |command: RowCommand, path: String| {
        dispatcher.with_value(|d| {
            if let Err(e) = d.dispatch(command, path) {
                log::warn!("{}", e);
            }
        })
    };

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Lookups"</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| show_upload.set(true)>
                        {icon("upload")}
                        "Upload File"
                    </button>
                    <button class="button button--secondary" on:click=move |_| fetch()>
                        {icon("refresh")}
                        "Refresh"
                    </button>
                </div>
            </div>

            <div class="modal" class:is-active=move || show_upload.get()>
                <div class="modal-background" on:click=move |_| reset_upload()></div>
                <div class="modal-content">
                    <form on:submit=move |ev| {
                        ev.prevent_default();
                        upload();
                    }>
                        <label class="file-label">
                            <input
                                class="file-input"
                                type="file"
                                name="file"
                                accept=".sqlite3,.parquet,.csv,.json"
                                node_ref=file_input
                                on:change=move |_| chosen_name.set(selected_file().map(|f| f.name()))
                            />
                            <span class="file-name">
                                {move || chosen_name.get().unwrap_or_else(|| "No file chosen".to_string())}
                            </span>
                        </label>
                        <button type="submit" class="button button--primary">"Upload"</button>
                    </form>
                </div>
                <button class="modal-close" on:click=move |_| reset_upload()>{icon("x")}</button>
            </div>

            {move || state.with(|s| s.error.clone()).map(|e| view! {
                <div class="warning-box">
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div id="lookup-table" class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Filename"</th>
                            <th class="table__header-cell">"Filepath"</th>
                            <th class="table__header-cell">"Datetime Created"</th>
                            <th class="table__header-cell">"Last Updated"</th>
                            <th class="table__header-cell">"Filesize"</th>
                            <th class="table__header-cell">"File Permissions"</th>
                            <th class="table__header-cell">"Row Count"</th>
                            <th class="table__header-cell">"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || state.with(|s| s.items.iter().map(LookupFileRow::from).collect::<Vec<_>>())
                            .into_iter()
                            .map(|row| {
                                let actions = [RowCommand::View, RowCommand::Delete, RowCommand::Clone]
                                    .into_iter()
                                    .map(|command| {
                                        let path = row.filepath.clone();
                                        view! {
                                            <a
                                                href="#"
                                                class="table__action"
                                                on:click=move |ev| {
                                                    ev.prevent_default();
                                                    dispatch(command, path.clone());
                                                }
                                            >
                                                {command.label()}
                                            </a>
                                        }
                                    })
                                    .collect_view();
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell">{row.filename}</td>
                                        <td class="table__cell">{row.filepath}</td>
                                        <td class="table__cell">{row.created_at}</td>
                                        <td class="table__cell">{row.updated_at}</td>
                                        <td class="table__cell">{row.filesize}</td>
                                        <td class="table__cell">{row.permissions}</td>
                                        <td class="table__cell">{row.row_count}</td>
                                        <td class="table__cell table__cell--actions">{actions}</td>
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
        let file: LookupFile = serde_json::from_value(serde_json::json!({
            "filename": "geo.csv",
            "filepath": "lookups/geo.csv",
            "filesize": 2048,
            "permissions": "rw-r--r--",
            "row_count": 311
        }))
        .unwrap();
        let row = LookupFileRow::from(&file);
        assert_eq!(row.filesize, "2 KB");
        assert_eq!(row.row_count, "311");
        assert_eq!(row.created_at, "");
    }
}
