use super::directory_tree::DirectoryTree;
use super::results_table::{PageRows, ResultsTable};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::notifications::NotificationService;
use crate::search::backend::{HttpSearchBackend, SearchBackend};
use crate::search::directory::{build_query_fragment, DirectoryBrowser};
use crate::search::exporter::{trigger_download, Exporter};
use crate::search::handoff::{SaveSearchDraft, SAVE_SEARCH_PAGE};
use crate::search::session::{QueryError, SessionController};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::ClientConfig;
use crate::shared::http::ApiClient;
use crate::shared::storage::BrowserStorage;
use contracts::search::{ExportFormat, ExportScope, QueryRequest};
use leptos::html::Textarea;
use leptos::prelude::*;
use leptos::task::spawn_local;

const SYNTAX_EXAMPLE: &str = r#"index="output_parquets/*"
(level="ERROR" OR level="CRITICAL") AND x>4
earliest="2024-01-04" latest="2024-01-05"
| eval test="test"
| eval t2="header_3"
| search header_1>= 400 AND header_2>= 500 AND (header_3 == "e" OR t2 == "that")"#;

/// Heights applied in order: reset, then fit the content.
fn editor_heights(scroll_height: i32) -> [String; 2] {
    ["auto".to_string(), format!("{}px", scroll_height)]
}

fn auto_expand(textarea: NodeRef<Textarea>) {
    let Some(el) = textarea.get_untracked() else {
        return;
    };
    // the DOM style declaration, not the reactive `style` attribute helper
    let style = web_sys::HtmlElement::style(&el);
    for height in editor_heights(el.scroll_height()) {
        if let Err(e) = style.set_property("height", &height) {
            log::warn!("Failed to resize query editor: {:?}", e);
            return;
        }
    }
}

#[component]
pub fn SearchPage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let config = use_context::<ClientConfig>().expect("ClientConfig not provided in context");
    let client = use_context::<ApiClient>().expect("ApiClient not provided in context");
    let notifications =
        use_context::<NotificationService>().expect("NotificationService not provided in context");

    let controller = RwSignal::new(SessionController::from_config(
        BrowserStorage,
        &config.search,
    ));
    let backend = StoredValue::new(HttpSearchBackend::new(client));
    let browser = RwSignal::new(DirectoryBrowser::new());
    let query_text = RwSignal::new(
        controller
            .with_untracked(|c| c.restore_query())
            .unwrap_or_default(),
    );
    let running = RwSignal::new(false);
    let export_scope = RwSignal::new(ExportScope::CurrentPage);
    let textarea = NodeRef::<Textarea>::new();

    Effect::new(move |_| {
        if textarea.get().is_some() {
            auto_expand(textarea);
        }
    });

    spawn_local(async move {
        let backend = backend.get_value();
        let fetched = DirectoryBrowser::fetch_tree(&backend).await;
        match browser.try_update(|b| b.apply_fetch(fetched)) {
            Some(Ok(())) | None => {}
            Some(Err(e)) => {
                log::error!("Error loading directory tree: {} ({})", e, e.detail());
                notifications.error("Error loading directory structure.");
            }
        }
    });

    let run_query = move || {
        let text = query_text.get_untracked();
        let Some(ticket) = controller.try_update(|c| c.begin_query(text)) else {
            return;
        };
        running.set(true);
        spawn_local(async move {
            let backend = backend.get_value();
            let outcome = backend.run_query(&QueryRequest::new(ticket.text())).await;
            let applied = controller.try_update(|c| {
                c.complete_query(ticket, outcome)
                    .map(|session| session.generation())
            });
            match applied {
                Some(Ok(generation)) => {
                    if controller.with_untracked(|c| c.latest_generation()) == generation {
                        running.set(false);
                    }
                    browser.update(|b| b.hide());
                    auto_expand(textarea);
                }
                Some(Err(QueryError::Api(e))) => {
                    running.set(false);
                    notifications.api_error(&e);
                }
                Some(Err(QueryError::Superseded { .. })) | None => {}
            }
        });
    };

    let save_search = move || {
        let text = query_text.get_untracked();
        match controller.with_untracked(|c| SaveSearchDraft::from_session(c.current(), &text)) {
            Ok(draft) => ctx.open_page_with(SAVE_SEARCH_PAGE, draft.to_params()),
            Err(e) => {
                notifications.api_error(&e);
            }
        }
    };

    let export = move |format: ExportFormat| {
        let scope = export_scope.get_untracked();
        let session = controller.with_untracked(|c| c.current().clone());
        spawn_local(async move {
            let backend = backend.get_value();
            match Exporter::new(&backend)
                .request_export(&session, scope, format)
                .await
            {
                Ok(artifact) => trigger_download(&artifact),
                Err(e) => {
                    notifications.error(format!("Save error: {}", e));
                }
            }
        });
    };

    let pick_file = Callback::new(move |path: String| match build_query_fragment(&path) {
        Ok(fragment) => {
            query_text.set(fragment);
            auto_expand(textarea);
        }
        Err(e) => {
            notifications.error(e.to_string());
        }
    });

    let has_session = Memo::new(move |_| controller.with(|c| !c.current().is_initial()));
    let current_page = Signal::derive(move || {
        controller.with(|c| c.current().pagination().current_page())
    });
    let window = Signal::derive(move || controller.with(|c| c.window()));
    let has_previous = Signal::derive(move || {
        controller.with(|c| c.pager().has_previous(c.current().pagination().current_page()))
    });
    let has_next = Signal::derive(move || {
        controller.with(|c| c.pager().has_next(c.current().pagination().current_page()))
    });
    let page_rows = Signal::derive(move || {
        controller.with(|c| {
            let session = c.current();
            let pager = c.pager();
            PageRows {
                columns: session.cache().columns().to_vec(),
                rows: pager
                    .page(session.pagination().current_page())
                    .iter()
                    .map(|row| session.cache().project(row))
                    .collect(),
            }
        })
    });
    let on_previous = Callback::new(move |_| {
        controller.update(|c| {
            c.previous_page();
        })
    });
    let on_next = Callback::new(move |_| {
        controller.update(|c| {
            c.next_page();
        })
    });

    let pagination = move || {
        view! {
            <PaginationControls
                current_page=current_page
                window=window
                has_previous=has_previous
                has_next=has_next
                on_previous=on_previous
                on_next=on_next
            />
        }
    };

    view! {
        <div class="page search-page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Search"</h1>
                </div>
                <div class="header__actions">
                    <button
                        id="tree-toggle"
                        class="button button--secondary"
                        on:click=move |_| browser.update(|b| b.toggle_visible())
                    >
                        {move || browser.with(|b| b.toggle_label())}
                    </button>
                </div>
            </div>

            <DirectoryTree browser=browser on_pick=pick_file />

            <form class="search-form" on:submit=move |ev| {
                ev.prevent_default();
                run_query();
            }>
                <textarea
                    id="query"
                    class="textarea query-box"
                    node_ref=textarea
                    prop:value=move || query_text.get()
                    on:input=move |ev| {
                        query_text.set(event_target_value(&ev));
                        auto_expand(textarea);
                    }
                ></textarea>
                <div class="search-form__actions">
                    <button type="submit" id="run-query-btn" class="button button--primary">
                        {move || if running.get() { "Running..." } else { "Run Query" }}
                    </button>
                    <button type="button" id="save-search-btn" class="button button--secondary" on:click=move |_| save_search()>
                        "Save Search"
                    </button>
                    <select
                        class="select export-scope"
                        on:change=move |ev| {
                            let scope = if event_target_value(&ev) == ExportScope::EntireResultSet.as_str() {
                                ExportScope::EntireResultSet
                            } else {
                                ExportScope::CurrentPage
                            };
                            export_scope.set(scope);
                        }
                    >
                        <option value={ExportScope::CurrentPage.as_str()} selected=true>"Current page"</option>
                        <option value={ExportScope::EntireResultSet.as_str()}>"Entire result set"</option>
                    </select>
                    {[ExportFormat::Csv, ExportFormat::Json].into_iter().map(|format| view! {
                        <button type="button" class="button button--secondary" on:click=move |_| export(format)>
                            {format!("Save as {}", format.label())}
                        </button>
                    }).collect_view()}
                </div>
            </form>

            <details class="syntax-help">
                <summary>"Syntax example"</summary>
                <pre id="syntax-example">{SYNTAX_EXAMPLE}</pre>
            </details>

            <Show when=move || has_session.get()>
                <div id="pagination-top">{pagination}</div>
                <ResultsTable page=page_rows />
                <div id="pagination-bottom">{pagination}</div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_resets_before_fitting() {
        assert_eq!(editor_heights(148), ["auto".to_string(), "148px".to_string()]);
    }
}
