use crate::search::directory::{folder_key, DirectoryBrowser};
use crate::shared::icons::icon;
use contracts::search::DirectoryNode;
use leptos::prelude::*;

/// Index tree; clicking a file reports its path through `on_pick`.
#[component]
pub fn DirectoryTree(
    browser: RwSignal<DirectoryBrowser>,
    on_pick: Callback<String>,
) -> impl IntoView {
    let tree = Memo::new(move |_| browser.with(|b| b.tree().cloned()));

    view! {
        <div id="directory-tree" class="directory-tree" class:hidden=move || !browser.with(|b| b.is_visible())>
            {move || match tree.get() {
                Some(tree) if !tree.is_empty() => render_node(tree, String::new(), browser, on_pick),
                Some(_) => view! { <p class="directory-tree__empty">"No files found."</p> }.into_any(),
                None => view! { <p class="directory-tree__empty">"Loading..."</p> }.into_any(),
            }}
        </div>
    }
}

fn render_node(
    node: DirectoryNode,
    parent: String,
    browser: RwSignal<DirectoryBrowser>,
    on_pick: Callback<String>,
) -> AnyView {
    let files = node.files.into_iter().map(|file| {
        let path = file.path.clone();
        view! {
            <li>
                <a
                    href="#"
                    class="file-link"
                    title={file.path.clone()}
                    on:click=move |ev| {
                        ev.prevent_default();
                        on_pick.run(path.clone());
                    }
                >
                    {icon("file")}
                    <span>{file.name}</span>
                </a>
            </li>
        }
    });

    let folders = node.subdirectories.into_iter().map(|(name, child)| {
        let key = folder_key(&parent, &name);
        let toggle_key = key.clone();
        let open_key = key.clone();
        let is_open = Memo::new(move |_| browser.with(|b| b.is_expanded(&open_key)));
        view! {
            <li>
                <div
                    class="directory-tree__folder"
                    on:click=move |_| browser.update(|b| b.toggle_folder(&toggle_key))
                >
                    {move || if is_open.get() { icon("folder-open") } else { icon("folder-closed") }}
                    <span>{name}</span>
                </div>
                {move || is_open.get().then(|| render_node(child.clone(), key.clone(), browser, on_pick))}
            </li>
        }
    });

    view! {
        <ul>
            {files.collect_view()}
            {folders.collect_view()}
        </ul>
    }
    .into_any()
}
