use crate::layout::global_context::{AppGlobalContext, PAGES};
use crate::shared::icons;
use leptos::prelude::*;

fn icon_for(key: &str) -> AnyView {
    let name = match key {
        "search" => "search",
        "saved_searches" => "bookmark",
        "scheduled_inputs" => "clock",
        "lookups" => "table",
        "history" => "history",
        _ => "",
    };
    icons::icon(name)
}

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    view! {
        <nav class="main-nav-bar">
            <ul>
                {PAGES.into_iter().map(|(key, title)| {
                    view! {
                        <li
                            class:is-active=move || ctx.active.get() == key
                            on:click=move |_| ctx.open_page(key)
                        >
                            {icon_for(key)}
                            <span>{title}</span>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </nav>
    }
}
