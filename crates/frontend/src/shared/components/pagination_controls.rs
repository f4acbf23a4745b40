use crate::search::pager::PageWindow;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// "Page: N (Entries: a-b)" for a 1-based page.
pub fn page_caption(page: usize, window: &PageWindow) -> String {
    format!(
        "Page: {} (Entries: {}-{})",
        page, window.start_entry, window.end_entry
    )
}

/// PaginationControls component - previous/next over the query session
#[component]
pub fn PaginationControls(
    /// Current page (1-indexed)
    #[prop(into)]
    current_page: Signal<usize>,

    #[prop(into)]
    window: Signal<PageWindow>,

    #[prop(into)]
    has_previous: Signal<bool>,

    #[prop(into)]
    has_next: Signal<bool>,

    on_previous: Callback<()>,

    on_next: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_previous.run(())
                disabled=move || !has_previous.get()
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || window.with(|w| page_caption(current_page.get(), w))}
            </span>
            <span class="pagination-total">
                {move || format!("Total Results: {}", window.get().total_rows)}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_next.run(())
                disabled=move || !has_next.get()
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_caption() {
        let window = PageWindow {
            start_entry: 201,
            end_entry: 250,
            total_rows: 250,
        };
        assert_eq!(page_caption(3, &window), "Page: 3 (Entries: 201-250)");
    }
}
