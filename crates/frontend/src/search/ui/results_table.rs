use leptos::prelude::*;

/// Projected rows of the active page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRows {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[component]
pub fn ResultsTable(#[prop(into)] page: Signal<PageRows>) -> impl IntoView {
    view! {
        <div class="table">
            <table class="table__data table--striped">
                <thead class="table__head">
                    <tr>
                        {move || page.with(|p| p.columns.iter().map(|c| view! {
                            <th class="table__header-cell">{c.clone()}</th>
                        }).collect_view())}
                    </tr>
                </thead>
                <tbody>
                    {move || page.with(|p| p.rows.iter().map(|cells| view! {
                        <tr class="table__row">
                            {cells.iter().map(|cell| view! {
                                <td class="table__cell">{cell.clone()}</td>
                            }).collect_view()}
                        </tr>
                    }).collect_view())}
                </tbody>
            </table>
        </div>
    }
}
