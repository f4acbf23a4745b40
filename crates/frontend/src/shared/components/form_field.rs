//! Labelled inputs shared by the collection forms.

use contracts::shared::choice::YesNo;
use leptos::prelude::*;

pub fn text_field(
    label: &'static str,
    id: &'static str,
    value: impl Fn() -> String + Send + Sync + 'static,
    on_input: impl Fn(String) + Send + Sync + 'static,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <input
                type="text"
                id=id
                class="input"
                prop:value=value
                on:input=move |ev| on_input(event_target_value(&ev))
            />
        </div>
    }
}

pub fn text_area(
    label: &'static str,
    id: &'static str,
    rows: &'static str,
    value: impl Fn() -> String + Send + Sync + 'static,
    on_input: impl Fn(String) + Send + Sync + 'static,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <textarea
                id=id
                class="textarea"
                rows=rows
                prop:value=value
                on:input=move |ev| on_input(event_target_value(&ev))
            ></textarea>
        </div>
    }
}

pub fn yes_no_select(
    label: &'static str,
    id: &'static str,
    value: impl Fn() -> YesNo + Copy + Send + Sync + 'static,
    on_change: impl Fn(YesNo) + Send + Sync + 'static,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <select
                id=id
                class="select"
                on:change=move |ev| on_change(YesNo::from_select(&event_target_value(&ev)))
            >
                {[YesNo::Yes, YesNo::No].into_iter().map(move |choice| view! {
                    <option value={choice.as_str()} prop:selected=move || value() == choice>
                        {choice.label()}
                    </option>
                }).collect_view()}
            </select>
        </div>
    }
}

pub fn checkbox_field(
    label: &'static str,
    id: &'static str,
    checked: impl Fn() -> bool + Send + Sync + 'static,
    on_change: impl Fn(bool) + Send + Sync + 'static,
) -> impl IntoView {
    view! {
        <div class="form-group form-group--checkbox">
            <label class="checkbox" for=id>
                <input
                    type="checkbox"
                    id=id
                    prop:checked=checked
                    on:change=move |ev| on_change(event_target_checked(&ev))
                />
                {label}
            </label>
        </div>
    }
}
