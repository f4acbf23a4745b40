use super::view_model::{FormTarget, SavedSearchDetailsViewModel};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::notifications::NotificationService;
use crate::search::handoff::SaveSearchDraft;
use crate::shared::components::form_field::{checkbox_field, text_area, text_field, yes_no_select};
use crate::shared::http::ApiClient;
use crate::shared::icons::icon;
use contracts::domain::a001_saved_search::aggregate::Trigger;
use leptos::prelude::*;

/// Create form reached from the search page's "Save Search" button.
#[component]
#[allow(non_snake_case)]
pub fn SaveSearchPage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let notifications =
        use_context::<NotificationService>().expect("NotificationService not provided in context");

    match ctx.params.with_untracked(SaveSearchDraft::from_params) {
        Ok(draft) => {
            let vm = SavedSearchDetailsViewModel::for_draft(&draft, notifications);
            view! { <SavedSearchForm vm=vm back_to="search" /> }.into_any()
        }
        Err(e) => view! {
            <div class="page">
                <div class="warning-box">
                    <span class="warning-box__text">{e.to_string()}</span>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
#[allow(non_snake_case)]
pub fn SavedSearchDetails(target: FormTarget) -> impl IntoView {
    let notifications =
        use_context::<NotificationService>().expect("NotificationService not provided in context");
    let vm = SavedSearchDetailsViewModel::new(target, notifications);
    view! { <SavedSearchForm vm=vm back_to="saved_searches" /> }
}

#[component]
#[allow(non_snake_case)]
fn SavedSearchForm(vm: SavedSearchDetailsViewModel, back_to: &'static str) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let client = StoredValue::new(
        use_context::<ApiClient>().expect("ApiClient not provided in context"),
    );
    let notifications =
        use_context::<NotificationService>().expect("NotificationService not provided in context");

    vm.load_if_needed(client.get_value());

    let on_saved = Callback::new(move |message: String| {
        notifications.success(message);
        ctx.open_page("saved_searches");
    });
    let form = vm.form;

    view! {
        <div class="details-container saved-search-details">
            <div class="details-header">
                <h3>{if vm.is_edit_mode() { "Edit Saved Search" } else { "Save Search" }}</h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                {text_field("Title", "title",
                    move || form.with(|f| f.title.clone()),
                    move |v| form.update(|f| f.title = v))}
                {text_area("Description", "description", "2",
                    move || form.with(|f| f.description.clone()),
                    move |v| form.update(|f| f.description = v))}
                {text_area("Query", "query", "4",
                    move || form.with(|f| f.query.clone()),
                    move |v| form.update(|f| f.query = v))}
                {text_field("Cron Schedule", "cron_schedule",
                    move || form.with(|f| f.cron_schedule.clone()),
                    move |v| form.update(|f| f.cron_schedule = v))}

                <div class="form-group">
                    <label for="trigger">"Trigger"</label>
                    <select
                        id="trigger"
                        class="select"
                        on:change=move |ev| {
                            if let Some(trigger) = Trigger::from_label(&event_target_value(&ev)) {
                                form.update(|f| f.trigger = trigger);
                            }
                        }
                    >
                        {Trigger::ALL.into_iter().map(|trigger| view! {
                            <option
                                value={trigger.label()}
                                prop:selected=move || form.with(|f| f.trigger == trigger)
                            >
                                {trigger.label()}
                            </option>
                        }).collect_view()}
                    </select>
                </div>

                {text_field("Lookback", "lookback",
                    move || form.with(|f| f.lookback.clone()),
                    move |v| form.update(|f| f.lookback = v))}
                {text_area("Event Message", "event_message", "2",
                    move || form.with(|f| f.event_message.clone()),
                    move |v| form.update(|f| f.event_message = v))}

                {yes_no_select("Throttle", "throttle",
                    move || form.with(|f| f.throttle),
                    move |v| vm.set_throttle(v))}
                <Show when=move || form.with(|f| f.throttle.is_yes())>
                    {text_field("Throttle Time Period", "throttle_time_period",
                        move || form.with(|f| f.throttle_time_period.clone()),
                        move |v| form.update(|f| f.throttle_time_period = v))}
                    {text_field("Throttle By", "throttle_by",
                        move || form.with(|f| f.throttle_by.clone()),
                        move |v| form.update(|f| f.throttle_by = v))}
                </Show>

                {yes_no_select("Send Email", "send_email",
                    move || form.with(|f| f.send_email),
                    move |v| vm.set_send_email(v))}
                <Show when=move || form.with(|f| f.send_email.is_yes())>
                    {text_field("Email Address", "email_address",
                        move || form.with(|f| f.email_address.clone()),
                        move |v| form.update(|f| f.email_address = v))}
                    {text_area("Email Content", "email_content", "3",
                        move || form.with(|f| f.email_content.clone()),
                        move |v| form.update(|f| f.email_content = v))}
                </Show>

                {checkbox_field("Disabled", "disabled",
                    move || form.with(|f| f.disabled),
                    move |v| form.update(|f| f.disabled = v))}
            </div>

            <div class="details-actions">
                <button
                    class="button button--primary"
                    disabled=move || vm.busy.get()
                    on:click=move |_| vm.save_command(client.get_value(), on_saved)
                >
                    {icon("save")}
                    {if vm.is_edit_mode() { "Update" } else { "Save" }}
                </button>
                <button class="button button--secondary" on:click=move |_| ctx.open_page(back_to)>
                    {icon("x")}
                    "Cancel"
                </button>
            </div>
        </div>
    }
}
