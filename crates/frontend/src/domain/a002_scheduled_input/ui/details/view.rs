use super::view_model::{FormTarget, Preview, ScheduledInputDetailsViewModel};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::notifications::NotificationService;
use crate::shared::components::form_field::{checkbox_field, text_area, text_field, yes_no_select};
use crate::shared::http::ApiClient;
use crate::shared::icons::icon;
use leptos::prelude::*;

fn preview_pane(label: &'static str, pane: RwSignal<Preview>) -> impl IntoView {
    move || match pane.get() {
        Preview::Hidden => None,
        Preview::Loading => Some(view! { <div class="preview preview--loading">"Loading..."</div> }.into_any()),
        Preview::Ready(text) => Some(
            view! {
                <div class="preview">
                    <label class="label">{label}</label>
                    <pre class="json-display">{text}</pre>
                </div>
            }
            .into_any(),
        ),
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ScheduledInputDetails(target: FormTarget) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let client = StoredValue::new(
        use_context::<ApiClient>().expect("ApiClient not provided in context"),
    );
    let notifications =
        use_context::<NotificationService>().expect("NotificationService not provided in context");

    let vm = ScheduledInputDetailsViewModel::new(target, notifications);
    vm.load_if_needed(client.get_value());

    let on_saved = Callback::new(move |_: ()| {
        notifications.success(if vm.is_edit_mode() {
            "Scheduled input updated successfully."
        } else {
            "Scheduled input saved successfully."
        });
        ctx.open_page("scheduled_inputs");
    });
    let form = vm.form;

    view! {
        <div class="details-container scheduled-input-details">
            <div class="details-header">
                <h3>{if vm.is_edit_mode() { "Edit Scheduled Input" } else { "New Scheduled Input" }}</h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-columns">
                <div class="details-form">
                    {text_field("Title", "title",
                        move || form.with(|f| f.title.clone()),
                        move |v| form.update(|f| f.title = v))}
                    {text_area("Description", "description", "2",
                        move || form.with(|f| f.description.clone()),
                        move |v| form.update(|f| f.description = v))}
                    {text_area("Code", "code", "12",
                        move || form.with(|f| f.code.clone()),
                        move |v| form.update(|f| f.code = v))}
                    {text_field("Cron Schedule", "cron_schedule",
                        move || form.with(|f| f.cron_schedule.clone()),
                        move |v| form.update(|f| f.cron_schedule = v))}
                    {yes_no_select("Overwrite", "overwrite",
                        move || form.with(|f| f.overwrite),
                        move |v| form.update(|f| f.overwrite = v))}
                    {text_field("Subdirectory", "subdirectory",
                        move || form.with(|f| f.subdirectory.clone()),
                        move |v| form.update(|f| f.subdirectory = v))}
                    {checkbox_field("Disabled", "disabled",
                        move || form.with(|f| f.disabled),
                        move |v| form.update(|f| f.disabled = v))}

                    <Show when=move || !vm.is_edit_mode()>
                        {text_field("API URL", "api_url",
                            move || vm.api_url.get(),
                            move |v| vm.api_url.set(v))}
                    </Show>
                </div>

                <div class="details-preview">
                    {preview_pane("DataFrame Summary", vm.summary)}
                    {preview_pane("Sample API Data", vm.sample)}
                </div>
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
                <Show when=move || !vm.is_edit_mode()>
                    <button class="button button--secondary" on:click=move |_| vm.test_script_command(client.get_value())>
                        "Test Script"
                    </button>
                    <button class="button button--secondary" on:click=move |_| vm.populate_sample_command(client.get_value())>
                        "Populate Sample Data"
                    </button>
                </Show>
                <button class="button button--secondary" on:click=move |_| ctx.open_page("scheduled_inputs")>
                    {icon("x")}
                    "Cancel"
                </button>
            </div>
        </div>
    }
}
