use crate::domain::a002_scheduled_input::api;
use crate::layout::notifications::NotificationService;
use crate::shared::error::ApiError;
use crate::shared::http::ApiClient;
use contracts::domain::a002_scheduled_input::aggregate::ScheduledInputDto;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormTarget {
    Create,
    Edit { id: String },
}

/// Result of a helper call shown beside the form: the script summary or
/// the sample API data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Preview {
    #[default]
    Hidden,
    Loading,
    Ready(String),
}

impl Preview {
    pub fn from_result(result: Result<String, ApiError>, context: &str) -> (Self, Option<String>) {
        match result {
            Ok(text) => (Preview::Ready(text), None),
            Err(ApiError::State(msg)) => (Preview::Hidden, Some(msg)),
            Err(e) => (Preview::Hidden, Some(format!("{}: {}", context, e))),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Preview::Ready(text) => Some(text),
            _ => None,
        }
    }
}

/// ViewModel for the scheduled input create/edit form
#[derive(Clone, Copy)]
pub struct ScheduledInputDetailsViewModel {
    pub form: RwSignal<ScheduledInputDto>,
    pub api_url: RwSignal<String>,
    pub summary: RwSignal<Preview>,
    pub sample: RwSignal<Preview>,
    pub error: RwSignal<Option<String>>,
    pub busy: RwSignal<bool>,
    target: StoredValue<FormTarget>,
    notifications: NotificationService,
}

impl ScheduledInputDetailsViewModel {
    pub fn new(target: FormTarget, notifications: NotificationService) -> Self {
        Self {
            form: RwSignal::new(ScheduledInputDto::default()),
            api_url: RwSignal::new(String::new()),
            summary: RwSignal::new(Preview::Hidden),
            sample: RwSignal::new(Preview::Hidden),
            error: RwSignal::new(None),
            busy: RwSignal::new(false),
            target: StoredValue::new(target),
            notifications,
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.target
            .with_value(|t| matches!(t, FormTarget::Edit { .. }))
    }

    fn fail(&self, message: String) {
        self.notifications.error(message.clone());
        self.error.set(Some(message));
        self.busy.set(false);
    }

    /// Check the form for the current mode without sending anything.
    pub fn check(&self) -> Result<ScheduledInputDto, String> {
        let form = self.form.get_untracked().normalized();
        if self.is_edit_mode() {
            form.validate_update()?;
        } else {
            form.validate()?;
        }
        Ok(form)
    }

    pub fn load_if_needed(&self, client: ApiClient) {
        let Some(id) = self.target.with_value(|t| match t {
            FormTarget::Edit { id } => Some(id.clone()),
            FormTarget::Create => None,
        }) else {
            return;
        };
        let this = *self;
        this.busy.set(true);
        spawn_local(async move {
            match api::fetch_scheduled_input(&client, &id).await {
                Ok(input) => {
                    this.form.set(input);
                    this.busy.set(false);
                }
                Err(e) => this.fail(format!("Error loading scheduled input: {}", e)),
            }
        });
    }

    pub fn save_command(&self, client: ApiClient, on_saved: Callback<()>) {
        self.error.set(None);
        let form = match self.check() {
            Ok(form) => form,
            Err(msg) => return self.fail(msg),
        };
        let target = self.target.get_value();
        let this = *self;
        this.busy.set(true);
        spawn_local(async move {
            let result = match &target {
                FormTarget::Create => api::commit_scheduled_input(&client, &form).await,
                FormTarget::Edit { id } => api::update_scheduled_input(&client, id, &form).await,
            };
            match result {
                Ok(()) => {
                    this.busy.set(false);
                    on_saved.run(());
                }
                Err(e) => this.fail(e.to_string()),
            }
        });
    }

    /// Run the code once on the backend and show its summary.
    pub fn test_script_command(&self, client: ApiClient) {
        let code = self.form.with_untracked(|f| f.code.clone());
        let this = *self;
        this.summary.set(Preview::Loading);
        spawn_local(async move {
            let result = api::test_scheduled_input(&client, &code).await;
            this.show(this.summary, result, "Error testing script");
        });
    }

    pub fn populate_sample_command(&self, client: ApiClient) {
        let url = self.api_url.get_untracked();
        let this = *self;
        this.sample.set(Preview::Loading);
        spawn_local(async move {
            let result = api::fetch_api_data(&client, &url).await;
            this.show(this.sample, result, "Error fetching API data");
        });
    }

    fn show(&self, pane: RwSignal<Preview>, result: Result<String, ApiError>, context: &str) {
        let (preview, error) = Preview::from_result(result, context);
        pane.set(preview);
        if let Some(msg) = error {
            self.notifications.error(msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::choice::YesNo;

    fn form() -> ScheduledInputDto {
        ScheduledInputDto {
            title: "Weather".into(),
            code: "df = FETCH_API_DATA(url)".into(),
            cron_schedule: "0 * * * *".into(),
            overwrite: YesNo::Yes,
            ..Default::default()
        }
    }

    #[test]
    fn test_preview_from_result() {
        assert_eq!(
            Preview::from_result(Ok("3 rows".into()), "Error testing script"),
            (Preview::Ready("3 rows".into()), None)
        );
        assert_eq!(
            Preview::from_result(Err(ApiError::Server("NameError".into())), "Error testing script"),
            (Preview::Hidden, Some("Error testing script: NameError".into()))
        );
        let (pane, msg) = Preview::from_result(
            Err(ApiError::State("Please enter an API URL.".into())),
            "Error fetching API data",
        );
        assert_eq!(pane.text(), None);
        assert_eq!(msg.as_deref(), Some("Please enter an API URL."));
    }

    #[test]
    fn test_check_depends_on_mode() {
        let owner = Owner::new();
        owner.with(|| {
            let notifications = NotificationService::new(0);
            let create = ScheduledInputDetailsViewModel::new(FormTarget::Create, notifications);
            assert!(!create.is_edit_mode());
            create.form.set(form());
            assert_eq!(create.check().unwrap().title, "Weather");

            let edit = ScheduledInputDetailsViewModel::new(
                FormTarget::Edit { id: "7".into() },
                notifications,
            );
            assert!(edit.is_edit_mode());
            edit.form.set(form());
            assert_eq!(edit.check().unwrap_err(), "Please fill in all required fields.");
            edit.form.update(|f| {
                f.description = "hourly weather".into();
                f.subdirectory = "weather".into();
            });
            assert!(edit.check().is_ok());
        });
    }

    #[test]
    fn test_invalid_form_is_reported_without_saving() {
        let owner = Owner::new();
        owner.with(|| {
            let notifications = NotificationService::new(0);
            let vm = ScheduledInputDetailsViewModel::new(FormTarget::Create, notifications);
            vm.form.set(ScheduledInputDto {
                cron_schedule: "0 * * * ?".into(),
                ..form()
            });
            vm.save_command(ApiClient::new(""), Callback::new(|_: ()| {}));
            assert_eq!(vm.error.get_untracked().as_deref(), Some("Invalid cron schedule format."));
            assert!(!vm.busy.get_untracked());
            assert_eq!(notifications.items().get_untracked().len(), 1);
        });
    }
}
