use crate::domain::a001_saved_search::api;
use crate::layout::notifications::NotificationService;
use crate::search::handoff::SaveSearchDraft;
use crate::shared::error::ApiError;
use crate::shared::http::ApiClient;
use contracts::domain::a001_saved_search::aggregate::{CommitSavedSearchRequest, SavedSearchDto};
use contracts::shared::choice::YesNo;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Which record the form writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormTarget {
    /// New search for the query result identified by `request_id`.
    Create { request_id: String },
    Edit { id: String },
}

/// Second step of the create flow: a taken title or a failed check stops the
/// commit before the remaining fields are validated.
pub fn commit_request(
    request_id: &str,
    form: &SavedSearchDto,
    title_check: Result<bool, ApiError>,
) -> Result<CommitSavedSearchRequest, String> {
    match title_check {
        Err(e) => {
            log::error!("Failed to validate the title uniqueness: {}", e);
            return Err("Failed to validate the title uniqueness.".to_string());
        }
        Ok(false) => return Err(api::title_taken_message(&form.title)),
        Ok(true) => {}
    }
    form.validate()?;
    Ok(CommitSavedSearchRequest {
        request_id: request_id.to_string(),
        search: form.clone(),
    })
}

/// ViewModel for the saved search create/edit form
#[derive(Clone, Copy)]
pub struct SavedSearchDetailsViewModel {
    pub form: RwSignal<SavedSearchDto>,
    pub error: RwSignal<Option<String>>,
    pub busy: RwSignal<bool>,
    target: StoredValue<FormTarget>,
    notifications: NotificationService,
}

impl SavedSearchDetailsViewModel {
    pub fn new(target: FormTarget, notifications: NotificationService) -> Self {
        Self {
            form: RwSignal::new(SavedSearchDto::default()),
            error: RwSignal::new(None),
            busy: RwSignal::new(false),
            target: StoredValue::new(target),
            notifications,
        }
    }

    pub fn for_draft(draft: &SaveSearchDraft, notifications: NotificationService) -> Self {
        let vm = Self::new(
            FormTarget::Create {
                request_id: draft.request_id.clone(),
            },
            notifications,
        );
        vm.form.update(|f| f.query = draft.saved_query.clone());
        vm
    }

    pub fn is_edit_mode(&self) -> bool {
        self.target
            .with_value(|t| matches!(t, FormTarget::Edit { .. }))
    }

    pub fn set_throttle(&self, value: YesNo) {
        self.form.update(|f| {
            f.throttle = value;
            if !value.is_yes() {
                f.throttle_by.clear();
                f.throttle_time_period.clear();
            }
        });
    }

    pub fn set_send_email(&self, value: YesNo) {
        self.form.update(|f| {
            f.send_email = value;
            if !value.is_yes() {
                f.email_address.clear();
                f.email_content.clear();
            }
        });
    }

    fn fail(&self, message: String) {
        self.notifications.error(message.clone());
        self.error.set(Some(message));
        self.busy.set(false);
    }

    /// Load the stored search when editing.
    pub fn load_if_needed(&self, client: ApiClient) {
        let Some(id) = self.target.with_value(|t| match t {
            FormTarget::Edit { id } => Some(id.clone()),
            FormTarget::Create { .. } => None,
        }) else {
            return;
        };
        let this = *self;
        this.busy.set(true);
        spawn_local(async move {
            match api::fetch_saved_search(&client, &id).await {
                Ok(search) => {
                    this.form.set(search.normalized());
                    this.busy.set(false);
                }
                Err(e) => this.fail(format!("Error loading saved search: {}", e)),
            }
        });
    }

    /// Validate and submit; `on_saved` receives the backend's message.
    pub fn save_command(&self, client: ApiClient, on_saved: Callback<String>) {
        let form = self.form.get_untracked().normalized();
        self.error.set(None);
        let this = *self;
        match self.target.get_value() {
            FormTarget::Create { request_id } => {
                if let Err(msg) = form.validate_title() {
                    this.fail(msg);
                    return;
                }
                this.busy.set(true);
                spawn_local(async move {
                    let title_check = api::check_title_unique(&client, &form.title).await;
                    let request = match commit_request(&request_id, &form, title_check) {
                        Ok(request) => request,
                        Err(msg) => return this.fail(msg),
                    };
                    match api::commit_saved_search(&client, &request).await {
                        Ok(message) => {
                            this.busy.set(false);
                            on_saved.run(message);
                        }
                        Err(e) => this.fail(e.to_string()),
                    }
                });
            }
            FormTarget::Edit { id } => {
                if let Err(msg) = form.validate_update() {
                    this.fail(msg);
                    return;
                }
                this.busy.set(true);
                spawn_local(async move {
                    match api::update_saved_search(&client, &id, &form).await {
                        Ok(message) => {
                            this.busy.set(false);
                            on_saved.run(message);
                        }
                        Err(e) => this.fail(e.to_string()),
                    }
                });
            }
        }
    }
}
