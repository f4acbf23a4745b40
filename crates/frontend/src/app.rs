use crate::layout::global_context::AppGlobalContext;
use crate::layout::notifications::NotificationService;
use crate::routes::routes::AppRoutes;
use crate::shared::config::ClientConfig;
use crate::shared::http::ApiClient;
use leptos::prelude::*;

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    provide_context(AppGlobalContext::new());
    provide_context(NotificationService::new(config.notifications.timeout_ms));
    provide_context(ApiClient::new(config.api.base_url.clone()));
    provide_context(config);

    view! {
        <AppRoutes />
    }
}
