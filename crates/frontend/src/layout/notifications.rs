//! Transient, dismissible notifications.

use crate::shared::error::ApiError;
use crate::shared::icons::icon;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl NotificationKind {
    fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Info => "notification is-info",
            NotificationKind::Success => "notification is-primary",
            NotificationKind::Error => "notification is-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub kind: NotificationKind,
}

/// Shared through context; every action reports its outcome here.
#[derive(Clone, Copy)]
pub struct NotificationService {
    items: RwSignal<Vec<Notification>>,
    timeout_ms: u32,
}

impl NotificationService {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            timeout_ms,
        }
    }

    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> Uuid {
        let notification = Notification {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
        };
        let id = notification.id;
        if kind == NotificationKind::Error {
            log::error!("{}", notification.message);
        }
        self.items.update(|items| items.push(notification));

        if self.timeout_ms > 0 {
            let this = *self;
            Timeout::new(self.timeout_ms, move || this.dismiss(id)).forget();
        }
        id
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.notify(message, NotificationKind::Error)
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.notify(message, NotificationKind::Success)
    }

    pub fn info(&self, message: impl Into<String>) -> Uuid {
        self.notify(message, NotificationKind::Info)
    }

    pub fn api_error(&self, error: &ApiError) -> Uuid {
        log::debug!("{:?}: {}", error.kind(), error.detail());
        self.error(error.to_string())
    }

    /// Report the outcome of a row action. Returns whether it succeeded.
    pub fn report<T>(&self, result: &Result<T, ApiError>, success: &str) -> bool {
        match result {
            Ok(_) => {
                self.success(success);
                true
            }
            Err(e) => {
                self.api_error(e);
                false
            }
        }
    }

    pub fn dismiss(&self, id: Uuid) {
        // the signal may already be disposed when a timeout fires late
        let _ = self.items.try_update(|items| items.retain(|n| n.id != id));
    }

    pub fn clear_all(&self) {
        self.items.set(Vec::new());
    }

    pub fn items(&self) -> Signal<Vec<Notification>> {
        self.items.into()
    }
}

#[component]
pub fn NotificationHost() -> impl IntoView {
    let service =
        use_context::<NotificationService>().expect("NotificationService not provided in context");
    let items = service.items();

    view! {
        <div id="notification-container" class="notification-container">
            <For
                each=move || items.get()
                key=|n| n.id
                children=move |n: Notification| {
                    let id = n.id;
                    view! {
                        <div class={n.kind.css_class()}>
                            <button class="delete" on:click=move |_| service.dismiss(id)>
                                {icon("x")}
                            </button>
                            {n.message}
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_and_dismiss() {
        let owner = Owner::new();
        owner.with(|| {
            let service = NotificationService::new(0);
            let first = service.error("Server Error: boom");
            service.success("Search deleted successfully.");
            let items = service.items().get_untracked();
            assert_eq!(items.len(), 2);
            assert_eq!(items[0].kind, NotificationKind::Error);

            service.dismiss(first);
            let items = service.items().get_untracked();
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].message, "Search deleted successfully.");

            service.clear_all();
            assert!(service.items().get_untracked().is_empty());
        });
    }

    #[test]
    fn test_api_error_uses_display_text() {
        let owner = Owner::new();
        owner.with(|| {
            let service = NotificationService::new(0);
            service.api_error(&ApiError::Transport("Failed to fetch".into()));
            assert_eq!(
                service.items().get_untracked()[0].message,
                "Network Error: Please check your connection."
            );
        });
    }
}
