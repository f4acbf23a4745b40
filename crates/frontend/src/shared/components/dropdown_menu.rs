use crate::shared::commands::RowCommand;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub command: RowCommand,
    pub label: String,
    pub danger: bool,
}

impl MenuItem {
    pub fn new(command: RowCommand) -> Self {
        Self {
            command,
            label: command.label().to_string(),
            danger: command == RowCommand::Delete,
        }
    }

    pub fn labelled(command: RowCommand, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::new(command)
        }
    }
}

/// Row action menu. Picking an item closes the menu and reports the command.
#[component]
pub fn DropdownMenu(
    items: Vec<MenuItem>,
    on_select: Callback<RowCommand>,
    #[prop(optional, into)] label: Option<String>,
) -> impl IntoView {
    let open = RwSignal::new(false);
    let label = label.unwrap_or_else(|| "Edit".to_string());

    view! {
        <div class="dropdown" class:is-active=move || open.get()>
            <div class="dropdown-trigger">
                <button
                    class="button"
                    aria-haspopup="true"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        open.update(|o| *o = !*o);
                    }
                >
                    <span>{label}</span>
                    {icon("chevron-down")}
                </button>
            </div>
            <Show when=move || open.get()>
                <div class="dropdown-overlay" on:click=move |_| open.set(false)></div>
            </Show>
            <div class="dropdown-menu" role="menu">
                <div class="dropdown-content">
                    {items.into_iter().map(|item| {
                        let command = item.command;
                        view! {
                            <a
                                href="#"
                                class="dropdown-item"
                                class:has-text-danger={item.danger}
                                on:click=move |ev| {
                                    ev.prevent_default();
                                    ev.stop_propagation();
                                    open.set(false);
                                    on_select.run(command);
                                }
                            >
                                {item.label}
                            </a>
                        }
                    }).collect_view()}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_defaults() {
        let delete = MenuItem::new(RowCommand::Delete);
        assert_eq!(delete.label, "Delete");
        assert!(delete.danger);
        let toggle = MenuItem::labelled(RowCommand::ToggleDisable, "Enable");
        assert_eq!(toggle.label, "Enable");
        assert!(!toggle.danger);
    }
}
