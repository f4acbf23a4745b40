//! Blocking browser dialogs and new-tab navigation.

/// `window.confirm`; an unavailable window counts as "cancel".
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// `window.prompt`; `None` when cancelled.
pub fn prompt(message: &str) -> Option<String> {
    web_sys::window()
        .and_then(|w| w.prompt_with_message(message).ok())
        .flatten()
}

pub fn open_in_new_tab(url: &str) {
    if let Some(w) = web_sys::window() {
        if let Err(e) = w.open_with_url_and_target(url, "_blank") {
            log::error!("opening {} failed: {:?}", url, e);
        }
    }
}
