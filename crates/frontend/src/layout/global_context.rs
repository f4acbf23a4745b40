use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::BTreeMap;
use web_sys::window;

/// Pages reachable from the navigation bar, as `(key, title)`.
pub const PAGES: [(&str, &str); 5] = [
    ("search", "Search"),
    ("saved_searches", "Saved Searches"),
    ("scheduled_inputs", "Scheduled Inputs"),
    ("lookups", "Lookups"),
    ("history", "History"),
];

/// Form pages, opened from other pages rather than from the navigation bar.
pub const FORM_PAGES: [(&str, &str); 4] = [
    ("save_search", "Save Search"),
    ("edit_saved_search", "Edit Saved Search"),
    ("new_scheduled_input", "New Scheduled Input"),
    ("edit_scheduled_input", "Edit Scheduled Input"),
];

pub const DEFAULT_PAGE: &str = "search";

/// Query-string key of the active page.
const ACTIVE_PARAM: &str = "active";

pub fn page_title(key: &str) -> Option<&'static str> {
    PAGES
        .iter()
        .chain(FORM_PAGES.iter())
        .find(|(k, _)| *k == key)
        .map(|(_, title)| *title)
}

pub type PageParams = BTreeMap<String, String>;

/// Build page parameters from `(name, value)` pairs.
pub fn page_params<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> PageParams
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Query string for a page and its parameters, e.g. `?active=edit_saved_search&id=4`.
pub fn page_query(key: &str, params: &PageParams) -> String {
    let mut all = params.clone();
    all.insert(ACTIVE_PARAM.to_string(), key.to_string());
    format!("?{}", serde_qs::to_string(&all).unwrap_or_default())
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<String>,
    /// Parameters of the active page (record id, prefilled values).
    pub params: RwSignal<PageParams>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(DEFAULT_PAGE.to_string()),
            params: RwSignal::new(PageParams::new()),
            left_open: RwSignal::new(true),
        }
    }

    /// Select the page named by `?active=` and keep the URL in sync with the
    /// active page afterwards.
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let mut params: PageParams =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(active_key) = params.remove(ACTIVE_PARAM) {
            self.open_page_with(&active_key, params);
        }

        let this = *self;
        Effect::new(move |_| {
            let active_key = this.active.get();
            let new_url = this.params.with(|params| page_query(&active_key, params));

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        if let Err(e) = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        ) {
                            log::warn!("Failed to update URL to {}: {:?}", new_url, e);
                        }
                    }
                }
            }
        });
    }

    /// Switch to page `key`; unknown keys fall back to the search page.
    pub fn open_page(&self, key: &str) {
        self.open_page_with(key, PageParams::new());
    }

    /// Switch to page `key` with parameters for it. Parameters of the
    /// previous page are dropped.
    pub fn open_page_with(&self, key: &str, params: PageParams) {
        let (key, params) = if page_title(key).is_some() {
            (key, params)
        } else {
            log::warn!("unknown page '{}', opening {}", key, DEFAULT_PAGE);
            (DEFAULT_PAGE, PageParams::new())
        };
        log::debug!("open_page: {}", key);
        self.params.set(params);
        self.active.set(key.to_string());
    }

    /// Untracked read of a parameter of the active page.
    pub fn param(&self, name: &str) -> Option<String> {
        self.params.with_untracked(|p| p.get(name).cloned())
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_titles() {
        assert_eq!(page_title("lookups"), Some("Lookups"));
        assert_eq!(page_title(DEFAULT_PAGE), Some("Search"));
        assert_eq!(page_title("settings"), None);
        assert_eq!(page_title("edit_saved_search"), Some("Edit Saved Search"));
    }

    #[test]
    fn test_page_query_carries_params() {
        let query = page_query("edit_saved_search", &page_params([("id", "4")]));
        assert_eq!(query, "?active=edit_saved_search&id=4");
        assert_eq!(page_query("search", &PageParams::new()), "?active=search");
    }

    #[test]
    fn test_open_page_replaces_params() {
        let owner = Owner::new();
        owner.with(|| {
            let ctx = AppGlobalContext::new();
            ctx.open_page_with("edit_scheduled_input", page_params([("id", "7")]));
            assert_eq!(ctx.active.get_untracked(), "edit_scheduled_input");
            assert_eq!(ctx.param("id").as_deref(), Some("7"));

            ctx.open_page("history");
            assert_eq!(ctx.param("id"), None);

            ctx.open_page_with("nowhere", page_params([("id", "1")]));
            assert_eq!(ctx.active.get_untracked(), DEFAULT_PAGE);
            assert_eq!(ctx.param("id"), None);
        });
    }
}
