//! Durable client state.
//!
//! Everything the client keeps across reloads goes through [`SessionStore`]
//! so the single writer of each key is explicit and testable. Tabs of the same
//! browser profile share the keys; the last tab to write wins.

use web_sys::window;

/// Last-run (or restored) query text.
pub const SAVED_QUERY_KEY: &str = "savedQuery";
/// Correlation id of the last successful query.
pub const REQUEST_ID_KEY: &str = "requestId";

pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`. Unavailable storage reads as empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Log a failed localStorage write and return the logged message.
fn report_write<E: std::fmt::Debug>(action: &str, key: &str, result: Result<(), E>) -> Option<String> {
    let e = result.err()?;
    let message = format!("Failed to {} '{}': {:?}", action, key, e);
    log::warn!("{}", message);
    Some(message)
}

impl SessionStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = get_local_storage() else {
            log::warn!("localStorage unavailable, '{}' not persisted", key);
            return;
        };
        report_write("persist", key, storage.set_item(key, value));
    }

    fn remove(&self, key: &str) {
        let Some(storage) = get_local_storage() else {
            log::warn!("localStorage unavailable, '{}' not removed", key);
            return;
        };
        report_write("remove", key, storage.remove_item(key));
    }
}

#[cfg(test)]
mod tests {
    use super::report_write;

    #[test]
    fn test_failed_writes_are_reported() {
        assert_eq!(report_write::<String>("remove", "requestId", Ok(())), None);
        assert_eq!(
            report_write("remove", "requestId", Err("SecurityError")).as_deref(),
            Some("Failed to remove 'requestId': \"SecurityError\"")
        );
        assert_eq!(
            report_write("persist", "savedQuery", Err("QuotaExceededError")).as_deref(),
            Some("Failed to persist 'savedQuery': \"QuotaExceededError\"")
        );
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryStore;
