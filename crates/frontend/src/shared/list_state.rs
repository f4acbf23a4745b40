use crate::shared::error::ApiError;

/// Rows of a collection page plus its load status.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<T> ListState<T> {
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// A failed reload keeps the rows already shown.
    pub fn finish(&mut self, result: Result<Vec<T>, ApiError>) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_reload_keeps_rows() {
        let mut state = ListState::default();
        state.begin_load();
        assert!(state.loading);
        state.finish(Ok(vec![1, 2, 3]));
        assert!(!state.loading);
        assert_eq!(state.items, vec![1, 2, 3]);

        state.begin_load();
        state.finish(Err(ApiError::Server("Database is locked".into())));
        assert_eq!(state.items, vec![1, 2, 3]);
        assert_eq!(state.error.as_deref(), Some("Server Error: Database is locked"));
    }
}
