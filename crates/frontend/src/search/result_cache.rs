//! In-memory rows of the current query session.

use contracts::search::{QueryResponse, Record};
use serde_json::Value;
use std::collections::HashSet;
use std::ops::Range;

/// Rendered for a null or missing field.
pub const PLACEHOLDER: &str = "N/A";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultCache {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl ResultCache {
    /// Duplicate column names keep their first position only.
    pub fn new(columns: Vec<String>, rows: Vec<Record>) -> Self {
        let mut seen = HashSet::new();
        let columns = columns
            .into_iter()
            .filter(|c| seen.insert(c.clone()))
            .collect();
        Self { columns, rows }
    }

    pub fn from_response(response: QueryResponse) -> Self {
        Self::new(response.column_names, response.results)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in `range`, clipped to the cache.
    pub fn slice(&self, range: Range<usize>) -> &[Record] {
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        &self.rows[start..end]
    }

    /// Cell texts of `row` in column order. Keys outside the column list are
    /// not shown.
    pub fn project(&self, row: &Record) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| cell_text(row.get(column)))
            .collect()
    }
}

pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => PLACEHOLDER.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_duplicate_columns_collapse_to_first() {
        let cache = ResultCache::new(
            vec!["a".into(), "b".into(), "a".into(), "c".into(), "b".into()],
            vec![],
        );
        assert_eq!(cache.columns(), ["a", "b", "c"]);
    }

    #[test]
    fn test_projection_uses_placeholder() {
        let cache = ResultCache::new(vec!["host".into(), "code".into(), "ok".into()], vec![]);
        let row = record(json!({"host": "web-1", "code": null, "extra": 9}));
        assert_eq!(cache.project(&row), vec!["web-1", "N/A", "N/A"]);

        let row = record(json!({"host": "web-2", "code": 503, "ok": false}));
        assert_eq!(cache.project(&row), vec!["web-2", "503", "false"]);
    }

    #[test]
    fn test_slice_is_clipped() {
        let rows = (0..5).map(|i| record(json!({ "i": i }))).collect();
        let cache = ResultCache::new(vec!["i".into()], rows);
        assert_eq!(cache.slice(3..10).len(), 2);
        assert!(cache.slice(7..9).is_empty());
        assert_eq!(cache.slice(0..5).len(), 5);
    }
}
