//! Search matching and named filter values.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::row::RowView;

/// Field locators searched when the caller does not name any.
pub const DEFAULT_SEARCH_FIELDS: [&str; 2] = [".users-cell-name", ".users-cell-email"];

/// Caller-supplied predicate composed with search matching.
///
/// Must be pure with respect to the pager: it may not call back into it.
pub type CustomFilter<R> = Box<dyn Fn(&R, &ActiveFilters) -> bool>;

/// Named filter values accumulated through `set_filter`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveFilters(HashMap<String, String>);

impl ActiveFilters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a filter value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Look up a filter value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Whether any of `fields` exists on the row and contains `folded_term`.
///
/// `folded_term` must already be lowercased. Stops at the first match, so
/// later fields are not read once an earlier one matches.
pub fn row_matches_search<R, S>(row: &R, folded_term: &str, fields: &[S]) -> bool
where
    R: RowView + ?Sized,
    S: AsRef<str>,
{
    fields.iter().any(|field| {
        row.field_text(field.as_ref())
            .is_some_and(|text| text.to_lowercase().contains(folded_term))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessRow;

    #[test]
    fn overwrite_keeps_single_entry() {
        let mut filters = ActiveFilters::new();
        filters.set("status", "active");
        filters.set("status", "blocked");
        assert_eq!(filters.len(), 1);
        assert_eq!(filters.get("status"), Some("blocked"));
        assert_eq!(filters.get("role"), None);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let row = HeadlessRow::new()
            .with_field(".users-cell-name", "Kim Minji")
            .with_field(".users-cell-email", "minji@example.com");
        assert!(row_matches_search(&row, "kim", &DEFAULT_SEARCH_FIELDS));
        assert!(row_matches_search(&row, "example", &DEFAULT_SEARCH_FIELDS));
        assert!(!row_matches_search(&row, "park", &DEFAULT_SEARCH_FIELDS));
    }

    #[test]
    fn empty_term_needs_at_least_one_field() {
        let bare = HeadlessRow::new().with_field(".other", "x");
        let named = HeadlessRow::new().with_field(".users-cell-name", "");
        assert!(!row_matches_search(&bare, "", &DEFAULT_SEARCH_FIELDS));
        assert!(row_matches_search(&named, "", &DEFAULT_SEARCH_FIELDS));
    }

    #[test]
    fn only_listed_fields_are_searched() {
        let row = HeadlessRow::new()
            .with_field(".users-cell-name", "Lee")
            .with_field(".users-cell-role", "Admin");
        assert!(!row_matches_search(&row, "admin", &DEFAULT_SEARCH_FIELDS));
        assert!(row_matches_search(&row, "admin", &[".users-cell-role"]));
    }
}
