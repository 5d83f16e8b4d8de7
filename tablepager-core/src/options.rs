//! Construction options for a pager instance.
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_TABLE_SELECTOR: &str = ".users-table tbody";
pub const DEFAULT_PAGINATION_SELECTOR: &str = "#usersPagination";
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Empty selector for `{0}`")]
    EmptySelector(&'static str),
}

/// Locators and page size, as read from a page's configuration object.
///
/// Field names follow the page-side camelCase convention
/// (`tableSelector`, `paginationSelector`, `itemsPerPage`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOptions {
    #[serde(default = "default_table_selector")]
    pub table_selector: String,
    #[serde(default = "default_pagination_selector")]
    pub pagination_selector: String,
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
}

fn default_table_selector() -> String {
    DEFAULT_TABLE_SELECTOR.to_string()
}

fn default_pagination_selector() -> String {
    DEFAULT_PAGINATION_SELECTOR.to_string()
}

const fn default_items_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            table_selector: default_table_selector(),
            pagination_selector: default_pagination_selector(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl PaginationOptions {
    /// Parse options from JSON, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a selector is blank.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Reject blank selectors.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::EmptySelector`] naming the offending field.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.table_selector.trim().is_empty() {
            return Err(OptionsError::EmptySelector("tableSelector"));
        }
        if self.pagination_selector.trim().is_empty() {
            return Err(OptionsError::EmptySelector("paginationSelector"));
        }
        Ok(())
    }

    /// Page size actually used: zero falls back to the default.
    #[must_use]
    pub const fn effective_items_per_page(&self) -> usize {
        if self.items_per_page == 0 {
            DEFAULT_ITEMS_PER_PAGE
        } else {
            self.items_per_page
        }
    }
}
