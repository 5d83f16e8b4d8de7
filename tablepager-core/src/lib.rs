//! Tablepager Engine
//!
//! Platform-agnostic client-side table pagination: a view-model over a fixed
//! snapshot of table rows that composes a free-text search with an optional
//! caller-supplied predicate and shows one page of the result at a time.
//! This crate has no DOM or I/O dependencies; hosts plug in through
//! [`RowView`], [`PaginationControls`] and [`TableHost`].

pub mod buttons;
pub mod controls;
pub mod filters;
pub mod headless;
pub mod options;
pub mod page_group;
pub mod pagination;
pub mod row;

// Re-export commonly used types
pub use buttons::{ButtonStrip, MAX_PAGE_BUTTONS, PageAction, PageButton, page_window};
pub use controls::{PaginationControls, ShowingRange};
pub use filters::{ActiveFilters, CustomFilter, DEFAULT_SEARCH_FIELDS, row_matches_search};
pub use headless::{HeadlessControls, HeadlessRow, HeadlessTable};
pub use options::{
    DEFAULT_ITEMS_PER_PAGE, DEFAULT_PAGINATION_SELECTOR, DEFAULT_TABLE_SELECTOR, OptionsError,
    PaginationOptions,
};
pub use page_group::{PageGroup, PageGroupQuery};
pub use pagination::TablePagination;
pub use row::{RowState, RowView};

/// Trait for abstracting where rows and pagination controls come from.
/// Platform-specific implementations should provide this
pub trait TableHost {
    type Row: RowView;
    type Controls: PaginationControls;

    /// Snapshot the rows currently under `table_selector`, in document order.
    ///
    /// An unknown selector yields an empty snapshot.
    fn rows(&self, table_selector: &str) -> Vec<Self::Row>;

    /// Resolve the pagination controls container, if present.
    fn controls(&self, pagination_selector: &str) -> Option<Self::Controls>;
}
