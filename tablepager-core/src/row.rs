//! Row handles and the per-row filter flags owned by the pager.
use serde::{Deserialize, Serialize};

/// Abstract handle to one renderable table record.
pub trait RowView {
    /// Text content of the descendant addressed by `locator`, or `None` when
    /// the row has no such sub-element.
    fn field_text(&self, locator: &str) -> Option<String>;

    /// Show or hide the row.
    fn set_visible(&mut self, visible: bool);
}

/// Filter flags tracked for each row.
///
/// Both flags start `true`. Visibility is never stored here; it is derived on
/// every render from [`RowState::is_filtered_in`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowState {
    pub search_matches: bool,
    pub passes_filter: bool,
}

impl Default for RowState {
    fn default() -> Self {
        Self {
            search_matches: true,
            passes_filter: true,
        }
    }
}

impl RowState {
    /// Whether the row belongs to the filtered set.
    #[must_use]
    pub const fn is_filtered_in(self) -> bool {
        self.search_matches && self.passes_filter
    }
}

/// A row handle paired with its filter flags.
#[derive(Debug, Clone)]
pub(crate) struct TrackedRow<R> {
    pub(crate) view: R,
    pub(crate) state: RowState,
}

impl<R> TrackedRow<R> {
    pub(crate) fn new(view: R) -> Self {
        Self {
            view,
            state: RowState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_filtered_in() {
        assert!(RowState::default().is_filtered_in());
    }

    #[test]
    fn either_flag_excludes_row() {
        let search_miss = RowState {
            search_matches: false,
            passes_filter: true,
        };
        let filter_miss = RowState {
            search_matches: true,
            passes_filter: false,
        };
        assert!(!search_miss.is_filtered_in());
        assert!(!filter_miss.is_filtered_in());
    }
}
