//! Pagination controls collaborator and the "showing X-Y of N" status.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::buttons::ButtonStrip;

/// 1-based inclusive range of revealed rows plus the filtered total.
///
/// All zero when nothing passes the filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowingRange {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

impl ShowingRange {
    /// Range for the 0-based half-open slice `[from, to)` out of `total`.
    #[must_use]
    pub const fn for_slice(from: usize, to: usize, total: usize) -> Self {
        if total == 0 {
            Self {
                start: 0,
                end: 0,
                total: 0,
            }
        } else {
            Self {
                start: from + 1,
                end: to,
                total,
            }
        }
    }
}

impl fmt::Display for ShowingRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Container holding the page-button list and status text.
///
/// Every target inside the container is optional: implementations skip an
/// update whose target is missing rather than failing.
pub trait PaginationControls {
    /// Write the range text (`start-end`) and the total count.
    fn set_showing(&mut self, showing: &ShowingRange);

    /// Replace the button list with `strip`. An empty strip clears the list.
    fn render_buttons(&mut self, strip: &ButtonStrip);

    /// Show or hide the whole container.
    fn set_visible(&mut self, visible: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slice_reports_zeroes() {
        let range = ShowingRange::for_slice(0, 0, 0);
        assert_eq!(range.to_string(), "0-0");
        assert_eq!(range.total, 0);
    }

    #[test]
    fn slice_is_one_based_inclusive() {
        let range = ShowingRange::for_slice(20, 25, 25);
        assert_eq!(range.to_string(), "21-25");
    }
}
