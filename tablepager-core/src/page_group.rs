//! Server-side page-group metadata for listing pages.
//!
//! Splits the page numbers into fixed blocks (`1..=5`, `6..=10`, ...) and
//! reports the block holding the requested page, with links to the
//! neighbouring blocks.
use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_TOTAL: i64 = 0;
const DEFAULT_GROUP_SIZE: i64 = 5;
const DEFAULT_ROW_SIZE: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageGroup {
    pub page: u64,
    /// Row offset for the query backing this page.
    pub offset: u64,
    pub row_size: u64,
    pub total_pages: u64,
    pub start_page: u64,
    pub end_page: u64,
    pub has_prev: bool,
    /// Last page of the previous group.
    pub prev_page: u64,
    pub has_next: bool,
    /// First page of the next group.
    pub next_page: u64,
}

/// Raw, untrusted inputs as they arrive from a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageGroupQuery {
    #[serde(default)]
    pub total: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub page_group_size: Option<String>,
    #[serde(default)]
    pub row_size: Option<String>,
}

impl PageGroup {
    /// Compute the group for `page` out of `total` rows.
    ///
    /// Zero `page`, `group_size` or `row_size` use their defaults (1, 5, 10);
    /// negative values are raised to 1 (0 for `total`).
    #[must_use]
    pub fn compute(total: i64, page: i64, group_size: i64, row_size: i64) -> Self {
        Self::clamped(
            total,
            or_default(page, DEFAULT_PAGE),
            or_default(group_size, DEFAULT_GROUP_SIZE),
            or_default(row_size, DEFAULT_ROW_SIZE),
        )
    }

    /// Parse string inputs; if any present value fails to parse, every input
    /// falls back to its default.
    ///
    /// Only a missing or empty value means "default". A parsed `"0"` is kept
    /// and raised to the minimum, so `row_size = "0"` pages one row at a time.
    #[must_use]
    pub fn from_query(query: &PageGroupQuery) -> Self {
        let (total, page, group_size, row_size) = parse_query(query).unwrap_or((
            DEFAULT_TOTAL,
            DEFAULT_PAGE,
            DEFAULT_GROUP_SIZE,
            DEFAULT_ROW_SIZE,
        ));
        Self::clamped(total, page, group_size, row_size)
    }

    fn clamped(total: i64, page: i64, group_size: i64, row_size: i64) -> Self {
        let page = page.max(1).unsigned_abs();
        let total = total.max(0).unsigned_abs();
        let group_size = group_size.max(1).unsigned_abs();
        let row_size = row_size.max(1).unsigned_abs();

        let total_pages = if total > 0 {
            total.div_ceil(row_size)
        } else {
            1
        };
        let page = page.min(total_pages);
        let offset = (page - 1) * row_size;

        let start_page = ((page - 1) / group_size) * group_size + 1;
        let end_page = start_page
            .saturating_add(group_size - 1)
            .min(total_pages);

        Self {
            page,
            offset,
            row_size,
            total_pages,
            start_page,
            end_page,
            has_prev: start_page > 1,
            prev_page: start_page.saturating_sub(1).max(1),
            has_next: end_page < total_pages,
            next_page: end_page.saturating_add(1).min(total_pages),
        }
    }

    /// Page numbers in the current group.
    pub fn pages(&self) -> impl Iterator<Item = u64> {
        self.start_page..=self.end_page
    }
}

const fn or_default(value: i64, default: i64) -> i64 {
    if value == 0 { default } else { value }
}

fn parse_query(query: &PageGroupQuery) -> Option<(i64, i64, i64, i64)> {
    Some((
        parse_or(query.total.as_deref(), DEFAULT_TOTAL)?,
        parse_or(query.page.as_deref(), DEFAULT_PAGE)?,
        parse_or(query.page_group_size.as_deref(), DEFAULT_GROUP_SIZE)?,
        parse_or(query.row_size.as_deref(), DEFAULT_ROW_SIZE)?,
    ))
}

// Missing or empty means default; anything else must parse, surrounding
// whitespace allowed.
fn parse_or(raw: Option<&str>, default: i64) -> Option<i64> {
    match raw {
        None | Some("") => Some(default),
        Some(text) => text.trim().parse().ok(),
    }
}
