//! Invariants every pager must satisfy after any operation.
use anyhow::{Result, ensure};
use tablepager_core::{HeadlessControls, HeadlessRow, MAX_PAGE_BUTTONS, TablePagination};

pub type Pager = TablePagination<HeadlessRow, HeadlessControls>;

/// Check page bounds, visible slice, status range, controls visibility and
/// the button window against the pager's own counts.
///
/// # Errors
///
/// Describes the first invariant that does not hold.
pub fn check_invariants(pager: &Pager) -> Result<()> {
    let per_page = pager.items_per_page();
    let filtered = pager.filtered_count();
    let total_pages = filtered.div_ceil(per_page);
    let page = pager.current_page();

    ensure!(
        pager.total_pages() == total_pages,
        "total pages {} but {filtered} rows at {per_page} per page need {total_pages}",
        pager.total_pages()
    );
    ensure!(
        (1..=total_pages.max(1)).contains(&page),
        "current page {page} outside 1..={}",
        total_pages.max(1)
    );

    let expected = filtered
        .saturating_sub((page - 1) * per_page)
        .min(per_page);
    ensure!(
        pager.visible_indices().len() == expected,
        "{} rows visible on page {page}, expected {expected}",
        pager.visible_indices().len()
    );

    let shown: Vec<usize> = (0..pager.row_count())
        .filter(|&i| pager.row(i).is_some_and(HeadlessRow::is_visible))
        .collect();
    ensure!(
        shown == pager.visible_indices(),
        "rendered rows {shown:?} differ from page slice {:?}",
        pager.visible_indices()
    );
    ensure!(
        shown
            .iter()
            .all(|&i| pager.row_state(i).is_some_and(|s| s.is_filtered_in())),
        "a filtered-out row is visible"
    );

    // A pager over an empty snapshot never renders.
    if pager.row_count() == 0 {
        return Ok(());
    }

    let showing = pager.showing();
    ensure!(showing.total == filtered, "status total {}", showing.total);
    if filtered == 0 {
        ensure!(
            showing.start == 0 && showing.end == 0,
            "status {showing} with nothing matching"
        );
    } else {
        let start = (page - 1) * per_page + 1;
        ensure!(
            showing.start == start && showing.end == start + expected - 1,
            "status {showing} on page {page}"
        );
    }

    if let Some(controls) = pager.controls() {
        ensure!(
            controls.is_visible() == (filtered > 0),
            "controls visible={} with {filtered} matching rows",
            controls.is_visible()
        );
    }

    if total_pages > 1 {
        let pages = pager.buttons().page_numbers();
        ensure!(
            pages.len() == total_pages.min(MAX_PAGE_BUTTONS),
            "window {pages:?} for {total_pages} pages"
        );
        ensure!(pages.contains(&page), "window {pages:?} misses page {page}");
        ensure!(
            pages.windows(2).all(|w| w[1] == w[0] + 1),
            "window {pages:?} not contiguous"
        );
        ensure!(
            pager.buttons().active_page() == Some(page),
            "active button {:?} on page {page}",
            pager.buttons().active_page()
        );
    } else if filtered > 0 {
        ensure!(
            pager.buttons().is_empty(),
            "single page rendered {} buttons",
            pager.buttons().buttons().len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablepager_core::{HeadlessTable, PaginationOptions};

    #[test]
    fn fresh_pager_passes() {
        for count in [0, 1, 10, 11, 95] {
            let pager = TablePagination::attach(
                &HeadlessTable::with_names(count),
                &PaginationOptions::default(),
                None,
            );
            check_invariants(&pager).unwrap();
        }
    }
}
