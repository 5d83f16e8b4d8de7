//! The pager: filtered, paged view over a fixed row snapshot.
//!
//! Every mutator ends in [`TablePagination::update_pagination`], the single
//! render entry point. Rendering recomputes visibility from the per-row
//! [`RowState`] flags each time, so calling it twice in a row is a no-op on
//! the visible result.

use std::convert::Infallible;

use log::{debug, trace};

use crate::TableHost;
use crate::buttons::{ButtonStrip, PageAction, PageButton};
use crate::controls::{PaginationControls, ShowingRange};
use crate::filters::{ActiveFilters, CustomFilter, row_matches_search};
use crate::options::{DEFAULT_ITEMS_PER_PAGE, PaginationOptions};
use crate::row::{RowState, RowView, TrackedRow};

pub struct TablePagination<R, C> {
    rows: Vec<TrackedRow<R>>,
    controls: Option<C>,
    items_per_page: usize,
    current_page: usize,
    filters: ActiveFilters,
    custom_filter: Option<CustomFilter<R>>,
    // Derived by the last render pass.
    filtered: Vec<usize>,
    visible: Vec<usize>,
    showing: ShowingRange,
    buttons: ButtonStrip,
}

impl<R, C> TablePagination<R, C>
where
    R: RowView,
    C: PaginationControls,
{
    /// Take ownership of a row snapshot and render the first page.
    ///
    /// A zero `items_per_page` falls back to the default page size. Nothing
    /// is rendered when the snapshot is empty.
    pub fn new(
        rows: Vec<R>,
        controls: Option<C>,
        items_per_page: usize,
        custom_filter: Option<CustomFilter<R>>,
    ) -> Self {
        let items_per_page = if items_per_page == 0 {
            DEFAULT_ITEMS_PER_PAGE
        } else {
            items_per_page
        };
        let rows: Vec<TrackedRow<R>> = rows.into_iter().map(TrackedRow::new).collect();
        let filtered = (0..rows.len()).collect();

        let mut pager = Self {
            rows,
            controls,
            items_per_page,
            current_page: 1,
            filters: ActiveFilters::new(),
            custom_filter,
            filtered,
            visible: Vec::new(),
            showing: ShowingRange::default(),
            buttons: ButtonStrip::empty(),
        };

        if !pager.rows.is_empty() {
            pager.update_pagination();
        }
        pager
    }

    /// Resolve rows and controls through `host` using the option locators.
    pub fn attach<H>(
        host: &H,
        options: &PaginationOptions,
        custom_filter: Option<CustomFilter<R>>,
    ) -> Self
    where
        H: TableHost<Row = R, Controls = C>,
    {
        let rows = host.rows(&options.table_selector);
        let controls = host.controls(&options.pagination_selector);
        debug!(
            "attaching pager to {} ({} rows, controls {})",
            options.table_selector,
            rows.len(),
            if controls.is_some() { "found" } else { "missing" }
        );
        Self::new(
            rows,
            controls,
            options.effective_items_per_page(),
            custom_filter,
        )
    }

    /// Recompute the filtered set, clamp the page and redraw everything.
    pub fn update_pagination(&mut self) {
        self.filtered = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.state.is_filtered_in())
            .map(|(idx, _)| idx)
            .collect();
        let total_items = self.filtered.len();
        let total_pages = self.total_pages();

        self.current_page = self.current_page.clamp(1, total_pages.max(1));

        for row in &mut self.rows {
            row.view.set_visible(false);
        }

        let start = (self.current_page - 1) * self.items_per_page;
        let end = (start + self.items_per_page).min(total_items);
        self.visible = self.filtered.get(start..end).unwrap_or_default().to_vec();
        for &idx in &self.visible {
            self.rows[idx].view.set_visible(true);
        }

        self.showing = ShowingRange::for_slice(start, end, total_items);
        debug!(
            "page {}/{}: showing {} of {}",
            self.current_page, total_pages, self.showing, total_items
        );
        if let Some(controls) = self.controls.as_mut() {
            controls.set_showing(&self.showing);
        }

        self.render_pagination_buttons(total_pages);

        if total_items > self.items_per_page {
            self.set_controls_visible(true);
        } else if total_items > 0 {
            self.set_controls_visible(true);
            self.buttons = ButtonStrip::empty();
            if let Some(controls) = self.controls.as_mut() {
                controls.render_buttons(&self.buttons);
            }
        } else {
            self.set_controls_visible(false);
        }
    }

    /// Rebuild the button strip from scratch for `total_pages`.
    pub fn render_pagination_buttons(&mut self, total_pages: usize) {
        self.buttons = ButtonStrip::build(self.current_page, total_pages);
        if let Some(controls) = self.controls.as_mut() {
            controls.render_buttons(&self.buttons);
        }
    }

    /// Match `term` case-insensitively against `fields` of every row, then
    /// return to page 1 and reapply all filters.
    pub fn apply_search_filter<S: AsRef<str>>(&mut self, term: &str, fields: &[S]) {
        let Ok(()) = self.try_apply_search_filter(term, fields, no_interrupt);
    }

    /// [`Self::apply_search_filter`] with an interruptible filter pass; see
    /// [`Self::try_apply_all_filters`]. Search flags are kept on error.
    ///
    /// # Errors
    ///
    /// Returns the first error from `interrupted`.
    pub fn try_apply_search_filter<S, E>(
        &mut self,
        term: &str,
        fields: &[S],
        interrupted: impl FnMut() -> Result<(), E>,
    ) -> Result<(), E>
    where
        S: AsRef<str>,
    {
        let folded = term.to_lowercase();
        for row in &mut self.rows {
            row.state.search_matches = row_matches_search(&row.view, &folded, fields);
        }
        trace!("search {term:?} over {} fields", fields.len());

        self.current_page = 1;
        self.try_apply_all_filters(interrupted)
    }

    /// Insert or overwrite a named filter value, then return to page 1 and
    /// reapply all filters.
    pub fn set_filter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let Ok(()) = self.try_set_filter(name, value, no_interrupt);
    }

    /// [`Self::set_filter`] with an interruptible filter pass. The value is
    /// stored even when the pass is interrupted.
    ///
    /// # Errors
    ///
    /// Returns the first error from `interrupted`.
    pub fn try_set_filter<E>(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        interrupted: impl FnMut() -> Result<(), E>,
    ) -> Result<(), E> {
        self.filters.set(name, value);
        self.current_page = 1;
        self.try_apply_all_filters(interrupted)
    }

    /// Recompute `passes_filter` for every row and redraw.
    ///
    /// A row that fails search is never handed to the custom filter.
    pub fn apply_all_filters(&mut self) {
        let Ok(()) = self.try_apply_all_filters(no_interrupt);
    }

    /// Like [`Self::apply_all_filters`], asking `interrupted` after each row
    /// whether the custom filter failed out of band.
    ///
    /// On error the pass stops: the current row and every later row keep
    /// their previous `passes_filter`, and nothing is redrawn.
    ///
    /// # Errors
    ///
    /// Returns the first error from `interrupted`.
    pub fn try_apply_all_filters<E>(
        &mut self,
        mut interrupted: impl FnMut() -> Result<(), E>,
    ) -> Result<(), E> {
        let filters = &self.filters;
        let custom = self.custom_filter.as_ref();
        for (idx, row) in self.rows.iter_mut().enumerate() {
            let passes = row.state.search_matches && custom.is_none_or(|f| f(&row.view, filters));
            if let Err(err) = interrupted() {
                debug!("filter pass interrupted at row {idx}; render skipped");
                return Err(err);
            }
            row.state.passes_filter = passes;
        }
        trace!("applied {} named filters", self.filters.len());

        self.update_pagination();
        Ok(())
    }

    /// Back to page 1 with no filters and every row matching.
    ///
    /// The custom filter is not re-run.
    pub fn reset(&mut self) {
        self.current_page = 1;
        self.filters.clear();
        for row in &mut self.rows {
            row.state = RowState::default();
        }
        self.update_pagination();
    }

    /// Perform what an enabled button with this action does.
    pub fn activate(&mut self, action: PageAction) {
        match action {
            PageAction::Previous => self.current_page = self.current_page.saturating_sub(1),
            PageAction::Next => self.current_page = self.current_page.saturating_add(1),
            PageAction::Page(page) => self.current_page = page,
        }
        self.update_pagination();
    }

    /// Click a rendered button. Disabled buttons carry no action.
    pub fn press(&mut self, button: &PageButton) {
        if let Some(action) = button.action() {
            self.activate(action);
        }
    }

    pub fn previous_page(&mut self) {
        self.activate(PageAction::Previous);
    }

    pub fn next_page(&mut self) {
        self.activate(PageAction::Next);
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.activate(PageAction::Page(page));
    }

    fn set_controls_visible(&mut self, visible: bool) {
        if let Some(controls) = self.controls.as_mut() {
            controls.set_visible(visible);
        }
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub const fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Pages needed for the current filtered set.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(self.items_per_page)
    }

    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Snapshot indices of the rows revealed by the last render.
    #[must_use]
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    #[must_use]
    pub const fn showing(&self) -> ShowingRange {
        self.showing
    }

    /// Button strip from the last render; empty when one page holds everything.
    #[must_use]
    pub const fn buttons(&self) -> &ButtonStrip {
        &self.buttons
    }

    #[must_use]
    pub const fn active_filters(&self) -> &ActiveFilters {
        &self.filters
    }

    #[must_use]
    pub fn row_state(&self, index: usize) -> Option<RowState> {
        self.rows.get(index).map(|row| row.state)
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&R> {
        self.rows.get(index).map(|row| &row.view)
    }

    #[must_use]
    pub const fn controls(&self) -> Option<&C> {
        self.controls.as_ref()
    }
}

const fn no_interrupt() -> Result<(), Infallible> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::DEFAULT_SEARCH_FIELDS;
    use crate::headless::{HeadlessControls, HeadlessRow};

    type Pager = TablePagination<HeadlessRow, HeadlessControls>;

    fn pager(count: usize, per_page: usize) -> Pager {
        let rows = (1..=count)
            .map(|i| HeadlessRow::new().with_field(".users-cell-name", &format!("User {i}")))
            .collect();
        TablePagination::new(rows, Some(HeadlessControls::new()), per_page, None)
    }

    #[test]
    fn empty_snapshot_skips_initial_render() {
        let pager = pager(0, 10);
        let controls = pager.controls().unwrap();
        assert_eq!(controls.render_count(), 0);
        assert!(controls.is_visible());
        assert_eq!(pager.total_pages(), 0);
    }

    #[test]
    fn zero_page_size_uses_default() {
        let pager = pager(12, 0);
        assert_eq!(pager.items_per_page(), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(pager.total_pages(), 2);
    }

    #[test]
    fn navigation_past_the_ends_is_clamped() {
        let mut pager = pager(25, 10);
        pager.previous_page();
        assert_eq!(pager.current_page(), 1);
        pager.go_to_page(99);
        assert_eq!(pager.current_page(), 3);
        pager.next_page();
        assert_eq!(pager.current_page(), 3);
        pager.go_to_page(0);
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn pressing_disabled_button_does_nothing() {
        let mut pager = pager(25, 10);
        let renders = pager.controls().unwrap().render_count();
        let prev = *pager.buttons().previous().unwrap();
        pager.press(&prev);
        assert_eq!(pager.controls().unwrap().render_count(), renders);

        let next = *pager.buttons().next().unwrap();
        pager.press(&next);
        assert_eq!(pager.current_page(), 2);
    }

    #[test]
    fn failing_search_rows_never_reach_custom_filter() {
        let rows = vec![
            HeadlessRow::new().with_field(".users-cell-name", "alpha"),
            HeadlessRow::new().with_field(".users-cell-name", "beta"),
        ];
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let seen_in_filter = seen.clone();
        let filter: CustomFilter<HeadlessRow> = Box::new(move |row: &HeadlessRow, _: &ActiveFilters| {
            seen_in_filter
                .borrow_mut()
                .push(row.field_text(".users-cell-name").unwrap_or_default());
            true
        });
        let mut pager: Pager =
            TablePagination::new(rows, Some(HeadlessControls::new()), 10, Some(filter));

        pager.apply_search_filter("alp", &DEFAULT_SEARCH_FIELDS);
        assert_eq!(*seen.borrow(), vec!["alpha".to_string()]);
        assert_eq!(pager.filtered_count(), 1);
    }

    #[test]
    fn reset_does_not_rerun_custom_filter() {
        let rows = (0..4)
            .map(|i| HeadlessRow::new().with_field(".status", if i % 2 == 0 { "on" } else { "off" }))
            .collect();
        let filter: CustomFilter<HeadlessRow> = Box::new(|row: &HeadlessRow, filters: &ActiveFilters| {
            filters
                .get("status")
                .is_none_or(|want| row.field_text(".status").as_deref() == Some(want))
        });
        let mut pager: Pager =
            TablePagination::new(rows, Some(HeadlessControls::new()), 10, Some(filter));

        pager.set_filter("status", "on");
        assert_eq!(pager.filtered_count(), 2);
        pager.reset();
        assert_eq!(pager.filtered_count(), 4);
        assert!(pager.active_filters().is_empty());
        assert!((0..4).all(|i| pager.row_state(i) == Some(RowState::default())));
    }

    #[test]
    fn missing_controls_are_tolerated() {
        let rows = (0..30).map(|_| HeadlessRow::new()).collect();
        let mut pager: Pager = TablePagination::new(rows, None, 10, None);
        pager.go_to_page(3);
        assert_eq!(pager.visible_indices(), (20..30).collect::<Vec<_>>().as_slice());
        assert_eq!(pager.showing().to_string(), "21-30");
    }

    #[test]
    fn interrupted_filter_pass_skips_render() {
        use std::cell::Cell;
        use std::rc::Rc;

        let failed = Rc::new(Cell::new(false));
        let failed_in_filter = failed.clone();
        let filter: CustomFilter<HeadlessRow> = Box::new(move |row: &HeadlessRow, filters: &ActiveFilters| {
            let strict = filters.get("mode") == Some("strict");
            if strict && row.field_text(".users-cell-name").as_deref() == Some("User 3") {
                failed_in_filter.set(true);
                return false;
            }
            true
        });
        let rows = (1..=25)
            .map(|i| HeadlessRow::new().with_field(".users-cell-name", &format!("User {i}")))
            .collect();
        let mut pager: Pager =
            TablePagination::new(rows, Some(HeadlessControls::new()), 10, Some(filter));
        pager.go_to_page(2);
        let renders = pager.controls().unwrap().render_count();

        let result = pager.try_set_filter("mode", "strict", || {
            if failed.replace(false) {
                Err("predicate failed")
            } else {
                Ok(())
            }
        });
        assert_eq!(result, Err("predicate failed"));
        assert_eq!(pager.active_filters().get("mode"), Some("strict"));
        assert_eq!(pager.controls().unwrap().render_count(), renders);
        assert_eq!(pager.visible_indices(), (10..20).collect::<Vec<_>>());
        assert_eq!(pager.filtered_count(), 25);
        assert!((0..25).all(|i| pager.row_state(i).is_some_and(RowState::is_filtered_in)));

        pager.set_filter("mode", "lenient");
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.visible_indices(), (0..10).collect::<Vec<_>>());
        assert_eq!(pager.controls().unwrap().render_count(), renders + 1);
    }
}
