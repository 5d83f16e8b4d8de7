//! In-memory rows and controls for driving the pager without a DOM.
//!
//! Used by the tester CLI and by tests; rendering effects are recorded so
//! they can be inspected afterwards.
use std::collections::BTreeMap;

use crate::TableHost;
use crate::buttons::{ButtonStrip, PageButton};
use crate::controls::{PaginationControls, ShowingRange};
use crate::options::{DEFAULT_PAGINATION_SELECTOR, DEFAULT_TABLE_SELECTOR};
use crate::row::RowView;

/// Row backed by a map of locator -> text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessRow {
    fields: BTreeMap<String, String>,
    visible: bool,
}

impl HeadlessRow {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
            visible: true,
        }
    }

    #[must_use]
    pub fn with_field(mut self, locator: &str, text: &str) -> Self {
        self.fields.insert(locator.to_string(), text.to_string());
        self
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }
}

impl RowView for HeadlessRow {
    fn field_text(&self, locator: &str) -> Option<String> {
        self.fields.get(locator).cloned()
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// Controls container with individually optional targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessControls {
    showing: Option<String>,
    total: Option<String>,
    list: Option<Vec<PageButton>>,
    visible: bool,
    renders: usize,
}

impl Default for HeadlessControls {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessControls {
    /// All targets present, initially empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            showing: Some(String::new()),
            total: Some(String::new()),
            list: Some(Vec::new()),
            visible: true,
            renders: 0,
        }
    }

    /// Container without the range/total text targets.
    #[must_use]
    pub fn without_status() -> Self {
        Self {
            showing: None,
            total: None,
            ..Self::new()
        }
    }

    /// Container without a button list.
    #[must_use]
    pub fn without_list() -> Self {
        Self {
            list: None,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn showing_text(&self) -> Option<&str> {
        self.showing.as_deref()
    }

    #[must_use]
    pub fn total_text(&self) -> Option<&str> {
        self.total.as_deref()
    }

    /// Buttons currently in the list; `None` when there is no list target.
    #[must_use]
    pub fn buttons(&self) -> Option<&[PageButton]> {
        self.list.as_deref()
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// How many times the button list has been rebuilt.
    #[must_use]
    pub const fn render_count(&self) -> usize {
        self.renders
    }
}

impl PaginationControls for HeadlessControls {
    fn set_showing(&mut self, showing: &ShowingRange) {
        if let Some(text) = self.showing.as_mut() {
            *text = showing.to_string();
        }
        if let Some(text) = self.total.as_mut() {
            *text = showing.total.to_string();
        }
    }

    fn render_buttons(&mut self, strip: &ButtonStrip) {
        let Some(list) = self.list.as_mut() else {
            return;
        };
        list.clear();
        list.extend_from_slice(strip.buttons());
        self.renders += 1;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// Page stand-in mapping selectors to row sets and controls.
#[derive(Debug, Clone, Default)]
pub struct HeadlessTable {
    tables: BTreeMap<String, Vec<HeadlessRow>>,
    controls: BTreeMap<String, HeadlessControls>,
}

impl HeadlessTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Users table with `count` rows under the default selectors.
    ///
    /// Row `i` (1-based) has name `User i` and email `user{i}@example.com`.
    #[must_use]
    pub fn with_names(count: usize) -> Self {
        let rows = (1..=count)
            .map(|i| {
                HeadlessRow::new()
                    .with_field(".users-cell-name", &format!("User {i}"))
                    .with_field(".users-cell-email", &format!("user{i}@example.com"))
            })
            .collect();
        Self::new()
            .with_table(DEFAULT_TABLE_SELECTOR, rows)
            .with_controls(DEFAULT_PAGINATION_SELECTOR, HeadlessControls::new())
    }

    #[must_use]
    pub fn with_table(mut self, selector: &str, rows: Vec<HeadlessRow>) -> Self {
        self.tables.insert(selector.to_string(), rows);
        self
    }

    #[must_use]
    pub fn with_controls(mut self, selector: &str, controls: HeadlessControls) -> Self {
        self.controls.insert(selector.to_string(), controls);
        self
    }

    /// Append a row after the fact; pagers already attached never see it.
    pub fn push_row(&mut self, selector: &str, row: HeadlessRow) {
        self.tables.entry(selector.to_string()).or_default().push(row);
    }
}

impl TableHost for HeadlessTable {
    type Row = HeadlessRow;
    type Controls = HeadlessControls;

    fn rows(&self, table_selector: &str) -> Vec<Self::Row> {
        self.tables.get(table_selector).cloned().unwrap_or_default()
    }

    fn controls(&self, pagination_selector: &str) -> Option<Self::Controls> {
        self.controls.get(pagination_selector).cloned()
    }
}
