//! DOM implementations of the engine's row, controls and host traits.
use log::warn;
use tablepager_core::{ButtonStrip, PaginationControls, RowView, ShowingRange, TableHost};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::dom;
use crate::markup::strip_markup;

/// Button list inside the controls container.
pub const BUTTON_LIST_SELECTOR: &str = ".pagination";
/// Range text target (`start-end`) inside the controls container.
pub const SHOWING_RANGE_SELECTOR: &str = "#showingRange";
/// Total count target inside the controls container.
pub const TOTAL_COUNT_SELECTOR: &str = "#totalCount";

/// A `<tr>` in the paged table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomRow {
    element: HtmlElement,
}

impl DomRow {
    #[must_use]
    pub const fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    #[must_use]
    pub const fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl RowView for DomRow {
    fn field_text(&self, locator: &str) -> Option<String> {
        dom::query_within(&self.element, locator).and_then(|el| el.text_content())
    }

    fn set_visible(&mut self, visible: bool) {
        let _ = self
            .element
            .style()
            .set_property("display", if visible { "" } else { "none" });
    }
}

/// The pagination container and whichever of its targets exist.
#[derive(Debug, Clone)]
pub struct DomControls {
    container: HtmlElement,
    list: Option<Element>,
    showing: Option<Element>,
    total: Option<Element>,
}

impl DomControls {
    /// Wrap a container element, looking up its optional targets once.
    #[must_use]
    pub fn resolve(container: Element) -> Option<Self> {
        let container = container.dyn_into::<HtmlElement>().ok()?;
        let list = dom::query_within(&container, BUTTON_LIST_SELECTOR);
        if list.is_none() {
            warn!("pagination container has no {BUTTON_LIST_SELECTOR} list; buttons will not render");
        }
        Some(Self {
            list,
            showing: dom::query_within(&container, SHOWING_RANGE_SELECTOR),
            total: dom::query_within(&container, TOTAL_COUNT_SELECTOR),
            container,
        })
    }

    #[must_use]
    pub const fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// Button list element, if the container has one.
    #[must_use]
    pub const fn list(&self) -> Option<&Element> {
        self.list.as_ref()
    }
}

impl PaginationControls for DomControls {
    fn set_showing(&mut self, showing: &ShowingRange) {
        if let Some(el) = &self.showing {
            el.set_text_content(Some(&showing.to_string()));
        }
        if let Some(el) = &self.total {
            el.set_text_content(Some(&showing.total.to_string()));
        }
    }

    fn render_buttons(&mut self, strip: &ButtonStrip) {
        if let Some(list) = &self.list {
            list.set_inner_html(&strip_markup(strip));
        }
    }

    fn set_visible(&mut self, visible: bool) {
        let _ = self
            .container
            .style()
            .set_property("display", if visible { "flex" } else { "none" });
    }
}

/// Resolves rows and controls from a live document.
#[derive(Debug, Clone)]
pub struct DomTableHost {
    document: Document,
}

impl DomTableHost {
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self { document }
    }

    /// Host over the current page's document.
    #[must_use]
    pub fn current() -> Option<Self> {
        dom::document().map(Self::new)
    }
}

impl TableHost for DomTableHost {
    type Row = DomRow;
    type Controls = DomControls;

    fn rows(&self, table_selector: &str) -> Vec<Self::Row> {
        dom::query_all_html(&self.document, &format!("{table_selector} tr"))
            .into_iter()
            .map(DomRow::new)
            .collect()
    }

    fn controls(&self, pagination_selector: &str) -> Option<Self::Controls> {
        let container = self.document.query_selector(pagination_selector).ok().flatten();
        if container.is_none() {
            warn!("no pagination container matches {pagination_selector}");
        }
        container.and_then(DomControls::resolve)
    }
}
