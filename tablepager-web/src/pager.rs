//! Browser-side pager: engine + DOM host + one click listener per instance.
//!
//! The listener is registered on this instance's own button list, reads the
//! `data-page-action` of the clicked button and forwards it to the engine
//! through a `Weak` handle. Nothing is registered on the document, so two
//! pagers on one page never see each other's clicks.
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, warn};
use tablepager_core::{
    ActiveFilters, CustomFilter, PageAction, PaginationOptions, TableHost, TablePagination,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

use crate::binding::{DomControls, DomRow, DomTableHost};
use crate::markup::ACTION_ATTR;

pub type DomPagination = TablePagination<DomRow, DomControls>;

/// Custom predicate over DOM rows.
pub type DomFilter = CustomFilter<DomRow>;

struct ClickBinding {
    list: Element,
    closure: Closure<dyn FnMut(Event)>,
}

impl Drop for ClickBinding {
    fn drop(&mut self) {
        let _ = self
            .list
            .remove_event_listener_with_callback("click", self.closure.as_ref().unchecked_ref());
    }
}

pub struct WebTablePagination {
    inner: Rc<RefCell<DomPagination>>,
    _click: Option<ClickBinding>,
}

impl WebTablePagination {
    /// Attach to the current document. Returns `None` outside a browser.
    #[must_use]
    pub fn attach(options: &PaginationOptions, custom_filter: Option<DomFilter>) -> Option<Self> {
        let host = DomTableHost::current()?;
        Some(Self::attach_to(&host, options, custom_filter))
    }

    /// Attach through an explicit host.
    #[must_use]
    pub fn attach_to<H>(host: &H, options: &PaginationOptions, custom_filter: Option<DomFilter>) -> Self
    where
        H: TableHost<Row = DomRow, Controls = DomControls>,
    {
        let pager = TablePagination::attach(host, options, custom_filter);
        let list = pager.controls().and_then(DomControls::list).cloned();
        let inner = Rc::new(RefCell::new(pager));
        let click = list.map(|list| bind_clicks(list, Rc::downgrade(&inner)));
        Self {
            inner,
            _click: click,
        }
    }

    pub fn apply_search_filter<S: AsRef<str>>(&self, term: &str, fields: &[S]) {
        self.inner.borrow_mut().apply_search_filter(term, fields);
    }

    pub fn set_filter(&self, name: &str, value: &str) {
        self.inner.borrow_mut().set_filter(name, value);
    }

    pub fn apply_all_filters(&self) {
        self.inner.borrow_mut().apply_all_filters();
    }

    /// Search pass that stops at the first error from `interrupted`.
    ///
    /// # Errors
    ///
    /// Returns the first error from `interrupted`; no render happens then.
    pub fn try_apply_search_filter<S: AsRef<str>, E>(
        &self,
        term: &str,
        fields: &[S],
        interrupted: impl FnMut() -> Result<(), E>,
    ) -> Result<(), E> {
        self.inner
            .borrow_mut()
            .try_apply_search_filter(term, fields, interrupted)
    }

    /// # Errors
    ///
    /// Returns the first error from `interrupted`; the filter value is kept.
    pub fn try_set_filter<E>(
        &self,
        name: &str,
        value: &str,
        interrupted: impl FnMut() -> Result<(), E>,
    ) -> Result<(), E> {
        self.inner.borrow_mut().try_set_filter(name, value, interrupted)
    }

    /// # Errors
    ///
    /// Returns the first error from `interrupted`.
    pub fn try_apply_all_filters<E>(
        &self,
        interrupted: impl FnMut() -> Result<(), E>,
    ) -> Result<(), E> {
        self.inner.borrow_mut().try_apply_all_filters(interrupted)
    }

    pub fn reset(&self) {
        self.inner.borrow_mut().reset();
    }

    pub fn update_pagination(&self) {
        self.inner.borrow_mut().update_pagination();
    }

    pub fn activate(&self, action: PageAction) {
        self.inner.borrow_mut().activate(action);
    }

    /// Read engine state.
    pub fn with<T>(&self, f: impl FnOnce(&DomPagination) -> T) -> T {
        f(&self.inner.borrow())
    }

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.inner.borrow().current_page()
    }

    #[must_use]
    pub fn active_filters(&self) -> ActiveFilters {
        self.inner.borrow().active_filters().clone()
    }
}

fn bind_clicks(list: Element, pager: Weak<RefCell<DomPagination>>) -> ClickBinding {
    let closure = Closure::wrap(Box::new(move |event: Event| {
        let Some(action) = clicked_action(&event) else {
            return;
        };
        event.prevent_default();
        let Some(pager) = pager.upgrade() else {
            return;
        };
        // A click dispatched from inside a render pass is dropped.
        let Ok(mut pager) = pager.try_borrow_mut() else {
            warn!("ignoring page click during render");
            return;
        };
        debug!("page button clicked: {action:?}");
        pager.activate(action);
    }) as Box<dyn FnMut(Event)>);

    if list
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        .is_err()
    {
        warn!("could not register page click listener");
    }
    ClickBinding { list, closure }
}

fn clicked_action(event: &Event) -> Option<PageAction> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let button = target.closest(&format!("[{ACTION_ATTR}]")).ok().flatten()?;
    PageAction::from_token(&button.get_attribute(ACTION_ATTR)?)
}
