//! JavaScript-facing constructor and methods for page scripts.
//!
//! ```js
//! const pager = new TablePagination({ itemsPerPage: 20, customFilter: (row, f) => ... });
//! searchInput.addEventListener('input', e => pager.applySearchFilter(e.target.value));
//! ```
use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use serde::Serialize;
use tablepager_core::{ActiveFilters, DEFAULT_SEARCH_FIELDS, OptionsError, PaginationOptions};
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::binding::DomRow;
use crate::dom;
use crate::pager::{DomFilter, WebTablePagination};

#[derive(Debug, Error)]
pub enum WebPagerError {
    #[error("Invalid options object: {0}")]
    Options(#[from] serde_wasm_bindgen::Error),
    #[error(transparent)]
    Invalid(#[from] OptionsError),
    #[error("No document available")]
    NoDocument,
}

impl From<WebPagerError> for JsValue {
    fn from(err: WebPagerError) -> Self {
        Self::from_str(&err.to_string())
    }
}

/// First exception raised by the JS predicate during the current pass.
type Thrown = Rc<RefCell<Option<JsValue>>>;

#[wasm_bindgen(js_name = TablePagination)]
pub struct JsTablePagination {
    pager: WebTablePagination,
    thrown: Thrown,
}

#[wasm_bindgen(js_class = TablePagination)]
impl JsTablePagination {
    /// Build from an options object; `undefined` uses every default.
    ///
    /// # Errors
    ///
    /// Returns an error if the options cannot be read or no document exists.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<Self, JsValue> {
        let parsed = if options.is_undefined() || options.is_null() {
            PaginationOptions::default()
        } else {
            serde_wasm_bindgen::from_value::<PaginationOptions>(options.clone())
                .map_err(WebPagerError::from)?
        };
        parsed.validate().map_err(WebPagerError::from)?;

        let thrown = Thrown::default();
        let custom_filter = js_sys::Reflect::get(&options, &JsValue::from_str("customFilter"))
            .ok()
            .and_then(|value| value.dyn_into::<js_sys::Function>().ok())
            .map(|func| js_filter(func, Rc::clone(&thrown)));

        let pager =
            WebTablePagination::attach(&parsed, custom_filter).ok_or(WebPagerError::NoDocument)?;
        Ok(Self { pager, thrown })
    }

    /// `searchFields` is an optional array of locators.
    ///
    /// # Errors
    ///
    /// Rethrows an exception raised by `customFilter`; that pass is not rendered.
    #[wasm_bindgen(js_name = applySearchFilter)]
    pub fn apply_search_filter(&self, term: &str, search_fields: JsValue) -> Result<(), JsValue> {
        let fields = serde_wasm_bindgen::from_value::<Option<Vec<String>>>(search_fields)
            .ok()
            .flatten();
        match fields {
            Some(fields) => self
                .pager
                .try_apply_search_filter(term, &fields, || self.take_thrown()),
            None => self.pager.try_apply_search_filter(
                term,
                &DEFAULT_SEARCH_FIELDS,
                || self.take_thrown(),
            ),
        }
    }

    /// # Errors
    ///
    /// Rethrows an exception raised by `customFilter`; the value stays set.
    #[wasm_bindgen(js_name = setFilter)]
    pub fn set_filter(&self, name: &str, value: &str) -> Result<(), JsValue> {
        self.pager.try_set_filter(name, value, || self.take_thrown())
    }

    /// # Errors
    ///
    /// Rethrows an exception raised by `customFilter`.
    #[wasm_bindgen(js_name = applyAllFilters)]
    pub fn apply_all_filters(&self) -> Result<(), JsValue> {
        self.pager.try_apply_all_filters(|| self.take_thrown())
    }

    /// Never calls `customFilter`.
    pub fn reset(&self) {
        self.pager.reset();
    }

    /// Never calls `customFilter`.
    #[wasm_bindgen(js_name = updatePagination)]
    pub fn update_pagination(&self) {
        self.pager.update_pagination();
    }

    #[wasm_bindgen(getter, js_name = currentPage)]
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.pager.current_page()
    }

    #[wasm_bindgen(getter, js_name = totalPages)]
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.pager.with(|p| p.total_pages())
    }
}

impl JsTablePagination {
    fn take_thrown(&self) -> Result<(), JsValue> {
        self.thrown.borrow_mut().take().map_or(Ok(()), Err)
    }
}

/// Wrap a JS `(row, filters) => bool` predicate.
///
/// An exception is parked in `thrown` and the row reads as excluded; the
/// caller stops the pass and rethrows once the engine borrow is released.
fn js_filter(func: js_sys::Function, thrown: Thrown) -> DomFilter {
    Box::new(move |row: &DomRow, filters: &ActiveFilters| {
        let filters = filters
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .unwrap_or(JsValue::NULL);
        match func.call2(&JsValue::NULL, row.element(), &filters) {
            Ok(result) => result.is_truthy(),
            Err(err) => {
                debug!("customFilter threw: {}", dom::js_error_message(&err));
                thrown.borrow_mut().get_or_insert(err);
                false
            }
        }
    })
}
