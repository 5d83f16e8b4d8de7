#![forbid(unsafe_code)]
//! Browser binding for the tablepager engine.
//!
//! [`pager::WebTablePagination`] drives a server-rendered table in place;
//! [`components::pagination_bar::PaginationBar`] renders the same controls
//! from a yew tree. On wasm32 the `TablePagination` class is exported to
//! page scripts.
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod binding;
pub mod components;
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod js;
pub mod markup;
pub mod pager;

pub use binding::{DomControls, DomRow, DomTableHost};
pub use pager::{DomFilter, DomPagination, WebTablePagination};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
