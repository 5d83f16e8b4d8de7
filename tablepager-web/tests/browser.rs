#![cfg(target_arch = "wasm32")]

use tablepager_core::{ActiveFilters, DEFAULT_SEARCH_FIELDS, PaginationOptions, RowView};
use tablepager_web::js::JsTablePagination;
use tablepager_web::pager::DomFilter;
use tablepager_web::{DomRow, WebTablePagination, dom};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn mount_table(rows: usize) {
    let doc = dom::document().expect("document");
    let body = doc.body().expect("document body");
    let rows_html: String = (1..=rows)
        .map(|i| {
            let role = if i % 2 == 0 { "admin" } else { "member" };
            format!(
                r#"<tr><td class="users-cell-name">User {i}</td><td class="users-cell-email">user{i}@example.com</td><td class="users-cell-role">{role}</td></tr>"#
            )
        })
        .collect();
    body.set_inner_html(&format!(
        r#"<table class="users-table"><tbody>{rows_html}</tbody></table>
        <div id="usersPagination"><span id="showingRange"></span><span id="totalCount"></span><ul class="pagination"></ul></div>"#
    ));
}

fn text(selector: &str) -> String {
    dom::query(selector)
        .and_then(|el| el.text_content())
        .unwrap_or_default()
}

fn display(selector: &str) -> String {
    dom::query(selector)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .and_then(|el| el.style().get_property_value("display").ok())
        .unwrap_or_default()
}

fn click(selector: &str) {
    dom::query(selector)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .expect("clickable element")
        .click();
}

#[wasm_bindgen_test]
fn attaches_and_shows_first_page() {
    mount_table(25);
    let pager = WebTablePagination::attach(&PaginationOptions::default(), None).expect("pager");

    assert_eq!(pager.current_page(), 1);
    assert_eq!(text("#showingRange"), "1-10");
    assert_eq!(text("#totalCount"), "25");
    assert_eq!(display("tbody tr:nth-child(10)"), "");
    assert_eq!(display("tbody tr:nth-child(11)"), "none");
    assert_eq!(display("#usersPagination"), "flex");
}

#[wasm_bindgen_test]
fn clicking_next_moves_a_page() {
    mount_table(25);
    let pager = WebTablePagination::attach(&PaginationOptions::default(), None).expect("pager");

    click(r#"[data-page-action="next"]"#);
    assert_eq!(pager.current_page(), 2);
    assert_eq!(text("#showingRange"), "11-20");
    assert_eq!(display("tbody tr:nth-child(1)"), "none");
    assert_eq!(display("tbody tr:nth-child(11)"), "");

    // Page-number buttons are re-rendered; click the freshly drawn one.
    click(r#"[data-page-action="3"]"#);
    assert_eq!(pager.current_page(), 3);
    assert_eq!(text("#showingRange"), "21-25");
}

#[wasm_bindgen_test]
fn disabled_previous_is_inert() {
    mount_table(25);
    let pager = WebTablePagination::attach(&PaginationOptions::default(), None).expect("pager");

    click(".pagination .page-item.disabled .page-link");
    assert_eq!(pager.current_page(), 1);
}

#[wasm_bindgen_test]
fn search_and_custom_filter_compose() {
    mount_table(25);
    let filter: DomFilter = Box::new(|row: &DomRow, filters: &ActiveFilters| {
        filters.get("role").is_none_or(|role| {
            row.field_text(".users-cell-role").as_deref() == Some(role)
        })
    });
    let pager =
        WebTablePagination::attach(&PaginationOptions::default(), Some(filter)).expect("pager");

    pager.set_filter("role", "admin");
    assert_eq!(text("#totalCount"), "12");

    pager.apply_search_filter("user1", &DEFAULT_SEARCH_FIELDS);
    // user1, user10, user12, ..., user18 that are admins: 10, 12, 14, 16, 18
    assert_eq!(text("#totalCount"), "5");
    assert_eq!(text("#showingRange"), "1-5");
    assert!(pager.with(|p| p.buttons().is_empty()));

    pager.apply_search_filter("nobody", &DEFAULT_SEARCH_FIELDS);
    assert_eq!(text("#showingRange"), "0-0");
    assert_eq!(display("#usersPagination"), "none");

    pager.reset();
    assert_eq!(text("#totalCount"), "25");
    assert!(pager.active_filters().is_empty());
}

#[wasm_bindgen_test]
fn throwing_custom_filter_rejects_and_skips_render() {
    mount_table(25);
    let options = js_sys::Object::new();
    let predicate = js_sys::Function::new_with_args(
        "row, filters",
        "if (filters.role === 'boom') { throw new Error('bad predicate'); } return true;",
    );
    js_sys::Reflect::set(&options, &"customFilter".into(), &predicate).expect("set option");
    let pager = JsTablePagination::new(options.into()).expect("pager");
    click(r#"[data-page-action="next"]"#);
    assert_eq!(text("#showingRange"), "11-20");

    let err = pager.set_filter("role", "boom").expect_err("predicate error");
    assert_eq!(dom::js_error_message(&err), "bad predicate");
    assert_eq!(text("#showingRange"), "11-20");
    assert_eq!(text("#totalCount"), "25");

    pager.set_filter("role", "fine").expect("second pass");
    assert_eq!(pager.current_page(), 1);
    assert_eq!(text("#showingRange"), "1-10");
}
