//! Markup for the page-button list, shared by the DOM binding and the yew bar.
//!
//! Each button is `<li class="page-item ..."><a class="page-link" href="#">`.
//! Enabled buttons carry their action in `data-page-action`; disabled ones
//! carry nothing, so clicking them cannot do anything.
use tablepager_core::{ButtonStrip, PageAction, PageButton};

/// Attribute holding the encoded [`PageAction`] of an enabled button.
pub const ACTION_ATTR: &str = "data-page-action";

/// Class list for a button's `<li>`.
#[must_use]
pub fn item_class(button: &PageButton) -> String {
    let mut class = String::from("page-item");
    if button.active {
        class.push_str(" active");
    }
    if button.disabled {
        class.push_str(" disabled");
    }
    class
}

/// Caret icon for the previous/next buttons.
#[must_use]
pub const fn caret_icon(action: PageAction) -> Option<&'static str> {
    match action {
        PageAction::Previous => Some("ph ph-caret-left"),
        PageAction::Next => Some("ph ph-caret-right"),
        PageAction::Page(_) => None,
    }
}

/// Accessible label for a button.
#[must_use]
pub fn aria_label(action: PageAction) -> String {
    match action {
        PageAction::Previous => "Previous page".to_string(),
        PageAction::Next => "Next page".to_string(),
        PageAction::Page(page) => format!("Page {page}"),
    }
}

/// HTML for a single button.
#[must_use]
pub fn button_markup(button: &PageButton) -> String {
    let inner = caret_icon(button.kind).map_or_else(
        || button.page().unwrap_or_default().to_string(),
        |icon| format!(r#"<i class="{icon}"></i>"#),
    );
    let action = button
        .action()
        .map(|action| format!(r#" {ACTION_ATTR}="{}""#, action.token()))
        .unwrap_or_default();
    format!(
        r##"<li class="{}"><a class="page-link" href="#" aria-label="{}"{action}>{inner}</a></li>"##,
        item_class(button),
        aria_label(button.kind),
    )
}

/// HTML for the whole strip; empty for an empty strip.
#[must_use]
pub fn strip_markup(strip: &ButtonStrip) -> String {
    strip.buttons().iter().map(button_markup).collect()
}
