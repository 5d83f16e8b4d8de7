use tablepager_core::{ButtonStrip, PageAction, PageButton, ShowingRange};
use yew::prelude::*;

use crate::markup::{aria_label, caret_icon, item_class};

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub strip: ButtonStrip,
    pub showing: ShowingRange,
    #[prop_or_default]
    pub on_action: Callback<PageAction>,
    #[prop_or_default]
    pub class: Classes,
}

fn page_item(button: &PageButton, on_action: &Callback<PageAction>) -> Html {
    let onclick = button.action().map(|action| {
        let cb = on_action.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            cb.emit(action);
        })
    });
    let label = caret_icon(button.kind).map_or_else(
        || html! { { button.page().unwrap_or_default() } },
        |icon| html! { <i class={icon} aria-hidden="true"></i> },
    );

    html! {
        <li class={item_class(button)} key={button.kind.token()}>
            <a
                class="page-link"
                href="#"
                aria-label={aria_label(button.kind)}
                aria-current={button.active.then_some("page")}
                aria-disabled={button.disabled.then_some("true")}
                {onclick}
            >
                { label }
            </a>
        </li>
    }
}

/// Status line plus page-button strip, rendered from engine state.
///
/// Hidden when nothing passes the filters; an empty strip leaves only the
/// status line.
#[function_component(PaginationBar)]
pub fn pagination_bar(p: &Props) -> Html {
    let style = if p.showing.total == 0 {
        "display:none"
    } else {
        "display:flex"
    };

    html! {
        <nav class={classes!("pagination-wrapper", p.class.clone())} {style} aria-label="Table pagination">
            <span class="pagination-info" aria-live="polite">
                <span class="showing-range">{ p.showing.to_string() }</span>
                { " / " }
                <span class="total-count">{ p.showing.total }</span>
            </span>
            <ul class="pagination">
                { for p.strip.buttons().iter().map(|b| page_item(b, &p.on_action)) }
            </ul>
        </nav>
    }
}
