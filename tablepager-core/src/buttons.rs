//! Page-button strip: previous, a sliding window of page numbers, next.
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Widest run of page-number buttons shown at once.
pub const MAX_PAGE_BUTTONS: usize = 7;

/// What a button does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageAction {
    Previous,
    Page(usize),
    Next,
}

impl PageAction {
    /// Attribute-friendly encoding: `prev`, `next` or the page number.
    #[must_use]
    pub fn token(self) -> String {
        match self {
            Self::Previous => "prev".to_string(),
            Self::Next => "next".to_string(),
            Self::Page(page) => page.to_string(),
        }
    }

    /// Inverse of [`PageAction::token`]. Page numbers must be positive.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "prev" => Some(Self::Previous),
            "next" => Some(Self::Next),
            other => other
                .parse::<usize>()
                .ok()
                .filter(|page| *page > 0)
                .map(Self::Page),
        }
    }
}

/// One rendered button.
///
/// A disabled button has no action at all, so activating it does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageButton {
    pub kind: PageAction,
    pub active: bool,
    pub disabled: bool,
}

impl PageButton {
    /// The action bound to this button, absent when disabled.
    #[must_use]
    pub const fn action(&self) -> Option<PageAction> {
        if self.disabled {
            None
        } else {
            Some(self.kind)
        }
    }

    /// Page number for numbered buttons.
    #[must_use]
    pub const fn page(&self) -> Option<usize> {
        match self.kind {
            PageAction::Page(page) => Some(page),
            PageAction::Previous | PageAction::Next => None,
        }
    }
}

/// Full left-to-right button strip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ButtonStrip(Vec<PageButton>);

impl ButtonStrip {
    /// Build the strip for `current_page` of `total_pages`.
    #[must_use]
    pub fn build(current_page: usize, total_pages: usize) -> Self {
        let window = page_window(current_page, total_pages);
        let mut buttons = Vec::with_capacity(window.clone().count() + 2);

        buttons.push(PageButton {
            kind: PageAction::Previous,
            active: false,
            disabled: current_page <= 1,
        });
        buttons.extend(window.map(|page| PageButton {
            kind: PageAction::Page(page),
            active: page == current_page,
            disabled: false,
        }));
        buttons.push(PageButton {
            kind: PageAction::Next,
            active: false,
            disabled: total_pages == 0 || current_page >= total_pages,
        });

        Self(buttons)
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn buttons(&self) -> &[PageButton] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Page numbers shown in the window, in order.
    #[must_use]
    pub fn page_numbers(&self) -> Vec<usize> {
        self.0.iter().filter_map(PageButton::page).collect()
    }

    #[must_use]
    pub fn previous(&self) -> Option<&PageButton> {
        self.0.iter().find(|b| b.kind == PageAction::Previous)
    }

    #[must_use]
    pub fn next(&self) -> Option<&PageButton> {
        self.0.iter().find(|b| b.kind == PageAction::Next)
    }

    /// The page marked active, if any.
    #[must_use]
    pub fn active_page(&self) -> Option<usize> {
        self.0.iter().find(|b| b.active).and_then(PageButton::page)
    }
}

/// Contiguous run of page numbers to show, at most [`MAX_PAGE_BUTTONS`] wide.
///
/// Centered on `current_page` where possible; when the end is clamped to
/// `total_pages` the start is pulled back to keep the window full. Empty when
/// `total_pages` is zero.
#[must_use]
pub fn page_window(current_page: usize, total_pages: usize) -> RangeInclusive<usize> {
    let half = MAX_PAGE_BUTTONS / 2;
    let mut start = current_page.saturating_sub(half).max(1);
    let end = total_pages.min(start.saturating_add(MAX_PAGE_BUTTONS - 1));

    if end.saturating_sub(start) < MAX_PAGE_BUTTONS - 1 {
        start = end.saturating_sub(MAX_PAGE_BUTTONS - 1).max(1);
    }

    start..=end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_centered_when_room() {
        assert_eq!(page_window(10, 20), 7..=13);
    }

    #[test]
    fn window_pulls_back_at_the_end() {
        assert_eq!(page_window(10, 10), 4..=10);
        assert_eq!(page_window(9, 10), 4..=10);
    }

    #[test]
    fn window_at_start_and_small_totals() {
        assert_eq!(page_window(1, 15), 1..=7);
        assert_eq!(page_window(2, 3), 1..=3);
        assert_eq!(page_window(1, 1), 1..=1);
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn window_near_usize_max_stays_full() {
        assert_eq!(
            page_window(usize::MAX, usize::MAX),
            usize::MAX - 6..=usize::MAX
        );
        assert_eq!(
            page_window(usize::MAX - 1, usize::MAX),
            usize::MAX - 6..=usize::MAX
        );
        let strip = ButtonStrip::build(usize::MAX, usize::MAX);
        assert_eq!(strip.page_numbers().len(), MAX_PAGE_BUTTONS);
        assert_eq!(strip.active_page(), Some(usize::MAX));
        assert!(strip.next().unwrap().disabled);
    }

    #[test]
    fn tokens_round_trip_and_reject_zero() {
        for action in [PageAction::Previous, PageAction::Next, PageAction::Page(12)] {
            assert_eq!(PageAction::from_token(&action.token()), Some(action));
        }
        assert_eq!(PageAction::from_token("0"), None);
        assert_eq!(PageAction::from_token("first"), None);
    }

    #[test]
    fn strip_for_first_of_three() {
        let strip = ButtonStrip::build(1, 3);
        assert_eq!(strip.page_numbers(), vec![1, 2, 3]);
        assert!(strip.previous().unwrap().disabled);
        assert!(!strip.next().unwrap().disabled);
        assert_eq!(strip.active_page(), Some(1));
        assert_eq!(strip.previous().unwrap().action(), None);
        assert_eq!(strip.next().unwrap().action(), Some(PageAction::Next));
    }

    #[test]
    fn strip_with_zero_pages_disables_both_ends() {
        let strip = ButtonStrip::build(1, 0);
        assert!(strip.page_numbers().is_empty());
        assert!(strip.previous().unwrap().disabled);
        assert!(strip.next().unwrap().disabled);
        assert_eq!(strip.active_page(), None);
    }
}
