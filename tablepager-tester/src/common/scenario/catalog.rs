//! Built-in scenarios. Each runs against an in-memory table sized and
//! filled from the iteration's RNG.
use anyhow::{Result, ensure};
use rand::Rng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use tablepager_core::{
    ActiveFilters, CustomFilter, DEFAULT_PAGINATION_SELECTOR, DEFAULT_SEARCH_FIELDS,
    DEFAULT_TABLE_SELECTOR, HeadlessControls, HeadlessRow, HeadlessTable, MAX_PAGE_BUTTONS,
    PageGroup, PageGroupQuery, PaginationOptions, RowView, TablePagination, page_window,
};

use super::TestScenario;
use crate::logic::checks::{Pager, check_invariants};

pub const CATALOG: &[TestScenario] = &[
    TestScenario {
        key: "smoke",
        name: "Smoke",
        description: "Attach to a random table and check the first render",
        run: smoke,
    },
    TestScenario {
        key: "first-last-page",
        name: "First and last page",
        description: "25 rows at 10 per page: status, slice and disabled ends",
        run: first_last_page,
    },
    TestScenario {
        key: "search",
        name: "Search",
        description: "Search results match a brute-force scan of name and email",
        run: search,
    },
    TestScenario {
        key: "custom-filter",
        name: "Custom filter",
        description: "Search composed with a role filter through named filter values",
        run: custom_filter,
    },
    TestScenario {
        key: "reset",
        name: "Reset",
        description: "Reset after random filtering restores every row on page 1",
        run: reset,
    },
    TestScenario {
        key: "page-window",
        name: "Page window",
        description: "Button window width, membership and end pull-back",
        run: window,
    },
    TestScenario {
        key: "random-walk",
        name: "Random walk",
        description: "Random operation sequences keep every invariant",
        run: random_walk,
    },
    TestScenario {
        key: "page-group",
        name: "Page group",
        description: "Server-side page groups cover the requested page",
        run: page_group,
    },
];

const ROLES: [&str; 3] = ["admin", "editor", "viewer"];
const TERMS: [&str; 8] = ["", "user", "USER 1", "2@", "example", "3", "nobody", " "];
const ROLE_LOCATOR: &str = ".users-cell-role";

struct Fixture {
    names: Vec<String>,
    emails: Vec<String>,
    roles: Vec<&'static str>,
}

impl Fixture {
    fn random(rng: &mut ChaCha20Rng, max_rows: usize) -> Self {
        let count = rng.gen_range(0..=max_rows);
        let roles = (0..count)
            .map(|_| ROLES[rng.gen_range(0..ROLES.len())])
            .collect();
        Self {
            names: (1..=count).map(|i| format!("User {i}")).collect(),
            emails: (1..=count).map(|i| format!("user{i}@example.com")).collect(),
            roles,
        }
    }

    fn len(&self) -> usize {
        self.names.len()
    }

    fn rows(&self) -> Vec<HeadlessRow> {
        (0..self.len())
            .map(|i| {
                HeadlessRow::new()
                    .with_field(DEFAULT_SEARCH_FIELDS[0], &self.names[i])
                    .with_field(DEFAULT_SEARCH_FIELDS[1], &self.emails[i])
                    .with_field(ROLE_LOCATOR, self.roles[i])
            })
            .collect()
    }

    fn table(&self) -> HeadlessTable {
        HeadlessTable::new()
            .with_table(DEFAULT_TABLE_SELECTOR, self.rows())
            .with_controls(DEFAULT_PAGINATION_SELECTOR, HeadlessControls::new())
    }

    fn search_hits(&self, term: &str) -> Vec<bool> {
        let term = term.to_lowercase();
        (0..self.len())
            .map(|i| {
                self.names[i].to_lowercase().contains(&term)
                    || self.emails[i].to_lowercase().contains(&term)
            })
            .collect()
    }
}

fn role_filter() -> CustomFilter<HeadlessRow> {
    Box::new(|row: &HeadlessRow, filters: &ActiveFilters| {
        filters
            .get("role")
            .is_none_or(|role| row.field_text(ROLE_LOCATOR).as_deref() == Some(role))
    })
}

fn attach(fixture: &Fixture, per_page: usize, filter: Option<CustomFilter<HeadlessRow>>) -> Pager {
    let options = PaginationOptions {
        items_per_page: per_page,
        ..PaginationOptions::default()
    };
    TablePagination::attach(&fixture.table(), &options, filter)
}

fn smoke(rng: &mut ChaCha20Rng) -> Result<()> {
    let fixture = Fixture::random(rng, 60);
    let per_page = rng.gen_range(1..=15);
    let pager = attach(&fixture, per_page, None);

    ensure!(pager.row_count() == fixture.len(), "snapshot size");
    ensure!(pager.current_page() == 1, "starts on page 1");
    ensure!(pager.filtered_count() == fixture.len(), "everything matches");
    check_invariants(&pager)
}

fn first_last_page(_rng: &mut ChaCha20Rng) -> Result<()> {
    let mut pager = TablePagination::attach(
        &HeadlessTable::with_names(25),
        &PaginationOptions::default(),
        None,
    );
    ensure!(pager.showing().to_string() == "1-10", "first page status");
    ensure!(
        pager.buttons().previous().is_some_and(|b| b.disabled),
        "previous disabled on page 1"
    );

    pager.previous_page();
    ensure!(pager.current_page() == 1, "previous on page 1 stays put");

    pager.next_page();
    pager.next_page();
    ensure!(pager.current_page() == 3, "two nexts reach page 3");
    ensure!(pager.showing().to_string() == "21-25", "last page status");
    ensure!(pager.visible_indices() == [20, 21, 22, 23, 24], "last slice");
    ensure!(
        pager.buttons().next().is_some_and(|b| b.disabled),
        "next disabled on last page"
    );

    pager.go_to_page(99);
    ensure!(pager.current_page() == 3, "out of range page is clamped");
    check_invariants(&pager)
}

fn search(rng: &mut ChaCha20Rng) -> Result<()> {
    let fixture = Fixture::random(rng, 80);
    let mut pager = attach(&fixture, rng.gen_range(1..=12), None);
    let term = *TERMS.choose(rng).unwrap_or(&"");

    pager.apply_search_filter(term, &DEFAULT_SEARCH_FIELDS);
    let expected = fixture.search_hits(term).into_iter().filter(|&hit| hit).count();
    ensure!(
        pager.filtered_count() == expected,
        "search {term:?}: {} rows, expected {expected}",
        pager.filtered_count()
    );
    ensure!(pager.current_page() == 1, "search returns to page 1");
    check_invariants(&pager)
}

fn custom_filter(rng: &mut ChaCha20Rng) -> Result<()> {
    let fixture = Fixture::random(rng, 80);
    let mut pager = attach(&fixture, rng.gen_range(1..=12), Some(role_filter()));
    let term = *TERMS.choose(rng).unwrap_or(&"");
    let role = *ROLES.choose(rng).unwrap_or(&"admin");

    pager.go_to_page(rng.gen_range(1..=4));
    pager.set_filter("role", role);
    ensure!(pager.current_page() == 1, "set_filter returns to page 1");
    pager.apply_search_filter(term, &DEFAULT_SEARCH_FIELDS);

    let expected = fixture
        .search_hits(term)
        .into_iter()
        .zip(&fixture.roles)
        .filter(|(hit, r)| *hit && **r == role)
        .count();
    ensure!(
        pager.filtered_count() == expected,
        "search {term:?} role {role}: {} rows, expected {expected}",
        pager.filtered_count()
    );

    // Same value again changes nothing.
    let before = pager.visible_indices().to_vec();
    pager.set_filter("role", role);
    ensure!(pager.visible_indices() == before, "set_filter is idempotent");
    check_invariants(&pager)
}

fn reset(rng: &mut ChaCha20Rng) -> Result<()> {
    let fixture = Fixture::random(rng, 60);
    let mut pager = attach(&fixture, rng.gen_range(1..=10), Some(role_filter()));
    for _ in 0..rng.gen_range(1..6) {
        match rng.gen_range(0..3) {
            0 => pager.apply_search_filter(
                TERMS.choose(rng).unwrap_or(&""),
                &DEFAULT_SEARCH_FIELDS,
            ),
            1 => pager.set_filter("role", *ROLES.choose(rng).unwrap_or(&"viewer")),
            _ => pager.next_page(),
        }
    }

    pager.reset();
    ensure!(pager.current_page() == 1, "reset returns to page 1");
    ensure!(pager.active_filters().is_empty(), "reset clears named filters");
    ensure!(pager.filtered_count() == fixture.len(), "reset restores every row");
    let visible = pager.visible_indices().to_vec();
    pager.reset();
    ensure!(pager.visible_indices() == visible, "reset is idempotent");
    check_invariants(&pager)
}

fn window(rng: &mut ChaCha20Rng) -> Result<()> {
    let total = rng.gen_range(1..=200);
    let current = rng.gen_range(1..=total);
    let pages = page_window(current, total);
    let (start, end) = (*pages.start(), *pages.end());

    ensure!(
        end - start + 1 == total.min(MAX_PAGE_BUTTONS),
        "window {start}..={end} for {total} pages"
    );
    ensure!(pages.contains(&current), "window {start}..={end} misses {current}");
    ensure!(start >= 1 && end <= total, "window {start}..={end} out of bounds");
    if current + MAX_PAGE_BUTTONS / 2 >= total {
        ensure!(end == total, "window near the end must reach {total}");
    }
    Ok(())
}

fn random_walk(rng: &mut ChaCha20Rng) -> Result<()> {
    let fixture = Fixture::random(rng, 120);
    let mut pager = attach(&fixture, rng.gen_range(1..=15), Some(role_filter()));
    check_invariants(&pager)?;

    for _ in 0..40 {
        match rng.gen_range(0..7) {
            0 => pager.previous_page(),
            1 => pager.next_page(),
            2 => pager.go_to_page(rng.gen_range(0..20)),
            3 => pager.apply_search_filter(
                TERMS.choose(rng).unwrap_or(&""),
                &DEFAULT_SEARCH_FIELDS,
            ),
            4 => pager.set_filter("role", *ROLES.choose(rng).unwrap_or(&"editor")),
            5 => pager.reset(),
            _ => {
                if let Some(button) = pager.buttons().buttons().choose(rng).copied() {
                    pager.press(&button);
                }
            }
        }
        check_invariants(&pager)?;
    }
    Ok(())
}

fn page_group(rng: &mut ChaCha20Rng) -> Result<()> {
    let total = rng.gen_range(0..=500);
    let page = rng.gen_range(0..=60);
    let group_size = rng.gen_range(0..=10);
    let row_size = rng.gen_range(0..=25);
    let group = PageGroup::compute(total, page, group_size, row_size);
    let effective_group = if group_size == 0 { 5 } else { group_size.unsigned_abs() };

    ensure!(
        (1..=group.total_pages).contains(&group.page),
        "page {} outside 1..={}",
        group.page,
        group.total_pages
    );
    ensure!(
        group.start_page <= group.page && group.page <= group.end_page,
        "group {}..={} misses page {}",
        group.start_page,
        group.end_page,
        group.page
    );
    ensure!(
        group.end_page - group.start_page < effective_group,
        "group wider than {effective_group}"
    );
    ensure!(
        (group.start_page - 1) % effective_group == 0,
        "group starts at {}",
        group.start_page
    );
    ensure!(group.offset == (group.page - 1) * group.row_size, "offset");
    ensure!(group.has_prev == (group.start_page > 1), "has_prev");
    ensure!(group.has_next == (group.end_page < group.total_pages), "has_next");
    if group.has_next {
        ensure!(group.next_page == group.end_page + 1, "next group link");
    }
    if group.has_prev {
        ensure!(group.prev_page == group.start_page - 1, "previous group link");
    }

    check_query_parsing(rng, total, page, group_size, row_size)
}

/// The same inputs as query-string text: a parsed zero is raised to the
/// minimum, a blank value takes the default, junk resets everything.
fn check_query_parsing(
    rng: &mut ChaCha20Rng,
    total: i64,
    page: i64,
    group_size: i64,
    row_size: i64,
) -> Result<()> {
    let mut text = |value: i64| {
        if rng.gen_bool(0.2) {
            String::new()
        } else {
            value.to_string()
        }
    };
    let query = PageGroupQuery {
        total: Some(text(total)),
        page: Some(text(page)),
        page_group_size: Some(text(group_size)),
        row_size: Some(text(row_size)),
    };
    let or = |raw: &Option<String>, value: i64, default: i64| {
        if raw.as_deref() == Some("") {
            default
        } else {
            value
        }
    };
    let expected = PageGroup::compute(
        or(&query.total, total, 0),
        or(&query.page, page, 1).max(1),
        or(&query.page_group_size, group_size, 5).max(1),
        or(&query.row_size, row_size, 10).max(1),
    );
    let parsed = PageGroup::from_query(&query);
    ensure!(
        parsed == expected,
        "query {query:?} gave {parsed:?}, expected {expected:?}"
    );

    let junk = PageGroupQuery {
        page: Some("next".to_string()),
        ..query
    };
    ensure!(
        PageGroup::from_query(&junk) == PageGroup::compute(0, 1, 5, 10),
        "unparseable page must reset every input"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn every_scenario_passes_for_a_few_seeds() {
        for scenario in CATALOG {
            for seed in 0..8_u64 {
                let mut rng = ChaCha20Rng::seed_from_u64(seed);
                if let Err(err) = scenario.run_once(&mut rng) {
                    panic!("{} failed for seed {seed}: {err:#}", scenario.key);
                }
            }
        }
    }

    #[test]
    fn fixture_search_is_case_insensitive() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let fixture = Fixture {
            names: vec!["User 1".into(), "Other".into()],
            emails: vec!["user1@example.com".into(), "x@y.z".into()],
            roles: vec!["admin", "viewer"],
        };
        assert_eq!(fixture.search_hits("USER"), vec![true, false]);
        assert!(Fixture::random(&mut rng, 5).len() <= 5);
    }
}
