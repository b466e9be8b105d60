//! Pipeline properties checked over a mixed fixture

use datatable::page::page_buttons;
use datatable::prelude::*;
use datatable::search::filter_rows;
use datatable::testing::json_rows;

fn mixed_rows() -> Vec<Row> {
    json_rows(
        r#"[
            {"name": "Zoé", "score": 12, "joined": "2021-04-01", "active": true},
            {"name": "adam", "score": "7", "joined": "03/02/2020"},
            {"name": "Élodie", "score": 12, "active": false},
            {"name": "bruno", "score": 3.5, "joined": "2019-12-31", "active": true},
            {"name": null, "score": -1, "joined": "not a date"},
            {"name": "Adèle", "joined": "01/01/2022", "active": false},
            {"name": "carl", "score": 40, "joined": "2020-06-15", "active": true},
            {"name": "Ève", "score": 12, "joined": "1899-01-01"},
            {"name": "dora", "score": 0, "joined": "2020-06-15", "active": false},
            {"name": "ben", "score": 25, "joined": "12-25-2020", "active": true},
            {"name": "Yann", "score": 125, "joined": "2018-01-01"}
        ]"#,
    )
}

fn table(per_page: usize) -> DataTable {
    table_with(per_page, InferenceMode::PerPair)
}

fn table_with(per_page: usize, inference: InferenceMode) -> DataTable {
    let config =
        TableConfig::from_json(&format!(r#"{{"rowsPerPageOptions":[{per_page}]}}"#)).unwrap();
    let state = TableState::new(mixed_rows(), vec![], config).with_inference(inference);
    DataTable::from_state(state)
}

fn sort_twice_matches_once(key: &str, descending: bool, inference: InferenceMode) {
    let mut table = table_with(100, inference);
    table.activate_sort(key);
    if descending {
        table.activate_sort(key);
    }
    let once = table.rows().to_vec();

    let mut again = table_with(100, inference);
    again.set_data(once.clone());
    again.activate_sort(key);
    if descending {
        again.activate_sort(key);
    }
    assert_eq!(again.rows(), once.as_slice(), "key {key}, desc {descending}");
}

#[test]
fn test_sorting_is_idempotent() {
    for key in ["name", "score", "active", "missing"] {
        for descending in [false, true] {
            sort_twice_matches_once(key, descending, InferenceMode::PerPair);
        }
    }
}

#[test]
fn test_sorting_mixed_dates_is_idempotent_per_column() {
    // Dates mixed with free text only order consistently when the kind is
    // chosen once for the whole column.
    for descending in [false, true] {
        sort_twice_matches_once("joined", descending, InferenceMode::PerColumn);
    }
}

#[test]
fn test_filter_is_monotonic() {
    let rows = mixed_rows();
    for base in ["a", "e", "1", "20", "tr", "é"] {
        let base_len = filter_rows(&rows, base).len();
        for extra in ["", "d", "0", "ue", "2"] {
            let longer = format!("{base}{extra}");
            assert!(
                filter_rows(&rows, &longer).len() <= base_len,
                "{longer:?} matched more rows than {base:?}"
            );
        }
    }
}

#[test]
fn test_pages_cover_view_exactly() {
    for per_page in [1, 2, 3, 4, 5, 10, 11, 50] {
        let mut table = table(per_page);
        table.set_search_term("a");
        table.activate_sort("score");

        let total_pages = table.pagination_summary().total_pages;
        let mut collected = Vec::new();
        for page in 1..=total_pages {
            table.select_page(page);
            collected.extend_from_slice(table.visible_rows());
        }
        assert_eq!(collected.as_slice(), table.rows(), "{per_page} per page");
    }
}

#[test]
fn test_page_buttons_invariants() {
    for total in 1..=60 {
        for current in 1..=total {
            let buttons = page_buttons(current, total);
            assert!(buttons.len() <= 7);
            assert_eq!(buttons.first(), Some(&PageButton::Page(1)));
            assert_eq!(buttons.last(), Some(&PageButton::Page(total)));
            assert!(buttons.contains(&PageButton::Page(current)));

            let current_at = buttons
                .iter()
                .position(|b| *b == PageButton::Page(current))
                .unwrap();
            let left = buttons[..current_at]
                .iter()
                .filter(|b| **b == PageButton::Ellipsis)
                .count();
            let right = buttons[current_at..]
                .iter()
                .filter(|b| **b == PageButton::Ellipsis)
                .count();
            assert!(left <= 1 && right <= 1, "{current}/{total}: {buttons:?}");
        }
    }
}

#[test]
fn test_per_column_inference_orders_mixed_numbers() {
    // Per pair, "7" and 12 compare numerically; per column everything is
    // numeric too, so both modes agree on a clean numeric column.
    let rows = json_rows(r#"[{"n":"7"},{"n":12},{"n":3.5},{"n":"100"}]"#);
    let state = TableState::new(rows, vec![], TableConfig::default())
        .with_inference(InferenceMode::PerColumn);
    let mut table = DataTable::from_state(state);
    table.activate_sort("n");
    let order: Vec<String> = table.rows().iter().map(|r| r.get("n").unwrap().to_string()).collect();
    assert_eq!(order, vec!["3.5", "7", "12", "100"]);
}

#[test]
fn test_ordinal_collator_is_injectable() {
    let rows = json_rows(r#"[{"k":"b"},{"k":"à"},{"k":"B"}]"#);
    let state = TableState::new(rows, vec![], TableConfig::default())
        .with_collator(std::sync::Arc::new(OrdinalCollator));
    let mut table = DataTable::from_state(state);
    table.activate_sort("k");
    let order: Vec<String> = table.rows().iter().map(|r| r.get("k").unwrap().to_string()).collect();
    assert_eq!(order, vec!["B", "b", "à"]);
}
