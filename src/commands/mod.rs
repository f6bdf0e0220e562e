// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod departments;
pub mod doctor;
pub mod employees;
pub mod exporter;
pub mod importer;
pub mod products;
pub mod reports;
pub mod settings;
pub mod transactions;

use crate::config::Settings;
use crate::filter::{Criteria, distinct_values, filter};
use crate::models::FieldAccess;
use crate::paginate::{Page, PageState, SortDirection, sort_by_field};

/// Filter, sort and page a record list according to the shared list flags.
pub fn list_page<T: FieldAccess + Clone>(
    records: &[T],
    criteria: &Criteria,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Page<T> {
    let filtered = filter(records, criteria);
    let sorted = match sub.get_one::<String>("sort") {
        Some(key) => {
            let dir = if sub.get_flag("desc") {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            sort_by_field(&filtered, key, dir)
        }
        None => filtered,
    };
    let page_size = sub
        .get_one::<usize>("page-size")
        .copied()
        .unwrap_or(settings.page_size);
    let mut state = PageState::new(page_size);
    state.go_to(sub.get_one::<usize>("page").copied().unwrap_or(1));
    state.apply(&sorted)
}

pub fn page_footer<T>(page: &Page<T>) -> String {
    let (start, end) = page.range();
    format!(
        "Showing {} to {} of {} results (page {} of {})",
        start, end, page.total_items, page.page, page.total_pages
    )
}

/// One row per distinct category, in first-seen order.
pub fn print_categories<T: FieldAccess>(
    records: &[T],
    sub: &clap::ArgMatches,
) -> anyhow::Result<()> {
    let values = distinct_values(records, "category");
    if !crate::utils::maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &values)? {
        let rows = values.into_iter().map(|v| vec![v]).collect();
        println!("{}", crate::utils::pretty_table(&["Category"], rows));
    }
    Ok(())
}
