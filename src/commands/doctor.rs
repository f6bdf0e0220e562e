// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::services::{ProductService, TransactionService};
use crate::store::RecordStore;
use crate::utils::pretty_table;

/// `(issue, detail)` pairs for records that reports will skip or misread.
pub fn find_issues<S: RecordStore>(store: &S) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let id = |i: Option<i64>| i.map(|i| i.to_string()).unwrap_or_else(|| "?".into());

    for t in TransactionService::new(store).all() {
        // undated records never land in a monthly bucket
        if t.date.is_none() {
            rows.push(vec!["txn_missing_date".into(), format!("id {}", id(t.id))]);
        }
        if t.kind.is_none() {
            rows.push(vec!["txn_unknown_type".into(), format!("id {}", id(t.id))]);
        }
    }
    for p in ProductService::new(store).all() {
        if p.price == 0.0 {
            rows.push(vec![
                "product_zero_price".into(),
                format!("id {} '{}'", id(p.id), p.name),
            ]);
        }
    }
    rows
}

pub fn handle<S: RecordStore>(store: &S) -> Result<()> {
    let rows = find_issues(store);
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
