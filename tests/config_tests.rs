// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use ledgerdesk::commands::doctor;
use ledgerdesk::config::Settings;
use ledgerdesk::normalize::RawRecord;
use ledgerdesk::store::{RecordStore, SqliteStore};
use serde_json::json;

fn raw(v: serde_json::Value) -> RawRecord {
    v.as_object().unwrap().clone()
}

#[test]
fn settings_default_then_persist() {
    let store = SqliteStore::open_in_memory().unwrap();
    let conn = store.conn();
    assert_eq!(Settings::load(conn).unwrap(), Settings::default());

    Settings::set(conn, "page_size", " 50 ").unwrap();
    Settings::set(conn, "currency", "eur").unwrap();
    let s = Settings::load(conn).unwrap();
    assert_eq!(s.page_size, 50);
    assert_eq!(s.currency, "EUR");
}

#[test]
fn settings_reject_bad_values() {
    let store = SqliteStore::open_in_memory().unwrap();
    let conn = store.conn();
    assert!(Settings::set(conn, "page_size", "0").is_err());
    assert!(Settings::set(conn, "page_size", "lots").is_err());
    assert!(Settings::set(conn, "currency", "  ").is_err());
    assert!(Settings::set(conn, "theme", "dark").is_err());
    assert_eq!(Settings::load(conn).unwrap(), Settings::default());
}

#[test]
fn doctor_flags_records_reports_would_skip() {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .create(
            "transaction_c",
            vec![
                raw(json!({"description_c": "no date", "type_c": "income", "amount_c": 1})),
                raw(json!({"description_c": "odd", "type_c": "refund", "date_c": "2025-01-01"})),
                raw(json!({"description_c": "fine", "type_c": "expense", "date_c": "2025-01-01"})),
            ],
        )
        .unwrap();
    store
        .create("product_c", vec![raw(json!({"name_c": "Freebie", "price_c": 0}))])
        .unwrap();

    let issues: Vec<String> = doctor::find_issues(&store)
        .into_iter()
        .map(|row| row[0].clone())
        .collect();
    assert_eq!(issues.len(), 3);
    assert!(issues.contains(&"txn_missing_date".to_string()));
    assert!(issues.contains(&"txn_unknown_type".to_string()));
    assert!(issues.contains(&"product_zero_price".to_string()));
}

#[test]
fn doctor_is_quiet_on_clean_data() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert!(doctor::find_issues(&store).is_empty());
}
