// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use ledgerdesk::normalize::RawRecord;
use ledgerdesk::paginate::SortDirection;
use ledgerdesk::store::{Query, RecordStore, SqliteStore};
use serde_json::json;

fn raw(v: serde_json::Value) -> RawRecord {
    v.as_object().unwrap().clone()
}

fn seeded() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .create(
            "transaction_c",
            vec![
                raw(json!({"Name": "Rent", "amount_c": 1000, "type_c": "expense"})),
                raw(json!({"Name": "Invoice", "amount_c": 2500, "type_c": "income"})),
                raw(json!({"Name": "Power", "amount_c": 80.5, "type_c": "expense"})),
            ],
        )
        .unwrap();
    store
        .create("product_c", vec![raw(json!({"Name": "Desk"}))])
        .unwrap();
    store
}

#[test]
fn create_returns_records_with_ids() {
    let store = SqliteStore::open_in_memory().unwrap();
    let resp = store
        .create("product_c", vec![raw(json!({"Name": "Chair", "price_c": 40}))])
        .unwrap();
    assert!(resp.success);
    assert_eq!(resp.results.len(), 1);
    let data = resp.results[0].data.as_ref().unwrap();
    assert!(data["Id"].as_i64().unwrap() > 0);
    assert_eq!(data["Name"], json!("Chair"));
    assert!(data.contains_key("CreatedOn"));
}

#[test]
fn list_is_scoped_to_table_and_filters() {
    let store = seeded();
    let all = store.list("transaction_c", &Query::new()).unwrap();
    assert!(all.success);
    assert_eq!(all.data.len(), 3);

    let expenses = store
        .list("transaction_c", &Query::new().eq("type_c", "expense"))
        .unwrap();
    assert_eq!(expenses.data.len(), 2);

    let none = store.list("unknown_c", &Query::new()).unwrap();
    assert!(none.success);
    assert!(none.data.is_empty());
}

#[test]
fn list_orders_and_pages() {
    let store = seeded();
    let q = Query::new()
        .order_by("amount_c", SortDirection::Desc)
        .limit(2);
    let resp = store.list("transaction_c", &q).unwrap();
    let names: Vec<_> = resp.data.iter().map(|r| r["Name"].clone()).collect();
    assert_eq!(names, vec![json!("Invoice"), json!("Rent")]);

    let q = Query::new()
        .order_by("amount_c", SortDirection::Desc)
        .limit(2)
        .offset(2);
    let resp = store.list("transaction_c", &q).unwrap();
    assert_eq!(resp.data.len(), 1);
    assert_eq!(resp.data[0]["Name"], json!("Power"));
}

#[test]
fn update_merges_fields_and_reports_missing_ids() {
    let store = seeded();
    let id = store.list("product_c", &Query::new()).unwrap().data[0]["Id"]
        .as_i64()
        .unwrap();
    let resp = store
        .update(
            "product_c",
            vec![
                raw(json!({"Id": id, "price_c": 300})),
                raw(json!({"Id": 9999, "price_c": 1})),
                raw(json!({"price_c": 1})),
            ],
        )
        .unwrap();
    assert!(resp.success);
    assert!(resp.results[0].success);
    assert!(!resp.results[1].success);
    assert!(!resp.results[2].success);

    let got = store.get("product_c", id).unwrap();
    assert_eq!(got.data[0]["Name"], json!("Desk"));
    assert_eq!(got.data[0]["price_c"], json!(300));
}

#[test]
fn delete_and_get_missing() {
    let store = seeded();
    let id = store.list("product_c", &Query::new()).unwrap().data[0]["Id"]
        .as_i64()
        .unwrap();
    let resp = store.delete("product_c", &[id, 4242]).unwrap();
    assert!(resp.results[0].success);
    assert!(!resp.results[1].success);

    let got = store.get("product_c", id).unwrap();
    assert!(!got.success);
    assert!(got.message.unwrap().contains("not found"));
}
