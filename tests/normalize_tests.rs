// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use ledgerdesk::models::{Employee, Product, Transaction, TxnType};
use ledgerdesk::normalize::{Normalize, RawRecord};
use serde_json::json;

fn raw(v: serde_json::Value) -> RawRecord {
    v.as_object().unwrap().clone()
}

#[test]
fn canonical_fields_win_over_legacy_aliases() {
    let t = Transaction::from_raw(&raw(json!({
        "Id": 7,
        "amount_c": 120.5,
        "amount": 99,
        "category_c": "Rent",
        "category": "Other",
        "type_c": "expense",
        "date_c": "2025-03-14",
        "description_c": "March rent"
    })));
    assert_eq!(t.id, Some(7));
    assert_eq!(t.amount, 120.5);
    assert_eq!(t.category, "Rent");
    assert_eq!(t.kind, Some(TxnType::Expense));
    assert_eq!(t.date, NaiveDate::from_ymd_opt(2025, 3, 14));
    assert_eq!(t.name, "March rent");
}

#[test]
fn legacy_aliases_fill_missing_or_empty_canonical_fields() {
    let t = Transaction::from_raw(&raw(json!({
        "amount_c": 0,
        "amount": "42.10",
        "category_c": "",
        "category": "Utilities",
        "type": "Income",
        "date": "2025-07-01T10:30:00Z",
        "relatedOrderId": "15"
    })));
    assert_eq!(t.amount, 42.10);
    assert_eq!(t.category, "Utilities");
    assert_eq!(t.kind, Some(TxnType::Income));
    assert_eq!(t.date, NaiveDate::from_ymd_opt(2025, 7, 1));
    assert_eq!(t.related_order_id, Some(15));
}

#[test]
fn missing_and_malformed_values_take_type_defaults() {
    let t = Transaction::from_raw(&raw(json!({
        "amount_c": "not a number",
        "date_c": "someday",
        "type_c": "transfer"
    })));
    assert_eq!(t.id, None);
    assert_eq!(t.amount, 0.0);
    assert_eq!(t.category, "");
    assert_eq!(t.date, None);
    assert_eq!(t.kind, None);
    assert_eq!(t.related_order_id, None);
}

#[test]
fn product_numbers_and_lookup_references() {
    let p = Product::from_raw(&raw(json!({
        "Id": "3",
        "Name": "Desk",
        "price_c": "250",
        "cost": 100.0,
        "stockLevel": 4.9,
        "reorder_point_c": 5,
        "category_c": {"Id": 2, "Name": "Furniture"}
    })));
    assert_eq!(p.id, Some(3));
    assert_eq!(p.price, 250.0);
    assert_eq!(p.cost, 100.0);
    assert_eq!(p.stock_level, 4);
    assert_eq!(p.reorder_point, 5);
    assert_eq!(p.category, "Furniture");
    assert_eq!(p.unit, "");
}

#[test]
fn employee_name_falls_back_to_first_and_last() {
    let e = Employee::from_raw(&raw(json!({
        "first_name_c": "Ada",
        "lastName": "Lovelace",
        "department_id_c": {"Id": 9, "Name": "Engineering"},
        "salary_c": "5000"
    })));
    assert_eq!(e.name, "Ada Lovelace");
    assert_eq!(e.department_id, Some(9));
    assert_eq!(e.salary, 5000.0);
}

#[test]
fn to_raw_writes_canonical_names_only() {
    let t = Transaction {
        id: Some(4),
        amount: 10.0,
        description: "Coffee".into(),
        kind: Some(TxnType::Expense),
        date: NaiveDate::from_ymd_opt(2025, 1, 2),
        ..Transaction::default()
    };
    let r = t.to_raw();
    assert_eq!(r["Id"], json!(4));
    assert_eq!(r["Name"], json!("Coffee"));
    assert_eq!(r["type_c"], json!("expense"));
    assert_eq!(r["date_c"], json!("2025-01-02"));
    assert!(!r.contains_key("amount"));
    assert_eq!(Transaction::from_raw(&r).amount, 10.0);
}
