// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use ledgerdesk::aggregate::{
    category_profit_summary, expenses_by_category, in_year, low_margin, low_stock,
    monthly_cash_flow, product_margins, top_profitable, transaction_summary,
};
use ledgerdesk::models::{MarginStatus, Product, Transaction, TxnType};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn txn(date: &str, amount: f64, kind: TxnType, category: &str) -> Transaction {
    Transaction {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
        amount,
        kind: Some(kind),
        category: category.into(),
        ..Transaction::default()
    }
}

fn product(name: &str, category: &str, price: f64, cost: f64) -> Product {
    Product {
        name: name.into(),
        category: category.into(),
        price,
        cost,
        ..Product::default()
    }
}

#[test]
fn monthly_cash_flow_fills_all_twelve_months() {
    let records = vec![
        txn("2025-01-05", 1000.0, TxnType::Income, "Sales"),
        txn("2025-01-20", 300.0, TxnType::Expense, "Rent"),
        txn("2025-03-02", 50.0, TxnType::Expense, "Utilities"),
    ];
    let flow = monthly_cash_flow(&records);
    assert_eq!(flow.len(), 12);
    assert_eq!(flow[0].month, "Jan");
    assert_eq!(flow[11].month, "Dec");
    assert!(close(flow[0].income, 1000.0));
    assert!(close(flow[0].expenses, 300.0));
    assert!(close(flow[0].net_flow, 700.0));
    assert!(close(flow[1].net_flow, 0.0));
    assert!(close(flow[2].net_flow, -50.0));
}

#[test]
fn monthly_cash_flow_is_repeatable() {
    let records = vec![
        txn("2025-06-05", 10.0, TxnType::Income, ""),
        txn("2025-06-07", 4.0, TxnType::Expense, ""),
    ];
    assert_eq!(monthly_cash_flow(&records), monthly_cash_flow(&records));
}

#[test]
fn undated_and_untyped_records_are_skipped() {
    let mut undated = txn("2025-02-01", 99.0, TxnType::Income, "");
    undated.date = None;
    let mut untyped = txn("2025-02-01", 99.0, TxnType::Income, "");
    untyped.kind = None;
    let flow = monthly_cash_flow(&[undated, untyped]);
    assert!(flow.iter().all(|b| b.income == 0.0 && b.expenses == 0.0));
}

#[test]
fn in_year_excludes_other_years() {
    let records = vec![
        txn("2024-12-31", 5.0, TxnType::Income, ""),
        txn("2025-01-01", 7.0, TxnType::Income, ""),
    ];
    let kept = in_year(&records, 2025);
    assert_eq!(kept.len(), 1);
    assert!(close(kept[0].amount, 7.0));
}

#[test]
fn expenses_by_category_shares_sum_to_one_hundred() {
    let records = vec![
        txn("2025-01-01", 1000.0, TxnType::Expense, "Rent"),
        txn("2025-02-01", 1000.0, TxnType::Expense, "Rent"),
        txn("2025-02-03", 750.0, TxnType::Income, "Sales"),
        txn("2025-02-10", 500.0, TxnType::Expense, "Utilities"),
    ];
    let out = expenses_by_category(&records);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].category, "Rent");
    assert!(close(out[0].amount, 2000.0));
    assert!(close(out[0].percentage, 80.0));
    assert_eq!(out[1].category, "Utilities");
    assert!(close(out[1].percentage, 20.0));
    let total: f64 = out.iter().map(|c| c.percentage).sum();
    assert!(close(total, 100.0));
}

#[test]
fn expenses_by_category_keeps_first_seen_order_and_labels_blank() {
    let records = vec![
        txn("2025-01-01", 5.0, TxnType::Expense, "Travel"),
        txn("2025-01-02", 50.0, TxnType::Expense, ""),
        txn("2025-01-03", 5.0, TxnType::Expense, "Travel"),
    ];
    let out = expenses_by_category(&records);
    assert_eq!(out[0].category, "Travel");
    assert_eq!(out[1].category, "Uncategorized");
}

#[test]
fn zero_expense_total_gives_zero_percentages() {
    let records = vec![
        txn("2025-01-01", 0.0, TxnType::Expense, "Rent"),
        txn("2025-01-02", 0.0, TxnType::Expense, "Fees"),
    ];
    let out = expenses_by_category(&records);
    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|c| c.percentage == 0.0));
    assert!(expenses_by_category(&[]).is_empty());
}

#[test]
fn product_margins_sorted_with_statuses() {
    let out = product_margins(&[
        product("Widget", "Parts", 50.0, 45.0),
        product("Gadget", "Parts", 100.0, 40.0),
    ]);
    assert_eq!(out[0].name, "Gadget");
    assert!(close(out[0].margin_percent, 60.0));
    assert_eq!(out[0].margin_status, MarginStatus::Excellent);
    assert!(close(out[1].margin_percent, 10.0));
    assert_eq!(out[1].margin_status, MarginStatus::Poor);
}

#[test]
fn zero_price_margin_is_zero() {
    let out = product_margins(&[product("Freebie", "", 0.0, 3.0)]);
    assert_eq!(out[0].margin_percent, 0.0);
    assert!(close(out[0].profit, -3.0));
    assert_eq!(out[0].margin_status, MarginStatus::Poor);
}

#[test]
fn margin_ties_keep_input_order_and_boundaries_are_inclusive() {
    let out = product_margins(&[
        product("First", "", 100.0, 70.0),
        product("Second", "", 10.0, 7.0),
        product("Loss", "", 10.0, 12.0),
        product("Fair", "", 100.0, 85.0),
    ]);
    let names: Vec<_> = out.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second", "Fair", "Loss"]);
    assert_eq!(out[0].margin_status, MarginStatus::Good);
    assert_eq!(out[2].margin_status, MarginStatus::Fair);
    assert_eq!(out[3].margin_status, MarginStatus::Loss);
}

#[test]
fn category_profit_summary_sorted_by_average_margin() {
    let out = category_profit_summary(&[
        product("A", "Parts", 100.0, 90.0),
        product("B", "Parts", 100.0, 70.0),
        product("C", "Services", 200.0, 50.0),
        product("D", "", 0.0, 0.0),
    ]);
    assert_eq!(out[0].category, "Services");
    assert!(close(out[0].average_margin, 75.0));
    assert_eq!(out[1].category, "Parts");
    assert_eq!(out[1].product_count, 2);
    assert!(close(out[1].total_revenue, 200.0));
    assert!(close(out[1].total_profit, 40.0));
    assert!(close(out[1].average_margin, 20.0));
    assert_eq!(out[2].category, "Uncategorized");
    assert_eq!(out[2].average_margin, 0.0);
}

#[test]
fn top_profitable_and_low_margin_views() {
    let margins = product_margins(&[
        product("A", "", 100.0, 10.0),
        product("B", "", 100.0, 95.0),
        product("C", "", 100.0, 120.0),
        product("D", "", 100.0, 50.0),
    ]);
    let top = top_profitable(&margins, 2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].name, "A");
    assert_eq!(top[1].name, "D");
    assert_eq!(top_profitable(&margins, 10).len(), 3);

    let low: Vec<_> = low_margin(&margins, 15.0)
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(low, vec!["B", "C"]);
}

#[test]
fn low_stock_includes_out_of_stock() {
    let mut a = product("A", "", 1.0, 1.0);
    a.stock_level = 0;
    a.reorder_point = 2;
    let mut b = product("B", "", 1.0, 1.0);
    b.stock_level = 10;
    b.reorder_point = 2;
    let out = low_stock(&[a, b]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].name, "A");
}

#[test]
fn summary_nets_income_against_expenses() {
    let s = transaction_summary(&[
        txn("2025-01-01", 500.0, TxnType::Income, ""),
        txn("2025-01-02", 120.0, TxnType::Expense, ""),
    ]);
    assert!(close(s.total_income, 500.0));
    assert!(close(s.total_expenses, 120.0));
    assert!(close(s.net_income, 380.0));
}
