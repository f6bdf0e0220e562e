// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Cash flow, expense breakdown and margin reporting.
//!
//! Sums are plain `f64` accumulations; rounding happens only at display time.
//! Every division by zero resolves to 0.

use chrono::Datelike;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::{MarginStatus, Product, Transaction, TxnType};

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFlow {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
    pub net_flow: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryExpense {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginRecord {
    pub id: Option<i64>,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub price: f64,
    pub cost: f64,
    pub profit: f64,
    pub margin_percent: f64,
    pub margin_status: MarginStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProfit {
    pub category: String,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
    pub product_count: usize,
    pub average_margin: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_income: f64,
}

/// `part / whole * 100`, or 0 when `whole` is not positive.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

fn category_label(category: &str) -> &str {
    if category.is_empty() {
        UNCATEGORIZED
    } else {
        category
    }
}

/// Twelve zero-filled buckets in calendar order.
pub fn empty_cash_flow() -> Vec<MonthlyFlow> {
    MONTHS
        .iter()
        .map(|m| MonthlyFlow {
            month: (*m).to_string(),
            income: 0.0,
            expenses: 0.0,
            net_flow: 0.0,
        })
        .collect()
}

/// Keeps transactions dated within `year`. Undated records are dropped.
pub fn in_year(records: &[Transaction], year: i32) -> Vec<Transaction> {
    records
        .iter()
        .filter(|t| t.date.is_some_and(|d| d.year() == year))
        .cloned()
        .collect()
}

pub fn monthly_cash_flow(records: &[Transaction]) -> Vec<MonthlyFlow> {
    let mut buckets = empty_cash_flow();
    for t in records {
        let Some(date) = t.date else {
            tracing::debug!(id = ?t.id, "skipping undated transaction");
            continue;
        };
        let bucket = &mut buckets[date.month0() as usize];
        match t.kind {
            Some(TxnType::Income) => bucket.income += t.amount,
            Some(TxnType::Expense) => bucket.expenses += t.amount,
            None => continue,
        }
    }
    for b in &mut buckets {
        b.net_flow = b.income - b.expenses;
    }
    buckets
}

/// Expense totals per category, in order of first appearance.
pub fn expenses_by_category(records: &[Transaction]) -> Vec<CategoryExpense> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<CategoryExpense> = Vec::new();
    for t in records.iter().filter(|t| t.kind == Some(TxnType::Expense)) {
        let label = category_label(&t.category);
        let slot = match index.get(label) {
            Some(&i) => i,
            None => {
                index.insert(label.to_string(), groups.len());
                groups.push(CategoryExpense {
                    category: label.to_string(),
                    amount: 0.0,
                    percentage: 0.0,
                });
                groups.len() - 1
            }
        };
        groups[slot].amount += t.amount;
    }
    let total: f64 = groups.iter().map(|g| g.amount).sum();
    for g in &mut groups {
        g.percentage = percent_of(g.amount, total);
    }
    groups
}

pub fn margin_for(product: &Product) -> MarginRecord {
    let profit = product.price - product.cost;
    let margin_percent = percent_of(profit, product.price);
    MarginRecord {
        id: product.id,
        name: product.name.clone(),
        sku: product.sku.clone(),
        category: product.category.clone(),
        price: product.price,
        cost: product.cost,
        profit,
        margin_percent,
        margin_status: MarginStatus::from_percent(margin_percent),
    }
}

/// Per-product margins, highest first. Ties keep input order.
pub fn product_margins(products: &[Product]) -> Vec<MarginRecord> {
    let mut out: Vec<MarginRecord> = products.iter().map(margin_for).collect();
    out.sort_by(|a, b| b.margin_percent.total_cmp(&a.margin_percent));
    out
}

pub fn category_profit_summary(products: &[Product]) -> Vec<CategoryProfit> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<CategoryProfit> = Vec::new();
    for m in product_margins(products) {
        let label = category_label(&m.category).to_string();
        let slot = *index.entry(label.clone()).or_insert_with(|| {
            groups.push(CategoryProfit {
                category: label,
                total_revenue: 0.0,
                total_cost: 0.0,
                total_profit: 0.0,
                product_count: 0,
                average_margin: 0.0,
            });
            groups.len() - 1
        });
        let g = &mut groups[slot];
        g.total_revenue += m.price;
        g.total_cost += m.cost;
        g.total_profit += m.profit;
        g.product_count += 1;
    }
    for g in &mut groups {
        g.average_margin = percent_of(g.total_profit, g.total_revenue);
    }
    groups.sort_by(|a, b| b.average_margin.total_cmp(&a.average_margin));
    groups
}

/// Profitable entries of an already sorted margin list, at most `limit`.
pub fn top_profitable(margins: &[MarginRecord], limit: usize) -> Vec<MarginRecord> {
    margins
        .iter()
        .filter(|m| m.profit > 0.0)
        .take(limit)
        .cloned()
        .collect()
}

pub fn low_margin(margins: &[MarginRecord], threshold: f64) -> Vec<MarginRecord> {
    margins
        .iter()
        .filter(|m| m.margin_percent < threshold)
        .cloned()
        .collect()
}

pub fn low_stock(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.stock_level <= p.reorder_point)
        .cloned()
        .collect()
}

pub fn transaction_summary(records: &[Transaction]) -> TransactionSummary {
    let mut s = TransactionSummary::default();
    for t in records {
        match t.kind {
            Some(TxnType::Income) => s.total_income += t.amount,
            Some(TxnType::Expense) => s.total_expenses += t.amount,
            None => {}
        }
    }
    s.net_income = s.total_income - s.total_expenses;
    s
}
