// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Datelike;

use crate::config::Settings;
use crate::services::ReportService;
use crate::store::RecordStore;
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, pretty_table};

pub fn handle<S: RecordStore>(store: &S, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    let svc = ReportService::new(store);
    match m.subcommand() {
        Some(("cashflow", sub)) => cashflow(&svc, settings, sub)?,
        Some(("expenses", sub)) => expenses(&svc, settings, sub)?,
        Some(("margins", sub)) => margins(&svc, settings, sub)?,
        Some(("category-profit", sub)) => category_profit(&svc, settings, sub)?,
        _ => {}
    }
    Ok(())
}

fn cashflow<S: RecordStore>(
    svc: &ReportService<'_, S>,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let year = sub
        .get_one::<i32>("year")
        .copied()
        .unwrap_or_else(|| chrono::Utc::now().year());
    let data = svc.monthly_cash_flow(year);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = &settings.currency;
        let rows = data
            .iter()
            .map(|b| {
                vec![
                    b.month.clone(),
                    fmt_money(b.income, ccy),
                    fmt_money(b.expenses, ccy),
                    fmt_money(b.net_flow, ccy),
                ]
            })
            .collect();
        println!("Cash flow {}", year);
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expenses", "Net"], rows)
        );
    }
    Ok(())
}

fn expenses<S: RecordStore>(
    svc: &ReportService<'_, S>,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let data = svc.expenses_by_category();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    fmt_money(c.amount, &settings.currency),
                    fmt_percent(c.percentage),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }
    Ok(())
}

fn margins<S: RecordStore>(
    svc: &ReportService<'_, S>,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let data = if let Some(n) = sub.get_one::<usize>("top") {
        svc.top_profitable(*n)
    } else if let Some(t) = sub.get_one::<f64>("below") {
        svc.low_margin(*t)
    } else {
        svc.product_margins()
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = &settings.currency;
        let rows = data
            .iter()
            .map(|m| {
                vec![
                    m.name.clone(),
                    m.sku.clone(),
                    m.category.clone(),
                    fmt_money(m.price, ccy),
                    fmt_money(m.cost, ccy),
                    fmt_money(m.profit, ccy),
                    fmt_percent(m.margin_percent),
                    m.margin_status.as_str().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Product", "SKU", "Category", "Price", "Cost", "Profit", "Margin", "Status"],
                rows,
            )
        );
    }
    Ok(())
}

fn category_profit<S: RecordStore>(
    svc: &ReportService<'_, S>,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let data = svc.category_profit_summary();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = &settings.currency;
        let rows = data
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    c.product_count.to_string(),
                    fmt_money(c.total_revenue, ccy),
                    fmt_money(c.total_cost, ccy),
                    fmt_money(c.total_profit, ccy),
                    fmt_percent(c.average_margin),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Products", "Revenue", "Cost", "Profit", "Avg margin"],
                rows,
            )
        );
    }
    Ok(())
}
