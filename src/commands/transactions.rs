// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use super::{list_page, page_footer, print_categories};
use crate::config::Settings;
use crate::filter::Criteria;
use crate::models::{Transaction, TxnType};
use crate::paginate::Page;
use crate::services::TransactionService;
use crate::store::RecordStore;
use crate::utils::{fmt_amount, fmt_money, maybe_print_json, parse_amount, parse_date, parse_id, pretty_table};

pub fn handle<S: RecordStore>(store: &S, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, settings, sub)?,
        Some(("update", sub)) => update(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        Some(("categories", sub)) => print_categories(&TransactionService::new(store).all(), sub)?,
        Some(("summary", sub)) => summary(store, settings, sub)?,
        Some(("recent", sub)) => recent(store, sub)?,
        _ => {}
    }
    Ok(())
}

/// Overlays the flags that were supplied onto `txn`.
fn apply_args(mut txn: Transaction, sub: &clap::ArgMatches) -> Result<Transaction> {
    if let Some(d) = sub.get_one::<String>("date") {
        txn.date = Some(parse_date(d)?);
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        txn.amount = parse_amount(a)?;
    }
    if let Some(t) = sub.get_one::<String>("type") {
        txn.kind = TxnType::parse(t);
    }
    if let Some(c) = sub.get_one::<String>("category") {
        txn.category = c.trim().to_string();
    }
    if let Some(d) = sub.get_one::<String>("description") {
        txn.description = d.trim().to_string();
        txn.name = txn.description.clone();
    }
    if let Some(n) = sub.get_one::<String>("notes") {
        txn.notes = n.to_string();
    }
    if let Some(o) = sub.get_one::<String>("order") {
        txn.related_order_id = Some(parse_id(o)?);
    }
    Ok(txn)
}

fn add<S: RecordStore>(store: &S, sub: &clap::ArgMatches) -> Result<()> {
    let txn = apply_args(Transaction::default(), sub)?;
    let created = TransactionService::new(store)
        .create(&txn)?
        .ok_or_else(|| anyhow!("Transaction was not created"))?;
    println!(
        "Recorded {} {} '{}' (id {})",
        created.kind.map(|k| k.as_str()).unwrap_or_default(),
        fmt_amount(created.amount),
        created.description,
        created.id.unwrap_or_default()
    );
    Ok(())
}

fn update<S: RecordStore>(store: &S, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    let svc = TransactionService::new(store);
    let txn = apply_args(svc.get(id)?, sub)?;
    match svc.update(id, &txn)? {
        Some(_) => println!("Updated transaction {}", id),
        None => return Err(anyhow!("Transaction {} was not updated", id)),
    }
    Ok(())
}

fn rm<S: RecordStore>(store: &S, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    if TransactionService::new(store).delete(id)? {
        println!("Removed transaction {}", id);
    } else {
        return Err(anyhow!("Transaction {} could not be removed", id));
    }
    Ok(())
}

pub fn query_page<S: RecordStore>(
    store: &S,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<Page<Transaction>> {
    let criteria = Criteria::new()
        .search(sub.get_one::<String>("search").cloned().unwrap_or_default())
        .matching_opt("type", sub.get_one::<String>("type"))
        .matching_opt("category", sub.get_one::<String>("category"));
    let all = TransactionService::new(store).all();
    Ok(list_page(&all, &criteria, settings, sub))
}

fn rows(records: &[Transaction]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|t| {
            vec![
                t.id.map(|i| i.to_string()).unwrap_or_default(),
                t.date.map(|d| d.to_string()).unwrap_or_default(),
                t.description.clone(),
                t.category.clone(),
                t.kind.map(|k| k.to_string()).unwrap_or_default(),
                fmt_amount(t.amount),
            ]
        })
        .collect()
}

fn list<S: RecordStore>(store: &S, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let page = query_page(store, settings, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &page)? {
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Category", "Type", "Amount"],
                rows(&page.items),
            )
        );
        println!("{}", page_footer(&page));
    }
    Ok(())
}

fn summary<S: RecordStore>(store: &S, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let s = TransactionService::new(store).summary();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let ccy = &settings.currency;
        println!(
            "{}",
            pretty_table(
                &["Income", "Expenses", "Net"],
                vec![vec![
                    fmt_money(s.total_income, ccy),
                    fmt_money(s.total_expenses, ccy),
                    fmt_money(s.net_income, ccy),
                ]],
            )
        );
    }
    Ok(())
}

fn recent<S: RecordStore>(store: &S, sub: &clap::ArgMatches) -> Result<()> {
    let limit = *sub.get_one::<usize>("limit").unwrap_or(&10);
    let data = TransactionService::new(store).recent(limit);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Category", "Type", "Amount"],
                rows(&data),
            )
        );
    }
    Ok(())
}
