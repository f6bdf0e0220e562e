// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use super::{list_page, page_footer, print_categories};
use crate::config::Settings;
use crate::filter::Criteria;
use crate::models::Product;
use crate::paginate::Page;
use crate::services::ProductService;
use crate::store::RecordStore;
use crate::utils::{fmt_amount, maybe_print_json, parse_amount, parse_id, pretty_table};

pub fn handle<S: RecordStore>(store: &S, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let p = apply_args(Product::default(), sub)?;
            let created = ProductService::new(store)
                .create(&p)?
                .ok_or_else(|| anyhow!("Product was not created"))?;
            println!(
                "Added product '{}' (id {})",
                created.name,
                created.id.unwrap_or_default()
            );
        }
        Some(("list", sub)) => list(store, settings, sub)?,
        Some(("update", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let svc = ProductService::new(store);
            let p = apply_args(svc.get(id)?, sub)?;
            if svc.update(id, &p)?.is_none() {
                return Err(anyhow!("Product {} was not updated", id));
            }
            println!("Updated product {}", id);
        }
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            if !ProductService::new(store).delete(id)? {
                return Err(anyhow!("Product {} could not be removed", id));
            }
            println!("Removed product {}", id);
        }
        Some(("categories", sub)) => print_categories(&ProductService::new(store).all(), sub)?,
        Some(("low-stock", sub)) => {
            let data = ProductService::new(store).low_stock();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                println!("{}", pretty_table(HEADERS, rows(&data)));
            }
        }
        _ => {}
    }
    Ok(())
}

const HEADERS: &[&str] = &["Id", "Name", "SKU", "Category", "Price", "Cost", "Stock", "Status"];

fn apply_args(mut p: Product, sub: &clap::ArgMatches) -> Result<Product> {
    if let Some(v) = sub.get_one::<String>("name") {
        p.name = v.trim().to_string();
    }
    if let Some(v) = sub.get_one::<String>("sku") {
        p.sku = v.trim().to_string();
    }
    if let Some(v) = sub.get_one::<String>("description") {
        p.description = v.to_string();
    }
    if let Some(v) = sub.get_one::<String>("category") {
        p.category = v.trim().to_string();
    }
    if let Some(v) = sub.get_one::<String>("price") {
        p.price = parse_amount(v)?;
    }
    if let Some(v) = sub.get_one::<String>("cost") {
        p.cost = parse_amount(v)?;
    }
    if let Some(v) = sub.get_one::<i64>("stock") {
        p.stock_level = *v;
    }
    if let Some(v) = sub.get_one::<i64>("reorder") {
        p.reorder_point = *v;
    }
    if let Some(v) = sub.get_one::<String>("unit") {
        p.unit = v.trim().to_string();
    }
    Ok(p)
}

pub fn query_page<S: RecordStore>(
    store: &S,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<Page<Product>> {
    let criteria = Criteria::new()
        .search(sub.get_one::<String>("search").cloned().unwrap_or_default())
        .matching_opt("category", sub.get_one::<String>("category"))
        .matching_opt("status", sub.get_one::<String>("status"));
    let all = ProductService::new(store).all();
    Ok(list_page(&all, &criteria, settings, sub))
}

fn rows(products: &[Product]) -> Vec<Vec<String>> {
    products
        .iter()
        .map(|p| {
            vec![
                p.id.map(|i| i.to_string()).unwrap_or_default(),
                p.name.clone(),
                p.sku.clone(),
                p.category.clone(),
                fmt_amount(p.price),
                fmt_amount(p.cost),
                format!("{} {}", p.stock_level, p.unit),
                p.stock_status().as_str().to_string(),
            ]
        })
        .collect()
}

fn list<S: RecordStore>(store: &S, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let page = query_page(store, settings, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &page)? {
        println!("{}", pretty_table(HEADERS, rows(&page.items)));
        println!("{}", page_footer(&page));
    }
    Ok(())
}
