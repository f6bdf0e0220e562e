// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use ledgerdesk::config::Settings;
use ledgerdesk::filter::distinct_values;
use ledgerdesk::models::{Employee, Product, Transaction, TxnType};
use ledgerdesk::services::{EmployeeService, ProductService, TransactionService};
use ledgerdesk::store::SqliteStore;
use ledgerdesk::{cli, commands::employees, commands::products, commands::transactions};

fn setup() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    let svc = TransactionService::new(&store);
    for (i, (desc, cat, kind, amount)) in [
        ("Coffee beans", "Supplies", TxnType::Expense, 30.0),
        ("Invoice 1001", "Sales", TxnType::Income, 900.0),
        ("Printer paper", "Supplies", TxnType::Expense, 12.0),
        ("Invoice 1002", "Sales", TxnType::Income, 450.0),
        ("Coffee filters", "Supplies", TxnType::Expense, 5.0),
    ]
    .into_iter()
    .enumerate()
    {
        svc.create(&Transaction {
            description: desc.into(),
            category: cat.into(),
            kind: Some(kind),
            amount,
            date: NaiveDate::from_ymd_opt(2025, 1, i as u32 + 1),
            ..Transaction::default()
        })
        .unwrap();
    }
    store
}

fn tx_list(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["ledgerdesk", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

#[test]
fn list_pages_with_setting_default() {
    let store = setup();
    let settings = Settings {
        page_size: 2,
        ..Settings::default()
    };
    let page = transactions::query_page(&store, &settings, &tx_list(&["--page", "3"])).unwrap();
    assert_eq!(page.total_items, 5);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 1);
    assert!(page.has_previous());
    assert!(!page.has_next());
}

#[test]
fn list_search_and_type_filters_combine() {
    let store = setup();
    let m = tx_list(&["--search", "COFFEE", "--type", "expense"]);
    let page = transactions::query_page(&store, &Settings::default(), &m).unwrap();
    let mut descs: Vec<_> = page.items.iter().map(|t| t.description.as_str()).collect();
    descs.sort();
    assert_eq!(descs, vec!["Coffee beans", "Coffee filters"]);
}

#[test]
fn list_sorts_by_amount() {
    let store = setup();
    let m = tx_list(&["--sort", "amount", "--desc", "--page-size", "2"]);
    let page = transactions::query_page(&store, &Settings::default(), &m).unwrap();
    let amounts: Vec<f64> = page.items.iter().map(|t| t.amount).collect();
    assert_eq!(amounts, vec![900.0, 450.0]);
    assert_eq!(page.total_pages, 3);
}

#[test]
fn list_past_last_page_is_empty() {
    let store = setup();
    let page =
        transactions::query_page(&store, &Settings::default(), &tx_list(&["--page", "9"])).unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 5);
}

#[test]
fn product_list_filters_on_stock_status() {
    let store = SqliteStore::open_in_memory().unwrap();
    let svc = ProductService::new(&store);
    for (name, stock, reorder) in [("Bolt", 0, 5), ("Nut", 3, 5), ("Washer", 50, 5)] {
        svc.create(&Product {
            name: name.into(),
            price: 1.0,
            stock_level: stock,
            reorder_point: reorder,
            ..Product::default()
        })
        .unwrap();
    }
    let matches =
        cli::build_cli().get_matches_from(["ledgerdesk", "product", "list", "--status", "low-stock"]);
    let Some(("product", p_m)) = matches.subcommand() else {
        panic!("no product subcommand");
    };
    let Some(("list", list_m)) = p_m.subcommand() else {
        panic!("no list subcommand");
    };
    let page = products::query_page(&store, &Settings::default(), list_m).unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Nut");
}

#[test]
fn categories_subcommand_runs_over_distinct_values() {
    let store = setup();
    let all = TransactionService::new(&store).all();
    let mut cats = distinct_values(&all, "category");
    cats.sort();
    assert_eq!(cats, vec!["Sales", "Supplies"]);

    let matches = cli::build_cli().get_matches_from(["ledgerdesk", "tx", "categories", "--json"]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(&store, &Settings::default(), tx_m).unwrap();
}

#[test]
fn employee_update_overlays_only_given_flags() {
    let store = SqliteStore::open_in_memory().unwrap();
    let svc = EmployeeService::new(&store);
    let id = svc
        .create(&Employee {
            first_name: "Ada".into(),
            last_name: "Byron".into(),
            email: "ada@example.com".into(),
            ..Employee::default()
        })
        .unwrap()
        .unwrap()
        .id
        .unwrap();

    let id_arg = id.to_string();
    let matches = cli::build_cli().get_matches_from([
        "ledgerdesk",
        "employee",
        "update",
        "--id",
        &id_arg,
        "--last",
        "Lovelace",
        "--department",
        "3",
    ]);
    let Some(("employee", e_m)) = matches.subcommand() else {
        panic!("no employee subcommand");
    };
    employees::handle(&store, &Settings::default(), e_m).unwrap();

    let e = svc.get(id).unwrap();
    assert_eq!(e.name, "Ada Lovelace");
    assert_eq!(e.email, "ada@example.com");
    assert_eq!(e.department_id, Some(3));
}
