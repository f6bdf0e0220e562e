// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use serde_json::json;
use std::path::Path;

use crate::models::Transaction;
use crate::services::TransactionService;
use crate::store::RecordStore;

pub fn handle<S: RecordStore>(store: &S, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
            let out = sub.get_one::<String>("out").unwrap();
            let mut txns = TransactionService::new(store).all();
            // oldest first, like a ledger
            txns.reverse();
            export_transactions(&txns, &fmt, Path::new(out))?;
            println!("Exported {} transactions to {}", txns.len(), out);
            Ok(())
        }
        _ => Ok(()),
    }
}

pub fn export_transactions(txns: &[Transaction], fmt: &str, out: &Path) -> Result<()> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "date",
                "description",
                "category",
                "type",
                "amount",
                "notes",
            ])?;
            for t in txns {
                wtr.write_record([
                    t.id.map(|i| i.to_string()).unwrap_or_default(),
                    t.date.map(|d| d.to_string()).unwrap_or_default(),
                    t.description.clone(),
                    t.category.clone(),
                    t.kind.map(|k| k.to_string()).unwrap_or_default(),
                    t.amount.to_string(),
                    t.notes.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = txns
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "date": t.date,
                        "description": t.description,
                        "category": t.category,
                        "type": t.kind,
                        "amount": t.amount,
                        "notes": t.notes,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    Ok(())
}
