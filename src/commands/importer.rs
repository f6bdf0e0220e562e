// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use serde_json::Value;
use std::path::Path;

use crate::models::Transaction;
use crate::normalize::{Normalize, RawRecord};
use crate::services::TransactionService;
use crate::store::RecordStore;

pub fn handle<S: RecordStore>(store: &S, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let path = sub.get_one::<String>("path").unwrap().trim();
            let n = import_transactions(store, Path::new(path))?;
            println!("Imported {} transactions from {}", n, path);
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Reads a CSV whose header names may be canonical (`amount_c`) or legacy
/// (`amount`); each row goes through the normalizer like any stored record.
pub fn read_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path.display()))?;
    let headers = rdr.headers()?.clone();

    let mut out = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = i + 2;
        let raw: RawRecord = headers
            .iter()
            .zip(rec.iter())
            .map(|(h, v)| (h.to_string(), Value::String(v.to_string())))
            .collect();
        let txn = Transaction::from_raw(&raw);
        if txn.date.is_none() {
            return Err(anyhow!("Row {}: missing or invalid date", row));
        }
        if txn.description.is_empty() && txn.name.is_empty() {
            return Err(anyhow!("Row {}: missing description", row));
        }
        out.push(txn);
    }
    Ok(out)
}

pub fn import_transactions<S: RecordStore>(store: &S, path: &Path) -> Result<usize> {
    let txns = read_transactions(path)?;
    if txns.is_empty() {
        return Ok(0);
    }
    TransactionService::new(store).create_many(&txns)
}
