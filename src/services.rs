// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Thin services over an injected [`RecordStore`].
//!
//! Reads degrade to empty collections when the store answers `success=false`
//! or fails outright. Writes surface the store's message as an error.

use anyhow::{Result, anyhow};
use chrono::Utc;
use std::collections::HashMap;

use crate::aggregate::{self, CategoryExpense, CategoryProfit, MarginRecord, MonthlyFlow};
use crate::filter::{Criteria, filter};
use crate::models::{
    DEPARTMENTS, Department, EMPLOYEES, Employee, PRODUCTS, Product, TRANSACTIONS, Transaction,
    TxnType,
};
use crate::normalize::{Normalize, normalize_all};
use crate::paginate::SortDirection;
use crate::store::{Query, RecordStore, WriteResponse};

fn fetch<S: RecordStore, T: Normalize>(store: &S, table: &str, query: &Query) -> Vec<T> {
    match store.list(table, query) {
        Ok(resp) if resp.success => normalize_all(&resp.data),
        Ok(resp) => {
            tracing::warn!(
                table,
                reason = resp.message.as_deref().unwrap_or_default(),
                "list failed, treating as empty"
            );
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(table, error = %e, "store unavailable, treating as empty");
            Vec::new()
        }
    }
}

fn fetch_one<S: RecordStore, T: Normalize>(store: &S, table: &str, id: i64) -> Result<T> {
    let resp = store.get(table, id)?;
    if !resp.success {
        return Err(anyhow!(
            resp.message
                .unwrap_or_else(|| format!("Record {} not found", id))
        ));
    }
    resp.data
        .first()
        .map(T::from_raw)
        .ok_or_else(|| anyhow!("Record {} not found", id))
}

/// First successfully written record; per-record failures are logged.
fn first_written<T: Normalize>(resp: WriteResponse, table: &str, op: &str) -> Result<Option<T>> {
    if !resp.success {
        let msg = resp
            .message
            .unwrap_or_else(|| format!("Failed to {} {} records", op, table));
        tracing::error!(table, op, reason = %msg, "write rejected");
        return Err(anyhow!(msg));
    }
    let (ok, failed): (Vec<_>, Vec<_>) = resp.results.into_iter().partition(|r| r.success);
    if !failed.is_empty() {
        let errors: Vec<String> = failed.into_iter().flat_map(|r| r.errors).collect();
        tracing::error!(table, op, ?errors, "some records failed");
    }
    Ok(ok
        .into_iter()
        .find_map(|r| r.data)
        .map(|raw| T::from_raw(&raw)))
}

fn delete_one<S: RecordStore>(store: &S, table: &str, id: i64) -> Result<bool> {
    let resp = store.delete(table, &[id])?;
    if !resp.success {
        return Err(anyhow!(
            resp.message
                .unwrap_or_else(|| format!("Failed to delete record {}", id))
        ));
    }
    let failed: Vec<&String> = resp
        .results
        .iter()
        .filter(|r| !r.success)
        .flat_map(|r| &r.errors)
        .collect();
    if !failed.is_empty() {
        tracing::error!(table, id, errors = ?failed, "delete failed");
        return Ok(false);
    }
    Ok(true)
}

pub struct TransactionService<'a, S: RecordStore> {
    store: &'a S,
}

impl<'a, S: RecordStore> TransactionService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Newest first.
    pub fn all(&self) -> Vec<Transaction> {
        let q = Query::new().order_by("CreatedOn", SortDirection::Desc);
        fetch(self.store, TRANSACTIONS, &q)
    }

    pub fn get(&self, id: i64) -> Result<Transaction> {
        fetch_one(self.store, TRANSACTIONS, id)
    }

    pub fn by_type(&self, kind: TxnType) -> Vec<Transaction> {
        filter(&self.all(), &Criteria::new().matching("type", kind.as_str()))
    }

    pub fn recent(&self, limit: usize) -> Vec<Transaction> {
        let q = Query::new()
            .order_by("CreatedOn", SortDirection::Desc)
            .limit(limit);
        fetch(self.store, TRANSACTIONS, &q)
    }

    pub fn summary(&self) -> aggregate::TransactionSummary {
        aggregate::transaction_summary(&self.all())
    }

    /// Missing type defaults to income, missing date to today.
    pub fn create(&self, txn: &Transaction) -> Result<Option<Transaction>> {
        let mut txn = txn.clone();
        txn.id = None;
        txn.kind.get_or_insert(TxnType::Income);
        txn.date.get_or_insert_with(|| Utc::now().date_naive());
        let resp = self.store.create(TRANSACTIONS, vec![txn.to_raw()])?;
        first_written(resp, TRANSACTIONS, "create")
    }

    /// Writes all records in one store call; returns how many were accepted.
    pub fn create_many(&self, txns: &[Transaction]) -> Result<usize> {
        let today = Utc::now().date_naive();
        let raws = txns
            .iter()
            .map(|t| {
                let mut t = t.clone();
                t.id = None;
                t.kind.get_or_insert(TxnType::Income);
                t.date.get_or_insert(today);
                t.to_raw()
            })
            .collect();
        let resp = self.store.create(TRANSACTIONS, raws)?;
        if !resp.success {
            return Err(anyhow!(
                resp.message
                    .unwrap_or_else(|| "Failed to create transactions".to_string())
            ));
        }
        let accepted = resp.results.iter().filter(|r| r.success).count();
        if accepted < txns.len() {
            tracing::error!(rejected = txns.len() - accepted, "some transactions failed");
        }
        Ok(accepted)
    }

    /// A missing type leaves the stored one untouched.
    pub fn update(&self, id: i64, txn: &Transaction) -> Result<Option<Transaction>> {
        let mut txn = txn.clone();
        txn.id = Some(id);
        let mut raw = txn.to_raw();
        if txn.kind.is_none() {
            raw.remove("type_c");
        }
        let resp = self.store.update(TRANSACTIONS, vec![raw])?;
        first_written(resp, TRANSACTIONS, "update")
    }

    pub fn delete(&self, id: i64) -> Result<bool> {
        delete_one(self.store, TRANSACTIONS, id)
    }
}

pub struct ProductService<'a, S: RecordStore> {
    store: &'a S,
}

impl<'a, S: RecordStore> ProductService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Ordered by name.
    pub fn all(&self) -> Vec<Product> {
        let q = Query::new().order_by("Name", SortDirection::Asc);
        fetch(self.store, PRODUCTS, &q)
    }

    pub fn get(&self, id: i64) -> Result<Product> {
        fetch_one(self.store, PRODUCTS, id)
    }

    pub fn by_category(&self, category: &str) -> Vec<Product> {
        filter(&self.all(), &Criteria::new().matching("category", category))
    }

    pub fn low_stock(&self) -> Vec<Product> {
        aggregate::low_stock(&self.all())
    }

    fn with_defaults(product: &Product) -> Product {
        let mut p = product.clone();
        if p.unit.trim().is_empty() {
            p.unit = "pcs".to_string();
        }
        p
    }

    pub fn create(&self, product: &Product) -> Result<Option<Product>> {
        let mut p = Self::with_defaults(product);
        p.id = None;
        let resp = self.store.create(PRODUCTS, vec![p.to_raw()])?;
        first_written(resp, PRODUCTS, "create")
    }

    pub fn update(&self, id: i64, product: &Product) -> Result<Option<Product>> {
        let mut p = Self::with_defaults(product);
        p.id = Some(id);
        let resp = self.store.update(PRODUCTS, vec![p.to_raw()])?;
        first_written(resp, PRODUCTS, "update")
    }

    pub fn delete(&self, id: i64) -> Result<bool> {
        delete_one(self.store, PRODUCTS, id)
    }
}

pub struct EmployeeService<'a, S: RecordStore> {
    store: &'a S,
}

impl<'a, S: RecordStore> EmployeeService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn all(&self) -> Vec<Employee> {
        let q = Query::new().order_by("CreatedOn", SortDirection::Desc);
        fetch(self.store, EMPLOYEES, &q)
    }

    pub fn get(&self, id: i64) -> Result<Employee> {
        fetch_one(self.store, EMPLOYEES, id)
    }

    fn with_name(employee: &Employee) -> Employee {
        let mut e = employee.clone();
        if e.name.trim().is_empty() {
            e.name = format!("{} {}", e.first_name, e.last_name).trim().to_string();
        }
        e
    }

    pub fn create(&self, employee: &Employee) -> Result<Option<Employee>> {
        let mut e = Self::with_name(employee);
        e.id = None;
        let resp = self.store.create(EMPLOYEES, vec![e.to_raw()])?;
        first_written(resp, EMPLOYEES, "create")
    }

    /// A blank name is derived again from first and last name.
    pub fn update(&self, id: i64, employee: &Employee) -> Result<Option<Employee>> {
        let mut e = Self::with_name(employee);
        e.id = Some(id);
        let resp = self.store.update(EMPLOYEES, vec![e.to_raw()])?;
        first_written(resp, EMPLOYEES, "update")
    }

    pub fn delete(&self, id: i64) -> Result<bool> {
        delete_one(self.store, EMPLOYEES, id)
    }
}

pub struct DepartmentService<'a, S: RecordStore> {
    store: &'a S,
}

impl<'a, S: RecordStore> DepartmentService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Ordered by name.
    pub fn all(&self) -> Vec<Department> {
        let q = Query::new().order_by("Name", SortDirection::Asc);
        fetch(self.store, DEPARTMENTS, &q)
    }

    pub fn get(&self, id: i64) -> Result<Department> {
        fetch_one(self.store, DEPARTMENTS, id)
    }

    /// Department names keyed by id, for resolving `department_id`.
    pub fn names(&self) -> HashMap<i64, String> {
        self.all()
            .into_iter()
            .filter_map(|d| d.id.map(|id| (id, d.name)))
            .collect()
    }

    pub fn create(&self, department: &Department) -> Result<Option<Department>> {
        let mut d = department.clone();
        d.id = None;
        let resp = self.store.create(DEPARTMENTS, vec![d.to_raw()])?;
        first_written(resp, DEPARTMENTS, "create")
    }

    pub fn update(&self, id: i64, department: &Department) -> Result<Option<Department>> {
        let mut d = department.clone();
        d.id = Some(id);
        let resp = self.store.update(DEPARTMENTS, vec![d.to_raw()])?;
        first_written(resp, DEPARTMENTS, "update")
    }

    pub fn delete(&self, id: i64) -> Result<bool> {
        delete_one(self.store, DEPARTMENTS, id)
    }
}

pub struct ReportService<'a, S: RecordStore> {
    store: &'a S,
}

impl<'a, S: RecordStore> ReportService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    fn transactions(&self) -> Vec<Transaction> {
        let q = Query::new().order_by("date_c", SortDirection::Asc);
        fetch(self.store, TRANSACTIONS, &q)
    }

    fn products(&self) -> Vec<Product> {
        fetch(self.store, PRODUCTS, &Query::new())
    }

    pub fn monthly_cash_flow(&self, year: i32) -> Vec<MonthlyFlow> {
        aggregate::monthly_cash_flow(&aggregate::in_year(&self.transactions(), year))
    }

    pub fn expenses_by_category(&self) -> Vec<CategoryExpense> {
        aggregate::expenses_by_category(&self.transactions())
    }

    pub fn product_margins(&self) -> Vec<MarginRecord> {
        aggregate::product_margins(&self.products())
    }

    pub fn category_profit_summary(&self) -> Vec<CategoryProfit> {
        aggregate::category_profit_summary(&self.products())
    }

    pub fn top_profitable(&self, limit: usize) -> Vec<MarginRecord> {
        aggregate::top_profitable(&self.product_margins(), limit)
    }

    pub fn low_margin(&self, threshold: f64) -> Vec<MarginRecord> {
        aggregate::low_margin(&self.product_margins(), threshold)
    }
}
