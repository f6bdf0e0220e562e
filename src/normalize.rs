// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Maps raw store records onto canonical models.
//!
//! Every field is read from an ordered list of source names: the canonical
//! `_c` column first, then the legacy alias. The first *present* source wins
//! (not null, not an empty string, not numeric zero), otherwise the field gets
//! its type default: `""` for text, `0` for numbers, `None` for references and
//! dates. Nothing in here fails.

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value, json};

use crate::models::{Department, Employee, Product, Transaction, TxnType};

pub type RawRecord = Map<String, Value>;

const ID: &[&str] = &["Id", "id"];
const NAME: &[&str] = &["Name", "name"];
const CREATED_ON: &[&str] = &["CreatedOn", "createdOn"];

mod txn {
    pub const AMOUNT: &[&str] = &["amount_c", "amount"];
    pub const CATEGORY: &[&str] = &["category_c", "category"];
    pub const DESCRIPTION: &[&str] = &["description_c", "description"];
    pub const DATE: &[&str] = &["date_c", "date"];
    pub const NOTES: &[&str] = &["notes_c", "notes"];
    pub const TYPE: &[&str] = &["type_c", "type"];
    pub const RELATED_ORDER: &[&str] = &["related_order_id_c", "relatedOrderId"];
}

mod product {
    pub const SKU: &[&str] = &["sku_c", "sku"];
    pub const DESCRIPTION: &[&str] = &["description_c", "description"];
    pub const CATEGORY: &[&str] = &["category_c", "category"];
    pub const PRICE: &[&str] = &["price_c", "price"];
    pub const COST: &[&str] = &["cost_c", "cost"];
    pub const STOCK: &[&str] = &["stock_level_c", "stockLevel"];
    pub const REORDER: &[&str] = &["reorder_point_c", "reorderPoint"];
    pub const UNIT: &[&str] = &["unit_c", "unit"];
}

mod employee {
    pub const CODE: &[&str] = &["employee_code_c", "employeeCode"];
    pub const FIRST: &[&str] = &["first_name_c", "firstName"];
    pub const LAST: &[&str] = &["last_name_c", "lastName"];
    pub const EMAIL: &[&str] = &["email_c", "email"];
    pub const DEPARTMENT: &[&str] = &["department_id_c", "departmentId"];
    pub const JOIN_DATE: &[&str] = &["join_date_c", "joinDate"];
    pub const SALARY: &[&str] = &["salary_c", "salary"];
}

mod department {
    pub const CODE: &[&str] = &["department_code_c", "departmentCode"];
    pub const DESCRIPTION: &[&str] = &["description_c", "description"];
    pub const LOCATION: &[&str] = &["location_c", "location"];
    pub const EMAIL: &[&str] = &["email_c", "email"];
    pub const PHONE: &[&str] = &["phone_number_c", "phoneNumber"];
    pub const MANAGER: &[&str] = &["manager_id_c", "managerId"];
}

/// Conversion between raw store records and a canonical model.
pub trait Normalize: Sized {
    fn from_raw(raw: &RawRecord) -> Self;

    /// Canonical `_c` payload for store writes. `Id` is included when known.
    fn to_raw(&self) -> RawRecord;
}

fn is_present(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn first<'a>(raw: &'a RawRecord, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|k| raw.get(*k)).find(|v| is_present(v))
}

pub fn text(raw: &RawRecord, keys: &[&str]) -> String {
    match first(raw, keys) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        // lookup fields come back as {"Id": .., "Name": ..}
        Some(Value::Object(o)) => o
            .get("Name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

pub fn number(raw: &RawRecord, keys: &[&str]) -> f64 {
    let n = match first(raw, keys) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

pub fn integer(raw: &RawRecord, keys: &[&str]) -> i64 {
    number(raw, keys).trunc() as i64
}

fn reference_value(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Object(o) => o.get("Id").and_then(reference_value),
        _ => None,
    }
}

pub fn reference(raw: &RawRecord, keys: &[&str]) -> Option<i64> {
    first(raw, keys).and_then(reference_value)
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_date_lenient(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    s.get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}

pub fn date(raw: &RawRecord, keys: &[&str]) -> Option<NaiveDate> {
    match first(raw, keys) {
        Some(Value::String(s)) => parse_date_lenient(s),
        _ => None,
    }
}

fn opt_id(id: Option<i64>) -> Value {
    id.map(Value::from).unwrap_or(Value::Null)
}

fn opt_date(d: Option<NaiveDate>) -> Value {
    d.map(|d| Value::String(d.to_string())).unwrap_or(Value::Null)
}

fn into_map(v: Value) -> RawRecord {
    match v {
        Value::Object(m) => m,
        _ => RawRecord::new(),
    }
}

fn with_id(mut raw: RawRecord, id: Option<i64>) -> RawRecord {
    if let Some(id) = id {
        raw.insert("Id".into(), Value::from(id));
    }
    raw
}

impl Normalize for Transaction {
    fn from_raw(raw: &RawRecord) -> Self {
        let description = text(raw, txn::DESCRIPTION);
        let mut name = text(raw, NAME);
        if name.is_empty() {
            name = description.clone();
        }
        Transaction {
            id: reference(raw, ID),
            name,
            amount: number(raw, txn::AMOUNT),
            category: text(raw, txn::CATEGORY),
            description,
            date: date(raw, txn::DATE),
            notes: text(raw, txn::NOTES),
            kind: TxnType::parse(&text(raw, txn::TYPE)),
            related_order_id: reference(raw, txn::RELATED_ORDER),
            created_on: text(raw, CREATED_ON),
        }
    }

    fn to_raw(&self) -> RawRecord {
        let name = if self.name.is_empty() {
            &self.description
        } else {
            &self.name
        };
        let raw = into_map(json!({
            "Name": name,
            "amount_c": self.amount,
            "category_c": self.category,
            "description_c": self.description,
            "date_c": opt_date(self.date),
            "notes_c": self.notes,
            "type_c": self.kind.map(|k| k.as_str()).unwrap_or_default(),
            "related_order_id_c": opt_id(self.related_order_id),
        }));
        with_id(raw, self.id)
    }
}

impl Normalize for Product {
    fn from_raw(raw: &RawRecord) -> Self {
        Product {
            id: reference(raw, ID),
            name: text(raw, NAME),
            sku: text(raw, product::SKU),
            description: text(raw, product::DESCRIPTION),
            category: text(raw, product::CATEGORY),
            price: number(raw, product::PRICE),
            cost: number(raw, product::COST),
            stock_level: integer(raw, product::STOCK),
            reorder_point: integer(raw, product::REORDER),
            unit: text(raw, product::UNIT),
        }
    }

    fn to_raw(&self) -> RawRecord {
        let raw = into_map(json!({
            "Name": self.name,
            "sku_c": self.sku,
            "description_c": self.description,
            "category_c": self.category,
            "price_c": self.price,
            "cost_c": self.cost,
            "stock_level_c": self.stock_level,
            "reorder_point_c": self.reorder_point,
            "unit_c": self.unit,
        }));
        with_id(raw, self.id)
    }
}

impl Normalize for Employee {
    fn from_raw(raw: &RawRecord) -> Self {
        let first_name = text(raw, employee::FIRST);
        let last_name = text(raw, employee::LAST);
        let mut name = text(raw, NAME);
        if name.is_empty() {
            name = format!("{} {}", first_name, last_name).trim().to_string();
        }
        Employee {
            id: reference(raw, ID),
            name,
            employee_code: text(raw, employee::CODE),
            first_name,
            last_name,
            email: text(raw, employee::EMAIL),
            department_id: reference(raw, employee::DEPARTMENT),
            join_date: date(raw, employee::JOIN_DATE),
            salary: number(raw, employee::SALARY),
        }
    }

    fn to_raw(&self) -> RawRecord {
        let raw = into_map(json!({
            "Name": self.name,
            "employee_code_c": self.employee_code,
            "first_name_c": self.first_name,
            "last_name_c": self.last_name,
            "email_c": self.email,
            "department_id_c": opt_id(self.department_id),
            "join_date_c": opt_date(self.join_date),
            "salary_c": self.salary,
        }));
        with_id(raw, self.id)
    }
}

impl Normalize for Department {
    fn from_raw(raw: &RawRecord) -> Self {
        Department {
            id: reference(raw, ID),
            name: text(raw, NAME),
            department_code: text(raw, department::CODE),
            description: text(raw, department::DESCRIPTION),
            location: text(raw, department::LOCATION),
            email: text(raw, department::EMAIL),
            phone_number: text(raw, department::PHONE),
            manager_id: reference(raw, department::MANAGER),
        }
    }

    fn to_raw(&self) -> RawRecord {
        let raw = into_map(json!({
            "Name": self.name,
            "department_code_c": self.department_code,
            "description_c": self.description,
            "location_c": self.location,
            "email_c": self.email,
            "phone_number_c": self.phone_number,
            "manager_id_c": opt_id(self.manager_id),
        }));
        with_id(raw, self.id)
    }
}

pub fn normalize_all<T: Normalize>(raws: &[RawRecord]) -> Vec<T> {
    raws.iter().map(T::from_raw).collect()
}
