// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

pub const TRANSACTIONS: &str = "transaction_c";
pub const PRODUCTS: &str = "product_c";
pub const EMPLOYEES: &str = "employees_c";
pub const DEPARTMENTS: &str = "departments_c";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnType {
    Income,
    Expense,
}

impl TxnType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Some(TxnType::Income),
            "expense" => Some(TxnType::Expense),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TxnType::Income => "income",
            TxnType::Expense => "expense",
        }
    }
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Option<i64>,
    pub name: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: Option<NaiveDate>,
    pub notes: String,
    pub kind: Option<TxnType>,
    pub related_order_id: Option<i64>,
    pub created_on: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::OutOfStock => "out-of-stock",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<i64>,
    pub name: String,
    pub sku: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub cost: f64,
    pub stock_level: i64,
    pub reorder_point: i64,
    pub unit: String,
}

impl Product {
    pub fn stock_status(&self) -> StockStatus {
        if self.stock_level <= 0 {
            StockStatus::OutOfStock
        } else if self.stock_level <= self.reorder_point {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Option<i64>,
    pub name: String,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department_id: Option<i64>,
    pub join_date: Option<NaiveDate>,
    pub salary: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: Option<i64>,
    pub name: String,
    pub department_code: String,
    pub description: String,
    pub location: String,
    pub email: String,
    pub phone_number: String,
    pub manager_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginStatus {
    Excellent,
    Good,
    Fair,
    Poor,
    Loss,
}

impl MarginStatus {
    /// Buckets are inclusive at their lower bound.
    pub fn from_percent(margin_percent: f64) -> Self {
        if margin_percent >= 50.0 {
            MarginStatus::Excellent
        } else if margin_percent >= 30.0 {
            MarginStatus::Good
        } else if margin_percent >= 15.0 {
            MarginStatus::Fair
        } else if margin_percent >= 0.0 {
            MarginStatus::Poor
        } else {
            MarginStatus::Loss
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarginStatus::Excellent => "excellent",
            MarginStatus::Good => "good",
            MarginStatus::Fair => "fair",
            MarginStatus::Poor => "poor",
            MarginStatus::Loss => "loss",
        }
    }
}

/// A single field read off a canonical record, used by filtering and sorting.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(Cow<'a, str>),
    Number(f64),
    Date(NaiveDate),
}

impl FieldValue<'_> {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s.as_ref()),
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
            FieldValue::Date(d) => Cow::Owned(d.to_string()),
        }
    }
}

fn text(s: &str) -> Option<FieldValue<'_>> {
    Some(FieldValue::Text(Cow::Borrowed(s)))
}

pub trait FieldAccess {
    /// Fields scanned by free-text search.
    const SEARCHABLE: &'static [&'static str];

    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

impl FieldAccess for Transaction {
    const SEARCHABLE: &'static [&'static str] = &["description", "category", "name"];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => self.id.map(|v| FieldValue::Number(v as f64)),
            "name" => text(&self.name),
            "amount" => Some(FieldValue::Number(self.amount)),
            "category" => text(&self.category),
            "description" => text(&self.description),
            "date" => self.date.map(FieldValue::Date),
            "notes" => text(&self.notes),
            "type" => self.kind.map(|k| FieldValue::Text(Cow::Borrowed(k.as_str()))),
            "created_on" => text(&self.created_on),
            _ => None,
        }
    }
}

impl FieldAccess for Product {
    const SEARCHABLE: &'static [&'static str] = &["name", "sku", "description"];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => self.id.map(|v| FieldValue::Number(v as f64)),
            "name" => text(&self.name),
            "sku" => text(&self.sku),
            "description" => text(&self.description),
            "category" => text(&self.category),
            "price" => Some(FieldValue::Number(self.price)),
            "cost" => Some(FieldValue::Number(self.cost)),
            "stock_level" => Some(FieldValue::Number(self.stock_level as f64)),
            "reorder_point" => Some(FieldValue::Number(self.reorder_point as f64)),
            "unit" => text(&self.unit),
            "status" => Some(FieldValue::Text(Cow::Borrowed(self.stock_status().as_str()))),
            _ => None,
        }
    }
}

impl FieldAccess for Employee {
    const SEARCHABLE: &'static [&'static str] =
        &["name", "employee_code", "first_name", "last_name", "email"];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => self.id.map(|v| FieldValue::Number(v as f64)),
            "name" => text(&self.name),
            "employee_code" => text(&self.employee_code),
            "first_name" => text(&self.first_name),
            "last_name" => text(&self.last_name),
            "email" => text(&self.email),
            "department_id" => self.department_id.map(|v| FieldValue::Number(v as f64)),
            "join_date" => self.join_date.map(FieldValue::Date),
            "salary" => Some(FieldValue::Number(self.salary)),
            _ => None,
        }
    }
}

impl FieldAccess for Department {
    const SEARCHABLE: &'static [&'static str] = &["name", "department_code", "location"];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => self.id.map(|v| FieldValue::Number(v as f64)),
            "name" => text(&self.name),
            "department_code" => text(&self.department_code),
            "description" => text(&self.description),
            "location" => text(&self.location),
            "email" => text(&self.email),
            "phone_number" => text(&self.phone_number),
            "manager_id" => self.manager_id.map(|v| FieldValue::Number(v as f64)),
            _ => None,
        }
    }
}
