// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Record persistence contract and its SQLite implementation.
//!
//! A store answers `list`/`get` with `{ success, data, message }` and writes
//! with `{ success, results: [{ success, data, errors }] }`. `success=false`
//! is a normal answer; `StoreError` is reserved for the store itself failing.

use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::normalize::{RawRecord, reference};
use crate::paginate::SortDirection;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage failure: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("malformed record payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<(String, Value)>,
    pub order_by: Option<(String, SortDirection)>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push((field.to_string(), value.into()));
        self
    }

    pub fn order_by(mut self, field: &str, direction: SortDirection) -> Self {
        self.order_by = Some((field.to_string(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub data: Vec<RawRecord>,
    pub message: Option<String>,
}

impl ListResponse {
    pub fn ok(data: Vec<RawRecord>) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Vec::new(),
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WriteResult {
    pub success: bool,
    pub data: Option<RawRecord>,
    pub errors: Vec<String>,
}

impl WriteResult {
    fn ok(data: Option<RawRecord>) -> Self {
        Self {
            success: true,
            data,
            errors: Vec::new(),
        }
    }

    fn failed(error: String) -> Self {
        Self {
            success: false,
            data: None,
            errors: vec![error],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WriteResponse {
    pub success: bool,
    pub results: Vec<WriteResult>,
    pub message: Option<String>,
}

impl WriteResponse {
    fn ok(results: Vec<WriteResult>) -> Self {
        Self {
            success: true,
            results,
            message: None,
        }
    }
}

pub trait RecordStore {
    fn list(&self, table: &str, query: &Query) -> Result<ListResponse, StoreError>;
    fn get(&self, table: &str, id: i64) -> Result<ListResponse, StoreError>;
    fn create(&self, table: &str, records: Vec<RawRecord>) -> Result<WriteResponse, StoreError>;
    /// Each record must carry `Id`; fields present in the record replace stored ones.
    fn update(&self, table: &str, records: Vec<RawRecord>) -> Result<WriteResponse, StoreError>;
    fn delete(&self, table: &str, ids: &[i64]) -> Result<WriteResponse, StoreError>;
}

pub struct SqliteStore {
    conn: Connection,
}

/// Column expression for a record field. `Id` and `CreatedOn` are real columns.
fn field_expr(field: &str, params: &mut Vec<SqlValue>) -> String {
    match field {
        "Id" => "id".to_string(),
        "CreatedOn" => "created_on".to_string(),
        other => {
            params.push(SqlValue::Text(format!("$.\"{}\"", other.replace('"', ""))));
            format!("json_extract(data, ?{})", params.len())
        }
    }
}

fn sql_value(v: &Value) -> SqlValue {
    match v {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or(0.0)),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

fn hydrate(id: i64, data: &str, created_on: String) -> Result<RawRecord, StoreError> {
    let mut rec: RawRecord = serde_json::from_str(data)?;
    rec.insert("Id".into(), Value::from(id));
    rec.insert("CreatedOn".into(), Value::String(created_on));
    Ok(rec)
}

fn payload(mut rec: RawRecord) -> RawRecord {
    rec.remove("Id");
    rec.remove("CreatedOn");
    rec
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        crate::db::init_schema(&conn)?;
        Ok(Self::new(conn))
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    fn fetch_one(&self, table: &str, id: i64) -> Result<Option<RawRecord>, StoreError> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT data, created_on FROM records WHERE table_name=?1 AND id=?2",
                params![table, id],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()?;
        row.map(|(data, created_on)| hydrate(id, &data, created_on))
            .transpose()
    }
}

impl RecordStore for SqliteStore {
    fn list(&self, table: &str, query: &Query) -> Result<ListResponse, StoreError> {
        let mut params: Vec<SqlValue> = vec![SqlValue::Text(table.to_string())];
        let mut sql =
            String::from("SELECT id, data, created_on FROM records WHERE table_name=?1");
        for (field, value) in &query.filters {
            let expr = field_expr(field, &mut params);
            if value.is_null() {
                sql.push_str(&format!(" AND {} IS NULL", expr));
            } else {
                params.push(sql_value(value));
                sql.push_str(&format!(" AND {} = ?{}", expr, params.len()));
            }
        }
        match &query.order_by {
            Some((field, dir)) => {
                let expr = field_expr(field, &mut params);
                sql.push_str(&format!(
                    " ORDER BY {} {}, id {}",
                    expr,
                    dir.as_sql(),
                    dir.as_sql()
                ));
            }
            None => sql.push_str(" ORDER BY id ASC"),
        }
        let limit = query.limit.map(|l| l as i64).unwrap_or(-1);
        params.push(SqlValue::Integer(limit));
        sql.push_str(&format!(" LIMIT ?{}", params.len()));
        params.push(SqlValue::Integer(query.offset as i64));
        sql.push_str(&format!(" OFFSET ?{}", params.len()));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(params))?;
        let mut data = Vec::new();
        while let Some(r) = rows.next()? {
            let id: i64 = r.get(0)?;
            let body: String = r.get(1)?;
            let created_on: String = r.get(2)?;
            data.push(hydrate(id, &body, created_on)?);
        }
        tracing::debug!(table, rows = data.len(), "listed records");
        Ok(ListResponse::ok(data))
    }

    fn get(&self, table: &str, id: i64) -> Result<ListResponse, StoreError> {
        Ok(match self.fetch_one(table, id)? {
            Some(rec) => ListResponse::ok(vec![rec]),
            None => ListResponse::failed(format!("Record {} not found in {}", id, table)),
        })
    }

    fn create(&self, table: &str, records: Vec<RawRecord>) -> Result<WriteResponse, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        let mut results = Vec::with_capacity(records.len());
        for rec in records {
            let body = serde_json::to_string(&payload(rec))?;
            tx.execute(
                "INSERT INTO records(table_name, data) VALUES (?1, ?2)",
                params![table, body],
            )?;
            let id = tx.last_insert_rowid();
            let created_on: String = tx.query_row(
                "SELECT created_on FROM records WHERE id=?1",
                params![id],
                |r| r.get(0),
            )?;
            results.push(WriteResult::ok(Some(hydrate(id, &body, created_on)?)));
        }
        tx.commit()?;
        Ok(WriteResponse::ok(results))
    }

    fn update(&self, table: &str, records: Vec<RawRecord>) -> Result<WriteResponse, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        let mut results = Vec::with_capacity(records.len());
        for rec in records {
            let Some(id) = reference(&rec, &["Id"]) else {
                results.push(WriteResult::failed("Missing Id".to_string()));
                continue;
            };
            let Some(current) = self.fetch_one(table, id)? else {
                results.push(WriteResult::failed(format!("Record {} not found", id)));
                continue;
            };
            let created_on = current
                .get("CreatedOn")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let mut merged = payload(current);
            merged.extend(payload(rec));
            let body = serde_json::to_string(&merged)?;
            tx.execute(
                "UPDATE records SET data=?1 WHERE table_name=?2 AND id=?3",
                params![body, table, id],
            )?;
            results.push(WriteResult::ok(Some(hydrate(id, &body, created_on)?)));
        }
        tx.commit()?;
        Ok(WriteResponse::ok(results))
    }

    fn delete(&self, table: &str, ids: &[i64]) -> Result<WriteResponse, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            let n = tx.execute(
                "DELETE FROM records WHERE table_name=?1 AND id=?2",
                params![table, id],
            )?;
            if n == 0 {
                results.push(WriteResult::failed(format!("Record {} not found", id)));
            } else {
                results.push(WriteResult::ok(None));
            }
        }
        tx.commit()?;
        Ok(WriteResponse::ok(results))
    }
}
