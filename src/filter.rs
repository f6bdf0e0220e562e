// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;

use crate::models::FieldAccess;

/// Search text plus exact field matches. Empty values are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub search: String,
    pub exact: Vec<(String, String)>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, s: impl Into<String>) -> Self {
        self.search = s.into();
        self
    }

    pub fn matching(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.exact.push((field.into(), value.into()));
        self
    }

    /// Adds an exact match only when a value was supplied.
    pub fn matching_opt(self, field: &str, value: Option<&String>) -> Self {
        match value {
            Some(v) => self.matching(field, v.as_str()),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.exact.iter().all(|(_, v)| v.trim().is_empty())
    }

    pub fn accepts<T: FieldAccess>(&self, record: &T) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() {
            let hit = T::SEARCHABLE.iter().any(|f| {
                record
                    .field(f)
                    .is_some_and(|v| v.as_text().to_lowercase().contains(&needle))
            });
            if !hit {
                return false;
            }
        }
        self.exact
            .iter()
            .filter(|(_, want)| !want.trim().is_empty())
            .all(|(field, want)| {
                record
                    .field(field)
                    .is_some_and(|v| v.as_text().to_lowercase() == want.trim().to_lowercase())
            })
    }
}

/// Returns the records accepted by `criteria`, in input order.
pub fn filter<T: FieldAccess + Clone>(records: &[T], criteria: &Criteria) -> Vec<T> {
    if criteria.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| criteria.accepts(*r))
        .cloned()
        .collect()
}

/// Non-empty values of `field`, first occurrence order.
pub fn distinct_values<T: FieldAccess>(records: &[T], field: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for r in records {
        if let Some(v) = r.field(field) {
            let v = v.as_text().into_owned();
            if !v.is_empty() && seen.insert(v.clone()) {
                out.push(v);
            }
        }
    }
    out
}
