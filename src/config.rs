// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use serde::Serialize;

use crate::db::{get_setting, set_setting};

pub const PAGE_SIZE_KEY: &str = "page_size";
pub const CURRENCY_KEY: &str = "currency";
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub page_size: usize,
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl Settings {
    pub fn load(conn: &Connection) -> Result<Self> {
        let mut s = Settings::default();
        if let Some(v) = get_setting(conn, PAGE_SIZE_KEY)? {
            match v.parse::<usize>() {
                Ok(n) if n > 0 => s.page_size = n,
                _ => tracing::warn!(value = %v, "ignoring invalid page_size setting"),
            }
        }
        if let Some(v) = get_setting(conn, CURRENCY_KEY)? {
            s.currency = v;
        }
        Ok(s)
    }

    /// Validates and persists a single setting.
    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            PAGE_SIZE_KEY => {
                let n: usize = value
                    .parse()
                    .with_context(|| format!("Invalid page size '{}'", value))?;
                if n == 0 {
                    return Err(anyhow!("Page size must be positive"));
                }
                set_setting(conn, key, &n.to_string())
            }
            CURRENCY_KEY => {
                if value.is_empty() {
                    return Err(anyhow!("Currency must not be empty"));
                }
                set_setting(conn, key, &value.to_uppercase())
            }
            other => Err(anyhow!(
                "Unknown setting '{}' (use {}|{})",
                other,
                PAGE_SIZE_KEY,
                CURRENCY_KEY
            )),
        }
    }
}
