// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Opsledger", "opsledger"));

/// Logical collection names. Each key round-trips as a JSON array of whole
/// entity records; there is no schema versioning or migration.
pub mod keys {
    pub const FUNDS: &str = "fundsV2";
    pub const TRANSACTIONS: &str = "transactionsV2";
    pub const AD_CLIENTS: &str = "ad_clients";
    pub const AD_ACCOUNTS: &str = "ad_accounts";
    pub const AD_CAMPAIGNS: &str = "ad_campaigns";
    pub const AD_TRANSACTIONS: &str = "ad_transactions";
}

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("opsledger.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS collections(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

/// Read a whole collection, or `None` if the key has never been written.
pub fn load<T: DeserializeOwned>(conn: &Connection, key: &str) -> Result<Option<Vec<T>>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM collections WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    match raw {
        Some(s) => {
            let items: Vec<T> = serde_json::from_str(&s)
                .with_context(|| format!("Corrupt collection '{}'", key))?;
            Ok(Some(items))
        }
        None => Ok(None),
    }
}

/// Read a collection, falling back to (and persisting) the provided seed
/// when the key is absent.
pub fn load_or_seed<T>(conn: &Connection, key: &str, seed: impl FnOnce() -> Vec<T>) -> Result<Vec<T>>
where
    T: Serialize + DeserializeOwned,
{
    if let Some(items) = load(conn, key)? {
        return Ok(items);
    }
    let items = seed();
    save(conn, key, &items)?;
    Ok(items)
}

/// Replace a whole collection. Callers write through after every ledger
/// state transition.
pub fn save<T: Serialize>(conn: &Connection, key: &str, items: &[T]) -> Result<()> {
    let value = serde_json::to_string(items)?;
    conn.execute(
        "INSERT INTO collections(key, value, updated_at) VALUES(?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at",
        params![key, value],
    )?;
    Ok(())
}
