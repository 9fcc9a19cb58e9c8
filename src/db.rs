// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::models::FarmData;
use crate::store::{Persist, Store};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Farmbook", "farmbook"));

/// Environment override for the database location.
pub const DB_ENV: &str = "FARMBOOK_DB";

/// Key under which the farm document is stored.
pub const DOCUMENT_KEY: &str = "farm";

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("farmbook.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    open_at(&db_path()?)
}

pub fn open_at(path: &Path) -> Result<Connection> {
    let mut conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS documents(
        key TEXT PRIMARY KEY,
        body TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

pub fn load_document(conn: &Connection) -> Result<Option<String>> {
    let body: Option<String> = conn
        .query_row(
            "SELECT body FROM documents WHERE key=?1",
            params![DOCUMENT_KEY],
            |r| r.get(0),
        )
        .optional()?;
    Ok(body)
}

pub fn save_document(conn: &Connection, body: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO documents(key, body) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET body=excluded.body, updated_at=datetime('now')",
        params![DOCUMENT_KEY, body],
    )?;
    Ok(())
}

impl Persist for Connection {
    fn persist(&mut self, data: &FarmData) -> Result<()> {
        let body = serde_json::to_string(data)?;
        save_document(self, &body)?;
        debug!(bytes = body.len(), "farm document saved");
        Ok(())
    }
}

/// Opens the store over an initialised connection.
pub fn open_store(conn: Connection) -> Result<Store<Connection>> {
    let body = load_document(&conn)?;
    Ok(Store::load(body.as_deref(), conn))
}
