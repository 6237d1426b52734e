#![forbid(unsafe_code)]

mod boards;
mod cards;
mod checklists;
mod error;
mod items;
mod lists;
mod support;
mod types;

pub use error::{FieldError, StoreError};
pub use types::*;

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use support::*;

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: PathBuf,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join("boardkit.db");
        let conn = Connection::open(db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        install_schema(&conn)?;

        Ok(Self { conn, storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }
}
