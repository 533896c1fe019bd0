//! The single writer connection. All mutating operations route through
//! here; the engine facade serializes access above this layer, so the
//! mutex here only guards against accidental concurrent misuse.

use std::sync::Mutex;

use recall_core::config::StorageConfig;
use recall_core::RecallResult;
use rusqlite::Connection;

use super::pragmas::apply_writer_pragmas;
use crate::error::rusqlite_err;
use crate::schema;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &std::path::Path, config: &StorageConfig) -> RecallResult<Self> {
        let conn = Connection::open(path).map_err(rusqlite_err)?;
        apply_writer_pragmas(&conn, config)?;
        schema::ensure_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory(uri: &str, config: &StorageConfig) -> RecallResult<Self> {
        let conn = Connection::open_with_flags(
            uri,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )
        .map_err(rusqlite_err)?;
        apply_writer_pragmas(&conn, config)?;
        schema::ensure_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> RecallResult<T>
    where
        F: FnOnce(&Connection) -> RecallResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| crate::error::to_storage_error(format!("writer lock poisoned: {e}")))?;
        f(&guard)
    }
}
