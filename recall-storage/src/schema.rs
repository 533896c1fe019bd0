//! Schema creation and versioning.
//!
//! The schema is tracked with SQLite's built-in `user_version` pragma
//! rather than a bespoke migrations table: there is exactly one schema
//! version to date, so a migration ladder would be speculative.

use rusqlite::Connection;

use recall_core::RecallResult;

use crate::error::rusqlite_err;

const CURRENT_VERSION: i64 = 1;

/// Create the schema if this is a fresh database, and verify the stored
/// version matches what this build expects.
pub fn ensure_schema(conn: &Connection) -> RecallResult<()> {
    let version: i64 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(rusqlite_err)?;

    if version == 0 {
        create_v1(conn)?;
        conn.execute_batch(&format!("PRAGMA user_version = {CURRENT_VERSION}"))
            .map_err(rusqlite_err)?;
    } else if version != CURRENT_VERSION {
        tracing::warn!(
            found = version,
            expected = CURRENT_VERSION,
            "database schema version mismatch"
        );
    }
    Ok(())
}

fn create_v1(conn: &Connection) -> RecallResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE memories (
            id                  TEXT PRIMARY KEY,
            content             TEXT NOT NULL,
            embedding           BLOB NOT NULL,
            embedding_dims      INTEGER NOT NULL,
            model_identifier    TEXT NOT NULL,
            timestamp           TEXT NOT NULL,
            created_at          TEXT NOT NULL,
            last_accessed       TEXT NOT NULL,
            access_count        INTEGER NOT NULL DEFAULT 0,
            confidence          REAL NOT NULL,
            importance          REAL NOT NULL,
            is_static           INTEGER NOT NULL DEFAULT 0,
            is_latest           INTEGER NOT NULL DEFAULT 1,
            source              TEXT NOT NULL,
            entities_json       TEXT NOT NULL DEFAULT '[]',
            topics_json         TEXT NOT NULL DEFAULT '[]'
        );

        CREATE TABLE container_tags (
            memory_id TEXT NOT NULL REFERENCES memories(id) ON DELETE CASCADE,
            tag       TEXT NOT NULL,
            PRIMARY KEY (memory_id, tag)
        );
        CREATE INDEX idx_container_tags_tag ON container_tags(tag);

        CREATE TABLE relationships (
            source_id           TEXT NOT NULL REFERENCES memories(id) ON DELETE CASCADE,
            target_id           TEXT NOT NULL REFERENCES memories(id) ON DELETE CASCADE,
            relationship_type   TEXT NOT NULL,
            confidence          REAL NOT NULL,
            PRIMARY KEY (source_id, target_id, relationship_type)
        );
        CREATE INDEX idx_relationships_source ON relationships(source_id);
        CREATE INDEX idx_relationships_target ON relationships(target_id);

        CREATE TABLE engine_metadata (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE INDEX idx_memories_is_static ON memories(is_static);
        CREATE INDEX idx_memories_confidence ON memories(confidence);
        ",
    )
    .map_err(rusqlite_err)
}
