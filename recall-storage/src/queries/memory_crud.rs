//! Insert, fetch, and delete for memory nodes, including the hydration of
//! container tags and outgoing relationships.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use recall_core::memory::{Confidence, Importance, MemorySource, MemoryNode};
use recall_core::RecallResult;

use crate::error::rusqlite_err;
use crate::vector;

/// Atomic insert-or-replace: memory row, container tags, and (re-)insertion
/// preserve the row's original `rowid` via `ON CONFLICT DO UPDATE`, so
/// `get_all`'s insertion-order scan is stable across updates.
pub fn put_node(conn: &Connection, node: &MemoryNode) -> RecallResult<()> {
    let tx = conn.unchecked_transaction().map_err(rusqlite_err)?;

    let entities_json = serde_json::to_string(&node.entities).map_err(|e| rusqlite_err_json(e))?;
    let topics_json = serde_json::to_string(&node.topics).map_err(|e| rusqlite_err_json(e))?;
    let blob = vector::encode(&node.embedding);

    tx.execute(
        "INSERT INTO memories (
            id, content, embedding, embedding_dims, model_identifier,
            timestamp, created_at, last_accessed, access_count,
            confidence, importance, is_static, is_latest, source,
            entities_json, topics_json
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
        ON CONFLICT(id) DO UPDATE SET
            content = excluded.content,
            embedding = excluded.embedding,
            embedding_dims = excluded.embedding_dims,
            model_identifier = excluded.model_identifier,
            timestamp = excluded.timestamp,
            last_accessed = excluded.last_accessed,
            access_count = excluded.access_count,
            confidence = excluded.confidence,
            importance = excluded.importance,
            is_static = excluded.is_static,
            is_latest = excluded.is_latest,
            source = excluded.source,
            entities_json = excluded.entities_json,
            topics_json = excluded.topics_json",
        params![
            node.id,
            node.content,
            blob,
            node.embedding.len() as i64,
            node.model_identifier,
            node.timestamp.to_rfc3339(),
            node.created_at.to_rfc3339(),
            node.last_accessed.to_rfc3339(),
            node.access_count as i64,
            node.confidence.value(),
            node.importance.value(),
            node.is_static as i64,
            node.is_latest as i64,
            source_to_str(node.source),
            entities_json,
            topics_json,
        ],
    )
    .map_err(rusqlite_err)?;

    tx.execute("DELETE FROM container_tags WHERE memory_id = ?1", params![node.id])
        .map_err(rusqlite_err)?;
    for tag in &node.container_tags {
        tx.execute(
            "INSERT INTO container_tags (memory_id, tag) VALUES (?1, ?2)",
            params![node.id, tag],
        )
        .map_err(rusqlite_err)?;
    }

    tx.commit().map_err(rusqlite_err)?;
    Ok(())
}

/// Fetch a node by id, hydrated with its container tags and outgoing
/// relationships.
pub fn get_node(conn: &Connection, id: &str) -> RecallResult<Option<MemoryNode>> {
    let row = conn
        .query_row(
            "SELECT id, content, embedding, embedding_dims, model_identifier,
                    timestamp, created_at, last_accessed, access_count,
                    confidence, importance, is_static, is_latest, source,
                    entities_json, topics_json
             FROM memories WHERE id = ?1",
            params![id],
            row_to_node,
        )
        .optional()
        .map_err(rusqlite_err)?;

    let Some(mut node) = row else {
        return Ok(None);
    };
    hydrate(conn, &mut node)?;
    Ok(Some(node))
}

/// Remove a node and all incident edges. Edges cascade via `ON DELETE
/// CASCADE`; container tags do too.
pub fn delete_node(conn: &Connection, id: &str) -> RecallResult<()> {
    conn.execute("DELETE FROM memories WHERE id = ?1", params![id])
        .map_err(rusqlite_err)?;
    Ok(())
}

/// Ordered iteration over every node, oldest `rowid` first (insertion
/// order, stable across in-place updates thanks to `put_node`'s upsert).
pub fn get_all(conn: &Connection) -> RecallResult<Vec<MemoryNode>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, content, embedding, embedding_dims, model_identifier,
                    timestamp, created_at, last_accessed, access_count,
                    confidence, importance, is_static, is_latest, source,
                    entities_json, topics_json
             FROM memories ORDER BY rowid ASC",
        )
        .map_err(rusqlite_err)?;

    let mut nodes = stmt
        .query_map([], row_to_node)
        .map_err(rusqlite_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(rusqlite_err)?;

    for node in &mut nodes {
        hydrate(conn, node)?;
    }
    Ok(nodes)
}

fn hydrate(conn: &Connection, node: &mut MemoryNode) -> RecallResult<()> {
    let mut stmt = conn
        .prepare("SELECT tag FROM container_tags WHERE memory_id = ?1")
        .map_err(rusqlite_err)?;
    let tags: BTreeSet<String> = stmt
        .query_map(params![node.id], |row| row.get(0))
        .map_err(rusqlite_err)?
        .collect::<Result<_, _>>()
        .map_err(rusqlite_err)?;
    node.container_tags = tags;

    node.relationships = crate::queries::relationship_ops::get_outgoing(conn, &node.id)?;
    Ok(())
}

fn row_to_node(row: &rusqlite::Row<'_>) -> rusqlite::Result<MemoryNode> {
    let embedding_blob: Vec<u8> = row.get(2)?;
    let entities_json: String = row.get(14)?;
    let topics_json: String = row.get(15)?;
    let source_str: String = row.get(13)?;

    Ok(MemoryNode {
        id: row.get(0)?,
        content: row.get(1)?,
        embedding: vector::decode(&embedding_blob),
        model_identifier: row.get(4)?,
        timestamp: parse_dt(&row.get::<_, String>(5)?, 5)?,
        created_at: parse_dt(&row.get::<_, String>(6)?, 6)?,
        last_accessed: parse_dt(&row.get::<_, String>(7)?, 7)?,
        access_count: row.get::<_, i64>(8)? as u64,
        confidence: Confidence::new(row.get(9)?),
        importance: Importance::new(row.get(10)?),
        is_static: row.get::<_, i64>(11)? != 0,
        is_latest: row.get::<_, i64>(12)? != 0,
        source: str_to_source(&source_str),
        entities: serde_json::from_str(&entities_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(14, rusqlite::types::Type::Text, Box::new(e))
        })?,
        topics: serde_json::from_str(&topics_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(15, rusqlite::types::Type::Text, Box::new(e))
        })?,
        container_tags: BTreeSet::new(),
        relationships: Vec::new(),
    })
}

fn parse_dt(s: &str, col: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(e)))
}

fn source_to_str(source: MemorySource) -> &'static str {
    match source {
        MemorySource::UserInput => "user_input",
        MemorySource::ExtractedFromConversation => "extracted_from_conversation",
        MemorySource::Inferred => "inferred",
    }
}

fn str_to_source(s: &str) -> MemorySource {
    match s {
        "extracted_from_conversation" => MemorySource::ExtractedFromConversation,
        "inferred" => MemorySource::Inferred,
        _ => MemorySource::UserInput,
    }
}

fn rusqlite_err_json(e: serde_json::Error) -> rusqlite::Error {
    rusqlite::Error::ToSqlConversionFailure(Box::new(e))
}
