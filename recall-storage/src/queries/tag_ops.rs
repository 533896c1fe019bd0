//! Queries over `container_tags`: static facts for a user, and arbitrary
//! tag-set lookups.

use rusqlite::{params, Connection};

use recall_core::memory::MemoryNode;
use recall_core::RecallResult;

use crate::error::rusqlite_err;
use crate::queries::memory_crud;

/// All static memories tagged `user:<user_id>`.
pub fn get_static(conn: &Connection, user_id: &str) -> RecallResult<Vec<MemoryNode>> {
    let tag = format!("user:{user_id}");
    let mut stmt = conn
        .prepare(
            "SELECT m.id FROM memories m
             JOIN container_tags t ON t.memory_id = m.id
             WHERE t.tag = ?1 AND m.is_static = 1
             ORDER BY m.rowid ASC",
        )
        .map_err(rusqlite_err)?;

    let ids: Vec<String> = stmt
        .query_map(params![tag], |row| row.get(0))
        .map_err(rusqlite_err)?
        .collect::<Result<_, _>>()
        .map_err(rusqlite_err)?;

    hydrate_ids(conn, &ids)
}

/// Memories whose `container_tags` intersects `tags` (any match, not all).
pub fn get_by_tags(conn: &Connection, tags: &[String]) -> RecallResult<Vec<MemoryNode>> {
    if tags.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders: Vec<String> = (1..=tags.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "SELECT DISTINCT m.id, m.rowid FROM memories m
         JOIN container_tags t ON t.memory_id = m.id
         WHERE t.tag IN ({})
         ORDER BY m.rowid ASC",
        placeholders.join(", "),
    );

    let mut stmt = conn.prepare(&sql).map_err(rusqlite_err)?;
    let bind_params: Vec<&dyn rusqlite::types::ToSql> =
        tags.iter().map(|t| t as &dyn rusqlite::types::ToSql).collect();

    let ids: Vec<String> = stmt
        .query_map(bind_params.as_slice(), |row| row.get(0))
        .map_err(rusqlite_err)?
        .collect::<Result<_, _>>()
        .map_err(rusqlite_err)?;

    hydrate_ids(conn, &ids)
}

fn hydrate_ids(conn: &Connection, ids: &[String]) -> RecallResult<Vec<MemoryNode>> {
    let mut nodes = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(node) = memory_crud::get_node(conn, id)? {
            nodes.push(node);
        }
    }
    Ok(nodes)
}
