//! Relationship edge CRUD. Edges are keyed by `(source_id, target_id,
//! relationship_type)`; adding an edge that already exists overwrites its
//! confidence rather than duplicating the row.

use rusqlite::{params, Connection, OptionalExtension};

use recall_core::memory::{RelationshipEdge, RelationshipType};
use recall_core::{RecallError, RecallResult};

use crate::error::rusqlite_err;

/// Insert or update an edge. Errors with `DanglingEndpoint` if either node
/// is absent — relationships may only span existing memories.
pub fn add_edge(conn: &Connection, edge: &RelationshipEdge) -> RecallResult<()> {
    if !node_exists(conn, &edge.source_id)? {
        return Err(RecallError::DanglingEndpoint { id: edge.source_id.clone() });
    }
    if !node_exists(conn, &edge.target_id)? {
        return Err(RecallError::DanglingEndpoint { id: edge.target_id.clone() });
    }

    conn.execute(
        "INSERT INTO relationships (source_id, target_id, relationship_type, confidence)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(source_id, target_id, relationship_type) DO UPDATE SET
            confidence = excluded.confidence",
        params![
            edge.source_id,
            edge.target_id,
            type_to_str(edge.relationship_type),
            edge.confidence,
        ],
    )
    .map_err(rusqlite_err)?;
    Ok(())
}

/// Outgoing edges from a node, i.e. where it is the source.
pub fn get_outgoing(conn: &Connection, memory_id: &str) -> RecallResult<Vec<RelationshipEdge>> {
    let mut stmt = conn
        .prepare(
            "SELECT source_id, target_id, relationship_type, confidence
             FROM relationships WHERE source_id = ?1",
        )
        .map_err(rusqlite_err)?;

    let rows = stmt
        .query_map(params![memory_id], row_to_edge)
        .map_err(rusqlite_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(rusqlite_err)?;
    Ok(rows)
}

/// Count of all edges in the graph, used by `stats()`.
pub fn count_all(conn: &Connection) -> RecallResult<usize> {
    conn.query_row("SELECT COUNT(*) FROM relationships", [], |row| row.get::<_, i64>(0))
        .map(|n| n as usize)
        .map_err(rusqlite_err)
}

fn node_exists(conn: &Connection, id: &str) -> RecallResult<bool> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM memories WHERE id = ?1", params![id], |row| row.get(0))
        .optional()
        .map_err(rusqlite_err)?;
    Ok(found.is_some())
}

fn row_to_edge(row: &rusqlite::Row<'_>) -> rusqlite::Result<RelationshipEdge> {
    let type_str: String = row.get(2)?;
    Ok(RelationshipEdge {
        source_id: row.get(0)?,
        target_id: row.get(1)?,
        relationship_type: str_to_type(&type_str),
        confidence: row.get(3)?,
    })
}

fn type_to_str(t: RelationshipType) -> &'static str {
    match t {
        RelationshipType::Updates => "updates",
        RelationshipType::Extends => "extends",
        RelationshipType::RelatedTo => "related_to",
    }
}

fn str_to_type(s: &str) -> RelationshipType {
    match s {
        "updates" => RelationshipType::Updates,
        "extends" => RelationshipType::Extends,
        _ => RelationshipType::RelatedTo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_round_trips() {
        for t in RelationshipType::ALL {
            assert_eq!(str_to_type(type_to_str(t)), t);
        }
    }
}
