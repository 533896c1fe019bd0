//! Aggregate counters over the whole store.

use rusqlite::Connection;

use recall_core::traits::StorageStats;
use recall_core::RecallResult;

use crate::error::rusqlite_err;
use crate::queries::relationship_ops;

pub fn compute(conn: &Connection) -> RecallResult<StorageStats> {
    let node_count: usize = conn
        .query_row("SELECT COUNT(*) FROM memories", [], |row| row.get::<_, i64>(0))
        .map(|n| n as usize)
        .map_err(rusqlite_err)?;
    let edge_count = relationship_ops::count_all(conn)?;

    let mean_out_degree = if node_count == 0 {
        0.0
    } else {
        edge_count as f64 / node_count as f64
    };

    Ok(StorageStats { node_count, edge_count, mean_out_degree })
}
