//! Item Positioning
//!
//! Order assignment for items appended to a list.

use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::domain::DomainResult;

/// Next order for a new item: `max(order) + 1`, or 1 for an empty list
pub(super) fn next_order_in(conn: &Connection, list_id: Uuid) -> DomainResult<i64> {
    let next = conn.query_row(
        "SELECT COALESCE(MAX(position), 0) + 1 FROM items WHERE list_id = ?1",
        params![list_id.to_string()],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(next)
}
