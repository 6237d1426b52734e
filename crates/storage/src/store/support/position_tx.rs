#![forbid(unsafe_code)]

use super::super::StoreError;
use rusqlite::{Transaction, params};
use std::collections::HashSet;

// max+1 reads run inside the same write transaction as the insert they
// feed; SQLite's single-writer locking serializes concurrent creations,
// so two inserts can never observe the same max.

pub(in crate::store) fn next_list_position_tx(
    tx: &Transaction<'_>,
    board_id: i64,
) -> Result<i64, StoreError> {
    let position: i64 = tx.query_row(
        "SELECT COALESCE(MAX(position) + 1, 0) FROM board_lists WHERE board_id = ?1",
        params![board_id],
        |row| row.get(0),
    )?;
    Ok(position)
}

pub(in crate::store) fn next_card_position_tx(
    tx: &Transaction<'_>,
    list_id: i64,
) -> Result<i64, StoreError> {
    let position: i64 = tx.query_row(
        "SELECT COALESCE(MAX(position) + 1, 0) FROM cards WHERE list_id = ?1",
        params![list_id],
        |row| row.get(0),
    )?;
    Ok(position)
}

pub(in crate::store) fn next_item_position_tx(
    tx: &Transaction<'_>,
    checklist_id: i64,
) -> Result<i64, StoreError> {
    let position: i64 = tx.query_row(
        "SELECT COALESCE(MAX(position) + 1, 0) FROM checklist_items WHERE checklist_id = ?1",
        params![checklist_id],
        |row| row.get(0),
    )?;
    Ok(position)
}

/// Reassigns dense zero-based positions to a sibling group. Ids that do
/// not belong to the group are dropped without error (a stale or hostile
/// payload must not corrupt another group), duplicates keep their first
/// occurrence, and the surviving sequence must cover every sibling so
/// positions stay contiguous. Re-applying the same sequence is a no-op.
fn reorder_tx(
    tx: &Transaction<'_>,
    sibling_ids: &[i64],
    ordered_ids: &[i64],
    update_sql: &str,
) -> Result<(), StoreError> {
    let group: HashSet<i64> = sibling_ids.iter().copied().collect();
    let mut seen = HashSet::new();
    let surviving: Vec<i64> = ordered_ids
        .iter()
        .copied()
        .filter(|id| group.contains(id) && seen.insert(*id))
        .collect();

    if surviving.len() != group.len() {
        return Err(StoreError::InvalidInput(
            "positions update must include every sibling exactly once",
        ));
    }

    for (position, id) in surviving.iter().enumerate() {
        tx.execute(update_sql, params![position as i64, id])?;
    }
    Ok(())
}

pub(in crate::store) fn reorder_cards_tx(
    tx: &Transaction<'_>,
    list_id: i64,
    ordered_ids: &[i64],
) -> Result<(), StoreError> {
    let mut stmt = tx.prepare("SELECT id FROM cards WHERE list_id = ?1")?;
    let rows = stmt.query_map(params![list_id], |row| row.get::<_, i64>(0))?;
    let sibling_ids = rows.collect::<Result<Vec<_>, _>>()?;
    drop(stmt);
    reorder_tx(
        tx,
        &sibling_ids,
        ordered_ids,
        "UPDATE cards SET position = ?1 WHERE id = ?2",
    )
}

pub(in crate::store) fn reorder_items_tx(
    tx: &Transaction<'_>,
    checklist_id: i64,
    ordered_ids: &[i64],
) -> Result<(), StoreError> {
    let mut stmt = tx.prepare("SELECT id FROM checklist_items WHERE checklist_id = ?1")?;
    let rows = stmt.query_map(params![checklist_id], |row| row.get::<_, i64>(0))?;
    let sibling_ids = rows.collect::<Result<Vec<_>, _>>()?;
    drop(stmt);
    reorder_tx(
        tx,
        &sibling_ids,
        ordered_ids,
        "UPDATE checklist_items SET position = ?1 WHERE id = ?2",
    )
}
