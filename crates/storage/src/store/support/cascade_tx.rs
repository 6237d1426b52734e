#![forbid(unsafe_code)]

use super::super::StoreError;
use rusqlite::{Transaction, params};

// The ownership tree (board -> lists -> cards -> checklists -> items)
// is deleted with explicit ordered statements rather than FK cascade
// semantics, so the policy is visible and testable here.

pub(in crate::store) fn delete_checklist_tx(
    tx: &Transaction<'_>,
    checklist_id: i64,
) -> Result<(), StoreError> {
    tx.execute(
        "DELETE FROM checklist_items WHERE checklist_id = ?1",
        params![checklist_id],
    )?;
    tx.execute(
        "DELETE FROM card_checklists WHERE id = ?1",
        params![checklist_id],
    )?;
    Ok(())
}

pub(in crate::store) fn delete_card_tx(tx: &Transaction<'_>, card_id: i64) -> Result<(), StoreError> {
    tx.execute(
        r#"
        DELETE FROM checklist_items
        WHERE checklist_id IN (SELECT id FROM card_checklists WHERE card_id = ?1)
        "#,
        params![card_id],
    )?;
    tx.execute(
        "DELETE FROM card_checklists WHERE card_id = ?1",
        params![card_id],
    )?;
    tx.execute(
        "DELETE FROM card_members WHERE card_id = ?1",
        params![card_id],
    )?;
    tx.execute(
        "DELETE FROM card_activities WHERE card_id = ?1",
        params![card_id],
    )?;
    tx.execute("DELETE FROM cards WHERE id = ?1", params![card_id])?;
    Ok(())
}

pub(in crate::store) fn delete_list_tx(tx: &Transaction<'_>, list_id: i64) -> Result<(), StoreError> {
    let mut stmt = tx.prepare("SELECT id FROM cards WHERE list_id = ?1")?;
    let rows = stmt.query_map(params![list_id], |row| row.get::<_, i64>(0))?;
    let card_ids = rows.collect::<Result<Vec<_>, _>>()?;
    drop(stmt);
    for card_id in card_ids {
        delete_card_tx(tx, card_id)?;
    }
    tx.execute("DELETE FROM board_lists WHERE id = ?1", params![list_id])?;
    Ok(())
}

pub(in crate::store) fn delete_board_tx(
    tx: &Transaction<'_>,
    board_id: i64,
) -> Result<(), StoreError> {
    let mut stmt = tx.prepare("SELECT id FROM board_lists WHERE board_id = ?1")?;
    let rows = stmt.query_map(params![board_id], |row| row.get::<_, i64>(0))?;
    let list_ids = rows.collect::<Result<Vec<_>, _>>()?;
    drop(stmt);
    for list_id in list_ids {
        delete_list_tx(tx, list_id)?;
    }
    tx.execute(
        "DELETE FROM board_users WHERE board_id = ?1",
        params![board_id],
    )?;
    tx.execute(
        r#"
        DELETE FROM board_role_permissions
        WHERE role_id IN (SELECT id FROM board_roles WHERE board_id = ?1)
        "#,
        params![board_id],
    )?;
    tx.execute(
        "DELETE FROM board_roles WHERE board_id = ?1",
        params![board_id],
    )?;
    tx.execute("DELETE FROM boards WHERE id = ?1", params![board_id])?;
    Ok(())
}
