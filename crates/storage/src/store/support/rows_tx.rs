#![forbid(unsafe_code)]

use super::super::{
    ActivityRow, BoardRow, CardRow, ChecklistRow, ItemRow, ListRow, StoreError,
};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn board_from_row(row: &Row<'_>) -> Result<BoardRow, rusqlite::Error> {
    Ok(BoardRow {
        id: row.get(0)?,
        owner_user_id: row.get(1)?,
        title: row.get(2)?,
        created_at_ms: row.get(3)?,
        updated_at_ms: row.get(4)?,
    })
}

fn list_from_row(row: &Row<'_>) -> Result<ListRow, rusqlite::Error> {
    Ok(ListRow {
        id: row.get(0)?,
        board_id: row.get(1)?,
        title: row.get(2)?,
        position: row.get(3)?,
        created_at_ms: row.get(4)?,
        updated_at_ms: row.get(5)?,
    })
}

fn card_from_row(row: &Row<'_>) -> Result<CardRow, rusqlite::Error> {
    Ok(CardRow {
        id: row.get(0)?,
        list_id: row.get(1)?,
        board_id: row.get(2)?,
        owner_board_user_id: row.get(3)?,
        title: row.get(4)?,
        description: row.get(5)?,
        due_date_ms: row.get(6)?,
        position: row.get(7)?,
        created_at_ms: row.get(8)?,
        updated_at_ms: row.get(9)?,
    })
}

fn checklist_from_row(row: &Row<'_>) -> Result<ChecklistRow, rusqlite::Error> {
    Ok(ChecklistRow {
        id: row.get(0)?,
        card_id: row.get(1)?,
        board_id: row.get(2)?,
        title: row.get(3)?,
    })
}

fn item_from_row(row: &Row<'_>) -> Result<ItemRow, rusqlite::Error> {
    Ok(ItemRow {
        id: row.get(0)?,
        checklist_id: row.get(1)?,
        board_id: row.get(2)?,
        title: row.get(3)?,
        position: row.get(4)?,
        completed: row.get(5)?,
        marked_complete_board_user_id: row.get(6)?,
        marked_complete_on_ms: row.get(7)?,
        assigned_board_user_id: row.get(8)?,
        due_date_ms: row.get(9)?,
    })
}

fn activity_from_row(row: &Row<'_>) -> Result<ActivityRow, rusqlite::Error> {
    Ok(ActivityRow {
        id: row.get(0)?,
        card_id: row.get(1)?,
        board_user_id: row.get(2)?,
        event: row.get(3)?,
        entity_id: row.get(4)?,
        changes_json: row.get(5)?,
        activity_on_ms: row.get(6)?,
    })
}

pub(in crate::store) fn get_board_tx(
    conn: &Connection,
    board_id: i64,
) -> Result<BoardRow, StoreError> {
    conn.query_row(
        "SELECT id, owner_user_id, title, created_at_ms, updated_at_ms FROM boards WHERE id = ?1",
        params![board_id],
        board_from_row,
    )
    .optional()?
    .ok_or(StoreError::NotFound { entity: "board" })
}

pub(in crate::store) fn get_list_tx(
    conn: &Connection,
    list_id: i64,
) -> Result<ListRow, StoreError> {
    conn.query_row(
        r#"
        SELECT id, board_id, title, position, created_at_ms, updated_at_ms
        FROM board_lists
        WHERE id = ?1
        "#,
        params![list_id],
        list_from_row,
    )
    .optional()?
    .ok_or(StoreError::NotFound {
        entity: "board_list",
    })
}

pub(in crate::store) fn get_card_tx(
    conn: &Connection,
    card_id: i64,
) -> Result<CardRow, StoreError> {
    conn.query_row(
        r#"
        SELECT id, list_id, board_id, owner_board_user_id, title, description,
               due_date_ms, position, created_at_ms, updated_at_ms
        FROM cards
        WHERE id = ?1
        "#,
        params![card_id],
        card_from_row,
    )
    .optional()?
    .ok_or(StoreError::NotFound { entity: "card" })
}

pub(in crate::store) fn get_checklist_tx(
    conn: &Connection,
    checklist_id: i64,
) -> Result<ChecklistRow, StoreError> {
    conn.query_row(
        "SELECT id, card_id, board_id, title FROM card_checklists WHERE id = ?1",
        params![checklist_id],
        checklist_from_row,
    )
    .optional()?
    .ok_or(StoreError::NotFound {
        entity: "card_checklist",
    })
}

pub(in crate::store) fn get_item_tx(
    conn: &Connection,
    item_id: i64,
) -> Result<ItemRow, StoreError> {
    conn.query_row(
        r#"
        SELECT id, checklist_id, board_id, title, position, completed,
               marked_complete_board_user_id, marked_complete_on_ms,
               assigned_board_user_id, due_date_ms
        FROM checklist_items
        WHERE id = ?1
        "#,
        params![item_id],
        item_from_row,
    )
    .optional()?
    .ok_or(StoreError::NotFound {
        entity: "checklist_item",
    })
}

pub(in crate::store) fn list_cards_tx(
    conn: &Connection,
    list_id: i64,
) -> Result<Vec<CardRow>, StoreError> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, list_id, board_id, owner_board_user_id, title, description,
               due_date_ms, position, created_at_ms, updated_at_ms
        FROM cards
        WHERE list_id = ?1
        ORDER BY position ASC, id ASC
        "#,
    )?;
    let rows = stmt.query_map(params![list_id], card_from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub(in crate::store) fn checklist_items_tx(
    conn: &Connection,
    checklist_id: i64,
) -> Result<Vec<ItemRow>, StoreError> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, checklist_id, board_id, title, position, completed,
               marked_complete_board_user_id, marked_complete_on_ms,
               assigned_board_user_id, due_date_ms
        FROM checklist_items
        WHERE checklist_id = ?1
        ORDER BY position ASC, id ASC
        "#,
    )?;
    let rows = stmt.query_map(params![checklist_id], item_from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub(in crate::store) fn card_activities_tx(
    conn: &Connection,
    card_id: i64,
) -> Result<Vec<ActivityRow>, StoreError> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, card_id, board_user_id, event, entity_id, changes_json, activity_on_ms
        FROM card_activities
        WHERE card_id = ?1
        ORDER BY activity_on_ms DESC, id DESC
        "#,
    )?;
    let rows = stmt.query_map(params![card_id], activity_from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}
