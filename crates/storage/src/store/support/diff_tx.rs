#![forbid(unsafe_code)]

use super::super::{CardPatch, CardRow, ItemPatch, ItemRow, MemberRow, StoreError};
use super::{format_ts, insert_activity_tx};
use bk_core::changes::Changes;
use bk_core::events::CardActivityEvent;
use rusqlite::{Transaction, params};
use serde_json::Value;

fn due_date_value(ms: Option<i64>) -> Value {
    match ms {
        Some(ms) => Value::String(format_ts(ms)),
        None => Value::String(String::new()),
    }
}

/// Diff capture for a checklist-item patch. Compares the prior row with
/// the proposed change set and appends one activity per changed kind.
/// The completed transition also flips the marked-complete pair in the
/// same statement, so the audit record and the state change are one
/// logical unit.
pub(in crate::store) fn item_capture_changes_tx(
    tx: &Transaction<'_>,
    member: &MemberRow,
    card_id: i64,
    item: &ItemRow,
    patch: &ItemPatch,
    now_ms: i64,
) -> Result<(), StoreError> {
    if let Some(completed) = patch.completed
        && completed != item.completed
    {
        insert_activity_tx(
            tx,
            card_id,
            member.id,
            CardActivityEvent::ChecklistItemMarked,
            Some(item.id),
            Some(
                &Changes::to_only()
                    .set_to("title", item.title.as_str())
                    .set_to("completed", completed),
            ),
            now_ms,
        )?;

        if completed {
            tx.execute(
                r#"
                UPDATE checklist_items
                SET completed = 1, marked_complete_board_user_id = ?1, marked_complete_on_ms = ?2
                WHERE id = ?3
                "#,
                params![member.id, now_ms, item.id],
            )?;
        } else {
            tx.execute(
                r#"
                UPDATE checklist_items
                SET completed = 0, marked_complete_board_user_id = NULL, marked_complete_on_ms = NULL
                WHERE id = ?1
                "#,
                params![item.id],
            )?;
        }
    }

    if let Some(assigned) = patch.assigned_board_user_id
        && assigned.is_some()
        && assigned != item.assigned_board_user_id
    {
        insert_activity_tx(
            tx,
            card_id,
            member.id,
            CardActivityEvent::ChecklistItemUserAssign,
            Some(item.id),
            Some(&Changes::to_only().set_to("board_user_id", assigned)),
            now_ms,
        )?;
    }

    if let Some(due_date_ms) = patch.due_date_ms
        && due_date_ms.is_some()
        && due_date_ms != item.due_date_ms
    {
        insert_activity_tx(
            tx,
            card_id,
            member.id,
            CardActivityEvent::ChecklistItemDueDate,
            Some(item.id),
            Some(
                &Changes::from_to()
                    .set_from("due_date", due_date_value(item.due_date_ms))
                    .set_to("due_date", due_date_value(due_date_ms)),
            ),
            now_ms,
        )?;
    }

    Ok(())
}

/// Diff capture for a card patch: list moves and due-date transitions
/// are activity-worthy; title and description edits are not.
pub(in crate::store) fn card_capture_changes_tx(
    tx: &Transaction<'_>,
    member: &MemberRow,
    card: &CardRow,
    patch: &CardPatch,
    now_ms: i64,
) -> Result<(), StoreError> {
    if let Some(list_id) = patch.list_id
        && list_id != card.list_id
    {
        insert_activity_tx(
            tx,
            card.id,
            member.id,
            CardActivityEvent::CardMoveToList,
            Some(card.id),
            Some(
                &Changes::from_to()
                    .set_from("list_id", card.list_id)
                    .set_to("list_id", list_id),
            ),
            now_ms,
        )?;
    }

    if let Some(due_date_ms) = patch.due_date_ms
        && due_date_ms != card.due_date_ms
    {
        let (event, changes) = match (card.due_date_ms, due_date_ms) {
            (None, Some(new)) => (
                CardActivityEvent::CardAddDate,
                Changes::to_only().set_to("due_date", format_ts(new)),
            ),
            (Some(old), Some(new)) => (
                CardActivityEvent::CardEditDate,
                Changes::from_to()
                    .set_from("due_date", format_ts(old))
                    .set_to("due_date", format_ts(new)),
            ),
            (Some(old), None) => (
                CardActivityEvent::CardDeleteDate,
                Changes::default().set_from("due_date", format_ts(old)),
            ),
            (None, None) => return Ok(()),
        };
        insert_activity_tx(
            tx,
            card.id,
            member.id,
            event,
            Some(card.id),
            Some(&changes),
            now_ms,
        )?;
    }

    Ok(())
}
