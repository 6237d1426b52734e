#![forbid(unsafe_code)]

use super::super::{ActivityRow, StoreError};
use bk_core::changes::Changes;
use bk_core::events::CardActivityEvent;
use rusqlite::{Transaction, params};

/// The single append point of the activity log. Runs inside the same
/// transaction as the state change it describes, so either both commit
/// or neither does.
pub(in crate::store) fn insert_activity_tx(
    tx: &Transaction<'_>,
    card_id: i64,
    board_user_id: i64,
    event: CardActivityEvent,
    entity_id: Option<i64>,
    changes: Option<&Changes>,
    now_ms: i64,
) -> Result<ActivityRow, StoreError> {
    let changes_json = changes.map(Changes::to_json);
    tx.execute(
        r#"
        INSERT INTO card_activities(card_id, board_user_id, event, entity_id, changes_json, activity_on_ms)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        params![
            card_id,
            board_user_id,
            event.code(),
            entity_id,
            changes_json,
            now_ms
        ],
    )?;
    let id = tx.last_insert_rowid();
    Ok(ActivityRow {
        id,
        card_id,
        board_user_id,
        event: event.code(),
        entity_id,
        changes_json,
        activity_on_ms: now_ms,
    })
}
