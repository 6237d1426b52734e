#![forbid(unsafe_code)]

use super::*;
use bk_core::changes::Changes;
use bk_core::events::CardActivityEvent;
use bk_core::permissions::BoardPermission;
use rusqlite::params;
use serde_json::Value;

fn title_value(title: &Option<String>) -> Value {
    match title {
        Some(title) => Value::String(title.clone()),
        None => Value::Null,
    }
}

impl SqliteStore {
    pub fn checklist_create(
        &mut self,
        actor_user_id: i64,
        card_id: i64,
        request: ChecklistCreateRequest,
    ) -> Result<ChecklistRow, StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let card = get_card_tx(&tx, card_id)?;
        let member = member_or_forbidden_tx(&tx, card.board_id, actor_user_id)?;
        require_permission_tx(&tx, &member, BoardPermission::ChecklistCreate)?;

        tx.execute(
            "INSERT INTO card_checklists(card_id, board_id, title) VALUES (?1, ?2, ?3)",
            params![card_id, card.board_id, request.title],
        )?;
        let checklist_id = tx.last_insert_rowid();

        insert_activity_tx(
            &tx,
            card.id,
            member.id,
            CardActivityEvent::ChecklistCreate,
            Some(checklist_id),
            Some(&Changes::to_only().set_to("title", title_value(&request.title))),
            now_ms,
        )?;

        let checklist = get_checklist_tx(&tx, checklist_id)?;
        tx.commit()?;
        Ok(checklist)
    }

    pub fn checklist_patch(
        &mut self,
        actor_user_id: i64,
        checklist_id: i64,
        patch: ChecklistPatch,
    ) -> Result<ChecklistRow, StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let checklist = get_checklist_tx(&tx, checklist_id)?;
        let member = member_or_forbidden_tx(&tx, checklist.board_id, actor_user_id)?;
        require_permission_tx(&tx, &member, BoardPermission::ChecklistEdit)?;

        if let Some(title) = &patch.title
            && *title != checklist.title
        {
            insert_activity_tx(
                &tx,
                checklist.card_id,
                member.id,
                CardActivityEvent::ChecklistUpdate,
                Some(checklist.id),
                Some(
                    &Changes::from_to()
                        .set_from("title", title_value(&checklist.title))
                        .set_to("title", title_value(title)),
                ),
                now_ms,
            )?;
            tx.execute(
                "UPDATE card_checklists SET title = ?1 WHERE id = ?2",
                params![title, checklist_id],
            )?;
        }

        let checklist = get_checklist_tx(&tx, checklist_id)?;
        tx.commit()?;
        Ok(checklist)
    }

    /// Deletes the checklist and its items. The deletion activity is
    /// appended in the same transaction, so the card's log keeps a
    /// record of the checklist after the rows are gone.
    pub fn checklist_delete(
        &mut self,
        actor_user_id: i64,
        checklist_id: i64,
    ) -> Result<(), StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let checklist = get_checklist_tx(&tx, checklist_id)?;
        let member = member_or_forbidden_tx(&tx, checklist.board_id, actor_user_id)?;
        require_permission_tx(&tx, &member, BoardPermission::ChecklistEdit)?;

        delete_checklist_tx(&tx, checklist_id)?;
        insert_activity_tx(
            &tx,
            checklist.card_id,
            member.id,
            CardActivityEvent::ChecklistDelete,
            Some(checklist.id),
            None,
            now_ms,
        )?;

        tx.commit()?;
        Ok(())
    }
}
