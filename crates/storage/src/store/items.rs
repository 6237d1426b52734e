#![forbid(unsafe_code)]

use super::*;
use bk_core::permissions::BoardPermission;
use rusqlite::params;

impl SqliteStore {
    pub fn item_create(
        &mut self,
        actor_user_id: i64,
        checklist_id: i64,
        request: ItemCreateRequest,
    ) -> Result<ItemRow, StoreError> {
        let tx = self.conn.transaction()?;

        let checklist = get_checklist_tx(&tx, checklist_id)?;
        let member = member_or_forbidden_tx(&tx, checklist.board_id, actor_user_id)?;
        require_permission_tx(&tx, &member, BoardPermission::ChecklistEdit)?;

        if let Some(assigned) = request.assigned_board_user_id
            && member_by_id_tx(&tx, checklist.board_id, assigned)?.is_none()
        {
            return Err(StoreError::Validation(vec![FieldError {
                field: "assigned_board_user_id",
                message: "User not exists or not member of board!",
            }]));
        }

        let position = next_item_position_tx(&tx, checklist_id)?;
        tx.execute(
            r#"
            INSERT INTO checklist_items(checklist_id, board_id, title, position, completed,
                                        assigned_board_user_id, due_date_ms)
            VALUES (?1, ?2, ?3, ?4, 0, ?5, ?6)
            "#,
            params![
                checklist_id,
                checklist.board_id,
                request.title,
                position,
                request.assigned_board_user_id,
                request.due_date_ms
            ],
        )?;
        let item_id = tx.last_insert_rowid();

        let item = get_item_tx(&tx, item_id)?;
        tx.commit()?;
        Ok(item)
    }

    /// Full edits need `checklist.edit`. Holders of only
    /// `checklist_item.mark` get a narrow path that accepts a patch whose
    /// sole present field is `completed`; anything else on that path is
    /// rejected outright rather than silently dropped.
    pub fn item_patch(
        &mut self,
        actor_user_id: i64,
        item_id: i64,
        patch: ItemPatch,
    ) -> Result<ItemRow, StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let item = get_item_tx(&tx, item_id)?;
        let member = member_or_forbidden_tx(&tx, item.board_id, actor_user_id)?;
        let checklist = get_checklist_tx(&tx, item.checklist_id)?;

        if has_permission_tx(&tx, &member, BoardPermission::ChecklistEdit)? {
            if let Some(Some(assigned)) = patch.assigned_board_user_id
                && member_by_id_tx(&tx, item.board_id, assigned)?.is_none()
            {
                return Err(StoreError::Validation(vec![FieldError {
                    field: "assigned_board_user_id",
                    message: "User not exists or not member of board!",
                }]));
            }

            item_capture_changes_tx(&tx, &member, checklist.card_id, &item, &patch, now_ms)?;

            if let Some(title) = &patch.title {
                tx.execute(
                    "UPDATE checklist_items SET title = ?1 WHERE id = ?2",
                    params![title, item_id],
                )?;
            }
            if let Some(assigned) = patch.assigned_board_user_id {
                tx.execute(
                    "UPDATE checklist_items SET assigned_board_user_id = ?1 WHERE id = ?2",
                    params![assigned, item_id],
                )?;
            }
            if let Some(due_date_ms) = patch.due_date_ms {
                tx.execute(
                    "UPDATE checklist_items SET due_date_ms = ?1 WHERE id = ?2",
                    params![due_date_ms, item_id],
                )?;
            }
        } else if has_permission_tx(&tx, &member, BoardPermission::ChecklistItemMark)? {
            if !patch.is_mark_only() {
                return Err(StoreError::Forbidden);
            }
            item_capture_changes_tx(&tx, &member, checklist.card_id, &item, &patch, now_ms)?;
        } else {
            return Err(StoreError::Forbidden);
        }

        let item = get_item_tx(&tx, item_id)?;
        tx.commit()?;
        Ok(item)
    }

    pub fn item_delete(&mut self, actor_user_id: i64, item_id: i64) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;

        let item = get_item_tx(&tx, item_id)?;
        let member = member_or_forbidden_tx(&tx, item.board_id, actor_user_id)?;
        require_permission_tx(&tx, &member, BoardPermission::ChecklistEdit)?;

        tx.execute(
            "DELETE FROM checklist_items WHERE id = ?1",
            params![item_id],
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn item_positions_update(
        &mut self,
        actor_user_id: i64,
        checklist_id: i64,
        ordered_item_ids: &[i64],
    ) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;

        let checklist = get_checklist_tx(&tx, checklist_id)?;
        let member = member_or_forbidden_tx(&tx, checklist.board_id, actor_user_id)?;
        require_permission_tx(&tx, &member, BoardPermission::ChecklistEdit)?;

        reorder_items_tx(&tx, checklist_id, ordered_item_ids)?;
        tx.commit()?;
        Ok(())
    }

    pub fn checklist_items(
        &self,
        actor_user_id: i64,
        checklist_id: i64,
    ) -> Result<Vec<ItemRow>, StoreError> {
        let checklist = get_checklist_tx(&self.conn, checklist_id)?;
        member_for_user_tx(&self.conn, checklist.board_id, actor_user_id)?
            .ok_or(StoreError::Forbidden)?;
        checklist_items_tx(&self.conn, checklist_id)
    }
}
