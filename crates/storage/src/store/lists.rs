#![forbid(unsafe_code)]

use super::*;
use bk_core::permissions::BoardPermission;
use rusqlite::params;

impl SqliteStore {
    pub fn list_create(
        &mut self,
        actor_user_id: i64,
        board_id: i64,
        request: ListCreateRequest,
    ) -> Result<ListRow, StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        get_board_tx(&tx, board_id)?;
        let member = member_or_forbidden_tx(&tx, board_id, actor_user_id)?;
        require_permission_tx(&tx, &member, BoardPermission::ListCreate)?;

        let position = next_list_position_tx(&tx, board_id)?;
        tx.execute(
            r#"
            INSERT INTO board_lists(board_id, title, position, created_at_ms, updated_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![board_id, request.title, position, now_ms, now_ms],
        )?;
        let list_id = tx.last_insert_rowid();

        let list = get_list_tx(&tx, list_id)?;
        tx.commit()?;
        Ok(list)
    }

    pub fn list_patch(
        &mut self,
        actor_user_id: i64,
        list_id: i64,
        patch: ListPatch,
    ) -> Result<ListRow, StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let list = get_list_tx(&tx, list_id)?;
        let member = member_or_forbidden_tx(&tx, list.board_id, actor_user_id)?;
        require_permission_tx(&tx, &member, BoardPermission::ListEdit)?;

        if let Some(title) = patch.title {
            tx.execute(
                "UPDATE board_lists SET title = ?1, updated_at_ms = ?2 WHERE id = ?3",
                params![title, now_ms, list_id],
            )?;
        }

        let list = get_list_tx(&tx, list_id)?;
        tx.commit()?;
        Ok(list)
    }

    pub fn list_delete(&mut self, actor_user_id: i64, list_id: i64) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;

        let list = get_list_tx(&tx, list_id)?;
        let member = member_or_forbidden_tx(&tx, list.board_id, actor_user_id)?;
        require_permission_tx(&tx, &member, BoardPermission::ListDelete)?;

        delete_list_tx(&tx, list_id)?;
        tx.commit()?;
        Ok(())
    }

    /// Reassigns card order within one list from a complete ordered id
    /// sequence. Ids from other lists are ignored rather than moved.
    pub fn card_positions_update(
        &mut self,
        actor_user_id: i64,
        list_id: i64,
        ordered_card_ids: &[i64],
    ) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;

        let list = get_list_tx(&tx, list_id)?;
        let member = member_or_forbidden_tx(&tx, list.board_id, actor_user_id)?;
        require_permission_tx(&tx, &member, BoardPermission::CardEdit)?;

        reorder_cards_tx(&tx, list_id, ordered_card_ids)?;
        tx.commit()?;
        Ok(())
    }

    pub fn board_lists(&self, actor_user_id: i64, board_id: i64) -> Result<Vec<ListRow>, StoreError> {
        member_for_user_tx(&self.conn, board_id, actor_user_id)?.ok_or(StoreError::Forbidden)?;
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, board_id, title, position, created_at_ms, updated_at_ms
            FROM board_lists
            WHERE board_id = ?1
            ORDER BY position ASC, id ASC
            "#,
        )?;
        let rows = stmt.query_map(params![board_id], |row| {
            Ok(ListRow {
                id: row.get(0)?,
                board_id: row.get(1)?,
                title: row.get(2)?,
                position: row.get(3)?,
                created_at_ms: row.get(4)?,
                updated_at_ms: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
