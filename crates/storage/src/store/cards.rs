#![forbid(unsafe_code)]

use super::*;
use bk_core::changes::Changes;
use bk_core::events::CardActivityEvent;
use bk_core::permissions::BoardPermission;
use rusqlite::{OptionalExtension, params};

impl SqliteStore {
    pub fn card_create(
        &mut self,
        actor_user_id: i64,
        list_id: i64,
        request: CardCreateRequest,
    ) -> Result<CardRow, StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let list = get_list_tx(&tx, list_id)?;
        let member = member_or_forbidden_tx(&tx, list.board_id, actor_user_id)?;
        require_permission_tx(&tx, &member, BoardPermission::CardEdit)?;

        let position = next_card_position_tx(&tx, list_id)?;
        tx.execute(
            r#"
            INSERT INTO cards(list_id, board_id, owner_board_user_id, title, description,
                              due_date_ms, position, created_at_ms, updated_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                list_id,
                list.board_id,
                member.id,
                request.title,
                request.description,
                request.due_date_ms,
                position,
                now_ms,
                now_ms
            ],
        )?;
        let card_id = tx.last_insert_rowid();

        insert_activity_tx(
            &tx,
            card_id,
            member.id,
            CardActivityEvent::CardAssignToList,
            Some(card_id),
            Some(
                &Changes::to_only()
                    .set_to("title", request.title.as_str())
                    .set_to("list_id", list_id),
            ),
            now_ms,
        )?;

        let card = get_card_tx(&tx, card_id)?;
        tx.commit()?;
        Ok(card)
    }

    pub fn card_patch(
        &mut self,
        actor_user_id: i64,
        card_id: i64,
        patch: CardPatch,
    ) -> Result<CardRow, StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let card = get_card_tx(&tx, card_id)?;
        let member = member_or_forbidden_tx(&tx, card.board_id, actor_user_id)?;
        require_permission_tx(&tx, &member, BoardPermission::CardEdit)?;

        if let Some(list_id) = patch.list_id
            && list_id != card.list_id
        {
            let target_board: Option<i64> = tx
                .query_row(
                    "SELECT board_id FROM board_lists WHERE id = ?1",
                    params![list_id],
                    |row| row.get(0),
                )
                .optional()?;
            if target_board != Some(card.board_id) {
                return Err(StoreError::Validation(vec![FieldError {
                    field: "list_id",
                    message: "List not exists or not part of board!",
                }]));
            }
        }

        if let Some(due_date_ms) = patch.due_date_ms
            && due_date_ms != card.due_date_ms
        {
            let date_permission = if card.due_date_ms.is_none() {
                BoardPermission::CardAddDate
            } else {
                BoardPermission::CardEditDate
            };
            require_permission_tx(&tx, &member, date_permission)?;
        }

        card_capture_changes_tx(&tx, &member, &card, &patch, now_ms)?;

        if let Some(title) = &patch.title {
            tx.execute(
                "UPDATE cards SET title = ?1 WHERE id = ?2",
                params![title, card_id],
            )?;
        }
        if let Some(description) = &patch.description {
            tx.execute(
                "UPDATE cards SET description = ?1 WHERE id = ?2",
                params![description, card_id],
            )?;
        }
        if let Some(due_date_ms) = patch.due_date_ms {
            tx.execute(
                "UPDATE cards SET due_date_ms = ?1 WHERE id = ?2",
                params![due_date_ms, card_id],
            )?;
        }
        if let Some(list_id) = patch.list_id
            && list_id != card.list_id
        {
            // The card joins the tail of the target list; callers reorder
            // afterwards if they want a specific slot.
            let position = next_card_position_tx(&tx, list_id)?;
            tx.execute(
                "UPDATE cards SET list_id = ?1, position = ?2 WHERE id = ?3",
                params![list_id, position, card_id],
            )?;
        }
        tx.execute(
            "UPDATE cards SET updated_at_ms = ?1 WHERE id = ?2",
            params![now_ms, card_id],
        )?;

        let card = get_card_tx(&tx, card_id)?;
        tx.commit()?;
        Ok(card)
    }

    pub fn card_delete(&mut self, actor_user_id: i64, card_id: i64) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;

        let card = get_card_tx(&tx, card_id)?;
        let member = member_or_forbidden_tx(&tx, card.board_id, actor_user_id)?;
        require_permission_tx(&tx, &member, BoardPermission::CardDelete)?;

        delete_card_tx(&tx, card_id)?;
        tx.commit()?;
        Ok(())
    }

    /// Appends a comment to the card's activity log. Comments live in the
    /// log itself, so they inherit its append-only contract: no edits, no
    /// deletes.
    pub fn card_comment_add(
        &mut self,
        actor_user_id: i64,
        card_id: i64,
        comment: &str,
    ) -> Result<ActivityRow, StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let card = get_card_tx(&tx, card_id)?;
        let member = member_or_forbidden_tx(&tx, card.board_id, actor_user_id)?;
        require_permission_tx(&tx, &member, BoardPermission::CardComment)?;

        let activity = insert_activity_tx(
            &tx,
            card.id,
            member.id,
            CardActivityEvent::CardComment,
            None,
            Some(&Changes::to_only().set_to("comment", comment)),
            now_ms,
        )?;
        tx.commit()?;
        Ok(activity)
    }

    pub fn card_member_assign(
        &mut self,
        actor_user_id: i64,
        card_id: i64,
        board_user_id: i64,
    ) -> Result<CardMemberRow, StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let card = get_card_tx(&tx, card_id)?;
        let member = member_or_forbidden_tx(&tx, card.board_id, actor_user_id)?;
        require_permission_tx(&tx, &member, BoardPermission::CardAssignMember)?;

        if member_by_id_tx(&tx, card.board_id, board_user_id)?.is_none() {
            return Err(StoreError::Validation(vec![FieldError {
                field: "board_user_id",
                message: "User not exists or not member of board!",
            }]));
        }

        let already_assigned: Option<i64> = tx
            .query_row(
                "SELECT id FROM card_members WHERE card_id = ?1 AND board_user_id = ?2",
                params![card_id, board_user_id],
                |row| row.get(0),
            )
            .optional()?;
        if already_assigned.is_some() {
            return Err(StoreError::Validation(vec![FieldError {
                field: "board_user_id",
                message: "User already assigned to card!",
            }]));
        }

        tx.execute(
            "INSERT INTO card_members(card_id, board_user_id) VALUES (?1, ?2)",
            params![card_id, board_user_id],
        )?;
        let link_id = tx.last_insert_rowid();

        insert_activity_tx(
            &tx,
            card.id,
            member.id,
            CardActivityEvent::CardAssignMember,
            Some(link_id),
            Some(&Changes::to_only().set_to("board_user_id", board_user_id)),
            now_ms,
        )?;

        tx.commit()?;
        Ok(CardMemberRow {
            id: link_id,
            card_id,
            board_user_id,
        })
    }

    pub fn card_member_deassign(
        &mut self,
        actor_user_id: i64,
        card_id: i64,
        board_user_id: i64,
    ) -> Result<(), StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let card = get_card_tx(&tx, card_id)?;
        let member = member_or_forbidden_tx(&tx, card.board_id, actor_user_id)?;
        require_permission_tx(&tx, &member, BoardPermission::CardDeassignMember)?;

        let link_id: Option<i64> = tx
            .query_row(
                "SELECT id FROM card_members WHERE card_id = ?1 AND board_user_id = ?2",
                params![card_id, board_user_id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(link_id) = link_id else {
            return Err(StoreError::NotFound {
                entity: "card_member",
            });
        };

        tx.execute("DELETE FROM card_members WHERE id = ?1", params![link_id])?;
        insert_activity_tx(
            &tx,
            card.id,
            member.id,
            CardActivityEvent::CardDeassignMember,
            Some(link_id),
            Some(&Changes::default().set_from("board_user_id", board_user_id)),
            now_ms,
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Audit feed for a card, newest first. Any live board member may
    /// read it.
    pub fn card_activities(
        &self,
        actor_user_id: i64,
        card_id: i64,
    ) -> Result<Vec<ActivityRow>, StoreError> {
        let card = get_card_tx(&self.conn, card_id)?;
        member_for_user_tx(&self.conn, card.board_id, actor_user_id)?
            .ok_or(StoreError::Forbidden)?;
        card_activities_tx(&self.conn, card_id)
    }

    pub fn list_cards(&self, actor_user_id: i64, list_id: i64) -> Result<Vec<CardRow>, StoreError> {
        let list = get_list_tx(&self.conn, list_id)?;
        member_for_user_tx(&self.conn, list.board_id, actor_user_id)?
            .ok_or(StoreError::Forbidden)?;
        list_cards_tx(&self.conn, list_id)
    }
}
