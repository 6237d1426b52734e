#![forbid(unsafe_code)]

use super::*;
use bk_core::permissions::BoardPermission;
use rusqlite::{OptionalExtension, Transaction, params};

fn seed_role_tx(
    tx: &Transaction<'_>,
    board_id: i64,
    name: &str,
    is_admin: bool,
    grants: &[BoardPermission],
) -> Result<i64, StoreError> {
    tx.execute(
        "INSERT INTO board_roles(board_id, name, is_admin) VALUES (?1, ?2, ?3)",
        params![board_id, name, is_admin],
    )?;
    let role_id = tx.last_insert_rowid();
    for permission in grants {
        tx.execute(
            "INSERT INTO board_role_permissions(role_id, permission, allow) VALUES (?1, ?2, 1)",
            params![role_id, permission.as_str()],
        )?;
    }
    Ok(role_id)
}

impl SqliteStore {
    /// Creates a board with its default roles and the owner membership.
    /// Admin bypasses permission rows; Member holds every grant;
    /// Observer holds only `checklist_item.mark` and relies on default
    /// deny for everything else.
    pub fn board_create(&mut self, owner_user_id: i64, title: &str) -> Result<BoardRow, StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        tx.execute(
            r#"
            INSERT INTO boards(owner_user_id, title, created_at_ms, updated_at_ms)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![owner_user_id, title, now_ms, now_ms],
        )?;
        let board_id = tx.last_insert_rowid();

        let admin_role_id = seed_role_tx(&tx, board_id, "Admin", true, &[])?;
        seed_role_tx(&tx, board_id, "Member", false, &BoardPermission::ALL)?;
        seed_role_tx(
            &tx,
            board_id,
            "Observer",
            false,
            &[BoardPermission::ChecklistItemMark],
        )?;

        tx.execute(
            r#"
            INSERT INTO board_users(board_id, user_id, role_id, is_owner, is_deleted)
            VALUES (?1, ?2, ?3, 1, 0)
            "#,
            params![board_id, owner_user_id, admin_role_id],
        )?;

        let board = get_board_tx(&tx, board_id)?;
        tx.commit()?;
        Ok(board)
    }

    pub fn board_update(
        &mut self,
        actor_user_id: i64,
        board_id: i64,
        patch: BoardPatch,
    ) -> Result<BoardRow, StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        get_board_tx(&tx, board_id)?;
        let member = member_or_forbidden_tx(&tx, board_id, actor_user_id)?;
        require_permission_tx(&tx, &member, BoardPermission::BoardUpdate)?;

        if let Some(title) = patch.title {
            tx.execute(
                "UPDATE boards SET title = ?1, updated_at_ms = ?2 WHERE id = ?3",
                params![title, now_ms, board_id],
            )?;
        }

        let board = get_board_tx(&tx, board_id)?;
        tx.commit()?;
        Ok(board)
    }

    pub fn board_member_add(
        &mut self,
        actor_user_id: i64,
        board_id: i64,
        user_id: i64,
        role_id: i64,
    ) -> Result<MemberRow, StoreError> {
        let tx = self.conn.transaction()?;

        get_board_tx(&tx, board_id)?;
        let actor = member_or_forbidden_tx(&tx, board_id, actor_user_id)?;
        require_permission_tx(&tx, &actor, BoardPermission::BoardUpdate)?;

        let role_board_id: Option<i64> = tx
            .query_row(
                "SELECT board_id FROM board_roles WHERE id = ?1",
                params![role_id],
                |row| row.get(0),
            )
            .optional()?;
        if role_board_id != Some(board_id) {
            return Err(StoreError::Validation(vec![FieldError {
                field: "role_id",
                message: "Role not exists or not part of board!",
            }]));
        }

        let existing: Option<(i64, bool)> = tx
            .query_row(
                "SELECT id, is_deleted FROM board_users WHERE board_id = ?1 AND user_id = ?2",
                params![board_id, user_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match existing {
            Some((_, false)) => {
                return Err(StoreError::Validation(vec![FieldError {
                    field: "user_id",
                    message: "User already member of board!",
                }]));
            }
            Some((member_id, true)) => {
                // Reinstate the soft-deleted row so old activities keep
                // pointing at the same membership id.
                tx.execute(
                    "UPDATE board_users SET is_deleted = 0, role_id = ?1 WHERE id = ?2",
                    params![role_id, member_id],
                )?;
            }
            None => {
                tx.execute(
                    r#"
                    INSERT INTO board_users(board_id, user_id, role_id, is_owner, is_deleted)
                    VALUES (?1, ?2, ?3, 0, 0)
                    "#,
                    params![board_id, user_id, role_id],
                )?;
            }
        }

        let member = member_or_forbidden_tx(&tx, board_id, user_id)?;
        tx.commit()?;
        Ok(member)
    }

    /// Soft-removes a membership. The row survives because committed
    /// activities reference it.
    pub fn board_member_revoke(
        &mut self,
        actor_user_id: i64,
        board_id: i64,
        member_id: i64,
    ) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;

        get_board_tx(&tx, board_id)?;
        let actor = member_or_forbidden_tx(&tx, board_id, actor_user_id)?;
        require_permission_tx(&tx, &actor, BoardPermission::BoardUpdate)?;

        let target = member_by_id_tx(&tx, board_id, member_id)?.ok_or(StoreError::NotFound {
            entity: "board_user",
        })?;
        if target.is_owner {
            return Err(StoreError::InvalidInput("board owner cannot be revoked"));
        }

        tx.execute(
            "UPDATE board_users SET is_deleted = 1 WHERE id = ?1",
            params![member_id],
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn board_delete(&mut self, actor_user_id: i64, board_id: i64) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;

        get_board_tx(&tx, board_id)?;
        let member = member_or_forbidden_tx(&tx, board_id, actor_user_id)?;
        if !member.is_owner {
            return Err(StoreError::Forbidden);
        }

        delete_board_tx(&tx, board_id)?;
        tx.commit()?;
        Ok(())
    }

    pub fn board_member(&self, board_id: i64, user_id: i64) -> Result<MemberRow, StoreError> {
        member_for_user_tx(&self.conn, board_id, user_id)?.ok_or(StoreError::Forbidden)
    }

    pub fn board_roles(&self, board_id: i64) -> Result<Vec<BoardRoleRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, board_id, name, is_admin FROM board_roles WHERE board_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![board_id], |row| {
            Ok(BoardRoleRow {
                id: row.get(0)?,
                board_id: row.get(1)?,
                name: row.get(2)?,
                is_admin: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
