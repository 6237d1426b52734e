#![forbid(unsafe_code)]

use super::super::{MemberRow, StoreError};
use bk_core::permissions::BoardPermission;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn member_from_row(row: &Row<'_>) -> Result<MemberRow, rusqlite::Error> {
    Ok(MemberRow {
        id: row.get(0)?,
        board_id: row.get(1)?,
        user_id: row.get(2)?,
        role_id: row.get(3)?,
        is_admin: row.get(4)?,
        is_owner: row.get(5)?,
    })
}

pub(in crate::store) fn member_for_user_tx(
    conn: &Connection,
    board_id: i64,
    user_id: i64,
) -> Result<Option<MemberRow>, StoreError> {
    let member = conn
        .query_row(
            r#"
            SELECT bu.id, bu.board_id, bu.user_id, bu.role_id, br.is_admin, bu.is_owner
            FROM board_users bu
            JOIN board_roles br ON br.id = bu.role_id
            WHERE bu.board_id = ?1 AND bu.user_id = ?2 AND bu.is_deleted = 0
            "#,
            params![board_id, user_id],
            member_from_row,
        )
        .optional()?;
    Ok(member)
}

/// Resolves the acting membership. Non-members get `Forbidden`, not
/// `NotFound`: authorization state must not reveal anything about what
/// exists on the board.
pub(in crate::store) fn member_or_forbidden_tx(
    conn: &Connection,
    board_id: i64,
    user_id: i64,
) -> Result<MemberRow, StoreError> {
    member_for_user_tx(conn, board_id, user_id)?.ok_or(StoreError::Forbidden)
}

/// Looks up a live membership row by its own id within a board. Used to
/// validate `board_user_id` references in change sets.
pub(in crate::store) fn member_by_id_tx(
    conn: &Connection,
    board_id: i64,
    member_id: i64,
) -> Result<Option<MemberRow>, StoreError> {
    let member = conn
        .query_row(
            r#"
            SELECT bu.id, bu.board_id, bu.user_id, bu.role_id, br.is_admin, bu.is_owner
            FROM board_users bu
            JOIN board_roles br ON br.id = bu.role_id
            WHERE bu.board_id = ?1 AND bu.id = ?2 AND bu.is_deleted = 0
            "#,
            params![board_id, member_id],
            member_from_row,
        )
        .optional()?;
    Ok(member)
}

/// Admin roles bypass the permission table entirely; everyone else gets
/// the stored `allow` flag, defaulting to deny when no row exists.
pub(in crate::store) fn has_permission_tx(
    conn: &Connection,
    member: &MemberRow,
    permission: BoardPermission,
) -> Result<bool, StoreError> {
    if member.is_admin {
        return Ok(true);
    }
    let allow: Option<bool> = conn
        .query_row(
            "SELECT allow FROM board_role_permissions WHERE role_id = ?1 AND permission = ?2",
            params![member.role_id, permission.as_str()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(allow.unwrap_or(false))
}

pub(in crate::store) fn require_permission_tx(
    conn: &Connection,
    member: &MemberRow,
    permission: BoardPermission,
) -> Result<(), StoreError> {
    if has_permission_tx(conn, member, permission)? {
        Ok(())
    } else {
        Err(StoreError::Forbidden)
    }
}
