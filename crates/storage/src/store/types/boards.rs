#![forbid(unsafe_code)]

#[derive(Clone, Debug)]
pub struct BoardRow {
    pub id: i64,
    pub owner_user_id: i64,
    pub title: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Clone, Debug)]
pub struct BoardRoleRow {
    pub id: i64,
    pub board_id: i64,
    pub name: String,
    pub is_admin: bool,
}

/// A (board, user) membership joined with its role's admin flag. This is
/// the subject of every permission decision; `id` is what card and
/// checklist rows reference as `board_user_id`.
#[derive(Clone, Debug)]
pub struct MemberRow {
    pub id: i64,
    pub board_id: i64,
    pub user_id: i64,
    pub role_id: i64,
    pub is_admin: bool,
    pub is_owner: bool,
}

#[derive(Clone, Debug, Default)]
pub struct BoardPatch {
    pub title: Option<String>,
}
