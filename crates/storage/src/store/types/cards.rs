#![forbid(unsafe_code)]

#[derive(Clone, Debug)]
pub struct CardRow {
    pub id: i64,
    pub list_id: i64,
    pub board_id: i64,
    pub owner_board_user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date_ms: Option<i64>,
    pub position: i64,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Clone, Debug)]
pub struct CardCreateRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date_ms: Option<i64>,
}

/// Partial card update. `Option<Option<_>>` fields distinguish "leave as
/// is" (outer `None`) from "clear" (inner `None`).
#[derive(Clone, Debug, Default)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date_ms: Option<Option<i64>>,
    pub list_id: Option<i64>,
}

#[derive(Clone, Debug)]
pub struct CardMemberRow {
    pub id: i64,
    pub card_id: i64,
    pub board_user_id: i64,
}
