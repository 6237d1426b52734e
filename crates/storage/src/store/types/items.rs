#![forbid(unsafe_code)]

/// `marked_complete_board_user_id` / `marked_complete_on_ms` are either
/// both null or both set; the pair flips atomically with `completed` and
/// is never written from caller input.
#[derive(Clone, Debug)]
pub struct ItemRow {
    pub id: i64,
    pub checklist_id: i64,
    pub board_id: i64,
    pub title: String,
    pub position: i64,
    pub completed: bool,
    pub marked_complete_board_user_id: Option<i64>,
    pub marked_complete_on_ms: Option<i64>,
    pub assigned_board_user_id: Option<i64>,
    pub due_date_ms: Option<i64>,
}

#[derive(Clone, Debug)]
pub struct ItemCreateRequest {
    pub title: String,
    pub assigned_board_user_id: Option<i64>,
    pub due_date_ms: Option<i64>,
}

#[derive(Clone, Debug, Default)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub assigned_board_user_id: Option<Option<i64>>,
    pub due_date_ms: Option<Option<i64>>,
}

impl ItemPatch {
    /// True when `completed` is the only present field. The narrow
    /// `checklist_item.mark` permission admits exactly this shape.
    pub fn is_mark_only(&self) -> bool {
        self.title.is_none() && self.assigned_board_user_id.is_none() && self.due_date_ms.is_none()
    }
}
