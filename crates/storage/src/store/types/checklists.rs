#![forbid(unsafe_code)]

#[derive(Clone, Debug)]
pub struct ChecklistRow {
    pub id: i64,
    pub card_id: i64,
    pub board_id: i64,
    pub title: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ChecklistCreateRequest {
    pub title: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ChecklistPatch {
    pub title: Option<Option<String>>,
}
