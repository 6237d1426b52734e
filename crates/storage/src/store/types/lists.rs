#![forbid(unsafe_code)]

#[derive(Clone, Debug)]
pub struct ListRow {
    pub id: i64,
    pub board_id: i64,
    pub title: String,
    pub position: i64,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Clone, Debug)]
pub struct ListCreateRequest {
    pub title: String,
}

#[derive(Clone, Debug, Default)]
pub struct ListPatch {
    pub title: Option<String>,
}
