#![forbid(unsafe_code)]

use bk_core::changes::Changes;
use bk_core::events::CardActivityEvent;

/// Append-only audit record. `entity_id` is a logical reference to the
/// sub-entity the event describes (checklist, item, member link); it
/// deliberately carries no foreign key so activities outlive cascades.
#[derive(Clone, Debug)]
pub struct ActivityRow {
    pub id: i64,
    pub card_id: i64,
    pub board_user_id: i64,
    pub event: i64,
    pub entity_id: Option<i64>,
    pub changes_json: Option<String>,
    pub activity_on_ms: i64,
}

impl ActivityRow {
    pub fn event_tag(&self) -> Option<CardActivityEvent> {
        CardActivityEvent::from_code(self.event)
    }

    pub fn changes(&self) -> Option<Changes> {
        let raw = self.changes_json.as_deref()?;
        Changes::from_json(raw).ok()
    }
}
