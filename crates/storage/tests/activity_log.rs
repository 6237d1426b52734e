#![forbid(unsafe_code)]

use bk_core::events::CardActivityEvent;
use bk_storage::{
    CardCreateRequest, CardPatch, ChecklistCreateRequest, ChecklistPatch, ItemCreateRequest,
    ItemPatch, ListCreateRequest, SqliteStore,
};
use serde_json::Value;
use std::path::PathBuf;

const OWNER: i64 = 1;
const MEMBER: i64 = 2;

// 2024-01-02 03:04:05 UTC and 2024-02-02 04:05:06 UTC.
const DUE_A_MS: i64 = 1_704_164_645_000;
const DUE_B_MS: i64 = 1_706_846_706_000;

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let dir = base.join(format!("bk_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn setup(test_name: &str) -> (SqliteStore, i64, i64, i64) {
    let mut store = SqliteStore::open(temp_dir(test_name)).expect("open store");
    let board = store.board_create(OWNER, "Audit").expect("create board");
    let member_role = store
        .board_roles(board.id)
        .expect("board roles")
        .into_iter()
        .find(|role| role.name == "Member")
        .expect("member role")
        .id;
    store
        .board_member_add(OWNER, board.id, MEMBER, member_role)
        .expect("add member");
    let list = store
        .list_create(
            OWNER,
            board.id,
            ListCreateRequest {
                title: "Inbox".to_string(),
            },
        )
        .expect("create list");
    let card = store
        .card_create(
            OWNER,
            list.id,
            CardCreateRequest {
                title: "Investigate outage".to_string(),
                description: None,
                due_date_ms: None,
            },
        )
        .expect("create card");
    (store, board.id, list.id, card.id)
}

fn events_of(store: &SqliteStore, card_id: i64) -> Vec<CardActivityEvent> {
    store
        .card_activities(OWNER, card_id)
        .expect("activities")
        .iter()
        .map(|activity| activity.event_tag().expect("known event"))
        .collect()
}

#[test]
fn card_creation_is_logged_with_title_and_list() {
    let (store, _board_id, list_id, card_id) = setup("card_creation_is_logged");

    let activities = store.card_activities(OWNER, card_id).expect("activities");
    assert_eq!(activities.len(), 1);
    let activity = &activities[0];
    assert_eq!(activity.event_tag(), Some(CardActivityEvent::CardAssignToList));
    assert_eq!(activity.entity_id, Some(card_id));

    let changes = activity.changes().expect("changes payload");
    let to = changes.to.expect("to side");
    assert_eq!(to["title"], Value::String("Investigate outage".to_string()));
    assert_eq!(to["list_id"], Value::from(list_id));
    assert!(changes.from.is_none());
}

#[test]
fn due_date_lifecycle_emits_add_edit_delete() {
    let (mut store, _board_id, _list_id, card_id) = setup("due_date_lifecycle");

    store
        .card_patch(
            OWNER,
            card_id,
            CardPatch {
                due_date_ms: Some(Some(DUE_A_MS)),
                ..Default::default()
            },
        )
        .expect("add date");
    store
        .card_patch(
            OWNER,
            card_id,
            CardPatch {
                due_date_ms: Some(Some(DUE_B_MS)),
                ..Default::default()
            },
        )
        .expect("edit date");
    store
        .card_patch(
            OWNER,
            card_id,
            CardPatch {
                due_date_ms: Some(None),
                ..Default::default()
            },
        )
        .expect("delete date");

    let activities = store.card_activities(OWNER, card_id).expect("activities");
    // Newest first: delete, edit, add, then the creation event.
    assert_eq!(
        events_of(&store, card_id),
        vec![
            CardActivityEvent::CardDeleteDate,
            CardActivityEvent::CardEditDate,
            CardActivityEvent::CardAddDate,
            CardActivityEvent::CardAssignToList,
        ]
    );

    let add = activities[2].changes().expect("add changes");
    assert_eq!(
        add.to.expect("to")["due_date"],
        Value::String("2024-01-02 03:04:05".to_string())
    );

    let edit = activities[1].changes().expect("edit changes");
    assert_eq!(
        edit.from.expect("from")["due_date"],
        Value::String("2024-01-02 03:04:05".to_string())
    );
    assert_eq!(
        edit.to.expect("to")["due_date"],
        Value::String("2024-02-02 04:05:06".to_string())
    );

    let delete = activities[0].changes().expect("delete changes");
    assert_eq!(
        delete.from.expect("from")["due_date"],
        Value::String("2024-02-02 04:05:06".to_string())
    );
    assert!(delete.to.is_none());
}

#[test]
fn title_edits_are_not_activity_worthy() {
    let (mut store, _board_id, _list_id, card_id) = setup("title_edits_not_logged");
    store
        .card_patch(
            OWNER,
            card_id,
            CardPatch {
                title: Some("Renamed".to_string()),
                description: Some(Some("details".to_string())),
                ..Default::default()
            },
        )
        .expect("patch title");

    assert_eq!(
        events_of(&store, card_id),
        vec![CardActivityEvent::CardAssignToList],
        "only the creation event remains"
    );
}

#[test]
fn card_move_logs_both_lists() {
    let (mut store, board_id, list_id, card_id) = setup("card_move_logs_both_lists");
    let target = store
        .list_create(
            OWNER,
            board_id,
            ListCreateRequest {
                title: "Done".to_string(),
            },
        )
        .expect("target list");

    store
        .card_patch(
            OWNER,
            card_id,
            CardPatch {
                list_id: Some(target.id),
                ..Default::default()
            },
        )
        .expect("move card");

    let activities = store.card_activities(OWNER, card_id).expect("activities");
    let moved = &activities[0];
    assert_eq!(moved.event_tag(), Some(CardActivityEvent::CardMoveToList));
    let changes = moved.changes().expect("changes");
    assert_eq!(changes.from.expect("from")["list_id"], Value::from(list_id));
    assert_eq!(changes.to.expect("to")["list_id"], Value::from(target.id));
}

#[test]
fn item_mark_logs_title_and_completed() {
    let (mut store, board_id, _list_id, card_id) = setup("item_mark_logs_title_and_completed");
    let member = store.board_member(board_id, MEMBER).expect("member row");
    let checklist = store
        .checklist_create(OWNER, card_id, Default::default())
        .expect("checklist");
    let item = store
        .item_create(
            OWNER,
            checklist.id,
            ItemCreateRequest {
                title: "Verify backups".to_string(),
                assigned_board_user_id: None,
                due_date_ms: None,
            },
        )
        .expect("item");

    store
        .item_patch(
            MEMBER,
            item.id,
            ItemPatch {
                completed: Some(true),
                ..Default::default()
            },
        )
        .expect("mark");

    let activities = store.card_activities(OWNER, card_id).expect("activities");
    let marked = &activities[0];
    assert_eq!(
        marked.event_tag(),
        Some(CardActivityEvent::ChecklistItemMarked)
    );
    assert_eq!(marked.entity_id, Some(item.id));
    assert_eq!(marked.board_user_id, member.id);
    let to = marked.changes().expect("changes").to.expect("to");
    assert_eq!(to["title"], Value::String("Verify backups".to_string()));
    assert_eq!(to["completed"], Value::Bool(true));
}

#[test]
fn item_assignment_and_due_date_are_logged() {
    let (mut store, board_id, _list_id, card_id) = setup("item_assignment_and_due_date");
    let member = store.board_member(board_id, MEMBER).expect("member row");
    let checklist = store
        .checklist_create(OWNER, card_id, Default::default())
        .expect("checklist");
    let item = store
        .item_create(
            OWNER,
            checklist.id,
            ItemCreateRequest {
                title: "Schedule retro".to_string(),
                assigned_board_user_id: None,
                due_date_ms: None,
            },
        )
        .expect("item");

    store
        .item_patch(
            OWNER,
            item.id,
            ItemPatch {
                assigned_board_user_id: Some(Some(member.id)),
                due_date_ms: Some(Some(DUE_A_MS)),
                ..Default::default()
            },
        )
        .expect("patch item");

    let events = events_of(&store, card_id);
    assert!(events.contains(&CardActivityEvent::ChecklistItemUserAssign));
    assert!(events.contains(&CardActivityEvent::ChecklistItemDueDate));

    let activities = store.card_activities(OWNER, card_id).expect("activities");
    let due = activities
        .iter()
        .find(|activity| activity.event_tag() == Some(CardActivityEvent::ChecklistItemDueDate))
        .expect("due date activity");
    let changes = due.changes().expect("changes");
    assert_eq!(
        changes.from.expect("from")["due_date"],
        Value::String(String::new()),
        "no prior due date renders as an empty string"
    );
    assert_eq!(
        changes.to.expect("to")["due_date"],
        Value::String("2024-01-02 03:04:05".to_string())
    );
}

#[test]
fn comments_and_member_links_are_logged() {
    let (mut store, board_id, _list_id, card_id) = setup("comments_and_member_links");
    let member = store.board_member(board_id, MEMBER).expect("member row");

    store
        .card_comment_add(MEMBER, card_id, "Looks resolved to me")
        .expect("comment");
    store
        .card_member_assign(OWNER, card_id, member.id)
        .expect("assign member");
    store
        .card_member_deassign(OWNER, card_id, member.id)
        .expect("deassign member");

    assert_eq!(
        events_of(&store, card_id),
        vec![
            CardActivityEvent::CardDeassignMember,
            CardActivityEvent::CardAssignMember,
            CardActivityEvent::CardComment,
            CardActivityEvent::CardAssignToList,
        ]
    );

    let activities = store.card_activities(OWNER, card_id).expect("activities");
    let comment = activities
        .iter()
        .find(|activity| activity.event_tag() == Some(CardActivityEvent::CardComment))
        .expect("comment activity");
    assert_eq!(
        comment.changes().expect("changes").to.expect("to")["comment"],
        Value::String("Looks resolved to me".to_string())
    );
}

#[test]
fn checklist_lifecycle_is_logged() {
    let (mut store, _board_id, _list_id, card_id) = setup("checklist_lifecycle_is_logged");
    let checklist = store
        .checklist_create(
            OWNER,
            card_id,
            ChecklistCreateRequest {
                title: Some("Launch".to_string()),
            },
        )
        .expect("create");
    store
        .checklist_patch(
            OWNER,
            checklist.id,
            ChecklistPatch {
                title: Some(Some("Launch v2".to_string())),
            },
        )
        .expect("patch");
    store
        .checklist_delete(OWNER, checklist.id)
        .expect("delete");

    assert_eq!(
        events_of(&store, card_id),
        vec![
            CardActivityEvent::ChecklistDelete,
            CardActivityEvent::ChecklistUpdate,
            CardActivityEvent::ChecklistCreate,
            CardActivityEvent::CardAssignToList,
        ]
    );

    let activities = store.card_activities(OWNER, card_id).expect("activities");
    let update = &activities[1];
    let changes = update.changes().expect("changes");
    assert_eq!(
        changes.from.expect("from")["title"],
        Value::String("Launch".to_string())
    );
    assert_eq!(
        changes.to.expect("to")["title"],
        Value::String("Launch v2".to_string())
    );
}

#[test]
fn unchanged_checklist_patch_is_silent() {
    let (mut store, _board_id, _list_id, card_id) = setup("unchanged_checklist_patch_is_silent");
    let checklist = store
        .checklist_create(
            OWNER,
            card_id,
            ChecklistCreateRequest {
                title: Some("Same".to_string()),
            },
        )
        .expect("create");

    store
        .checklist_patch(
            OWNER,
            checklist.id,
            ChecklistPatch {
                title: Some(Some("Same".to_string())),
            },
        )
        .expect("no-op patch");

    let events = events_of(&store, card_id);
    assert!(
        !events.contains(&CardActivityEvent::ChecklistUpdate),
        "no semantic change, no activity"
    );
}
