#![forbid(unsafe_code)]

use bk_storage::{
    CardCreateRequest, ChecklistCreateRequest, ItemCreateRequest, ItemPatch, ListCreateRequest,
    SqliteStore, StoreError,
};
use std::path::PathBuf;

const OWNER: i64 = 1;
const OBSERVER: i64 = 3;

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

struct Fixture {
    store: SqliteStore,
    board_id: i64,
    checklist_id: i64,
    item_id: i64,
}

fn setup(test_name: &str) -> Fixture {
    let mut store = SqliteStore::open(temp_dir(test_name)).expect("open store");
    let board = store.board_create(OWNER, "Release").expect("create board");
    let observer_role = store
        .board_roles(board.id)
        .expect("board roles")
        .into_iter()
        .find(|role| role.name == "Observer")
        .expect("observer role")
        .id;
    store
        .board_member_add(OWNER, board.id, OBSERVER, observer_role)
        .expect("add observer");

    let list = store
        .list_create(
            OWNER,
            board.id,
            ListCreateRequest {
                title: "QA".to_string(),
            },
        )
        .expect("create list");
    let card = store
        .card_create(
            OWNER,
            list.id,
            CardCreateRequest {
                title: "Ship 1.0".to_string(),
                description: None,
                due_date_ms: None,
            },
        )
        .expect("create card");
    let checklist = store
        .checklist_create(
            OWNER,
            card.id,
            ChecklistCreateRequest {
                title: Some("Pre-flight".to_string()),
            },
        )
        .expect("create checklist");
    let item = store
        .item_create(
            OWNER,
            checklist.id,
            ItemCreateRequest {
                title: "Run smoke tests".to_string(),
                assigned_board_user_id: None,
                due_date_ms: None,
            },
        )
        .expect("create item");

    Fixture {
        store,
        board_id: board.id,
        checklist_id: checklist.id,
        item_id: item.id,
    }
}

#[test]
fn marking_complete_records_actor_and_time() {
    let mut fx = setup("marking_complete_records_actor_and_time");
    let owner = fx.store.board_member(fx.board_id, OWNER).expect("owner row");

    let item = fx
        .store
        .item_patch(
            OWNER,
            fx.item_id,
            ItemPatch {
                completed: Some(true),
                ..Default::default()
            },
        )
        .expect("mark complete");

    assert!(item.completed);
    assert_eq!(item.marked_complete_board_user_id, Some(owner.id));
    assert!(item.marked_complete_on_ms.is_some());
}

#[test]
fn unmarking_clears_the_pair_atomically() {
    let mut fx = setup("unmarking_clears_the_pair_atomically");
    fx.store
        .item_patch(
            OWNER,
            fx.item_id,
            ItemPatch {
                completed: Some(true),
                ..Default::default()
            },
        )
        .expect("mark complete");

    let item = fx
        .store
        .item_patch(
            OWNER,
            fx.item_id,
            ItemPatch {
                completed: Some(false),
                ..Default::default()
            },
        )
        .expect("unmark");

    assert!(!item.completed);
    assert_eq!(item.marked_complete_board_user_id, None);
    assert_eq!(item.marked_complete_on_ms, None);
}

#[test]
fn repeated_mark_with_same_value_changes_nothing() {
    let mut fx = setup("repeated_mark_with_same_value");
    fx.store
        .item_patch(
            OWNER,
            fx.item_id,
            ItemPatch {
                completed: Some(true),
                ..Default::default()
            },
        )
        .expect("mark complete");
    let first = fx
        .store
        .checklist_items(OWNER, fx.checklist_id)
        .expect("items")
        .remove(0);

    let second = fx
        .store
        .item_patch(
            OWNER,
            fx.item_id,
            ItemPatch {
                completed: Some(true),
                ..Default::default()
            },
        )
        .expect("mark again");

    assert_eq!(
        first.marked_complete_on_ms, second.marked_complete_on_ms,
        "no new transition, no new side effect"
    );
}

#[test]
fn observer_can_mark_via_narrow_path() {
    let mut fx = setup("observer_can_mark_via_narrow_path");
    let observer = fx
        .store
        .board_member(fx.board_id, OBSERVER)
        .expect("observer row");

    let item = fx
        .store
        .item_patch(
            OBSERVER,
            fx.item_id,
            ItemPatch {
                completed: Some(true),
                ..Default::default()
            },
        )
        .expect("observer marks item");

    assert!(item.completed);
    assert_eq!(item.marked_complete_board_user_id, Some(observer.id));
}

#[test]
fn narrow_path_rejects_fields_beyond_completed() {
    let mut fx = setup("narrow_path_rejects_fields_beyond_completed");

    let err = fx
        .store
        .item_patch(
            OBSERVER,
            fx.item_id,
            ItemPatch {
                completed: Some(true),
                title: Some("sneaky rename".to_string()),
                ..Default::default()
            },
        )
        .expect_err("title is outside the mark allowance");
    assert!(matches!(err, StoreError::Forbidden), "got {err:?}");

    // Nothing may have been applied, not even the completed flag.
    let item = fx
        .store
        .checklist_items(OWNER, fx.checklist_id)
        .expect("items")
        .remove(0);
    assert!(!item.completed);
    assert_eq!(item.title, "Run smoke tests");
}

#[test]
fn assigning_a_non_member_fails_field_validation() {
    let mut fx = setup("assigning_a_non_member_fails_field_validation");

    let err = fx
        .store
        .item_create(
            OWNER,
            fx.checklist_id,
            ItemCreateRequest {
                title: "Handoff".to_string(),
                assigned_board_user_id: Some(123_456),
                due_date_ms: None,
            },
        )
        .expect_err("assignment must be validated");
    match err {
        StoreError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "assigned_board_user_id");
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn patch_assignment_is_validated_too() {
    let mut fx = setup("patch_assignment_is_validated_too");

    let err = fx
        .store
        .item_patch(
            OWNER,
            fx.item_id,
            ItemPatch {
                assigned_board_user_id: Some(Some(987_654)),
                ..Default::default()
            },
        )
        .expect_err("assignment must be validated");
    assert!(matches!(err, StoreError::Validation(_)), "got {err:?}");
}

#[test]
fn full_path_can_assign_and_clear() {
    let mut fx = setup("full_path_can_assign_and_clear");
    let observer = fx
        .store
        .board_member(fx.board_id, OBSERVER)
        .expect("observer row");

    let item = fx
        .store
        .item_patch(
            OWNER,
            fx.item_id,
            ItemPatch {
                assigned_board_user_id: Some(Some(observer.id)),
                ..Default::default()
            },
        )
        .expect("assign");
    assert_eq!(item.assigned_board_user_id, Some(observer.id));

    let item = fx
        .store
        .item_patch(
            OWNER,
            fx.item_id,
            ItemPatch {
                assigned_board_user_id: Some(None),
                ..Default::default()
            },
        )
        .expect("clear assignment");
    assert_eq!(item.assigned_board_user_id, None);
}

#[test]
fn item_delete_requires_edit_permission() {
    let mut fx = setup("item_delete_requires_edit_permission");
    let err = fx
        .store
        .item_delete(OBSERVER, fx.item_id)
        .expect_err("observer cannot delete");
    assert!(matches!(err, StoreError::Forbidden), "got {err:?}");

    fx.store.item_delete(OWNER, fx.item_id).expect("owner deletes");
    let items = fx
        .store
        .checklist_items(OWNER, fx.checklist_id)
        .expect("items");
    assert!(items.is_empty());
}
