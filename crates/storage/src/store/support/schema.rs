#![forbid(unsafe_code)]

use super::super::StoreError;
use rusqlite::Connection;

pub(in crate::store) fn install_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

const SCHEMA_SQL: &str = r#"
        PRAGMA journal_mode=WAL;
        PRAGMA synchronous=NORMAL;

        CREATE TABLE IF NOT EXISTS boards (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          owner_user_id INTEGER NOT NULL,
          title TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS board_roles (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          board_id INTEGER NOT NULL REFERENCES boards(id),
          name TEXT NOT NULL,
          is_admin INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS board_role_permissions (
          role_id INTEGER NOT NULL REFERENCES board_roles(id),
          permission TEXT NOT NULL,
          allow INTEGER NOT NULL DEFAULT 0,
          PRIMARY KEY (role_id, permission)
        );

        -- Memberships are soft-deleted on access revoke: activities keep
        -- referencing the row, so it never goes away.
        CREATE TABLE IF NOT EXISTS board_users (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          board_id INTEGER NOT NULL REFERENCES boards(id),
          user_id INTEGER NOT NULL,
          role_id INTEGER NOT NULL REFERENCES board_roles(id),
          is_owner INTEGER NOT NULL DEFAULT 0,
          is_deleted INTEGER NOT NULL DEFAULT 0,
          UNIQUE (board_id, user_id)
        );

        CREATE TABLE IF NOT EXISTS board_lists (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          board_id INTEGER NOT NULL REFERENCES boards(id),
          title TEXT NOT NULL,
          position INTEGER NOT NULL DEFAULT 0,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS cards (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          list_id INTEGER NOT NULL REFERENCES board_lists(id),
          board_id INTEGER NOT NULL REFERENCES boards(id),
          owner_board_user_id INTEGER NOT NULL REFERENCES board_users(id),
          title TEXT NOT NULL,
          description TEXT,
          due_date_ms INTEGER,
          position INTEGER NOT NULL DEFAULT 0,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS card_members (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          card_id INTEGER NOT NULL REFERENCES cards(id),
          board_user_id INTEGER NOT NULL REFERENCES board_users(id),
          UNIQUE (card_id, board_user_id)
        );

        CREATE TABLE IF NOT EXISTS card_checklists (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          card_id INTEGER NOT NULL REFERENCES cards(id),
          board_id INTEGER NOT NULL REFERENCES boards(id),
          title TEXT
        );

        CREATE TABLE IF NOT EXISTS checklist_items (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          checklist_id INTEGER NOT NULL REFERENCES card_checklists(id),
          board_id INTEGER NOT NULL REFERENCES boards(id),
          title TEXT NOT NULL,
          position INTEGER NOT NULL DEFAULT 0,
          completed INTEGER NOT NULL DEFAULT 0,
          marked_complete_board_user_id INTEGER REFERENCES board_users(id),
          marked_complete_on_ms INTEGER,
          assigned_board_user_id INTEGER REFERENCES board_users(id),
          due_date_ms INTEGER
        );

        -- Append-only. entity_id has no foreign key: it is a logical
        -- reference that survives deletion of the entity it describes.
        CREATE TABLE IF NOT EXISTS card_activities (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          card_id INTEGER NOT NULL REFERENCES cards(id),
          board_user_id INTEGER NOT NULL REFERENCES board_users(id),
          event INTEGER NOT NULL,
          entity_id INTEGER,
          changes_json TEXT,
          activity_on_ms INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_board_users_board
          ON board_users(board_id, user_id);
        CREATE INDEX IF NOT EXISTS idx_board_lists_board
          ON board_lists(board_id, position);
        CREATE INDEX IF NOT EXISTS idx_cards_list
          ON cards(list_id, position);
        CREATE INDEX IF NOT EXISTS idx_card_checklists_card
          ON card_checklists(card_id);
        CREATE INDEX IF NOT EXISTS idx_checklist_items_checklist
          ON checklist_items(checklist_id, position);
        CREATE INDEX IF NOT EXISTS idx_card_activities_card
          ON card_activities(card_id, activity_on_ms DESC);
"#;
