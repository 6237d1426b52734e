#![forbid(unsafe_code)]

pub mod changes;

pub mod permissions {
    /// Closed set of per-board permission grants. The wire names are the
    /// dotted strings stored in `board_role_permissions.permission`; adding
    /// a permission means migrating role rows, not branching on new code.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum BoardPermission {
        CardEdit,
        CardComment,
        CardDelete,
        CardAssignMember,
        CardDeassignMember,
        CardAddDate,
        CardEditDate,
        ListCreate,
        ListEdit,
        ListDelete,
        BoardUpdate,
        ChecklistCreate,
        ChecklistEdit,
        ChecklistItemMark,
    }

    impl BoardPermission {
        pub const ALL: [BoardPermission; 14] = [
            BoardPermission::CardEdit,
            BoardPermission::CardComment,
            BoardPermission::CardDelete,
            BoardPermission::CardAssignMember,
            BoardPermission::CardDeassignMember,
            BoardPermission::CardAddDate,
            BoardPermission::CardEditDate,
            BoardPermission::ListCreate,
            BoardPermission::ListEdit,
            BoardPermission::ListDelete,
            BoardPermission::BoardUpdate,
            BoardPermission::ChecklistCreate,
            BoardPermission::ChecklistEdit,
            BoardPermission::ChecklistItemMark,
        ];

        pub fn as_str(self) -> &'static str {
            match self {
                BoardPermission::CardEdit => "card.edit",
                BoardPermission::CardComment => "card.comment",
                BoardPermission::CardDelete => "card.delete",
                BoardPermission::CardAssignMember => "card.assign_member",
                BoardPermission::CardDeassignMember => "card.deassign_member",
                BoardPermission::CardAddDate => "card.add_date",
                BoardPermission::CardEditDate => "card.edit_date",
                BoardPermission::ListCreate => "list.create",
                BoardPermission::ListEdit => "list.edit",
                BoardPermission::ListDelete => "list.delete",
                BoardPermission::BoardUpdate => "board.update",
                BoardPermission::ChecklistCreate => "checklist.create",
                BoardPermission::ChecklistEdit => "checklist.edit",
                BoardPermission::ChecklistItemMark => "checklist_item.mark",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            Self::ALL
                .into_iter()
                .find(|permission| permission.as_str() == value)
        }
    }
}

pub mod events {
    /// Closed set of card-activity event tags. The integer codes are the
    /// persisted wire values; reassigning one is a data migration.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum CardActivityEvent {
        CardAssignToList,
        CardMoveToList,
        CardComment,
        ChecklistCreate,
        ChecklistUpdate,
        ChecklistDelete,
        ChecklistItemMarked,
        ChecklistItemDueDate,
        ChecklistItemUserAssign,
        CardAssignMember,
        CardDeassignMember,
        CardAddDate,
        CardEditDate,
        CardDeleteDate,
    }

    impl CardActivityEvent {
        pub fn code(self) -> i64 {
            match self {
                CardActivityEvent::CardAssignToList => 1,
                CardActivityEvent::CardMoveToList => 2,
                CardActivityEvent::CardComment => 3,
                CardActivityEvent::ChecklistCreate => 4,
                CardActivityEvent::ChecklistUpdate => 5,
                CardActivityEvent::ChecklistDelete => 6,
                CardActivityEvent::ChecklistItemMarked => 7,
                CardActivityEvent::ChecklistItemDueDate => 8,
                CardActivityEvent::ChecklistItemUserAssign => 9,
                CardActivityEvent::CardAssignMember => 10,
                CardActivityEvent::CardDeassignMember => 11,
                CardActivityEvent::CardAddDate => 12,
                CardActivityEvent::CardEditDate => 13,
                CardActivityEvent::CardDeleteDate => 14,
            }
        }

        pub fn from_code(code: i64) -> Option<Self> {
            match code {
                1 => Some(CardActivityEvent::CardAssignToList),
                2 => Some(CardActivityEvent::CardMoveToList),
                3 => Some(CardActivityEvent::CardComment),
                4 => Some(CardActivityEvent::ChecklistCreate),
                5 => Some(CardActivityEvent::ChecklistUpdate),
                6 => Some(CardActivityEvent::ChecklistDelete),
                7 => Some(CardActivityEvent::ChecklistItemMarked),
                8 => Some(CardActivityEvent::ChecklistItemDueDate),
                9 => Some(CardActivityEvent::ChecklistItemUserAssign),
                10 => Some(CardActivityEvent::CardAssignMember),
                11 => Some(CardActivityEvent::CardDeassignMember),
                12 => Some(CardActivityEvent::CardAddDate),
                13 => Some(CardActivityEvent::CardEditDate),
                14 => Some(CardActivityEvent::CardDeleteDate),
                _ => None,
            }
        }
    }
}
