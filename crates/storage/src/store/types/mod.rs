#![forbid(unsafe_code)]

mod activities;
mod boards;
mod cards;
mod checklists;
mod items;
mod lists;

pub use activities::*;
pub use boards::*;
pub use cards::*;
pub use checklists::*;
pub use items::*;
pub use lists::*;
