#![forbid(unsafe_code)]

mod activity_tx;
mod cascade_tx;
mod diff_tx;
mod members_tx;
mod position_tx;
mod rows_tx;
mod schema;
mod time;

pub(in crate::store) use activity_tx::*;
pub(in crate::store) use cascade_tx::*;
pub(in crate::store) use diff_tx::*;
pub(in crate::store) use members_tx::*;
pub(in crate::store) use position_tx::*;
pub(in crate::store) use rows_tx::*;
pub(in crate::store) use schema::install_schema;
pub(in crate::store) use time::{format_ts, now_ms};
