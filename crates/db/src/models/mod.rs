//! Table row structs and DTOs.
//!
//! Each submodule contains:
//! - A `Serialize` + `Deserialize` row struct whose field order matches the
//!   table's header row, plus its [`Record`](crate::store::Record) impl
//! - A `Deserialize` create DTO
//! - A `Deserialize` update DTO (all `Option` fields)
//!
//! Row structs default every missing column, so tables written by older
//! versions with fewer columns still load.

pub mod asset;
pub mod attachment;
pub mod department;
pub mod editing_task;
pub mod meal;
pub mod schedule;
pub mod script;
pub mod site;
pub mod storyboard;

use serde::{Deserialize, Deserializer};

/// Deserialize a stored boolean written as `true/false/True/False/1/0`.
pub(crate) fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(reelbook_core::validation::parse_flag(&raw))
}

/// Replace `target` when `value` is present.
pub(crate) fn apply<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}
