//! Id-keyed selection options.
//!
//! Selection lists carry the record id separately from the display label, so
//! labels are free text and never parsed back.

use serde::Serialize;

use crate::types::DbId;

/// One entry in a selection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub id: DbId,
    pub label: String,
}

impl SelectOption {
    pub fn new(id: DbId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Build options from any record list.
pub fn build_options<T>(
    records: &[T],
    id: impl Fn(&T) -> DbId,
    label: impl Fn(&T) -> String,
) -> Vec<SelectOption> {
    records
        .iter()
        .map(|r| SelectOption::new(id(r), label(r)))
        .collect()
}
