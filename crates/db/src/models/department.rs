//! Department / crew member model.

use reelbook_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A row of `departments.csv`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Department {
    pub id: DbId,
    pub dept_type: String,
    pub name: String,
    pub role: String,
    pub contact: String,
    pub note: String,
}

impl Record for Department {
    const TABLE: &'static str = "departments.csv";
    const HEADERS: &'static [&'static str] =
        &["id", "dept_type", "name", "role", "contact", "note"];
    const ENTITY: &'static str = "Department";

    fn id(&self) -> DbId {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDepartment {
    pub dept_type: Option<String>,
    pub name: String,
    pub role: Option<String>,
    pub contact: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDepartment {
    pub dept_type: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub contact: Option<String>,
    pub note: Option<String>,
}
