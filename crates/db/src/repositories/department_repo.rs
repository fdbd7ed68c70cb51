//! Repository for `departments.csv`.

use reelbook_core::types::DbId;

use crate::models::apply;
use crate::models::department::{CreateDepartment, Department, UpdateDepartment};
use crate::store::{DataStore, StoreError};

pub struct DepartmentRepo;

impl DepartmentRepo {
    pub fn create(store: &DataStore, input: &CreateDepartment) -> Result<Department, StoreError> {
        store.insert(|id| Department {
            id,
            dept_type: input.dept_type.clone().unwrap_or_default(),
            name: input.name.trim().to_string(),
            role: input.role.clone().unwrap_or_default(),
            contact: input.contact.clone().unwrap_or_default(),
            note: input.note.clone().unwrap_or_default(),
        })
    }

    pub fn list(store: &DataStore) -> Result<Vec<Department>, StoreError> {
        store.load()
    }

    pub fn find_by_id(store: &DataStore, id: DbId) -> Result<Option<Department>, StoreError> {
        store.find(id)
    }

    pub fn update(
        store: &DataStore,
        id: DbId,
        input: &UpdateDepartment,
    ) -> Result<Option<Department>, StoreError> {
        store.update(id, |dept: &mut Department| {
            apply(&mut dept.dept_type, &input.dept_type);
            apply(&mut dept.name, &input.name);
            apply(&mut dept.role, &input.role);
            apply(&mut dept.contact, &input.contact);
            apply(&mut dept.note, &input.note);
        })
    }

    pub fn delete(store: &DataStore, id: DbId) -> Result<bool, StoreError> {
        store.delete::<Department>(id)
    }
}
