//! Repository for `attachments.csv`.

use reelbook_core::types::{format_timestamp, now, DbId};

use crate::models::attachment::{Attachment, NewAttachment};
use crate::store::{DataStore, StoreError};

/// Generic attachments keyed by owning module and record id.
pub struct AttachmentRepo;

impl AttachmentRepo {
    /// Record a batch of uploads. An empty batch writes nothing.
    pub fn create_batch(
        store: &DataStore,
        items: Vec<NewAttachment>,
    ) -> Result<Vec<Attachment>, StoreError> {
        let uploaded_at = format_timestamp(&now());
        store.insert_batch(items, |id, item| Attachment {
            id,
            module: item.module,
            ref_id: item.ref_id,
            title: item.title,
            file_name: item.file_name,
            file_path: item.file_path,
            file_type: item.file_type.as_str().to_string(),
            uploaded_at: uploaded_at.clone(),
            note: item.note,
        })
    }

    /// Attachments owned by exactly `(module, ref_id)`, in upload order.
    pub fn list_for(
        store: &DataStore,
        module: &str,
        ref_id: DbId,
    ) -> Result<Vec<Attachment>, StoreError> {
        let all: Vec<Attachment> = store.load()?;
        Ok(all
            .into_iter()
            .filter(|a| a.module == module && a.ref_id == ref_id)
            .collect())
    }

    pub fn find_by_id(store: &DataStore, id: DbId) -> Result<Option<Attachment>, StoreError> {
        store.find(id)
    }

    /// Remove the record only. The stored file stays on disk.
    pub fn delete(store: &DataStore, id: DbId) -> Result<bool, StoreError> {
        store.delete::<Attachment>(id)
    }
}
