//! Repository for `assets.csv`.

use reelbook_core::types::{format_timestamp, now, DbId};

use crate::models::asset::{Asset, NewAsset};
use crate::store::{DataStore, StoreError};

pub struct AssetRepo;

impl AssetRepo {
    /// Record a batch of uploaded files, assigning consecutive ids.
    pub fn create_batch(store: &DataStore, items: Vec<NewAsset>) -> Result<Vec<Asset>, StoreError> {
        let uploaded_at = format_timestamp(&now());
        store.insert_batch(items, |id, item| Asset {
            id,
            site_id: item.site_id,
            file_name: item.file_name,
            file_path: item.file_path,
            file_type: item.file_type.as_str().to_string(),
            uploaded_at: uploaded_at.clone(),
            note: item.note,
        })
    }

    pub fn list_by_site(store: &DataStore, site_id: DbId) -> Result<Vec<Asset>, StoreError> {
        let assets: Vec<Asset> = store.load()?;
        Ok(assets.into_iter().filter(|a| a.site_id == site_id).collect())
    }

    pub fn find_by_id(store: &DataStore, id: DbId) -> Result<Option<Asset>, StoreError> {
        store.find(id)
    }

    /// Remove the record only. The stored file stays on disk.
    pub fn delete(store: &DataStore, id: DbId) -> Result<bool, StoreError> {
        store.delete::<Asset>(id)
    }
}
