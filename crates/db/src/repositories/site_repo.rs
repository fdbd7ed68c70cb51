//! Repository for `shooting_sites.csv`.

use reelbook_core::sites;
use reelbook_core::timestamps;
use reelbook_core::types::DbId;

use crate::models::apply;
use crate::models::asset::Asset;
use crate::models::site::{CreateSite, Site, UpdateSite};
use crate::store::{DataStore, StoreError};

/// Provides CRUD operations for shooting sites.
pub struct SiteRepo;

impl SiteRepo {
    /// Insert a new site. Status defaults to `not_scouted`, the visit to today 09:00.
    pub fn create(store: &DataStore, input: &CreateSite) -> Result<Site, StoreError> {
        let date = input.visit_date.unwrap_or_else(timestamps::today);
        let time = input.visit_time.unwrap_or_else(sites::default_visit_time);
        store.insert(|id| Site {
            id,
            site_name: input.site_name.trim().to_string(),
            address: input.address.clone().unwrap_or_default(),
            status: input
                .status
                .clone()
                .unwrap_or_else(|| sites::STATUS_NOT_SCOUTED.to_string()),
            visit_datetime: sites::compose_visit_datetime(date, time),
            note: input.note.clone().unwrap_or_default(),
        })
    }

    /// List all sites in stored order.
    pub fn list(store: &DataStore) -> Result<Vec<Site>, StoreError> {
        store.load()
    }

    pub fn find_by_id(store: &DataStore, id: DbId) -> Result<Option<Site>, StoreError> {
        store.find(id)
    }

    /// Overwrite the given fields. Returns `None` if no site has this id.
    ///
    /// A malformed stored visit datetime is replaced by the default before
    /// the supplied date or time part is merged in.
    pub fn update(
        store: &DataStore,
        id: DbId,
        input: &UpdateSite,
    ) -> Result<Option<Site>, StoreError> {
        store.update(id, |site: &mut Site| {
            apply(&mut site.site_name, &input.site_name);
            apply(&mut site.address, &input.address);
            apply(&mut site.status, &input.status);
            apply(&mut site.note, &input.note);
            if input.visit_date.is_some() || input.visit_time.is_some() {
                let stored = timestamps::datetime_or(
                    &site.visit_datetime,
                    sites::default_visit_datetime(),
                );
                let date = input.visit_date.unwrap_or(stored.date());
                let time = input.visit_time.unwrap_or(stored.time());
                site.visit_datetime = sites::compose_visit_datetime(date, time);
            }
        })
    }

    /// Delete a site and every asset recorded against it, in one transaction.
    ///
    /// Returns the number of assets removed, or `None` if the site did not exist.
    pub fn delete(store: &DataStore, id: DbId) -> Result<Option<usize>, StoreError> {
        let mut sites_table: Vec<Site> = store.load()?;
        let before = sites_table.len();
        sites_table.retain(|s| s.id != id);
        if sites_table.len() == before {
            return Ok(None);
        }

        let mut assets: Vec<Asset> = store.load()?;
        let asset_count = assets.len();
        assets.retain(|a| a.site_id != id);
        let removed = asset_count - assets.len();

        let mut tx = store.begin();
        tx.stage(&sites_table)?;
        tx.stage(&assets)?;
        tx.commit()?;
        Ok(Some(removed))
    }
}
