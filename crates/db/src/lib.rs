//! Flat-file persistence for the production desk.
//!
//! Every entity lives in one CSV table under the data directory. See
//! [`store`] for the write protocol and [`repositories`] for the per-entity
//! operations (including cascade deletes).

pub mod models;
pub mod repositories;
pub mod store;

pub use store::{DataStore, Record, StoreError, Transaction};

/// Open the data directory, creating it if needed.
pub fn open_store(data_dir: &std::path::Path) -> Result<DataStore, StoreError> {
    let store = DataStore::open(data_dir)?;
    tracing::info!(data_dir = %data_dir.display(), "Data store opened");
    Ok(store)
}

/// Check that the data directory is still reachable.
pub fn health_check(store: &DataStore) -> Result<(), StoreError> {
    store.health_check()
}
