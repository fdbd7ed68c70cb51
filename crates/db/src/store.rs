//! Flat-file record store.
//!
//! Every table is one CSV file under the data directory, loaded whole into
//! memory, mutated, and rewritten whole. All writes go through a
//! [`Transaction`]:
//!
//! 1. each table is serialised to `<table>.staged` and synced,
//! 2. a journal listing the staged tables is written atomically,
//! 3. every staged file is renamed over its table,
//! 4. the journal is removed.
//!
//! [`DataStore::open`] rolls a committed journal forward and discards staging
//! files that never reached step 2, so a crash never leaves a cascade
//! half-applied.
//!
//! Ids come from `max(max existing id, last issued id) + 1`. The last issued
//! id per table lives in `sequences.csv` and is written in the same
//! transaction as the insert, so deleting the newest record never frees its id.
//!
//! The store assumes a single writer. Callers that share a `DataStore`
//! between tasks must serialise mutations (the API keeps it behind a mutex).

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use reelbook_core::types::DbId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Name of the id high-water-mark table.
pub const SEQUENCES_TABLE: &str = "sequences.csv";

const JOURNAL_FILE: &str = "commit.journal";
const STAGED_SUFFIX: &str = ".staged";
const TMP_SUFFIX: &str = ".tmp";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from the flat-file store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Commit journal error: {0}")]
    Journal(String),
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A row type persisted as one CSV table.
///
/// Field order of the serialised struct must match [`Record::HEADERS`].
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// File name of the table inside the data directory.
    const TABLE: &'static str;
    /// Column names, written as the header row even when the table is empty.
    const HEADERS: &'static [&'static str];
    /// Entity name used in not-found errors.
    const ENTITY: &'static str;

    fn id(&self) -> DbId;
}

/// Row of `sequences.csv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SequenceRow {
    table: String,
    last_id: DbId,
}

// ---------------------------------------------------------------------------
// DataStore
// ---------------------------------------------------------------------------

/// Handle to a data directory of CSV tables.
#[derive(Debug, Clone)]
pub struct DataStore {
    root: PathBuf,
}

impl DataStore {
    /// Open (creating if needed) a data directory and recover any interrupted commit.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let store = Self { root };
        store.recover()?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, table: &str) -> PathBuf {
        self.root.join(table)
    }

    fn staged_path(&self, table: &str) -> PathBuf {
        self.root.join(format!("{table}{STAGED_SUFFIX}"))
    }

    /// Verify the data directory is readable.
    pub fn health_check(&self) -> Result<(), StoreError> {
        fs::read_dir(&self.root)?;
        Ok(())
    }

    // -- reading -------------------------------------------------------------

    /// Load every record of a table in stored order. A missing file is an empty table.
    pub fn load<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        let path = self.path(R::TABLE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&path)?;
        let mut records = Vec::new();
        for row in reader.deserialize::<R>() {
            records.push(row?);
        }
        tracing::trace!(table = R::TABLE, count = records.len(), "Loaded table");
        Ok(records)
    }

    /// Find one record by id.
    pub fn find<R: Record>(&self, id: DbId) -> Result<Option<R>, StoreError> {
        Ok(self.load::<R>()?.into_iter().find(|r| r.id() == id))
    }

    fn load_sequences(&self) -> Result<BTreeMap<String, DbId>, StoreError> {
        let path = self.path(SEQUENCES_TABLE);
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let mut reader = csv::Reader::from_path(&path)?;
        let mut map = BTreeMap::new();
        for row in reader.deserialize::<SequenceRow>() {
            let row = row?;
            map.insert(row.table, row.last_id);
        }
        Ok(map)
    }

    /// Last id ever issued for a table, `0` if none was recorded.
    pub fn last_issued<R: Record>(&self) -> Result<DbId, StoreError> {
        Ok(self
            .load_sequences()?
            .get(R::TABLE)
            .copied()
            .unwrap_or(0))
    }

    /// Next id for a table given its current records.
    pub fn next_id<R: Record>(&self, records: &[R]) -> Result<DbId, StoreError> {
        let max_existing = records.iter().map(Record::id).max().unwrap_or(0);
        Ok(max_existing.max(self.last_issued::<R>()?) + 1)
    }

    // -- writing -------------------------------------------------------------

    /// Start a multi-table write.
    pub fn begin(&self) -> Transaction<'_> {
        Transaction {
            store: self,
            staged: BTreeMap::new(),
            sequences: None,
        }
    }

    /// Overwrite a table with `records`.
    pub fn save<R: Record>(&self, records: &[R]) -> Result<(), StoreError> {
        let mut tx = self.begin();
        tx.stage(records)?;
        tx.commit()
    }

    /// Append one record built from its assigned id.
    pub fn insert<R: Record>(&self, build: impl FnOnce(DbId) -> R) -> Result<R, StoreError> {
        let mut records = self.load::<R>()?;
        let id = self.next_id(&records)?;
        let record = build(id);
        records.push(record.clone());

        let mut tx = self.begin();
        tx.stage(&records)?;
        tx.record_issued::<R>(id)?;
        tx.commit()?;
        Ok(record)
    }

    /// Append one record per item, assigning consecutive ids.
    pub fn insert_batch<R: Record, I>(
        &self,
        items: Vec<I>,
        mut build: impl FnMut(DbId, I) -> R,
    ) -> Result<Vec<R>, StoreError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let mut records = self.load::<R>()?;
        let mut next = self.next_id(&records)?;
        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let record = build(next, item);
            records.push(record.clone());
            created.push(record);
            next += 1;
        }

        let mut tx = self.begin();
        tx.stage(&records)?;
        tx.record_issued::<R>(next - 1)?;
        tx.commit()?;
        Ok(created)
    }

    /// Apply `change` to the record with `id` and rewrite the table.
    ///
    /// Returns `None` (and writes nothing) when the id does not exist.
    pub fn update<R: Record>(
        &self,
        id: DbId,
        change: impl FnOnce(&mut R),
    ) -> Result<Option<R>, StoreError> {
        let mut records = self.load::<R>()?;
        let Some(record) = records.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        change(record);
        let updated = record.clone();
        self.save(&records)?;
        Ok(Some(updated))
    }

    /// Remove the record with `id`. Returns `false` when it did not exist.
    pub fn delete<R: Record>(&self, id: DbId) -> Result<bool, StoreError> {
        let mut records = self.load::<R>()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(false);
        }
        self.save(&records)?;
        Ok(true)
    }

    // -- recovery ------------------------------------------------------------

    fn recover(&self) -> Result<(), StoreError> {
        let journal = self.path(JOURNAL_FILE);
        if journal.exists() {
            let listed = fs::read_to_string(&journal)?;
            for table in listed.lines().map(str::trim).filter(|l| !l.is_empty()) {
                if table.contains(['/', '\\']) {
                    return Err(StoreError::Journal(format!(
                        "invalid table name in journal: {table}"
                    )));
                }
                let staged = self.staged_path(table);
                if staged.exists() {
                    fs::rename(&staged, self.path(table))?;
                }
            }
            fs::remove_file(&journal)?;
            tracing::warn!(root = %self.root.display(), "Rolled forward interrupted commit");
        }

        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if name.ends_with(STAGED_SUFFIX) || name.ends_with(TMP_SUFFIX) {
                fs::remove_file(&path)?;
                tracing::warn!(file = %name, "Discarded uncommitted staging file");
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A set of whole-table rewrites applied together.
///
/// Nothing touches the live tables until [`Transaction::commit`]. Dropping an
/// uncommitted transaction discards it.
pub struct Transaction<'a> {
    store: &'a DataStore,
    staged: BTreeMap<String, Vec<u8>>,
    sequences: Option<BTreeMap<String, DbId>>,
}

impl Transaction<'_> {
    /// Stage the full contents of a table.
    pub fn stage<R: Record>(&mut self, records: &[R]) -> Result<(), StoreError> {
        let bytes = encode(R::HEADERS, records)?;
        self.staged.insert(R::TABLE.to_string(), bytes);
        Ok(())
    }

    /// Raise the table's issued-id high-water mark to at least `id`.
    pub fn record_issued<R: Record>(&mut self, id: DbId) -> Result<(), StoreError> {
        if self.sequences.is_none() {
            self.sequences = Some(self.store.load_sequences()?);
        }
        if let Some(sequences) = self.sequences.as_mut() {
            let entry = sequences.entry(R::TABLE.to_string()).or_insert(0);
            *entry = (*entry).max(id);
        }
        Ok(())
    }

    /// Apply every staged table.
    pub fn commit(mut self) -> Result<(), StoreError> {
        if let Some(sequences) = self.sequences.take() {
            let rows: Vec<SequenceRow> = sequences
                .into_iter()
                .map(|(table, last_id)| SequenceRow { table, last_id })
                .collect();
            let bytes = encode(&["table", "last_id"], &rows)?;
            self.staged.insert(SEQUENCES_TABLE.to_string(), bytes);
        }
        if self.staged.is_empty() {
            return Ok(());
        }

        let store = self.store;
        for (table, bytes) in &self.staged {
            write_synced(&store.staged_path(table), bytes)?;
        }

        let listing: String = self.staged.keys().map(|t| format!("{t}\n")).collect();
        let journal = store.path(JOURNAL_FILE);
        let journal_tmp = store.path(&format!("{JOURNAL_FILE}{TMP_SUFFIX}"));
        write_synced(&journal_tmp, listing.as_bytes())?;
        fs::rename(&journal_tmp, &journal)?;

        for table in self.staged.keys() {
            fs::rename(store.staged_path(table), store.path(table))?;
        }
        fs::remove_file(&journal)?;

        tracing::debug!(
            tables = ?self.staged.keys().collect::<Vec<_>>(),
            "Committed transaction"
        );
        Ok(())
    }
}

fn encode<T: Serialize>(headers: &[&str], rows: &[T]) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| StoreError::Io(e.into_error()))
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: DbId,
        name: String,
    }

    impl Record for Row {
        const TABLE: &'static str = "rows.csv";
        const HEADERS: &'static [&'static str] = &["id", "name"];
        const ENTITY: &'static str = "Row";

        fn id(&self) -> DbId {
            self.id
        }
    }

    fn row(id: DbId, name: &str) -> Row {
        Row {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn missing_table_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(dir.path()).unwrap();
        assert!(store.load::<Row>().unwrap().is_empty());
    }

    #[test]
    fn empty_table_keeps_header_row() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(dir.path()).unwrap();
        store.save::<Row>(&[]).unwrap();
        let text = fs::read_to_string(dir.path().join("rows.csv")).unwrap();
        assert_eq!(text, "id,name\n");
    }

    #[test]
    fn first_id_is_one() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(dir.path()).unwrap();
        let created = store.insert(|id| row(id, "a")).unwrap();
        assert_eq!(created.id, 1);
    }

    #[test]
    fn next_id_follows_existing_max() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("rows.csv"), "id,name\n3,c\n").unwrap();
        let store = DataStore::open(dir.path()).unwrap();
        let created = store.insert(|id| row(id, "d")).unwrap();
        assert_eq!(created.id, 4);
    }

    #[test]
    fn deleted_max_id_is_not_reissued() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(dir.path()).unwrap();
        store.insert(|id| row(id, "a")).unwrap();
        let second = store.insert(|id| row(id, "b")).unwrap();
        assert!(store.delete::<Row>(second.id).unwrap());
        let third = store.insert(|id| row(id, "c")).unwrap();
        assert_eq!(third.id, 3);
    }

    #[test]
    fn batch_insert_assigns_consecutive_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(dir.path()).unwrap();
        store.insert(|id| row(id, "a")).unwrap();
        let created = store
            .insert_batch(vec!["x", "y"], |id, name| row(id, name))
            .unwrap();
        assert_eq!(created.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(store.last_issued::<Row>().unwrap(), 3);
    }

    #[test]
    fn update_and_delete_of_missing_id_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(dir.path()).unwrap();
        assert!(store.update::<Row>(9, |r| r.name.clear()).unwrap().is_none());
        assert!(!store.delete::<Row>(9).unwrap());
        assert!(!dir.path().join("rows.csv").exists());
    }

    #[test]
    fn committed_journal_is_rolled_forward_on_open() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("rows.csv"), "id,name\n1,old\n").unwrap();
        fs::write(dir.path().join("rows.csv.staged"), "id,name\n1,new\n").unwrap();
        fs::write(dir.path().join(JOURNAL_FILE), "rows.csv\n").unwrap();

        let store = DataStore::open(dir.path()).unwrap();
        assert_eq!(store.load::<Row>().unwrap(), vec![row(1, "new")]);
        assert!(!dir.path().join(JOURNAL_FILE).exists());
    }

    #[test]
    fn uncommitted_staging_is_discarded_on_open() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("rows.csv"), "id,name\n1,old\n").unwrap();
        fs::write(dir.path().join("rows.csv.staged"), "id,name\n1,new\n").unwrap();

        let store = DataStore::open(dir.path()).unwrap();
        assert_eq!(store.load::<Row>().unwrap(), vec![row(1, "old")]);
        assert!(!dir.path().join("rows.csv.staged").exists());
    }
}
