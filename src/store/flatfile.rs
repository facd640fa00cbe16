//! Flat-file record store
//!
//! One directory per entity type: one JSON file per record, named by its
//! numeric id, plus a plain-text `lastId.txt` holding the last-assigned id.
//! The directory name is supplied at construction; together with the
//! [`Record`] envelope that is the store's whole schema.

use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use parking_lot::{RwLock, RwLockReadGuard};

use crate::error::{BoardError, Result};
use crate::model::{now_date_str, Record};

/// Name of the per-store counter file
const LAST_ID_FILE: &str = "lastId.txt";

/// Persisted collection for one entity type
///
/// ## Concurrency:
/// - All mutations (`save`, `modify`, `delete`) take the write lock, so the
///   counter update and the record write - two separate durable writes -
///   can never interleave between concurrent savers.
/// - Reads (`get`, `list`, `last_id`) share the read lock.
/// - All methods use `&self` (no exclusive access needed).
pub struct RecordStore<T> {
    /// Directory holding this store's record files and counter
    dir: PathBuf,

    /// Guards every file under `dir`
    lock: RwLock<()>,

    _record: PhantomData<T>,
}

impl<T: Record> RecordStore<T> {
    /// Open or create a store at `{db_dir}/{name}`
    pub fn open(db_dir: &Path, name: &str) -> Result<Self> {
        let dir = db_dir.join(name);
        fs::create_dir_all(&dir)?;

        Ok(Self {
            dir,
            lock: RwLock::new(()),
            _record: PhantomData,
        })
    }

    /// Persist a record, allocating an id if it does not carry one
    ///
    /// A record with id 0 gets `last_id + 1` and its regDate stamped; the
    /// counter is persisted before the record file, so a crash between the
    /// two writes burns the id instead of ever reusing it. A record that
    /// already carries an id is overwritten in place (the `modify` path).
    pub fn save(&self, record: &mut T) -> Result<u64> {
        let _guard = self.lock.write();

        if record.id() == 0 {
            let next = self.read_last_id()? + 1;
            self.write_last_id(next)?;
            record.set_id(next);
            record.set_reg_date(now_date_str());
            tracing::debug!("allocated id {} in {}", next, self.dir.display());
        }

        let json = serde_json::to_string(record)?;
        fs::write(self.record_path(record.id()), json)?;

        Ok(record.id())
    }

    /// Persist a record under a forced id (raw overwrite)
    pub fn modify(&self, record: &mut T, id: u64) -> Result<u64> {
        record.set_id(id);
        self.save(record)
    }

    /// Load a record by id
    ///
    /// `Ok(None)` covers both "never existed" and "deleted" - absence is the
    /// normal miss outcome here, not an error.
    pub fn get(&self, id: u64) -> Result<Option<T>> {
        let _guard = self.lock.read();
        self.load(id)
    }

    /// All live records, ascending by id
    ///
    /// Scans every id in `1..=last_id` and skips the gaps left by deletions,
    /// so cost is linear in `last_id` rather than in the live-record count.
    /// No compaction ever runs; this is the store's scalability ceiling.
    pub fn list(&self) -> Result<Vec<T>> {
        let _guard = self.lock.read();
        self.scan()
    }

    /// Remove a record file
    ///
    /// Deleting an id with no file is a no-op. The counter is untouched and
    /// the id is never reused - listings tolerate the gap.
    pub fn delete(&self, id: u64) -> Result<()> {
        let _guard = self.lock.write();

        match fs::remove_file(self.record_path(id)) {
            Ok(()) => {
                tracing::debug!("deleted record {} from {}", id, self.dir.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Last id handed out by this store (0 if none yet)
    pub fn last_id(&self) -> Result<u64> {
        let _guard = self.lock.read();
        self.read_last_id()
    }

    // =========================================================================
    // Snapshot support (used by Repository)
    // =========================================================================

    /// Take shared read access without scanning
    ///
    /// `Repository::snapshot` holds guards on every store at once so a build
    /// sees one consistent state across entity types.
    pub(crate) fn read_guard(&self) -> RwLockReadGuard<'_, ()> {
        self.lock.read()
    }

    /// Scan without locking; the caller must hold a guard from `read_guard`
    pub(crate) fn scan(&self) -> Result<Vec<T>> {
        let last_id = self.read_last_id()?;

        let mut records = Vec::new();
        for id in 1..=last_id {
            if let Some(record) = self.load(id)? {
                records.push(record);
            }
        }

        Ok(records)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn load(&self, id: u64) -> Result<Option<T>> {
        let contents = match fs::read_to_string(self.record_path(id)) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Record file path for an id: `{dir}/{id}.json`
    fn record_path(&self, id: u64) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn last_id_path(&self) -> PathBuf {
        self.dir.join(LAST_ID_FILE)
    }

    /// Read the counter, creating it with value 0 on first access
    ///
    /// Creation happens under whichever guard the caller holds; a mutation
    /// holds the write lock, so two concurrent first saves cannot both see a
    /// missing file and both hand out id 1.
    fn read_last_id(&self) -> Result<u64> {
        let path = self.last_id_path();

        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::write(&path, "0")?;
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };

        contents
            .trim()
            .parse()
            .map_err(|_| BoardError::Storage(format!("corrupt counter file {}", path.display())))
    }

    fn write_last_id(&self, last_id: u64) -> Result<()> {
        fs::write(self.last_id_path(), last_id.to_string())?;
        Ok(())
    }
}
