//! Storage of comparison records
//!
//! Callers receive a repository explicitly; nothing in the crate holds a
//! global store. Two implementations are provided:
//! - [`InMemoryRepository`] for tests and ephemeral sessions
//! - [`JsonFileRepository`] persisting a JSON array to a single file

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use uuid::Uuid;

use crate::record::ComparisonRecord;
use crate::{MatchError, Result};

/// Persistence contract for comparison records
pub trait ComparisonRepository {
    /// Insert or replace the record with the same id
    fn save(&mut self, record: ComparisonRecord) -> Result<()>;

    /// All records, newest timestamp first
    fn get_all(&self) -> Result<Vec<ComparisonRecord>>;

    /// Remove a record
    ///
    /// # Errors
    ///
    /// Returns `MatchError::RecordNotFound` if no record has this id.
    fn delete(&mut self, id: Uuid) -> Result<()>;

    /// Remove every record
    fn clear_all(&mut self) -> Result<()>;

    /// Fetch a single record
    ///
    /// # Errors
    ///
    /// Returns `MatchError::RecordNotFound` if no record has this id.
    fn get(&self, id: Uuid) -> Result<ComparisonRecord> {
        self.get_all()?
            .into_iter()
            .find(|record| record.id == id)
            .ok_or(MatchError::RecordNotFound { id })
    }
}

fn sort_newest_first(records: &mut [ComparisonRecord]) {
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
}

/// Records held in memory for the lifetime of the value
#[derive(Debug, Default, Clone)]
pub struct InMemoryRepository {
    records: HashMap<Uuid, ComparisonRecord>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ComparisonRepository for InMemoryRepository {
    fn save(&mut self, record: ComparisonRecord) -> Result<()> {
        self.records.insert(record.id, record);
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<ComparisonRecord>> {
        let mut records: Vec<_> = self.records.values().cloned().collect();
        sort_newest_first(&mut records);
        Ok(records)
    }

    fn delete(&mut self, id: Uuid) -> Result<()> {
        self.records
            .remove(&id)
            .map(|_| ())
            .ok_or(MatchError::RecordNotFound { id })
    }

    fn clear_all(&mut self) -> Result<()> {
        self.records.clear();
        Ok(())
    }

    fn get(&self, id: Uuid) -> Result<ComparisonRecord> {
        self.records
            .get(&id)
            .cloned()
            .ok_or(MatchError::RecordNotFound { id })
    }
}

/// Records stored as a JSON array in one file
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename. A missing file reads as an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<ComparisonRecord>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "record file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(MatchError::storage(
                    format!("failed to read {}", self.path.display()),
                    e,
                ))
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn store(&self, records: &[ComparisonRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                MatchError::storage(format!("failed to create {}", parent.display()), e)
            })?;
        }

        let json = serde_json::to_string_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .map_err(|e| MatchError::storage(format!("failed to write {}", tmp.display()), e))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            MatchError::storage(format!("failed to replace {}", self.path.display()), e)
        })?;

        debug!(path = %self.path.display(), count = records.len(), "record file written");
        Ok(())
    }
}

impl ComparisonRepository for JsonFileRepository {
    fn save(&mut self, record: ComparisonRecord) -> Result<()> {
        let mut records = self.load()?;
        let id = record.id;
        match records.iter_mut().find(|r| r.id == id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        self.store(&records)?;
        info!(%id, "comparison saved");
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<ComparisonRecord>> {
        let mut records = self.load()?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    fn delete(&mut self, id: Uuid) -> Result<()> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(MatchError::RecordNotFound { id });
        }
        self.store(&records)?;
        info!(%id, "comparison deleted");
        Ok(())
    }

    fn clear_all(&mut self) -> Result<()> {
        self.store(&[])?;
        info!(path = %self.path.display(), "all comparisons cleared");
        Ok(())
    }
}
