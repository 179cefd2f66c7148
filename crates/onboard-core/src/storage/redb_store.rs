//! # redb-backed Record Store
//!
//! A disk-backed employee store using the redb embedded database:
//! - ACID transactions (each mutation is one write transaction)
//! - Crash safety (copy-on-write B-trees)
//! - MVCC (concurrent readers, single writer)
//!
//! The compare-and-swap in `update` runs inside the write transaction, so the
//! version check and the write are atomic with respect to other writers.

use super::{EmployeeStore, check_update};
use crate::formats::{record_from_bytes, record_to_bytes};
use crate::{EmployeeId, EmployeeRecord, OnboardError};
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::path::Path;

/// Table for records: EmployeeId(u128) -> encoded EmployeeRecord
const EMPLOYEES: TableDefinition<u128, &[u8]> = TableDefinition::new("employees");

/// Table for the unique email index: normalized email -> EmployeeId(u128)
const EMAIL_INDEX: TableDefinition<&str, u128> = TableDefinition::new("email_index");

fn storage_err(e: impl std::fmt::Display) -> OnboardError {
    OnboardError::IoError(e.to_string())
}

/// A disk-backed record store using redb.
pub struct RedbStore {
    db: Database,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a record database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, OnboardError> {
        let db = Database::create(path.as_ref()).map_err(storage_err)?;

        // Initialize tables if they don't exist
        {
            let write_txn = db.begin_write().map_err(storage_err)?;
            let _ = write_txn.open_table(EMPLOYEES).map_err(storage_err)?;
            let _ = write_txn.open_table(EMAIL_INDEX).map_err(storage_err)?;
            write_txn.commit().map_err(storage_err)?;
        }

        Ok(Self { db })
    }

    /// Compact the database file.
    pub fn compact(&mut self) -> Result<(), OnboardError> {
        self.db.compact().map_err(storage_err)?;
        Ok(())
    }
}

impl EmployeeStore for RedbStore {
    fn get(&self, id: EmployeeId) -> Result<Option<EmployeeRecord>, OnboardError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(EMPLOYEES).map_err(storage_err)?;
        let data = table.get(id.as_u128()).map_err(storage_err)?;
        data.map(|d| record_from_bytes(d.value())).transpose()
    }

    fn find_by_email(&self, email: &str) -> Result<Option<EmployeeRecord>, OnboardError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let index = read_txn.open_table(EMAIL_INDEX).map_err(storage_err)?;
        let Some(key) = index.get(email).map_err(storage_err)?.map(|v| v.value()) else {
            return Ok(None);
        };

        let table = read_txn.open_table(EMPLOYEES).map_err(storage_err)?;
        let data = table.get(key).map_err(storage_err)?.ok_or_else(|| {
            OnboardError::InvariantViolation(format!(
                "email index points at missing record {}",
                EmployeeId::from_u128(key)
            ))
        })?;
        record_from_bytes(data.value()).map(Some)
    }

    fn insert(&mut self, record: &EmployeeRecord) -> Result<(), OnboardError> {
        let bytes = record_to_bytes(record)?;
        let key = record.id.as_u128();

        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut index = write_txn.open_table(EMAIL_INDEX).map_err(storage_err)?;
            if index
                .get(record.email.as_str())
                .map_err(storage_err)?
                .is_some()
            {
                return Err(OnboardError::DuplicateEmail(record.email.clone()));
            }

            let mut table = write_txn.open_table(EMPLOYEES).map_err(storage_err)?;
            if table.get(key).map_err(storage_err)?.is_some() {
                return Err(OnboardError::InvariantViolation(format!(
                    "duplicate employee id {}",
                    record.id
                )));
            }

            table
                .insert(key, bytes.as_slice())
                .map_err(storage_err)?;
            index
                .insert(record.email.as_str(), key)
                .map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;
        Ok(())
    }

    fn update(&mut self, record: &EmployeeRecord) -> Result<u64, OnboardError> {
        let key = record.id.as_u128();
        let next_version = record.version.saturating_add(1);
        let bytes = record_to_bytes(&EmployeeRecord {
            version: next_version,
            ..record.clone()
        })?;

        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = write_txn.open_table(EMPLOYEES).map_err(storage_err)?;
            let stored = match table.get(key).map_err(storage_err)? {
                Some(data) => record_from_bytes(data.value())?,
                None => return Err(OnboardError::EmployeeNotFound(record.id.to_string())),
            };
            check_update(&stored, record)?;

            table
                .insert(key, bytes.as_slice())
                .map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;
        Ok(next_version)
    }

    fn remove(&mut self, id: EmployeeId) -> Result<Option<EmployeeRecord>, OnboardError> {
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        let removed = {
            let mut table = write_txn.open_table(EMPLOYEES).map_err(storage_err)?;
            match table.remove(id.as_u128()).map_err(storage_err)? {
                Some(data) => Some(record_from_bytes(data.value())?),
                None => None,
            }
        };

        if let Some(record) = &removed {
            let mut index = write_txn.open_table(EMAIL_INDEX).map_err(storage_err)?;
            index
                .remove(record.email.as_str())
                .map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;
        Ok(removed)
    }

    fn list(&self) -> Result<Vec<EmployeeRecord>, OnboardError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(EMPLOYEES).map_err(storage_err)?;

        let mut records = Vec::new();
        for entry in table.iter().map_err(storage_err)? {
            let (_, value) = entry.map_err(storage_err)?;
            records.push(record_from_bytes(value.value())?);
        }
        Ok(records)
    }

    fn len(&self) -> Result<usize, OnboardError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(EMPLOYEES).map_err(storage_err)?;
        Ok(table.len().map_err(storage_err)? as usize)
    }
}

// =============================================================================
// TESTS
// =============================================================================
