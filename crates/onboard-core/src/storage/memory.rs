//! In-memory record store.

use super::{EmployeeStore, check_update};
use crate::{EmployeeId, EmployeeRecord, OnboardError};
use std::collections::BTreeMap;

/// Volatile store backed by two `BTreeMap`s (records and email index).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<EmployeeId, EmployeeRecord>,
    email_index: BTreeMap<String, EmployeeId>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EmployeeStore for MemoryStore {
    fn get(&self, id: EmployeeId) -> Result<Option<EmployeeRecord>, OnboardError> {
        Ok(self.records.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<EmployeeRecord>, OnboardError> {
        Ok(self
            .email_index
            .get(email)
            .and_then(|id| self.records.get(id))
            .cloned())
    }

    fn insert(&mut self, record: &EmployeeRecord) -> Result<(), OnboardError> {
        if self.email_index.contains_key(&record.email) {
            return Err(OnboardError::DuplicateEmail(record.email.clone()));
        }
        if self.records.contains_key(&record.id) {
            return Err(OnboardError::InvariantViolation(format!(
                "duplicate employee id {}",
                record.id
            )));
        }
        self.email_index.insert(record.email.clone(), record.id);
        self.records.insert(record.id, record.clone());
        Ok(())
    }

    fn update(&mut self, record: &EmployeeRecord) -> Result<u64, OnboardError> {
        let stored = self
            .records
            .get_mut(&record.id)
            .ok_or_else(|| OnboardError::EmployeeNotFound(record.id.to_string()))?;
        check_update(stored, record)?;

        let next_version = record.version.saturating_add(1);
        *stored = EmployeeRecord {
            version: next_version,
            ..record.clone()
        };
        Ok(next_version)
    }

    fn remove(&mut self, id: EmployeeId) -> Result<Option<EmployeeRecord>, OnboardError> {
        let removed = self.records.remove(&id);
        if let Some(record) = &removed {
            self.email_index.remove(&record.email);
        }
        Ok(removed)
    }

    fn list(&self) -> Result<Vec<EmployeeRecord>, OnboardError> {
        Ok(self.records.values().cloned().collect())
    }

    fn len(&self) -> Result<usize, OnboardError> {
        Ok(self.records.len())
    }
}
