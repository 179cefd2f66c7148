//! # Storage Module
//!
//! The employee record store.
//!
//! Two backends implement [`EmployeeStore`]:
//! - [`MemoryStore`]: `BTreeMap`-backed, volatile
//! - [`RedbStore`]: disk-backed, ACID, survives restarts
//!
//! ## Update Contract
//!
//! `update` is a compare-and-swap on [`EmployeeRecord::version`]: the write
//! is accepted only when the stored version equals the caller's, and the
//! stored copy gets `version + 1`. Two writers that read the same version
//! cannot both succeed.

mod memory;
mod redb_store;

pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use crate::{EmployeeId, EmployeeRecord, OnboardError};

/// Persistence contract for employee records.
pub trait EmployeeStore {
    /// Fetch a record by id.
    fn get(&self, id: EmployeeId) -> Result<Option<EmployeeRecord>, OnboardError>;

    /// Fetch a record by normalized email.
    fn find_by_email(&self, email: &str) -> Result<Option<EmployeeRecord>, OnboardError>;

    /// Insert a new record.
    ///
    /// Fails with `DuplicateEmail` when the email is taken.
    fn insert(&mut self, record: &EmployeeRecord) -> Result<(), OnboardError>;

    /// Replace a stored record if its version still matches.
    ///
    /// Returns the new stored version.
    fn update(&mut self, record: &EmployeeRecord) -> Result<u64, OnboardError>;

    /// Delete a record. Returns the removed record, if any.
    fn remove(&mut self, id: EmployeeId) -> Result<Option<EmployeeRecord>, OnboardError>;

    /// All records, ordered by id.
    fn list(&self) -> Result<Vec<EmployeeRecord>, OnboardError>;

    /// Number of stored records.
    fn len(&self) -> Result<usize, OnboardError>;

    fn is_empty(&self) -> Result<bool, OnboardError> {
        Ok(self.len()? == 0)
    }
}

/// Check the compare-and-swap precondition shared by both backends.
pub(crate) fn check_update(
    stored: &EmployeeRecord,
    incoming: &EmployeeRecord,
) -> Result<(), OnboardError> {
    if stored.version != incoming.version {
        return Err(OnboardError::VersionConflict {
            expected: incoming.version,
            found: stored.version,
        });
    }
    if stored.email != incoming.email {
        return Err(OnboardError::InvariantViolation(
            "email cannot change after enrollment".to_string(),
        ));
    }
    if stored.role != incoming.role || stored.start_date != incoming.start_date {
        return Err(OnboardError::InvariantViolation(
            "role and start date are immutable".to_string(),
        ));
    }
    if !stored.completed_steps.is_subset(&incoming.completed_steps) {
        return Err(OnboardError::InvariantViolation(
            "completed steps cannot be removed".to_string(),
        ));
    }
    Ok(())
}
