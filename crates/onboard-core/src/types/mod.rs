//! # Core Type Definitions
//!
//! This module contains all core types for the onboarding tracker:
//! - Identifiers (`EmployeeId`, `StepId`)
//! - Enumerations (`Role`, `Status`)
//! - The persisted record (`EmployeeRecord`)
//! - Error types (`OnboardError`)
//!
//! ## Record Invariants
//!
//! - `progress == round(100 * |completed_steps| / total_steps)`
//! - `status == Completed` iff `|completed_steps| == total_steps`
//! - `completed_steps` is a set and only grows
//!
//! They are checked by [`EmployeeRecord::validate`] before any write.

use crate::config::OnboardingConfig;
use crate::primitives::INITIAL_STEP;
use crate::progress::percent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of an onboarding step. Steps are numbered from 1.
pub type StepId = u32;

/// Opaque, immutable identifier of an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub Uuid);

impl EmployeeId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its hyphenated string form.
    ///
    /// A malformed id can never name a stored record, so it is reported as
    /// `EmployeeNotFound` rather than as an input error.
    pub fn parse(s: &str) -> Result<Self, OnboardError> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| OnboardError::EmployeeNotFound(s.to_string()))
    }

    /// Raw 128-bit value, used as the storage key.
    #[must_use]
    pub const fn as_u128(self) -> u128 {
        self.0.as_u128()
    }

    /// Rebuild an id from its storage key.
    #[must_use]
    pub const fn from_u128(raw: u128) -> Self {
        Self(Uuid::from_u128(raw))
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for EmployeeId {
    type Err = OnboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// ROLE
// =============================================================================

/// Access role of a record. Set at creation, never changed by the core.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Employee,
}

impl Role {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = OnboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "employee" => Ok(Role::Employee),
            other => Err(OnboardError::InvalidInput(format!("unknown role: {}", other))),
        }
    }
}

// =============================================================================
// STATUS
// =============================================================================

/// Coarse onboarding status derived from the completed-step count.
///
/// `"Just Started"` is an older spelling of the initial label and is read as
/// [`Status::NotStarted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Not Started", alias = "Just Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl Status {
    /// Human-readable label, identical to the serialized form.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }

    /// The status a record with `completed` steps out of `total` must carry.
    #[must_use]
    pub fn expected(completed: usize, total: StepId) -> Self {
        if completed == 0 {
            Status::NotStarted
        } else if completed == total as usize {
            Status::Completed
        } else {
            Status::InProgress
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// EMPLOYEE RECORD
// =============================================================================

/// One onboarding participant, as persisted by the record store.
///
/// `credential_hash` never leaves the crate boundary in any response type;
/// the HTTP layer builds its own views from this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: EmployeeId,
    pub name: String,
    /// Normalized (trimmed, lower-case) login email. Unique in the store.
    pub email: String,
    /// argon2 PHC string.
    pub credential_hash: String,
    pub role: Role,
    pub start_date: DateTime<Utc>,
    pub completed_steps: BTreeSet<StepId>,
    pub current_step: StepId,
    /// Denormalized percentage, see module docs.
    pub progress: u8,
    pub status: Status,
    /// Write counter for compare-and-swap updates. Bumped by the store.
    pub version: u64,
}

impl EmployeeRecord {
    /// Create a fresh record with no completed steps.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        credential_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: EmployeeId::generate(),
            name: name.into(),
            email: email.into(),
            credential_hash: credential_hash.into(),
            role,
            start_date: Utc::now(),
            completed_steps: BTreeSet::new(),
            current_step: INITIAL_STEP,
            progress: 0,
            status: Status::NotStarted,
            version: 0,
        }
    }

    /// Number of distinct completed steps.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed_steps.len()
    }

    #[must_use]
    pub fn has_completed(&self, step: StepId) -> bool {
        self.completed_steps.contains(&step)
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }

    /// Check the record invariants against the configured catalog.
    ///
    /// Called before every write so the store never holds an inconsistent
    /// record.
    pub fn validate(&self, config: &OnboardingConfig) -> Result<(), OnboardError> {
        if self.name.trim().is_empty() {
            return Err(OnboardError::InvariantViolation("empty name".to_string()));
        }
        if self.email.is_empty() {
            return Err(OnboardError::InvariantViolation("empty email".to_string()));
        }
        if self.credential_hash.is_empty() {
            return Err(OnboardError::InvariantViolation(
                "missing credential".to_string(),
            ));
        }
        if self.current_step < INITIAL_STEP {
            return Err(OnboardError::InvariantViolation(format!(
                "current step {} below {}",
                self.current_step, INITIAL_STEP
            )));
        }
        if let Some(step) = self
            .completed_steps
            .iter()
            .find(|s| !config.contains_step(**s))
        {
            return Err(OnboardError::InvariantViolation(format!(
                "completed step {} outside catalog of {}",
                step, config.total_steps
            )));
        }

        let count = self.completed_count();
        let expected_progress = percent(count, config.total_steps);
        if self.progress != expected_progress {
            return Err(OnboardError::InvariantViolation(format!(
                "progress {} does not match {} of {} steps (expected {})",
                self.progress, count, config.total_steps, expected_progress
            )));
        }

        let expected_status = Status::expected(count, config.total_steps);
        if self.status != expected_status {
            return Err(OnboardError::InvariantViolation(format!(
                "status '{}' does not match {} of {} steps (expected '{}')",
                self.status, count, config.total_steps, expected_status
            )));
        }

        Ok(())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the onboarding core.
///
/// - No silent failures
/// - Use `Result<T, OnboardError>` for fallible operations
/// - The core never panics; the caller maps each variant to a response
#[derive(Debug, Error)]
pub enum OnboardError {
    /// No record exists for the given id.
    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    /// Completion data was requested before every step was done.
    #[error("Employee has not completed all steps")]
    NotCompleted,

    /// Another record already uses this email.
    #[error("Email already in use: {0}")]
    DuplicateEmail(String),

    /// A request field failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The step is outside the configured catalog.
    #[error("Invalid step {step}: expected 1..={total}")]
    InvalidStep { step: StepId, total: StepId },

    /// Unknown email or wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The stored record changed since it was read.
    #[error("Version conflict: expected {expected}, found {found}")]
    VersionConflict { expected: u64, found: u64 },

    /// A write would break a record invariant.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O or storage engine error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Password hashing failed.
    #[error("Credential error: {0}")]
    CredentialError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record() -> EmployeeRecord {
        EmployeeRecord::new("Alice", "alice@example.com", "$argon2id$stub", Role::Employee)
    }

    #[test]
    fn new_record_starts_at_step_one() {
        let r = record();
        assert_eq!(r.current_step, 1);
        assert_eq!(r.progress, 0);
        assert_eq!(r.status, Status::NotStarted);
        assert!(r.completed_steps.is_empty());
        assert_eq!(r.version, 0);
    }

    #[test]
    fn new_record_is_valid() {
        assert!(record().validate(&OnboardingConfig::default()).is_ok());
    }

    #[test]
    fn stale_progress_is_rejected() {
        let mut r = record();
        r.completed_steps.insert(1);
        r.status = Status::InProgress;
        // progress still 0
        let err = r.validate(&OnboardingConfig::default()).unwrap_err();
        assert!(matches!(err, OnboardError::InvariantViolation(_)));
    }

    #[test]
    fn wrong_status_is_rejected() {
        let mut r = record();
        r.completed_steps.extend(1..=6);
        r.progress = 100;
        r.status = Status::InProgress;
        assert!(r.validate(&OnboardingConfig::default()).is_err());

        r.status = Status::Completed;
        assert!(r.validate(&OnboardingConfig::default()).is_ok());
    }

    #[test]
    fn step_outside_catalog_is_rejected() {
        let mut r = record();
        r.completed_steps.insert(9);
        r.progress = 17;
        r.status = Status::InProgress;
        assert!(r.validate(&OnboardingConfig::default()).is_err());
    }

    #[test]
    fn status_labels_use_spaces() {
        assert_eq!(Status::InProgress.to_string(), "In Progress");
        assert_eq!(Status::NotStarted.label(), "Not Started");
        assert_eq!(Status::Completed.label(), "Completed");
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("employee".parse::<Role>().unwrap(), Role::Employee);
        assert!("manager".parse::<Role>().is_err());
    }

    #[test]
    fn employee_id_round_trips_through_storage_key() {
        let id = EmployeeId::generate();
        assert_eq!(EmployeeId::from_u128(id.as_u128()), id);
        assert_eq!(id.to_string().parse::<EmployeeId>().unwrap(), id);
    }

    #[test]
    fn malformed_id_reads_as_not_found() {
        let err = EmployeeId::parse("not-a-uuid").unwrap_err();
        assert!(matches!(err, OnboardError::EmployeeNotFound(_)));
    }

    #[test]
    fn expected_status_buckets() {
        assert_eq!(Status::expected(0, 6), Status::NotStarted);
        assert_eq!(Status::expected(3, 6), Status::InProgress);
        assert_eq!(Status::expected(6, 6), Status::Completed);
    }
}
