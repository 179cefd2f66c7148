//! # Roster Module
//!
//! The service facade the HTTP layer and CLI talk to. A `Roster` combines a
//! storage backend with the progress engine and the statistics aggregator.
//!
//! Every mutating operation:
//! 1. reads the current record,
//! 2. computes the next state in memory,
//! 3. validates the record invariants,
//! 4. issues at most one store write.
//!
//! Either the whole record is written or nothing changes.
//!
//! ## Storage Backends
//!
//! - `InMemory`: [`MemoryStore`] (volatile)
//! - `Persistent`: [`RedbStore`] (disk-backed, ACID)

use crate::config::OnboardingConfig;
use crate::credentials::{hash_password, verify_password};
use crate::primitives::{MAX_EMAIL_LENGTH, MAX_NAME_LENGTH, MAX_PASSWORD_LENGTH};
use crate::progress::{CompletionSummary, ProgressEngine, ProgressView, StepOutcome};
use crate::stats::{OnboardingStats, StatsAggregator};
use crate::storage::{EmployeeStore, MemoryStore, RedbStore};
use crate::{EmployeeId, EmployeeRecord, OnboardError, Role, StepId};
use std::path::Path;

/// Storage backend for a Roster.
#[derive(Debug)]
pub enum StorageBackend {
    /// In-memory store (fast, volatile).
    InMemory(MemoryStore),
    /// Disk-backed store using redb (ACID, persistent).
    Persistent(RedbStore),
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::InMemory(MemoryStore::new())
    }
}

impl StorageBackend {
    fn store(&self) -> &dyn EmployeeStore {
        match self {
            StorageBackend::InMemory(store) => store,
            StorageBackend::Persistent(store) => store,
        }
    }

    fn store_mut(&mut self) -> &mut dyn EmployeeStore {
        match self {
            StorageBackend::InMemory(store) => store,
            StorageBackend::Persistent(store) => store,
        }
    }
}

// =============================================================================
// ENROLLMENT INPUT
// =============================================================================

/// Input for creating a record.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl NewEmployee {
    /// An enrollment with the employee role.
    #[must_use]
    pub fn employee(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role: Role::Employee,
        }
    }

    /// An enrollment with the admin role.
    #[must_use]
    pub fn admin(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            role: Role::Admin,
            ..Self::employee(name, email, password)
        }
    }

    /// Validate field shapes and lengths.
    pub fn validate(&self) -> Result<(), OnboardError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(OnboardError::InvalidInput("name is required".to_string()));
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(OnboardError::InvalidInput(format!(
                "name length {} exceeds maximum {} bytes",
                name.len(),
                MAX_NAME_LENGTH
            )));
        }

        validate_email(&normalize_email(&self.email))?;

        if self.password.is_empty() {
            return Err(OnboardError::InvalidInput(
                "password is required".to_string(),
            ));
        }
        if self.password.len() > MAX_PASSWORD_LENGTH {
            return Err(OnboardError::InvalidInput(format!(
                "password length {} exceeds maximum {} bytes",
                self.password.len(),
                MAX_PASSWORD_LENGTH
            )));
        }
        Ok(())
    }
}

/// Canonical form used for storage and lookup.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Shape check: `local@domain.tld`, no whitespace, bounded length.
pub fn validate_email(email: &str) -> Result<(), OnboardError> {
    let invalid = || OnboardError::InvalidInput(format!("invalid email: {}", email));

    if email.is_empty() || email.len() > MAX_EMAIL_LENGTH {
        return Err(invalid());
    }
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(invalid());
    };
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

// =============================================================================
// ROSTER
// =============================================================================

/// Employee records plus the onboarding rules that govern them.
#[derive(Debug)]
pub struct Roster {
    backend: StorageBackend,
    engine: ProgressEngine,
    aggregator: StatsAggregator,
}

impl Roster {
    /// Create a roster with in-memory storage.
    pub fn new(config: OnboardingConfig) -> Result<Self, OnboardError> {
        Self::with_backend(StorageBackend::default(), config)
    }

    /// Create a roster with persistent redb storage at `path`.
    pub fn with_redb(path: impl AsRef<Path>, config: OnboardingConfig) -> Result<Self, OnboardError> {
        let store = RedbStore::open(path)?;
        Self::with_backend(StorageBackend::Persistent(store), config)
    }

    /// Create a roster over an existing backend.
    pub fn with_backend(
        backend: StorageBackend,
        config: OnboardingConfig,
    ) -> Result<Self, OnboardError> {
        config.validate()?;
        Ok(Self {
            backend,
            engine: ProgressEngine::new(config),
            aggregator: StatsAggregator::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &OnboardingConfig {
        self.engine.config()
    }

    #[must_use]
    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, StorageBackend::Persistent(_))
    }

    // -------------------------------------------------------------------------
    // Records
    // -------------------------------------------------------------------------

    /// Create a record: validate input, hash the password, insert.
    pub fn enroll(&mut self, new: NewEmployee) -> Result<EmployeeRecord, OnboardError> {
        new.validate()?;
        let email = normalize_email(&new.email);

        if self.backend.store().find_by_email(&email)?.is_some() {
            return Err(OnboardError::DuplicateEmail(email));
        }

        let hash = hash_password(&new.password)?;
        let record = EmployeeRecord::new(new.name.trim(), email, hash, new.role);
        record.validate(self.engine.config())?;

        self.backend.store_mut().insert(&record)?;
        Ok(record)
    }

    /// Resolve login credentials to a record.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<EmployeeRecord, OnboardError> {
        let record = self
            .backend
            .store()
            .find_by_email(&normalize_email(email))?
            .ok_or(OnboardError::InvalidCredentials)?;

        if verify_password(password, &record.credential_hash) {
            Ok(record)
        } else {
            Err(OnboardError::InvalidCredentials)
        }
    }

    pub fn get(&self, id: EmployeeId) -> Result<EmployeeRecord, OnboardError> {
        self.backend
            .store()
            .get(id)?
            .ok_or_else(|| OnboardError::EmployeeNotFound(id.to_string()))
    }

    /// All records (admins included), ordered by id.
    pub fn list(&self) -> Result<Vec<EmployeeRecord>, OnboardError> {
        self.backend.store().list()
    }

    /// Delete a record and return it.
    pub fn remove(&mut self, id: EmployeeId) -> Result<EmployeeRecord, OnboardError> {
        self.backend
            .store_mut()
            .remove(id)?
            .ok_or_else(|| OnboardError::EmployeeNotFound(id.to_string()))
    }

    pub fn len(&self) -> Result<usize, OnboardError> {
        self.backend.store().len()
    }

    pub fn is_empty(&self) -> Result<bool, OnboardError> {
        self.backend.store().is_empty()
    }

    // -------------------------------------------------------------------------
    // Progress
    // -------------------------------------------------------------------------

    /// Apply a completion event and persist it.
    ///
    /// One store write when the step is new, none when it was already done.
    pub fn complete_step(
        &mut self,
        id: EmployeeId,
        step: StepId,
    ) -> Result<StepOutcome, OnboardError> {
        let mut record = self.get(id)?;

        let config = *self.engine.config();
        if !config.contains_step(step) {
            return Err(OnboardError::InvalidStep {
                step,
                total: config.total_steps,
            });
        }

        let outcome = self.engine.complete_step(&mut record, step);
        if outcome.changed {
            record.validate(&config)?;
            self.backend.store_mut().update(&record)?;
        }
        Ok(outcome)
    }

    pub fn progress(&self, id: EmployeeId) -> Result<ProgressView, OnboardError> {
        let record = self.get(id)?;
        Ok(self.engine.progress(&record))
    }

    /// Summary for a completed employee. An unknown id has not completed
    /// anything, so it is reported as [`OnboardError::NotCompleted`].
    pub fn completion_summary(&self, id: EmployeeId) -> Result<CompletionSummary, OnboardError> {
        let record = self
            .backend
            .store()
            .get(id)?
            .ok_or(OnboardError::NotCompleted)?;
        self.engine.completion_summary(&record)
    }

    // -------------------------------------------------------------------------
    // Statistics
    // -------------------------------------------------------------------------

    pub fn stats(&self) -> Result<OnboardingStats, OnboardError> {
        let records = self.list()?;
        Ok(self.aggregator.compute(&records))
    }
}

// =============================================================================
// TESTS
// =============================================================================
