//! # onboard-core
//!
//! The onboarding engine - THE LOGIC.
//!
//! This crate owns every rule about how an employee moves through the
//! onboarding catalog:
//! - `progress`: the step-completion state machine
//! - `stats`: population statistics for administrators
//! - `storage`: the employee record store (in-memory and redb)
//! - `roster`: the service facade combining the three
//!
//! ## Architectural Constraints
//!
//! - No async, no network dependencies
//! - Integer arithmetic only (percentages are rounded half-up)
//! - No logging; callers trace what they need
//! - The step count is configuration, injected via [`OnboardingConfig`]

// =============================================================================
// MODULES
// =============================================================================

pub mod config;
pub mod credentials;
pub mod formats;
pub mod primitives;
pub mod progress;
pub mod roster;
pub mod stats;
pub mod storage;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{EmployeeId, EmployeeRecord, OnboardError, Role, Status, StepId};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use config::{AdvancePolicy, OnboardingConfig};
pub use credentials::{hash_password, verify_password};
pub use progress::{CompletionSummary, ProgressEngine, ProgressView, StepOutcome, percent};
pub use roster::{NewEmployee, Roster, StorageBackend, normalize_email, validate_email};
pub use stats::{OnboardingStats, ProgressDistribution, StatsAggregator};
pub use storage::{EmployeeStore, MemoryStore, RedbStore};

// =============================================================================
// RE-EXPORTS: Formats
// =============================================================================

pub use formats::{RecordHeader, record_from_bytes, record_to_bytes};
