//! # Onboarding Primitives
//!
//! Runtime constants for the onboarding core.
//!
//! The step count itself is NOT a constant here: it travels in
//! [`OnboardingConfig`](crate::OnboardingConfig). Only its default lives in
//! this module.

use crate::StepId;

/// Default number of onboarding steps in the catalog.
pub const DEFAULT_TOTAL_STEPS: StepId = 6;

/// Upper bound accepted for a configured step count.
pub const MAX_TOTAL_STEPS: StepId = 100;

/// The step every new record points at.
pub const INITIAL_STEP: StepId = 1;

/// Fixed "time spent" label returned with the completion summary.
///
/// Elapsed time is not tracked; this is a placeholder value.
pub const PLACEHOLDER_TIME_SPENT: &str = "2 hours";

/// Achievement label returned with the completion summary.
pub const ACHIEVEMENT_LABEL: &str = "Onboarding Champion!";

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length of a display name, in bytes.
pub const MAX_NAME_LENGTH: usize = 128;

/// Maximum length of an email address, in bytes (RFC 5321 path limit).
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length of a plaintext password, in bytes.
///
/// Hashing cost grows with input length; this caps it.
pub const MAX_PASSWORD_LENGTH: usize = 1024;

// =============================================================================
// RECORD FORMAT
// =============================================================================

/// Magic bytes prefixed to every stored record.
pub const MAGIC_BYTES: &[u8; 4] = b"ONBD";

/// Current record format version.
///
/// Increment this when making breaking changes to `EmployeeRecord`.
pub const FORMAT_VERSION: u8 = 1;
