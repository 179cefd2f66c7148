//! # API Request/Response Types
//!
//! JSON structures for the HTTP API. Field names are camelCase, except the
//! role, which travels as `type`, and the record id in admin listings, `_id`.
//!
//! No response type carries the credential hash.

use chrono::{DateTime, Utc};
use onboard_core::{
    CompletionSummary, EmployeeId, EmployeeRecord, NewEmployee, OnboardingStats,
    ProgressDistribution, ProgressView, Role, Status, StepId,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// GENERIC RESPONSES
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// `{"message": ...}` body used for confirmations and errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// =============================================================================
// AUTH
// =============================================================================

/// Registration and admin-create body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Always an employee; admins are enrolled from the CLI.
    pub fn into_new_employee(self) -> NewEmployee {
        NewEmployee::employee(self.name, self.email, self.password)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Identity returned alongside a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: EmployeeId,
    pub name: String,
    #[serde(rename = "type")]
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}

impl LoginResponse {
    pub fn new(token: String, record: &EmployeeRecord) -> Self {
        Self {
            token,
            user: UserSummary {
                id: record.id,
                name: record.name.clone(),
                role: record.role,
            },
        }
    }
}

// =============================================================================
// PROGRESS
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteStepRequest {
    pub step_id: StepId,
}

/// Progress of one employee, returned by both complete-step and progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub progress: u8,
    pub current_step: StepId,
    pub completed_steps: Vec<StepId>,
    pub status: Status,
}

impl From<ProgressView> for ProgressResponse {
    fn from(view: ProgressView) -> Self {
        Self {
            progress: view.progress,
            current_step: view.current_step,
            completed_steps: view.completed_steps,
            status: view.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionDataResponse {
    pub total_steps: StepId,
    pub time_spent: String,
    pub achievement: String,
}

impl From<CompletionSummary> for CompletionDataResponse {
    fn from(summary: CompletionSummary) -> Self {
        Self {
            total_steps: summary.total_steps,
            time_spent: summary.time_spent,
            achievement: summary.achievement,
        }
    }
}

// =============================================================================
// ADMIN
// =============================================================================

/// Bucket counts keyed by their range label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DistributionJson {
    #[serde(rename = "0-25%")]
    pub quarter: usize,
    #[serde(rename = "26-50%")]
    pub half: usize,
    #[serde(rename = "51-75%")]
    pub three_quarters: usize,
    #[serde(rename = "76-100%")]
    pub full: usize,
}

impl From<ProgressDistribution> for DistributionJson {
    fn from(d: ProgressDistribution) -> Self {
        Self {
            quarter: d.quarter,
            half: d.half,
            three_quarters: d.three_quarters,
            full: d.full,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_employees: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub average_progress: u8,
    pub progress_distribution: DistributionJson,
}

impl From<OnboardingStats> for StatsResponse {
    fn from(stats: OnboardingStats) -> Self {
        Self {
            total_employees: stats.total_employees,
            completed: stats.completed,
            in_progress: stats.in_progress,
            average_progress: stats.average_progress,
            progress_distribution: stats.distribution.into(),
        }
    }
}

/// A record as shown to administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    #[serde(rename = "_id")]
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub role: Role,
    pub start_date: DateTime<Utc>,
    pub progress: u8,
    pub current_step: StepId,
    pub completed_steps: Vec<StepId>,
    pub status: Status,
}

impl From<&EmployeeRecord> for EmployeeResponse {
    fn from(record: &EmployeeRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            email: record.email.clone(),
            role: record.role,
            start_date: record.start_date,
            progress: record.progress,
            current_step: record.current_step,
            completed_steps: record.completed_steps.iter().copied().collect(),
            status: record.status,
        }
    }
}
