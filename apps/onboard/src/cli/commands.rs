//! # CLI Command Implementations

use super::Backend;
use crate::api::{self, EmployeeResponse, ProgressResponse, StatsResponse};
use crate::config::AppConfig;
use onboard_core::{EmployeeId, NewEmployee, OnboardError, OnboardingConfig, Roster, StepId};
use std::path::PathBuf;

/// Where and how to open the roster.
#[derive(Debug, Clone)]
pub struct StoreArgs {
    pub path: PathBuf,
    pub backend: Backend,
    pub onboarding: OnboardingConfig,
}

impl StoreArgs {
    /// Open the roster for this backend.
    pub fn open(&self) -> Result<Roster, OnboardError> {
        match self.backend {
            Backend::Redb => Roster::with_redb(&self.path, self.onboarding),
            Backend::Memory => {
                tracing::warn!("Using the in-memory backend; nothing will be persisted");
                Roster::new(self.onboarding)
            }
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(store: &StoreArgs, config: &AppConfig) -> Result<(), OnboardError> {
    let roster = store.open()?;

    println!("Onboarding Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:       {}", config.server.host);
    println!("  Port:       {}", config.server.port);
    println!("  Backend:    {:?}", store.backend);
    println!("  Database:   {:?}", store.path);
    println!("  Steps:      {}", config.onboarding.total_steps);
    println!("  Employees:  {}", roster.len()?);
    println!();
    println!("Endpoints:");
    println!("  POST   /api/auth/register");
    println!("  POST   /api/auth/login");
    println!("  POST   /api/employee/{{id}}/complete-step");
    println!("  GET    /api/employee/{{id}}/progress");
    println!("  GET    /api/employee/{{id}}/completion-data");
    println!("  GET    /api/admin/stats");
    println!("  GET    /api/admin/employees");
    println!("  POST   /api/admin/employees");
    println!("  DELETE /api/admin/employees/{{id}}");
    println!("  GET    /health");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(config, roster).await
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Create an empty database.
pub fn cmd_init(store: &StoreArgs, force: bool) -> Result<(), OnboardError> {
    if store.backend == Backend::Memory {
        println!("In-memory backend needs no initialization");
        return Ok(());
    }

    if store.path.exists() {
        if !force {
            return Err(OnboardError::InvalidInput(
                "Database already exists. Use --force to overwrite.".to_string(),
            ));
        }
        std::fs::remove_file(&store.path)
            .map_err(|e| OnboardError::IoError(format!("Remove db: {}", e)))?;
    }

    store.open()?;
    println!("Initialized new redb database at {:?}", store.path);
    Ok(())
}

// =============================================================================
// RECORD COMMANDS
// =============================================================================

/// Add a record.
pub fn cmd_enroll(
    store: &StoreArgs,
    json_mode: bool,
    name: String,
    email: String,
    password: String,
    admin: bool,
) -> Result<(), OnboardError> {
    let mut roster = store.open()?;
    let new = if admin {
        NewEmployee::admin(name, email, password)
    } else {
        NewEmployee::employee(name, email, password)
    };
    let record = roster.enroll(new)?;
    tracing::info!(event = "enrolled", employee_id = %record.id, role = %record.role, "Record created");

    if json_mode {
        print_json(&EmployeeResponse::from(&record));
    } else {
        println!("Enrolled {} <{}> as {}", record.name, record.email, record.role);
        println!("Id: {}", record.id);
    }
    Ok(())
}

/// List every record.
pub fn cmd_list(store: &StoreArgs, json_mode: bool) -> Result<(), OnboardError> {
    let roster = store.open()?;
    let employees: Vec<EmployeeResponse> =
        roster.list()?.iter().map(EmployeeResponse::from).collect();

    if json_mode {
        print_json(&employees);
        return Ok(());
    }

    if employees.is_empty() {
        println!("No records");
        return Ok(());
    }

    println!(
        "{:<36}  {:<8}  {:<28}  {:>8}  Status",
        "Id", "Role", "Email", "Progress"
    );
    for e in &employees {
        println!(
            "{:<36}  {:<8}  {:<28}  {:>7}%  {}",
            e.id.to_string(),
            e.role.as_str(),
            e.email,
            e.progress,
            e.status
        );
    }
    Ok(())
}

/// Delete a record.
pub fn cmd_remove(store: &StoreArgs, id: &str) -> Result<(), OnboardError> {
    let id = EmployeeId::parse(id)?;
    let mut roster = store.open()?;
    let removed = roster.remove(id)?;
    tracing::info!(event = "deleted", employee_id = %id, "Record deleted");
    println!("Removed {} <{}>", removed.name, removed.email);
    Ok(())
}

// =============================================================================
// PROGRESS COMMANDS
// =============================================================================

fn print_progress(view: ProgressResponse, total_steps: StepId, json_mode: bool) {
    if json_mode {
        print_json(&view);
        return;
    }
    println!("Progress:     {}%", view.progress);
    println!("Status:       {}", view.status);
    println!("Current step: {} of {}", view.current_step, total_steps);
    println!("Completed:    {:?}", view.completed_steps);
}

/// Show one employee's progress.
pub fn cmd_progress(store: &StoreArgs, json_mode: bool, id: &str) -> Result<(), OnboardError> {
    let id = EmployeeId::parse(id)?;
    let roster = store.open()?;
    let view = roster.progress(id)?;
    print_progress(view.into(), roster.config().total_steps, json_mode);
    Ok(())
}

/// Mark a step as completed.
pub fn cmd_complete(
    store: &StoreArgs,
    json_mode: bool,
    id: &str,
    step: StepId,
) -> Result<(), OnboardError> {
    let id = EmployeeId::parse(id)?;
    let mut roster = store.open()?;
    let outcome = roster.complete_step(id, step)?;
    tracing::info!(
        event = "step_completed",
        employee_id = %id,
        step,
        changed = outcome.changed,
        "Step completion processed"
    );
    if !outcome.changed && !json_mode {
        println!("Step {} was already completed", step);
    }
    print_progress(outcome.view.into(), roster.config().total_steps, json_mode);
    Ok(())
}

// =============================================================================
// STATS COMMAND
// =============================================================================

/// Show population statistics.
pub fn cmd_stats(store: &StoreArgs, json_mode: bool) -> Result<(), OnboardError> {
    let roster = store.open()?;
    let stats = roster.stats()?;

    if json_mode {
        print_json(&StatsResponse::from(stats));
        return Ok(());
    }

    println!("Onboarding Statistics");
    println!("=====================");
    println!("Employees:    {}", stats.total_employees);
    println!("Completed:    {}", stats.completed);
    println!("In progress:  {}", stats.in_progress);
    println!("Not started:  {}", stats.not_started());
    println!("Average:      {}%", stats.average_progress);
    println!();
    println!("Distribution:");
    for (label, count) in stats.distribution.buckets() {
        println!("  {:<8} {}", label, count);
    }
    Ok(())
}
