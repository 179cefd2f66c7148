//! # API Endpoint Handlers
//!
//! Every handler takes the roster lock for the duration of one roster call
//! and maps the outcome through [`ApiError`].

use super::{
    AppState,
    auth::CurrentUser,
    error::ApiError,
    extract::ApiJson,
    types::{
        CompleteStepRequest, CompletionDataResponse, EmployeeResponse, HealthResponse,
        LoginRequest, LoginResponse, MessageResponse, ProgressResponse, RegisterRequest,
        StatsResponse,
    },
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use onboard_core::{EmployeeId, OnboardError};

type ApiResult<T> = Result<(StatusCode, Json<T>), ApiError>;

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// AUTH HANDLERS
// =============================================================================

/// Self-registration. Always creates an employee.
pub async fn register_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> ApiResult<MessageResponse> {
    let record = state
        .roster
        .write()
        .await
        .enroll(request.into_new_employee())?;

    tracing::info!(event = "enrolled", employee_id = %record.id, "Employee registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// Exchange credentials for an access token.
pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let authenticated = state
        .roster
        .read()
        .await
        .authenticate(&request.email, &request.password);

    let record = authenticated.map_err(login_rejection)?;

    let token = state.tokens.issue(&record)?;
    tracing::info!(event = "login", employee_id = %record.id, role = %record.role, "Login succeeded");
    Ok((StatusCode::OK, Json(LoginResponse::new(token, &record))))
}

/// Only a credential mismatch is an auth failure; store errors stay 500s.
fn login_rejection(err: OnboardError) -> ApiError {
    if matches!(err, OnboardError::InvalidCredentials) {
        tracing::warn!(event = "auth_failure", reason = "invalid_credentials", "Login rejected");
    }
    err.into()
}

// =============================================================================
// EMPLOYEE HANDLERS
// =============================================================================

/// Mark a step as completed.
pub async fn complete_step_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<CompleteStepRequest>,
) -> ApiResult<ProgressResponse> {
    let id = EmployeeId::parse(&id)?;
    let outcome = state
        .roster
        .write()
        .await
        .complete_step(id, request.step_id)?;

    tracing::info!(
        event = "step_completed",
        employee_id = %id,
        caller = %user.id,
        step = request.step_id,
        changed = outcome.changed,
        progress = outcome.view.progress,
        "Step completion processed"
    );
    Ok((StatusCode::OK, Json(outcome.view.into())))
}

/// Current progress of an employee.
pub async fn progress_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ProgressResponse> {
    let id = EmployeeId::parse(&id)?;
    let view = state.roster.read().await.progress(id)?;
    Ok((StatusCode::OK, Json(view.into())))
}

/// Completion summary; 400 until every step is done, unknown ids included.
pub async fn completion_data_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<CompletionDataResponse> {
    let id = EmployeeId::parse(&id).map_err(|_| OnboardError::NotCompleted)?;
    let summary = state.roster.read().await.completion_summary(id)?;
    Ok((StatusCode::OK, Json(summary.into())))
}

// =============================================================================
// ADMIN HANDLERS
// =============================================================================

/// Population statistics.
pub async fn stats_handler(State(state): State<AppState>) -> ApiResult<StatsResponse> {
    let stats = state.roster.read().await.stats()?;
    Ok((StatusCode::OK, Json(stats.into())))
}

/// Every record, without credentials.
pub async fn list_employees_handler(
    State(state): State<AppState>,
) -> ApiResult<Vec<EmployeeResponse>> {
    let records = state.roster.read().await.list()?;
    let employees = records.iter().map(EmployeeResponse::from).collect();
    Ok((StatusCode::OK, Json(employees)))
}

/// Create an employee on behalf of an administrator.
pub async fn add_employee_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> ApiResult<EmployeeResponse> {
    let record = state
        .roster
        .write()
        .await
        .enroll(request.into_new_employee())?;

    tracing::info!(
        event = "enrolled",
        employee_id = %record.id,
        admin = %user.id,
        "Employee added by admin"
    );
    Ok((StatusCode::CREATED, Json(EmployeeResponse::from(&record))))
}

/// Delete a record.
pub async fn delete_employee_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    let id = EmployeeId::parse(&id)?;
    state.roster.write().await.remove(id)?;

    tracing::info!(event = "deleted", employee_id = %id, admin = %user.id, "Employee deleted");
    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("Employee deleted successfully")),
    ))
}
