use crate::middleware::EmployeeBody;
use crate::models::Employee;
use crate::services::EmployeeFilter;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use metrics::counter;
use service_core::error::AppError;

pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<Employee>>, AppError> {
    let employees = state.store.find(EmployeeFilter::All).await?;

    tracing::info!(count = employees.len(), "Listed employees");

    Ok(Json(employees))
}

/// Always an array: ids are not unique, so zero or several records may match.
pub async fn get_employee(
    State(state): State<AppState>,
    Path(emp_id): Path<String>,
) -> Result<Json<Vec<Employee>>, AppError> {
    let employees = state
        .store
        .find(EmployeeFilter::ById(emp_id.clone()))
        .await?;

    tracing::info!(employee_id = %emp_id, count = employees.len(), "Fetched employee");

    Ok(Json(employees))
}

pub async fn create_employee(
    State(state): State<AppState>,
    EmployeeBody(employee): EmployeeBody,
) -> Result<(StatusCode, &'static str), AppError> {
    tracing::info!(
        employee_id = %employee.id,
        first_name = %employee.first_name,
        "Creating employee"
    );

    state.store.insert(std::slice::from_ref(&employee)).await?;
    counter!("employees_created_total").increment(1);

    Ok((StatusCode::OK, "POST"))
}

// Updates are not implemented yet; the store is left untouched.
pub async fn update_employee(Path(emp_id): Path<String>) -> (StatusCode, &'static str) {
    tracing::debug!(employee_id = %emp_id, "Ignoring employee update");
    (StatusCode::OK, "PUT")
}
