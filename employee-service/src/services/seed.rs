//! Development seed data.

use crate::models::Employee;
use crate::services::store::EmployeeStore;
use metrics::counter;
use service_core::error::AppError;

/// The fixed sample set written by [`seed_employees`].
pub fn sample_employees() -> Vec<Employee> {
    vec![
        Employee::new("123", "Ale", "Smith", "801 555-5555"),
        Employee::new("345", "Matt", "Williams", "801 555-5554"),
        Employee::new("782", "Ange", "Cooks", "801 555-5553"),
        Employee::new("998", "Paul", "Escobar", "801 555-5552"),
        Employee::new("672", "Tim", "McDonough", "801 555-5551"),
    ]
}

/// Replaces the whole collection with [`sample_employees`].
///
/// Any store error is returned unchanged; callers treat it as fatal.
/// Returns the record count observed after the insert.
pub async fn seed_employees(store: &dyn EmployeeStore) -> Result<u64, AppError> {
    tracing::info!("Bootstrapping the employee collection");

    let removed = store.remove_all().await.map_err(|e| {
        tracing::error!("Failed to clear employee collection: {}", e);
        e
    })?;

    let employees = sample_employees();
    store.insert(&employees).await.map_err(|e| {
        tracing::error!("Failed to insert sample employees: {}", e);
        e
    })?;
    counter!("employees_seeded_total").increment(employees.len() as u64);

    let count = store.count().await.map_err(|e| {
        tracing::error!("Failed to count employees after seeding: {}", e);
        e
    })?;

    tracing::info!(removed, count, "# of Employees: {}", count);
    Ok(count)
}
