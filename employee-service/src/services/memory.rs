use crate::models::Employee;
use crate::services::store::{EmployeeFilter, EmployeeStore};
use async_trait::async_trait;
use service_core::error::AppError;
use std::sync::{Mutex, MutexGuard};

/// Process-local store, used when `STORE_BACKEND=memory` and in tests.
#[derive(Default)]
pub struct InMemoryEmployeeStore {
    employees: Mutex<Vec<Employee>>,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_employees(employees: Vec<Employee>) -> Self {
        Self {
            employees: Mutex::new(employees),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Employee>>, AppError> {
        self.employees.lock().map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("Employee store mutex poisoned: {}", e))
        })
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn find(&self, filter: EmployeeFilter) -> Result<Vec<Employee>, AppError> {
        Ok(self
            .lock()?
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }

    async fn insert(&self, employees: &[Employee]) -> Result<(), AppError> {
        self.lock()?.extend_from_slice(employees);
        Ok(())
    }

    async fn remove_all(&self) -> Result<u64, AppError> {
        let mut employees = self.lock()?;
        let removed = employees.len() as u64;
        employees.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.lock()?.len() as u64)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
