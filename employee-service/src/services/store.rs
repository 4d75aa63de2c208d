use crate::models::Employee;
use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use service_core::error::AppError;

/// Which records a [`EmployeeStore::find`] call should return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeFilter {
    All,
    /// Exact match on the caller-supplied `id` field.
    ById(String),
}

impl EmployeeFilter {
    pub fn matches(&self, employee: &Employee) -> bool {
        match self {
            EmployeeFilter::All => true,
            EmployeeFilter::ById(id) => employee.id == *id,
        }
    }

    pub fn to_document(&self) -> Document {
        match self {
            EmployeeFilter::All => doc! {},
            EmployeeFilter::ById(id) => doc! { "id": id.as_str() },
        }
    }
}

/// Document collection holding employee records.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn find(&self, filter: EmployeeFilter) -> Result<Vec<Employee>, AppError>;

    async fn insert(&self, employees: &[Employee]) -> Result<(), AppError>;

    /// Deletes every record and returns how many were removed.
    async fn remove_all(&self) -> Result<u64, AppError>;

    async fn count(&self) -> Result<u64, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
