pub mod database;
pub mod memory;
pub mod metrics;
pub mod seed;
pub mod store;

pub use database::MongoEmployeeStore;
pub use memory::InMemoryEmployeeStore;
pub use metrics::{get_metrics, init_metrics};
pub use seed::{sample_employees, seed_employees};
pub use store::{EmployeeFilter, EmployeeStore};
