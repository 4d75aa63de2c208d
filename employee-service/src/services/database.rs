use crate::config::MongoConfig;
use crate::models::Employee;
use crate::services::store::{EmployeeFilter, EmployeeStore};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{bson::doc, options::ClientOptions, Client as MongoClient, Collection, Database};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoEmployeeStore {
    client: MongoClient,
    db: Database,
    employees: Collection<Employee>,
}

impl MongoEmployeeStore {
    pub async fn connect(config: &MongoConfig) -> Result<Self, AppError> {
        tracing::info!(uri = %config.uri, "Connecting to MongoDB");
        let mut client_options = ClientOptions::parse(&config.uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::from(e)
        })?;
        client_options.app_name = Some("employee-service".to_string());

        let client = MongoClient::with_options(client_options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(&config.database);
        let employees = db.collection(&config.collection);
        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "Using MongoDB employee collection"
        );

        Ok(Self {
            client,
            db,
            employees,
        })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl EmployeeStore for MongoEmployeeStore {
    async fn find(&self, filter: EmployeeFilter) -> Result<Vec<Employee>, AppError> {
        let cursor = self
            .employees
            .find(filter.to_document(), None)
            .await
            .map_err(|e| {
                tracing::error!(filter = ?filter, "Error looking up employees: {}", e);
                AppError::from(e)
            })?;

        let employees: Vec<Employee> = cursor.try_collect().await.map_err(AppError::from)?;
        Ok(employees)
    }

    async fn insert(&self, employees: &[Employee]) -> Result<(), AppError> {
        // insert_many rejects an empty batch
        if employees.is_empty() {
            return Ok(());
        }

        self.employees
            .insert_many(employees, None)
            .await
            .map_err(|e| {
                tracing::error!(count = employees.len(), "Failed to insert employees: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn remove_all(&self) -> Result<u64, AppError> {
        let result = self
            .employees
            .delete_many(doc! {}, None)
            .await
            .map_err(AppError::from)?;
        Ok(result.deleted_count)
    }

    async fn count(&self) -> Result<u64, AppError> {
        self.employees
            .count_documents(doc! {}, None)
            .await
            .map_err(AppError::from)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
