use crate::models::Employee;
use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use service_core::error::AppError;

/// Employee record decoded from the raw request body.
///
/// Any `Content-Type` is accepted. The body must be a single JSON object;
/// absent or `null` fields become empty strings. Anything else is rejected
/// with 400 and the handler never runs.
#[derive(Debug, Clone)]
pub struct EmployeeBody(pub Employee);

#[async_trait]
impl<S> FromRequest<S> for EmployeeBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::warn!("Failed to read request body: {}", e);
            AppError::BadRequest(anyhow::anyhow!("Error reading body: {}", e))
        })?;

        let value: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!("Failed to parse request body: {}", e);
            AppError::BadRequest(anyhow::anyhow!("Error parsing json: {}", e))
        })?;

        // Structs also deserialize from arrays; only an object is a record.
        if !value.is_object() {
            tracing::warn!("Request body is not a JSON object");
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Error parsing json: expected an object"
            )));
        }

        let employee: Employee = serde_json::from_value(value).map_err(|e| {
            tracing::warn!("Failed to decode employee: {}", e);
            AppError::BadRequest(anyhow::anyhow!("Error parsing json: {}", e))
        })?;

        tracing::debug!(
            employee_id = %employee.id,
            first_name = %employee.first_name,
            "Decoded employee"
        );

        Ok(EmployeeBody(employee))
    }
}
