#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use employee_service::config::EmployeeConfig;
use employee_service::services::{seed_employees, EmployeeStore, InMemoryEmployeeStore};
use employee_service::startup::{build_router, AppState, Application};
use std::sync::Arc;

/// A server bound to a random local port, backed by an in-memory store.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<dyn EmployeeStore>,
}

impl TestApp {
    /// Development mode, so the store starts with the five sample employees.
    pub async fn spawn() -> Self {
        let mut config = EmployeeConfig::in_memory();
        config.common.port = 0; // Random port for testing

        Self::spawn_with_config(config).await
    }

    pub async fn spawn_with_config(config: EmployeeConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let store = app.store();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            store,
        }
    }
}

/// Router over a freshly seeded in-memory store, for `oneshot` tests.
pub async fn seeded_router() -> (Router, Arc<dyn EmployeeStore>) {
    let store: Arc<dyn EmployeeStore> = Arc::new(InMemoryEmployeeStore::new());
    seed_employees(store.as_ref())
        .await
        .expect("Failed to seed store");
    (router_with_store(store.clone()), store)
}

pub fn router_with_store(store: Arc<dyn EmployeeStore>) -> Router {
    build_router(AppState {
        config: EmployeeConfig::in_memory(),
        store,
    })
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn with_body(method: &str, uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).expect("Body is not JSON")
}
