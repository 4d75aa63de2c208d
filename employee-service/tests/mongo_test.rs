//! Tests against a real MongoDB. Run with `cargo test -- --ignored`.

mod common;

use common::TestApp;
use employee_service::config::{EmployeeConfig, StoreBackend};
use employee_service::models::Employee;
use employee_service::services::{
    sample_employees, seed_employees, EmployeeFilter, EmployeeStore, MongoEmployeeStore,
};
use mongodb::bson::{doc, Document};
use reqwest::Client;
use uuid::Uuid;

fn mongo_config() -> EmployeeConfig {
    let mut config = EmployeeConfig::in_memory();
    config.common.port = 0;
    config.store.backend = StoreBackend::MongoDb;
    config.mongodb.uri =
        std::env::var("TEST_MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".into());
    config.mongodb.database = format!("employee_test_{}", Uuid::new_v4());
    config
}

async fn drop_database(config: &EmployeeConfig) {
    if let Ok(store) = MongoEmployeeStore::connect(&config.mongodb).await {
        let _ = store.database().drop(None).await;
    }
}

#[tokio::test]
#[ignore = "Requires MongoDB on localhost:27017"]
async fn seed_replaces_collection_contents() {
    let config = mongo_config();
    let store = MongoEmployeeStore::connect(&config.mongodb)
        .await
        .expect("Failed to connect to MongoDB");

    store
        .insert(&[Employee::new("1", "Old", "Record", "000")])
        .await
        .unwrap();

    let count = seed_employees(&store).await.unwrap();
    assert_eq!(count, 5);

    let mut stored = store.find(EmployeeFilter::All).await.unwrap();
    let mut expected = sample_employees();
    stored.sort_by(|a, b| a.id.cmp(&b.id));
    expected.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(stored, expected);

    drop_database(&config).await;
}

#[tokio::test]
#[ignore = "Requires MongoDB on localhost:27017"]
async fn http_round_trip_against_mongodb() {
    let config = mongo_config();
    let app = TestApp::spawn_with_config(config.clone()).await;
    let client = Client::new();

    let matt: serde_json::Value = client
        .get(format!("{}/employee/345", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(matt[0]["firstName"], "Matt");
    assert!(matt[0].get("_id").is_none());

    let response = client
        .post(format!("{}/employee", app.address))
        .body(r#"{"id":"42","firstName":"Ada","lastName":"Lovelace","phone":"1"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.text().await.unwrap(), "POST");

    let response = client
        .post(format!("{}/employee", app.address))
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let all: serde_json::Value = client
        .get(format!("{}/employees", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.as_array().unwrap().len(), 6);
    assert_eq!(app.store.count().await.unwrap(), 6);

    drop_database(&config).await;
}

#[tokio::test]
#[ignore = "Requires MongoDB on localhost:27017"]
async fn documents_missing_fields_do_not_break_listing() {
    let config = mongo_config();
    let app = TestApp::spawn_with_config(config.clone()).await;
    let store = MongoEmployeeStore::connect(&config.mongodb)
        .await
        .expect("Failed to connect to MongoDB");

    store
        .database()
        .collection::<Document>(&config.mongodb.collection)
        .insert_one(doc! { "id": "x" }, None)
        .await
        .expect("Failed to insert raw document");

    let client = Client::new();
    let response = client
        .get(format!("{}/employees", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let all: serde_json::Value = response.json().await.unwrap();
    assert_eq!(all.as_array().unwrap().len(), 6);

    let partial: serde_json::Value = client
        .get(format!("{}/employee/x", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        partial,
        serde_json::json!([{ "id": "x", "firstName": "", "lastName": "", "phone": "" }])
    );

    drop_database(&config).await;
}
