//! Tests for the contact CRUD endpoints.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

use contactos::http::{router, AppState};
use contactos::notify::{Mailer, Notification, NotifyError};
use contactos::store::{ContactDraft, ContactStore};

/// Test mailer that records every notification instead of sending it.
#[derive(Debug, Default)]
struct RecordingMailer {
    sent: Mutex<Vec<Notification>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .expect("mailer mutex poisoned")
            .push(notification.clone());
        Ok(())
    }
}

async fn setup() -> (Router, ContactStore, Arc<RecordingMailer>) {
    let opts = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opts)
        .await
        .expect("pool should connect");

    let store = ContactStore::new(pool);
    store.migrate().await.expect("schema should apply");

    let mailer = Arc::new(RecordingMailer::default());
    let app = router(AppState {
        store: store.clone(),
        mailer: Arc::clone(&mailer) as Arc<dyn Mailer>,
    });
    (app, store, mailer)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes()
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("body should be json")
}

fn draft(name: &str, email: &str, phone: &str) -> ContactDraft {
    ContactDraft {
        name: name.to_owned(),
        email: email.to_owned(),
        phone: phone.to_owned(),
    }
}

#[tokio::test]
async fn save_valid_contact_returns_ok_and_notifies() {
    let (app, store, mailer) = setup().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/contacts",
            json!({ "name": "Ana", "email": "ana@x.com", "phone": "555" }),
        ))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"ok");

    // Persisted with an assigned id.
    let listed = store.list().await.expect("list should succeed");
    assert_eq!(listed.len(), 1);
    assert!(listed[0].id > 0);
    assert_eq!(listed[0].email, "ana@x.com");

    // The welcome mail is dispatched on a detached task.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    let sent = mailer.sent.lock().expect("mailer mutex poisoned");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ana@x.com");
    assert!(sent[0].html_body.contains("Ana"));
}

#[tokio::test]
async fn save_with_empty_fields_is_rejected_before_the_store() {
    let (app, store, mailer) = setup().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/contacts",
            json!({ "name": "", "email": "", "phone": "" }),
        ))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "validation failed");
    assert_eq!(body["fields"].as_array().map(Vec::len), Some(3));

    // Nothing persisted, nothing mailed.
    assert_eq!(store.count().await.expect("count should succeed"), 0);
    assert!(mailer.sent.lock().expect("mailer mutex poisoned").is_empty());
}

#[tokio::test]
async fn save_with_malformed_email_is_rejected() {
    let (app, store, _mailer) = setup().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/contacts",
            json!({ "name": "Ana", "email": "not-an-address", "phone": "555" }),
        ))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["fields"][0]["field"], "email");
    assert_eq!(store.count().await.expect("count should succeed"), 0);
}

#[tokio::test]
async fn list_returns_newest_first() {
    let (app, store, _mailer) = setup().await;

    store
        .create(draft("Ana", "ana@x.com", "555"))
        .await
        .expect("create should succeed");
    store
        .create(draft("Ben", "ben@x.com", "666"))
        .await
        .expect("create should succeed");

    let response = app
        .oneshot(empty_request("GET", "/api/contacts"))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let names: Vec<&str> = body
        .as_array()
        .expect("body should be an array")
        .iter()
        .map(|c| c["name"].as_str().expect("name should be a string"))
        .collect();
    assert_eq!(names, vec!["Ben", "Ana"]);
}

#[tokio::test]
async fn edit_updates_the_record_and_list_reflects_it() {
    let (app, store, _mailer) = setup().await;

    let created = store
        .create(draft("Ana", "ana@x.com", "555"))
        .await
        .expect("create should succeed");

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/contacts",
            json!({
                "id": created.id,
                "name": "Ana",
                "email": "ana@x.com",
                "phone": "777"
            }),
        ))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"ok");

    let listed = store.list().await.expect("list should succeed");
    assert_eq!(listed[0].phone, "777");
}

#[tokio::test]
async fn edit_of_missing_id_returns_not_found() {
    let (app, _store, _mailer) = setup().await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/contacts",
            json!({ "id": 99, "name": "Ghost", "email": "ghost@x.com", "phone": "000" }),
        ))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "contact 99 not found");
}

#[tokio::test]
async fn delete_removes_the_contact() {
    let (app, store, _mailer) = setup().await;

    let created = store
        .create(draft("Ana", "ana@x.com", "555"))
        .await
        .expect("create should succeed");

    let response = app
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/contacts/{}", created.id),
        ))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"ok");
    assert_eq!(store.count().await.expect("count should succeed"), 0);
}

#[tokio::test]
async fn delete_of_missing_id_returns_not_found() {
    let (app, _store, _mailer) = setup().await;

    let response = app
        .oneshot(empty_request("DELETE", "/api/contacts/42"))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "contact 42 not found");
}
