#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use mflix_api::database::InMemoryStore;
use mflix_api::{routes, AppState};
use serde_json::Value;
use tower::ServiceExt;

/// A well-formed id that no seeded document uses
pub const ABSENT_ID: &str = "000000000000000000000000";

pub const MALFORMED_IDS: &[&str] = &[
    "null",
    "12345",
    "573a1390f29313caabcd413",
    "573a1390f29313caabcd41355",
    "573a1390f29313caabcd413z",
];

/// Router over a fresh in-memory store
pub struct TestApp {
    pub store: InMemoryStore,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_limit(10)
    }

    pub fn with_limit(list_limit: i64) -> Self {
        let store = InMemoryStore::new();
        let state = AppState::new(Arc::new(store.clone()), list_limit);
        Self {
            store,
            router: routes(state),
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .with_context(|| format!("non-JSON body: {}", String::from_utf8_lossy(&bytes)))?
        };
        Ok((status, body))
    }

    pub async fn get(&self, uri: &str) -> Result<(StatusCode, Value)> {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str) -> Result<(StatusCode, Value)> {
        self.request(Method::POST, uri, None).await
    }

    pub async fn put(&self, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
        self.request(Method::PUT, uri, body).await
    }

    pub async fn delete(&self, uri: &str) -> Result<(StatusCode, Value)> {
        self.request(Method::DELETE, uri, None).await
    }
}

/// Envelope status must agree with the transport status
pub fn assert_envelope(status: StatusCode, body: &Value, expected: u16) {
    assert_eq!(status.as_u16(), expected, "unexpected HTTP status, body: {}", body);
    assert_eq!(
        body.get("status").and_then(Value::as_u64),
        Some(u64::from(expected)),
        "envelope status mismatch: {}",
        body
    );
}

pub fn inserted_id(body: &Value) -> String {
    body["data"]["insertedId"]
        .as_str()
        .unwrap_or_else(|| panic!("missing insertedId: {}", body))
        .to_string()
}
