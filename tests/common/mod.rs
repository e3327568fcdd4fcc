#![allow(dead_code)] // Each test binary only uses a subset of these helpers.

use std::sync::Arc;
use axum::Router;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use civitas::api;
use civitas::db::memory::MemoryDatastore;
use civitas::utils::config::Configuration;
use civitas::utils::context::ServiceContext;

///
/// Start the service with an empty in-memory datastore and return a harness to
/// drive it over HTTP.
///
/// Every test gets its own instance, so tests cannot see each other's data and are
/// free to run in parallel.
///
pub fn start_civitas() -> TestApp {
    let config = Configuration {
        address: String::from("127.0.0.1:0"),
        db_name: String::from("Civitas_Tests"),
        mongo_uri: String::default(),
        distributed_tracing: false,
        jaeger_endpoint: None,
    };

    let ctx = Arc::new(ServiceContext::new(config, Arc::new(MemoryDatastore::new())));

    TestApp { app: api::router(ctx) }
}

///
/// Drives the service router without binding a socket. Every method returns the
/// response status and the body parsed as JSON (Value::Null when there was no body).
///
pub struct TestApp {
    app: Router,
}

impl TestApp {
    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, path, None).await
    }

    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("Unable to build a test request"),
            None => Request::builder()
                .method(method)
                .uri(path)
                .body(Body::empty())
                .expect("Unable to build a test request"),
        };

        let response = self.app.clone()
            .oneshot(request)
            .await
            .expect("The router failed to handle a test request");

        let status = response.status();

        let bytes = response.into_body()
            .collect()
            .await
            .expect("Unable to read a test response body")
            .to_bytes();

        let body = match bytes.is_empty() {
            true => Value::Null,
            false => serde_json::from_slice(&bytes).expect("The test response body was not JSON"),
        };

        (status, body)
    }
}

///
/// A citizen payload that passes every creation rule - tests tweak fields from here.
///
pub fn new_citizen(run: i64, telefono: i64, correo: &str) -> Value {
    json!({
        "run": run,
        "dv": "5",
        "nombre": "Maria",
        "aPaterno": "Perez",
        "aMaterno": "Soto",
        "fechaRegistro": "2024-05-01T12:00:00Z",
        "telefono": telefono,
        "credencial": new_credential(correo)
    })
}

///
/// A credential payload that passes every creation rule.
///
pub fn new_credential(correo: &str) -> Value {
    json!({
        "correo": correo,
        "contrasenia": "secret-1",
        "intentosFallidos": 0,
        "activo": true
    })
}
