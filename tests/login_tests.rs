mod common;

use axum::http::StatusCode;
use serde_json::json;
use common::{new_credential, start_civitas};

#[tokio::test]
async fn test_login_with_an_unknown_correo_is_unauthorized() {
    let app = start_civitas();

    let (status, body) = app.post("/credentials/login", json!({
        "correo": "ghost@example.com",
        "contrasenia": "whatever"
    })).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_with_the_correct_contrasenia_succeeds() {
    let app = start_civitas();

    let (_, created) = app.post("/credentials", new_credential("ana@example.com")).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = app.post("/credentials/login", json!({
        "correo": "ana@example.com",
        "contrasenia": "secret-1"
    })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");

    let (_, body) = app.get(&format!("/credentials/{}", id)).await;
    assert_eq!(body["intentosFallidos"], 0);
}

#[tokio::test]
async fn test_each_failed_login_bumps_the_counter_by_one() {
    let app = start_civitas();

    let (_, created) = app.post("/credentials", new_credential("ana@example.com")).await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = app.post("/credentials/login", json!({
        "correo": "ana@example.com",
        "contrasenia": "wrong"
    })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = app.get(&format!("/credentials/{}", id)).await;
    assert_eq!(body["intentosFallidos"], 1);

    let (status, _) = app.post("/credentials/login", json!({
        "correo": "ana@example.com",
        "contrasenia": "wrong again"
    })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = app.get(&format!("/credentials/{}", id)).await;
    assert_eq!(body["intentosFallidos"], 2);
}

#[tokio::test]
async fn test_a_failed_then_successful_login_keeps_the_counter() {
    let app = start_civitas();

    let (status, created) = app.post("/credentials", json!({
        "correo": "a@b.com",
        "contrasenia": "pw1",
        "activo": true
    })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["intentosFallidos"], 0);
    let id = created["id"].as_str().unwrap();

    let (status, _) = app.post("/credentials/login", json!({
        "correo": "a@b.com",
        "contrasenia": "bad"
    })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = app.get(&format!("/credentials/{}", id)).await;
    assert_eq!(body["intentosFallidos"], 1);

    let (status, body) = app.post("/credentials/login", json!({
        "correo": "a@b.com",
        "contrasenia": "pw1"
    })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");

    // A successful login does not reset the counter.
    let (_, body) = app.get(&format!("/credentials/{}", id)).await;
    assert_eq!(body["intentosFallidos"], 1);
}

#[tokio::test]
async fn test_an_unknown_correo_has_no_side_effects() {
    let app = start_civitas();

    let (_, created) = app.post("/credentials", new_credential("ana@example.com")).await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = app.post("/credentials/login", json!({
        "correo": "ghost@example.com",
        "contrasenia": "secret-1"
    })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = app.get(&format!("/credentials/{}", id)).await;
    assert_eq!(body["intentosFallidos"], 0);
}
