mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};
use common::{new_citizen, new_credential, start_civitas};

#[tokio::test]
async fn test_create_credential_returns_the_stored_record() {
    let app = start_civitas();

    let (status, body) = app.post("/credentials", new_credential("ana@example.com")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["correo"], "ana@example.com");
    assert_eq!(body["contrasenia"], "secret-1");
    assert_eq!(body["intentosFallidos"], 0);
    assert_eq!(body["activo"], true);
    assert!(!body["id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_credential_defaults_the_counter_and_the_active_flag() {
    let app = start_civitas();

    let (status, body) = app.post("/credentials", json!({
        "correo": "bare@example.com",
        "contrasenia": "pw1"
    })).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["intentosFallidos"], 0);
    assert_eq!(body["activo"], false);
}

#[tokio::test]
async fn test_create_credential_with_negative_intentos_fallidos_is_rejected() {
    let app = start_civitas();

    let mut payload = new_credential("ana@example.com");
    payload["intentosFallidos"] = json!(-3);

    let (status, body) = app.post("/credentials", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2000 /* IntentosFallidosNegative */);
}

#[tokio::test]
async fn test_create_credential_without_contrasenia_is_rejected() {
    let app = start_civitas();

    let mut payload = new_credential("ana@example.com");
    payload.as_object_mut().unwrap().remove("contrasenia");

    let (status, body) = app.post("/credentials", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2001 /* ContraseniaMandatory */);
}

#[tokio::test]
async fn test_create_credential_with_a_17_character_contrasenia_is_rejected() {
    let app = start_civitas();

    let mut payload = new_credential("ana@example.com");
    payload["contrasenia"] = json!("p".repeat(17));

    let (status, body) = app.post("/credentials", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2002 /* ContraseniaTooLong */);
}

#[tokio::test]
async fn test_create_credential_without_correo_is_rejected() {
    let app = start_civitas();

    let mut payload = new_credential("ana@example.com");
    payload.as_object_mut().unwrap().remove("correo");

    let (status, body) = app.post("/credentials", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2003 /* CorreoMandatory */);
}

#[tokio::test]
async fn test_create_credential_with_an_81_character_correo_is_rejected() {
    let app = start_civitas();

    // 69 + "@example.com" makes 81 characters.
    let (status, body) = app.post("/credentials", new_credential(&format!("{}@example.com", "a".repeat(69)))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2004 /* CorreoTooLong */);
}

#[tokio::test]
async fn test_create_credential_with_a_taken_correo_is_a_conflict() {
    let app = start_civitas();

    app.post("/credentials", new_credential("shared@example.com")).await;

    let (status, body) = app.post("/credentials", new_credential("shared@example.com")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 2006 /* CorreoAlreadyInUse */);
}

#[tokio::test]
async fn test_list_credentials_is_no_content_when_empty() {
    let app = start_civitas();

    let (status, body) = app.get("/credentials").await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_list_credentials_returns_everything() {
    let app = start_civitas();

    app.post("/credentials", new_credential("one@example.com")).await;
    app.post("/credentials", new_credential("two@example.com")).await;

    let (status, body) = app.get("/credentials").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_unknown_credential_is_not_found() {
    let app = start_civitas();

    let (status, body) = app.get("/credentials/no-such-credential").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 2101 /* CredentialNotFound */);
}

//
// Partial updates.
//

#[tokio::test]
async fn test_update_changes_only_the_named_fields() {
    let app = start_civitas();

    let (_, created) = app.post("/credentials", new_credential("ana@example.com")).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = app.put(&format!("/credentials/{}", id), json!({ "contrasenia": "changed" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["contrasenia"], "changed");
    assert_eq!(body["correo"], "ana@example.com");
    assert_eq!(body["intentosFallidos"], 0);
    assert_eq!(body["activo"], true);
}

#[tokio::test]
async fn test_update_with_a_null_body_is_rejected_before_the_lookup() {
    let app = start_civitas();

    let (status, body) = app.put("/credentials/no-such-credential", Value::Null).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2100 /* CredentialMandatory */);
}

#[tokio::test]
async fn test_update_unknown_credential_is_not_found() {
    let app = start_civitas();

    let (status, body) = app.put("/credentials/no-such-credential", json!({ "activo": false })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 2101 /* CredentialNotFound */);
}

#[tokio::test]
async fn test_update_accepts_resubmitting_the_own_correo() {
    let app = start_civitas();

    let (_, created) = app.post("/credentials", new_credential("ana@example.com")).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = app.put(&format!("/credentials/{}", id), json!({ "correo": "ana@example.com" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correo"], "ana@example.com");
}

#[tokio::test]
async fn test_update_rejects_a_correo_registered_to_another_credential() {
    let app = start_civitas();

    app.post("/credentials", new_credential("one@example.com")).await;
    let (_, created) = app.post("/credentials", new_credential("two@example.com")).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = app.put(&format!("/credentials/{}", id), json!({ "correo": "one@example.com" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2005 /* CorreoAlreadyExists */);
}

#[tokio::test]
async fn test_update_rejects_an_81_character_correo() {
    let app = start_civitas();

    let (_, created) = app.post("/credentials", new_credential("ana@example.com")).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = app.put(&format!("/credentials/{}", id),
        json!({ "correo": format!("{}@example.com", "a".repeat(69)) })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2004 /* CorreoTooLong */);
}

#[tokio::test]
async fn test_update_rejects_a_17_character_contrasenia() {
    let app = start_civitas();

    let (_, created) = app.post("/credentials", new_credential("ana@example.com")).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = app.put(&format!("/credentials/{}", id), json!({ "contrasenia": "p".repeat(17) })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2002 /* ContraseniaTooLong */);
}

#[tokio::test]
async fn test_update_only_touches_activo_when_it_was_sent() {
    let app = start_civitas();

    let (_, created) = app.post("/credentials", new_credential("ana@example.com")).await;
    let id = created["id"].as_str().unwrap();
    assert_eq!(created["activo"], true);

    // Not sent - unchanged.
    let (_, body) = app.put(&format!("/credentials/{}", id), json!({ "contrasenia": "changed" })).await;
    assert_eq!(body["activo"], true);

    // Sent as false - changed.
    let (_, body) = app.put(&format!("/credentials/{}", id), json!({ "activo": false })).await;
    assert_eq!(body["activo"], false);

    // Not sent again - stays false.
    let (_, body) = app.put(&format!("/credentials/{}", id), json!({})).await;
    assert_eq!(body["activo"], false);
}

//
// Deletion.
//

#[tokio::test]
async fn test_delete_credential_detaches_the_owning_citizen() {
    let app = start_civitas();

    let (_, created) = app.post("/citizens", new_citizen(12345678, 987654321, "maria@example.com")).await;
    let citizen_id = created["id"].as_str().unwrap();
    let credential_id = created["credencial"]["id"].as_str().unwrap();

    let (status, body) = app.delete(&format!("/credentials/{}", credential_id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Credential deleted");

    let (status, _) = app.get(&format!("/credentials/{}", credential_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The citizen lost the link but is otherwise untouched.
    let (status, body) = app.get(&format!("/citizens/{}", citizen_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["credencial"], Value::Null);
    assert_eq!(body["nombre"], "Maria");
}

#[tokio::test]
async fn test_delete_unknown_credential_is_not_found() {
    let app = start_civitas();

    let (status, body) = app.delete("/credentials/no-such-credential").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 2101 /* CredentialNotFound */);
}
