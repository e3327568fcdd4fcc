use std::sync::Arc;
use serde_json::json;
use tracing::instrument;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use crate::services;
use crate::utils::errors::CivitasError;
use crate::utils::context::ServiceContext;
use super::types::{Credential, CredentialPatch, Login, NewCredential};

///
/// List every stored credential, 204 when there are none.
///
#[instrument(skip(ctx))]
pub async fn get_credentials(State(ctx): State<Arc<ServiceContext>>) -> Result<Response, CivitasError> {
    let credentials = services::get_credentials::get_credentials(&ctx).await?;

    match credentials.is_empty() {
        true => Ok(StatusCode::NO_CONTENT.into_response()),
        false => Ok(Json(credentials).into_response()),
    }
}

#[instrument(skip(ctx))]
pub async fn get_credential(State(ctx): State<Arc<ServiceContext>>, Path(credential_id): Path<String>)
    -> Result<Json<Credential>, CivitasError> {

    let credential = services::get_credentials::get_credential(&ctx, &credential_id).await?;
    Ok(Json(credential))
}

///
/// Create a credential that is not yet attached to any citizen.
///
#[instrument(skip(ctx, new))]
pub async fn create_credential(State(ctx): State<Arc<ServiceContext>>, Json(new): Json<NewCredential>)
    -> Result<(StatusCode, Json<Credential>), CivitasError> {

    let credential = services::create_credential::create_credential(&ctx, new).await?;
    Ok((StatusCode::CREATED, Json(credential)))
}

#[instrument(skip(ctx, patch))]
pub async fn update_credential(
    State(ctx): State<Arc<ServiceContext>>,
    Path(credential_id): Path<String>,
    Json(patch): Json<Option<CredentialPatch>>)
    -> Result<Json<Credential>, CivitasError> {

    let credential = services::update_credential::update_credential(&ctx, &credential_id, patch).await?;
    Ok(Json(credential))
}

#[instrument(skip(ctx))]
pub async fn delete_credential(State(ctx): State<Arc<ServiceContext>>, Path(credential_id): Path<String>)
    -> Result<Json<serde_json::Value>, CivitasError> {

    services::delete_credential::delete_credential(&ctx, &credential_id).await?;
    Ok(Json(json!({ "message": "Credential deleted" })))
}

///
/// Check a correo and contrasenia pair against the stored credential.
///
/// A failed attempt bumps the credential's failure counter, so the response
/// is deliberately the same whether the correo is unknown or the password wrong.
///
#[instrument(skip(ctx, login))]
pub async fn login(State(ctx): State<Arc<ServiceContext>>, Json(login): Json<Login>)
    -> Result<Response, CivitasError> {

    match services::verify_credentials::verify_credentials(&ctx, &login).await? {
        true  => Ok(Json(json!({ "message": "Login successful" })).into_response()),
        false => Ok((StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid credentials" }))).into_response()),
    }
}
