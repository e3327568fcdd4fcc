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
use super::types::{Citizen, CitizenPatch, NewCitizen};

///
/// List every citizen with their credential attached.
///
/// An empty register responds with 204 and no body rather than an empty array.
///
#[instrument(skip(ctx))]
pub async fn get_citizens(State(ctx): State<Arc<ServiceContext>>) -> Result<Response, CivitasError> {
    let citizens = services::get_citizens::get_citizens(&ctx).await?;

    match citizens.is_empty() {
        true => Ok(StatusCode::NO_CONTENT.into_response()),
        false => Ok(Json(citizens).into_response()),
    }
}

#[instrument(skip(ctx))]
pub async fn get_citizen(State(ctx): State<Arc<ServiceContext>>, Path(citizen_id): Path<String>)
    -> Result<Json<Citizen>, CivitasError> {

    let citizen = services::get_citizens::get_citizen(&ctx, &citizen_id).await?;
    Ok(Json(citizen))
}

///
/// Register a citizen together with their login credential.
///
#[instrument(skip(ctx, new))]
pub async fn create_citizen(State(ctx): State<Arc<ServiceContext>>, Json(new): Json<NewCitizen>)
    -> Result<(StatusCode, Json<Citizen>), CivitasError> {

    let citizen = services::create_citizen::create_citizen(&ctx, new).await?;
    Ok((StatusCode::CREATED, Json(citizen)))
}

///
/// Apply any fields present in the patch to the stored citizen.
///
/// The patch may be a JSON null, the service rejects that before looking at the id.
///
#[instrument(skip(ctx, patch))]
pub async fn update_citizen(
    State(ctx): State<Arc<ServiceContext>>,
    Path(citizen_id): Path<String>,
    Json(patch): Json<Option<CitizenPatch>>)
    -> Result<Json<Citizen>, CivitasError> {

    let citizen = services::update_citizen::update_citizen(&ctx, &citizen_id, patch).await?;
    Ok(Json(citizen))
}

#[instrument(skip(ctx))]
pub async fn delete_citizen(State(ctx): State<Arc<ServiceContext>>, Path(citizen_id): Path<String>)
    -> Result<Json<serde_json::Value>, CivitasError> {

    services::delete_citizen::delete_citizen(&ctx, &citizen_id).await?;
    Ok(Json(json!({ "message": "Citizen deleted" })))
}

///
/// Attach an existing credential to an existing citizen.
///
#[instrument(skip(ctx))]
pub async fn assign_credential(
    State(ctx): State<Arc<ServiceContext>>,
    Path((citizen_id, credential_id)): Path<(String, String)>)
    -> Result<Json<serde_json::Value>, CivitasError> {

    services::assign_credential::assign_credential(&ctx, &citizen_id, &credential_id).await?;
    Ok(Json(json!({ "message": "Credential assigned to citizen" })))
}
