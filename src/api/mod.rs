pub mod types;

mod citizens;
mod credentials;

use std::sync::Arc;
use axum::Router;
use axum::routing::{get, post};
use crate::utils::{context::ServiceContext, health};

///
/// Build the HTTP surface over the given context.
///
/// The integration tests drive this router directly, the binary serves it.
///
pub fn router(ctx: Arc<ServiceContext>) -> Router {
    Router::new()
        .route("/citizens", get(citizens::get_citizens).post(citizens::create_citizen))
        .route("/citizens/{id}", get(citizens::get_citizen).put(citizens::update_citizen).delete(citizens::delete_citizen))
        .route("/citizens/{id}/assign-credential/{credential_id}", post(citizens::assign_credential))
        .route("/credentials", get(credentials::get_credentials).post(credentials::create_credential))
        .route("/credentials/login", post(credentials::login))
        .route("/credentials/{id}", get(credentials::get_credential).put(credentials::update_credential).delete(credentials::delete_credential))
        .route("/health/liveness", get(health::liveness))
        .route("/health/readiness", get(health::readiness))
        .with_state(ctx)
}
