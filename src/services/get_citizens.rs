use crate::api::types::Citizen;
use crate::model::citizen::CitizenDB;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{CivitasError, ErrorCode};

///
/// Return every citizen in the system.
///
/// There is no pagination - callers always get the full list in one batch.
///
pub async fn get_citizens(ctx: &ServiceContext) -> Result<Vec<Citizen>, CivitasError> {

    let mut citizens = vec![];
    for citizen in ctx.datastore().find_citizens().await? {
        citizens.push(resolve(ctx, citizen).await?);
    }

    Ok(citizens)
}

///
/// Load the requested citizen.
///
pub async fn get_citizen(ctx: &ServiceContext, citizen_id: &str) -> Result<Citizen, CivitasError> {

    match ctx.datastore().find_citizen(citizen_id).await? {
        Some(citizen) => resolve(ctx, citizen).await,
        None => Err(ErrorCode::CitizenNotFound.with_msg("The citizen requested does not exist")),
    }
}

///
/// Attach the citizen's credential (when it is linked to one) and convert to the
/// wire shape.
///
pub async fn resolve(ctx: &ServiceContext, citizen: CitizenDB) -> Result<Citizen, CivitasError> {

    let credencial = match &citizen.credencial_id {
        Some(credencial_id) => ctx.datastore().find_credential(credencial_id).await?,
        None => None,
    };

    Ok((citizen, credencial).into())
}
