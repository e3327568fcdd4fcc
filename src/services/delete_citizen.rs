use crate::utils::context::ServiceContext;
use crate::utils::errors::{CivitasError, ErrorCode};

///
/// Delete the requested citizen.
///
/// The citizen exclusively owns its credential, so a linked credential is removed
/// with it.
///
pub async fn delete_citizen(ctx: &ServiceContext, citizen_id: &str) -> Result<(), CivitasError> {

    let citizen = match ctx.datastore().find_citizen(citizen_id).await? {
        Some(citizen) => citizen,
        None => return Err(ErrorCode::CitizenNotFound.with_msg("The citizen requested does not exist")),
    };

    ctx.datastore().delete_citizen(citizen_id).await?;

    if let Some(credencial_id) = &citizen.credencial_id {
        ctx.datastore().delete_credential(credencial_id).await?;
    }

    Ok(())
}
