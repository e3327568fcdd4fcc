use crate::utils::context::ServiceContext;
use crate::utils::errors::{CivitasError, ErrorCode};

///
/// Link an existing credential to an existing citizen.
///
/// Last assignment wins: if another citizen already references the credential, that
/// link is cleared so the credential is only ever referenced by one citizen.
///
pub async fn assign_credential(ctx: &ServiceContext, citizen_id: &str, credential_id: &str)
    -> Result<(), CivitasError> {

    let mut citizen = match ctx.datastore().find_citizen(citizen_id).await? {
        Some(citizen) => citizen,
        None => return Err(ErrorCode::CitizenNotFound.with_msg("The citizen requested does not exist")),
    };

    let credential = match ctx.datastore().find_credential(credential_id).await? {
        Some(credential) => credential,
        None => return Err(ErrorCode::CredentialNotFound.with_msg("The credential requested does not exist")),
    };

    if let Some(mut previous) = ctx.datastore().find_citizen_by_credencial(&credential.credential_id).await? {
        if previous.citizen_id != citizen.citizen_id {
            previous.credencial_id = None;
            ctx.datastore().save_citizen(&previous).await?;
        }
    }

    citizen.credencial_id = Some(credential.credential_id);
    ctx.datastore().save_citizen(&citizen).await?;

    Ok(())
}
