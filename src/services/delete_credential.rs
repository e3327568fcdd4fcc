use crate::utils::context::ServiceContext;
use crate::utils::errors::{CivitasError, ErrorCode};

///
/// Delete the requested credential.
///
/// A citizen may still point at it - that link is cleared first so no citizen is
/// left referencing a credential that no longer exists.
///
pub async fn delete_credential(ctx: &ServiceContext, credential_id: &str) -> Result<(), CivitasError> {

    if ctx.datastore().find_credential(credential_id).await?.is_none() {
        return Err(ErrorCode::CredentialNotFound.with_msg("The credential requested does not exist"))
    }

    if let Some(mut owner) = ctx.datastore().find_citizen_by_credencial(credential_id).await? {
        owner.credencial_id = None;
        ctx.datastore().save_citizen(&owner).await?;
    }

    ctx.datastore().delete_credential(credential_id).await?;

    Ok(())
}
