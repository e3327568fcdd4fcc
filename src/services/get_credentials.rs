use crate::api::types::Credential;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{CivitasError, ErrorCode};

///
/// Return every credential in the system.
///
pub async fn get_credentials(ctx: &ServiceContext) -> Result<Vec<Credential>, CivitasError> {

    let credentials = ctx.datastore().find_credentials().await?;

    Ok(credentials.into_iter().map(Credential::from).collect())
}

///
/// Load the requested credential.
///
pub async fn get_credential(ctx: &ServiceContext, credential_id: &str) -> Result<Credential, CivitasError> {

    match ctx.datastore().find_credential(credential_id).await? {
        Some(credential) => Ok(credential.into()),
        None => Err(ErrorCode::CredentialNotFound.with_msg("The credential requested does not exist")),
    }
}
