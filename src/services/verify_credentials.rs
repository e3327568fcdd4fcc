use crate::api::types::Login;
use crate::utils::context::ServiceContext;
use crate::utils::errors::CivitasError;

///
/// Check a login attempt against the stored credential.
///
/// An unknown correo is reported the same way as a wrong contrasenia so callers
/// cannot probe which emails are registered. Every mismatch bumps the stored
/// failed-attempt counter; a match changes nothing.
///
/// Note the comparison is against the stored plaintext value. That is the contract
/// this service exposes today - a salted hash is what a production system should
/// store instead.
///
pub async fn verify_credentials(ctx: &ServiceContext, login: &Login) -> Result<bool, CivitasError> {

    let mut credential = match ctx.datastore().find_credential_by_correo(&login.correo).await? {
        Some(credential) => credential,
        None => return Ok(false),
    };

    if login.contrasenia == credential.contrasenia {
        return Ok(true)
    }

    credential.intentos_fallidos += 1;
    ctx.datastore().save_credential(&credential).await?;

    Ok(false)
}
