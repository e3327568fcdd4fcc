use crate::api::types::{Credential, CredentialPatch};
use crate::utils::context::ServiceContext;
use crate::utils::errors::{CivitasError, ErrorCode};
use super::{MAX_CONTRASENIA_CHARS, MAX_CORREO_CHARS};

///
/// Apply a partial update to an existing credential.
///
/// The activo flag is only changed when the caller sent a value - "not sent" and
/// "sent as false" are different things.
///
pub async fn update_credential(ctx: &ServiceContext, credential_id: &str, patch: Option<CredentialPatch>)
    -> Result<Credential, CivitasError> {

    // A null body is rejected before the id is even looked at.
    let patch = match patch {
        Some(patch) => patch,
        None => return Err(ErrorCode::CredentialMandatory.with_msg("Please provide the credential fields to update")),
    };

    let mut credential = match ctx.datastore().find_credential(credential_id).await? {
        Some(credential) => credential,
        None => return Err(ErrorCode::CredentialNotFound.with_msg("The credential requested does not exist")),
    };

    if let Some(contrasenia) = patch.contrasenia {
        if contrasenia.chars().count() > MAX_CONTRASENIA_CHARS {
            return Err(ErrorCode::ContraseniaTooLong.with_msg(&format!("The contrasenia exceeds the maximum of {} characters", MAX_CONTRASENIA_CHARS)))
        }

        credential.contrasenia = contrasenia;
    }

    if let Some(correo) = patch.correo {
        if let Some(other) = ctx.datastore().find_credential_by_correo(&correo).await? {
            if other.credential_id != credential.credential_id {
                return Err(ErrorCode::CorreoAlreadyExists.with_msg("The correo is already registered"))
            }
        }

        if correo.chars().count() > MAX_CORREO_CHARS {
            return Err(ErrorCode::CorreoTooLong.with_msg(&format!("The correo exceeds the maximum of {} characters", MAX_CORREO_CHARS)))
        }

        credential.correo = correo;
    }

    if let Some(activo) = patch.activo {
        credential.activo = activo;
    }

    if let Err(err) = ctx.datastore().save_credential(&credential).await {
        return match err.error_code() {
            ErrorCode::DuplicateKeyViolation => Err(ErrorCode::CorreoAlreadyInUse
                .with_msg("The correo is already in use, please use another")),
            _ => Err(err),
        }
    }

    Ok(credential.into())
}
