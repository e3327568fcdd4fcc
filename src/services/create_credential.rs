use crate::utils::generate_id;
use crate::model::credential::CredentialDB;
use crate::api::types::{Credential, NewCredential};
use crate::utils::context::ServiceContext;
use crate::utils::errors::{CivitasError, ErrorCode};
use super::{MAX_CONTRASENIA_CHARS, MAX_CORREO_CHARS};

///
/// Create a new standalone credential. It can be linked to a citizen later via the
/// assignment operation.
///
/// Uniqueness of the correo is not checked here - a clash surfaces from the storage
/// layer as a duplicate key violation and is reported as a conflict.
///
pub async fn create_credential(ctx: &ServiceContext, new: NewCredential) -> Result<Credential, CivitasError> {

    validate_credential(&new)?;

    let credential = build_credential(new);

    if let Err(err) = ctx.datastore().save_credential(&credential).await {
        return match err.error_code() {
            ErrorCode::DuplicateKeyViolation => Err(ErrorCode::CorreoAlreadyInUse
                .with_msg("The correo is already in use, please use another")),
            _ => Err(err),
        }
    }

    Ok(credential.into())
}

///
/// Check every creation rule, failing on the first one violated.
///
pub fn validate_credential(credential: &NewCredential) -> Result<(), CivitasError> {

    if credential.intentos_fallidos.unwrap_or(0) < 0 {
        return Err(ErrorCode::IntentosFallidosNegative.with_msg("The intentosFallidos must not be a negative number"))
    }

    match &credential.contrasenia {
        Some(contrasenia) => {
            if contrasenia.chars().count() > MAX_CONTRASENIA_CHARS {
                return Err(ErrorCode::ContraseniaTooLong.with_msg(&format!("The contrasenia exceeds the maximum of {} characters", MAX_CONTRASENIA_CHARS)))
            }
        },
        None => return Err(ErrorCode::ContraseniaMandatory.with_msg("The contrasenia is mandatory")),
    }

    match &credential.correo {
        Some(correo) => {
            if correo.chars().count() > MAX_CORREO_CHARS {
                return Err(ErrorCode::CorreoTooLong.with_msg(&format!("The correo exceeds the maximum of {} characters", MAX_CORREO_CHARS)))
            }
        },
        None => return Err(ErrorCode::CorreoMandatory.with_msg("The correo is mandatory")),
    }

    Ok(())
}

///
/// Build the persisted form of a validated request. The counter starts at zero
/// unless the caller provided one and the active flag defaults to off.
///
pub fn build_credential(new: NewCredential) -> CredentialDB {
    CredentialDB {
        credential_id: generate_id(),
        correo: new.correo.unwrap_or_default(),
        contrasenia: new.contrasenia.unwrap_or_default(),
        intentos_fallidos: new.intentos_fallidos.unwrap_or(0),
        activo: new.activo.unwrap_or(false),
    }
}
