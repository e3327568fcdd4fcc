use chrono::Utc;
use crate::utils::generate_id;
use crate::model::citizen::CitizenDB;
use crate::api::types::{Citizen, NewCitizen};
use crate::services::create_credential;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{CivitasError, ErrorCode};
use super::{MAX_DV_CHARS, MAX_NAME_CHARS, MAX_RUN_DIGITS, MAX_TELEFONO_DIGITS};

///
/// Create a new citizen together with its credential.
///
/// Both entities are validated before either is written, so a rejected request
/// leaves nothing behind. The credential is written first and removed again if the
/// citizen write fails.
///
pub async fn create_citizen(ctx: &ServiceContext, new: NewCitizen) -> Result<Citizen, CivitasError> {

    let new_credencial = match new.credencial.clone() {
        Some(credencial) => credencial,
        None => return Err(ErrorCode::CredentialMandatory.with_msg("Please provide a credencial for the citizen")),
    };

    create_credential::validate_credential(&new_credencial)?;
    validate_citizen(ctx, &new).await?;

    let credential = create_credential::build_credential(new_credencial);

    if let Err(err) = ctx.datastore().save_credential(&credential).await {
        return match err.error_code() {
            ErrorCode::DuplicateKeyViolation => Err(ErrorCode::CorreoAlreadyInUse
                .with_msg("The correo of the credencial is already in use")),
            _ => Err(err),
        }
    }

    let citizen = CitizenDB {
        citizen_id: generate_id(),
        run: new.run.unwrap_or_default(),
        dv: new.dv.unwrap_or_default(),
        nombre: new.nombre.unwrap_or_default(),
        a_paterno: new.a_paterno.unwrap_or_default(),
        a_materno: new.a_materno.unwrap_or_default(),
        fecha_registro: bson::DateTime::from_chrono(new.fecha_registro.unwrap_or_else(Utc::now)),
        telefono: new.telefono.unwrap_or_default(),
        credencial_id: Some(credential.credential_id.clone()),
    };

    if let Err(err) = ctx.datastore().save_citizen(&citizen).await {
        // Compensate - the credential was written a moment ago and now has no owner.
        let _ = ctx.datastore().delete_credential(&credential.credential_id).await;
        return Err(err)
    }

    Ok((citizen, Some(credential)).into())
}

///
/// Check every creation rule, failing on the first one violated.
///
/// Pure except for the uniqueness lookups, which read through the gateway.
///
pub async fn validate_citizen(ctx: &ServiceContext, citizen: &NewCitizen) -> Result<(), CivitasError> {

    let run = match citizen.run {
        Some(run) => run,
        None => return Err(ErrorCode::RunMandatory.with_msg("The run is mandatory")),
    };

    if run <= 0 {
        return Err(ErrorCode::RunNotPositive.with_msg("The run must be a positive number"))
    }

    if run.to_string().len() > MAX_RUN_DIGITS {
        return Err(ErrorCode::RunTooLong.with_msg(&format!("The run exceeds the maximum of {} digits", MAX_RUN_DIGITS)))
    }

    if ctx.datastore().find_citizen_by_run(run).await?.is_some() {
        return Err(ErrorCode::RunAlreadyExists.with_msg("The run is already registered"))
    }

    match &citizen.dv {
        Some(dv) => {
            if dv.chars().count() > MAX_DV_CHARS {
                return Err(ErrorCode::DvTooLong.with_msg(&format!("The dv exceeds the maximum of {} character", MAX_DV_CHARS)))
            }
        },
        None => return Err(ErrorCode::DvMandatory.with_msg("The dv is mandatory")),
    }

    match &citizen.nombre {
        Some(nombre) => {
            if nombre.chars().count() > MAX_NAME_CHARS {
                return Err(ErrorCode::NombreTooLong.with_msg(&format!("The nombre exceeds the maximum of {} characters", MAX_NAME_CHARS)))
            }
        },
        None => return Err(ErrorCode::NombreMandatory.with_msg("The nombre is mandatory")),
    }

    match &citizen.a_paterno {
        Some(a_paterno) => {
            if a_paterno.chars().count() > MAX_NAME_CHARS {
                return Err(ErrorCode::APaternoTooLong.with_msg(&format!("The aPaterno exceeds the maximum of {} characters", MAX_NAME_CHARS)))
            }
        },
        None => return Err(ErrorCode::APaternoMandatory.with_msg("The aPaterno is mandatory")),
    }

    match &citizen.a_materno {
        Some(a_materno) => {
            if a_materno.chars().count() > MAX_NAME_CHARS {
                return Err(ErrorCode::AMaternoTooLong.with_msg(&format!("The aMaterno exceeds the maximum of {} characters", MAX_NAME_CHARS)))
            }
        },
        None => return Err(ErrorCode::AMaternoMandatory.with_msg("The aMaterno is mandatory")),
    }

    let telefono = match citizen.telefono {
        Some(telefono) => telefono,
        None => return Err(ErrorCode::TelefonoMandatory.with_msg("The telefono is mandatory")),
    };

    if telefono <= 0 {
        return Err(ErrorCode::TelefonoNotPositive.with_msg("The telefono must be a positive number"))
    }

    if telefono.to_string().len() > MAX_TELEFONO_DIGITS {
        return Err(ErrorCode::TelefonoTooLong.with_msg(&format!("The telefono exceeds the maximum of {} digits", MAX_TELEFONO_DIGITS)))
    }

    if ctx.datastore().find_citizen_by_telefono(telefono).await?.is_some() {
        return Err(ErrorCode::TelefonoAlreadyExists.with_msg("The telefono is already registered"))
    }

    if citizen.fecha_registro.is_none() {
        return Err(ErrorCode::FechaRegistroMandatory.with_msg("The fechaRegistro is mandatory"))
    }

    Ok(())
}
