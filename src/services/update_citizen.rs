use crate::api::types::{Citizen, CitizenPatch};
use crate::services::get_citizens;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{CivitasError, ErrorCode};
use super::{MAX_DV_CHARS, MAX_NAME_CHARS, MAX_RUN_DIGITS, MAX_TELEFONO_DIGITS};

///
/// Apply a partial update to an existing citizen.
///
/// Only the fields sent are validated and overwritten, everything omitted keeps its
/// stored value. The uniqueness checks ignore the citizen being updated, so
/// resubmitting the current run or telefono is a no-op rather than a failure.
///
pub async fn update_citizen(ctx: &ServiceContext, citizen_id: &str, patch: Option<CitizenPatch>)
    -> Result<Citizen, CivitasError> {

    // A null body is rejected before the id is even looked at.
    let patch = match patch {
        Some(patch) => patch,
        None => return Err(ErrorCode::CitizenMandatory.with_msg("Please provide the citizen fields to update")),
    };

    let mut citizen = match ctx.datastore().find_citizen(citizen_id).await? {
        Some(citizen) => citizen,
        None => return Err(ErrorCode::CitizenNotFound.with_msg("The citizen requested does not exist")),
    };

    if let Some(nombre) = patch.nombre {
        if nombre.chars().count() > MAX_NAME_CHARS {
            return Err(ErrorCode::NombreTooLong.with_msg(&format!("The nombre exceeds the maximum of {} characters", MAX_NAME_CHARS)))
        }

        citizen.nombre = nombre;
    }

    if let Some(telefono) = patch.telefono {
        if let Some(other) = ctx.datastore().find_citizen_by_telefono(telefono).await? {
            if other.citizen_id != citizen.citizen_id {
                return Err(ErrorCode::TelefonoAlreadyExists.with_msg("The telefono is already registered"))
            }
        }

        if telefono.to_string().len() > MAX_TELEFONO_DIGITS {
            return Err(ErrorCode::TelefonoTooLong.with_msg(&format!("The telefono exceeds the maximum of {} digits", MAX_TELEFONO_DIGITS)))
        }

        citizen.telefono = telefono;
    }

    if let Some(run) = patch.run {
        if let Some(other) = ctx.datastore().find_citizen_by_run(run).await? {
            if other.citizen_id != citizen.citizen_id {
                return Err(ErrorCode::RunAlreadyExists.with_msg("The run is already registered"))
            }
        }

        if run.to_string().len() > MAX_RUN_DIGITS {
            return Err(ErrorCode::RunTooLong.with_msg(&format!("The run exceeds the maximum of {} digits", MAX_RUN_DIGITS)))
        }

        citizen.run = run;
    }

    if let Some(dv) = patch.dv {
        if dv.chars().count() > MAX_DV_CHARS {
            return Err(ErrorCode::DvTooLong.with_msg(&format!("The dv exceeds the maximum of {} character", MAX_DV_CHARS)))
        }

        citizen.dv = dv;
    }

    if let Some(a_paterno) = patch.a_paterno {
        if a_paterno.chars().count() > MAX_NAME_CHARS {
            return Err(ErrorCode::APaternoTooLong.with_msg(&format!("The aPaterno exceeds the maximum of {} characters", MAX_NAME_CHARS)))
        }

        citizen.a_paterno = a_paterno;
    }

    if let Some(a_materno) = patch.a_materno {
        if a_materno.chars().count() > MAX_NAME_CHARS {
            return Err(ErrorCode::AMaternoTooLong.with_msg(&format!("The aMaterno exceeds the maximum of {} characters", MAX_NAME_CHARS)))
        }

        citizen.a_materno = a_materno;
    }

    // Copied with no validation.
    if let Some(fecha_registro) = patch.fecha_registro {
        citizen.fecha_registro = bson::DateTime::from_chrono(fecha_registro);
    }

    ctx.datastore().save_citizen(&citizen).await?;

    get_citizens::resolve(ctx, citizen).await
}
